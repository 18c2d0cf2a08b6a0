//! Lifecycle event sinks

use kiln_core::event::LifecycleEvent;

/// Receives lifecycle events as a build is driven
///
/// Events arrive in order: one `Queued`, at most one `Started`, then one
/// `Finished` when the build completes.
pub trait BuildObserver: Send {
    fn on_event(&mut self, event: &LifecycleEvent);
}

impl<F> BuildObserver for F
where
    F: FnMut(&LifecycleEvent) + Send,
{
    fn on_event(&mut self, event: &LifecycleEvent) {
        self(event)
    }
}

/// Observer that keeps every event it receives
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<LifecycleEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[LifecycleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<LifecycleEvent> {
        self.events
    }
}

impl BuildObserver for EventLog {
    fn on_event(&mut self, event: &LifecycleEvent) {
        self.events.push(event.clone());
    }
}
