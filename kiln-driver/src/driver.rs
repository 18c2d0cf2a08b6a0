//! Build driver
//!
//! Takes one build through submission, queue-wait and run-wait, in that
//! order and never backwards. Each phase polls the job server through the
//! shared [`retry`] helper and hands its result to the next phase.

use kiln_client::JobServer;
use kiln_core::domain::{BuildInfo, BuildRequest, QueueTicket, RunHandle};
use kiln_core::event::{ABORTED, BuildOutcome, LifecycleEvent};
use serde_json::Value;
use std::sync::Arc;
use tokio::time;
use tracing::{debug, info};

use crate::config::DriverConfig;
use crate::error::{DriverError, Phase};
use crate::observer::BuildObserver;
use crate::retry::retry;

/// How the queue-wait phase ended
enum QueueExit {
    /// Cancelled before an executor picked it up
    Cancelled(Value),
    /// Turned into a run with this number
    Started(u64),
}

/// Drives builds on a job server
///
/// The driver itself holds no per-build state; concurrent `run_build` calls
/// on one driver are independent.
pub struct BuildDriver {
    server: Arc<dyn JobServer>,
    config: DriverConfig,
}

impl BuildDriver {
    /// Creates a driver with the default retry budget and poll intervals
    pub fn new(server: Arc<dyn JobServer>) -> Self {
        Self::with_config(server, DriverConfig::default())
    }

    pub fn with_config(server: Arc<dyn JobServer>, config: DriverConfig) -> Self {
        Self { server, config }
    }

    /// Runs a build to completion
    ///
    /// Resolves once the build finished (including being cancelled while
    /// queued, reported as `ABORTED`) or once a phase failed. Dropping the
    /// returned future stops observing the build; the build itself keeps
    /// running on the server.
    pub async fn run_build(
        &self,
        request: &BuildRequest,
        observer: &mut dyn BuildObserver,
    ) -> Result<BuildOutcome, DriverError> {
        info!(
            "Starting build of {} with {} parameter(s)",
            request.job,
            request.parameters.len()
        );

        let ticket = self.submit(request).await?;
        info!("Build of {} queued as {}", request.job, ticket);
        observer.on_event(&LifecycleEvent::Queued { ticket });

        let number = match self.wait_in_queue(ticket).await? {
            QueueExit::Started(number) => number,
            QueueExit::Cancelled(payload) => {
                info!("Queue item {} was cancelled before starting", ticket);
                observer.on_event(&LifecycleEvent::Finished {
                    number: None,
                    result: ABORTED.to_string(),
                    payload: Some(payload),
                });
                return Ok(BuildOutcome {
                    run: None,
                    result: ABORTED.to_string(),
                });
            }
        };

        let run = RunHandle::new(request.job.clone(), number);
        info!("Queue item {} started as {}", ticket, run);

        self.wait_for_run(run, observer).await
    }

    /// Phase 1: trigger the build
    async fn submit(&self, request: &BuildRequest) -> Result<QueueTicket, DriverError> {
        retry(&self.config.retry, Phase::Submission, || {
            self.server.start_job(request)
        })
        .await
    }

    /// Phase 2: poll the queue item until it starts or is cancelled
    async fn wait_in_queue(&self, ticket: QueueTicket) -> Result<QueueExit, DriverError> {
        loop {
            let item = retry(&self.config.retry, Phase::QueueWait, || {
                self.server.queue_item(ticket)
            })
            .await?;

            // A cancelled item wins even if an executable was already assigned.
            if item.cancelled {
                return Ok(QueueExit::Cancelled(item.raw));
            }

            if let Some(executable) = &item.executable {
                let number = executable.number.ok_or_else(|| DriverError::ContractViolation {
                    phase: Phase::QueueWait,
                    message: format!("queue item {} has an executable without a run number", ticket),
                })?;
                return Ok(QueueExit::Started(number));
            }

            debug!(
                "Queue item {} still waiting: {}",
                ticket,
                item.why.as_deref().unwrap_or("no reason given")
            );

            time::sleep(self.config.queue_poll_interval).await;
        }
    }

    /// Phase 3: poll the run until it stops building
    async fn wait_for_run(
        &self,
        run: RunHandle,
        observer: &mut dyn BuildObserver,
    ) -> Result<BuildOutcome, DriverError> {
        let mut started = false;

        loop {
            let info = retry(&self.config.retry, Phase::RunWait, || {
                self.server.build_info(&run)
            })
            .await?;

            let number = required(info.number, &run, "number")?;

            if !started {
                let url = required(info.url.clone(), &run, "url")?;
                observer.on_event(&LifecycleEvent::Started {
                    number,
                    url,
                    payload: info.raw.clone(),
                });
                started = true;
            }

            if !required(info.building, &run, "building")? {
                return finish(&run, number, info, observer);
            }

            time::sleep(self.config.run_poll_interval).await;
        }
    }
}

/// Emits `Finished` for a run that stopped building
///
/// A stopped run must report its result; one without is a protocol error.
fn finish(
    run: &RunHandle,
    number: u64,
    info: BuildInfo,
    observer: &mut dyn BuildObserver,
) -> Result<BuildOutcome, DriverError> {
    let result = info.result.ok_or_else(|| DriverError::ContractViolation {
        phase: Phase::RunWait,
        message: format!("build {} stopped building without a result", run),
    })?;

    info!("Build {} finished: {}", run, result);
    observer.on_event(&LifecycleEvent::Finished {
        number: Some(number),
        result: result.clone(),
        payload: Some(info.raw),
    });

    Ok(BuildOutcome {
        run: Some(RunHandle::new(run.job.clone(), number)),
        result,
    })
}

fn required<T>(value: Option<T>, run: &RunHandle, field: &str) -> Result<T, DriverError> {
    value.ok_or_else(|| DriverError::ContractViolation {
        phase: Phase::RunWait,
        message: format!("build {} response has no {:?} field", run, field),
    })
}
