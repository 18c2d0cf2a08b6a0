//! Job server connection settings

/// Where the job server lives and how to authenticate against it
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Server base URL (e.g., "https://ci.example.com/")
    pub base_url: String,
    /// User the API token belongs to
    pub username: String,
    /// API token used as the basic-auth password
    pub token: Option<String>,
}

impl ServerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Sets basic-auth credentials
    pub fn with_credentials(mut self, username: impl Into<String>, token: impl Into<String>) -> Self {
        self.username = username.into();
        self.token = Some(token.into());
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.base_url.is_empty() {
            anyhow::bail!("base_url cannot be empty");
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!("base_url must start with http:// or https://");
        }

        if self.token.is_some() && self.username.is_empty() {
            anyhow::bail!("username is required when a token is set");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let mut config = ServerConfig::new("http://ci.local:8080/");
        assert!(config.validate().is_ok());

        config.base_url = "ci.local".to_string();
        assert!(config.validate().is_err());

        config.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_token_requires_username() {
        let mut config = ServerConfig::new("https://ci.local").with_credentials("bot", "t0k3n");
        assert!(config.validate().is_ok());

        config.username = String::new();
        assert!(config.validate().is_err());
    }
}
