//! Connection configuration
//!
//! Settings for reaching an ArangoDB server: endpoint, target database,
//! credentials, and the transport knobs that belong to this layer. Any
//! timeout configured here applies per request inside `reqwest`; nothing
//! above the transport retries or cancels.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::time::Duration;

/// Configuration for a database connection
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Base URL of the server, e.g. `http://localhost:8529`
    pub endpoint: String,
    /// Name of the database all requests target
    pub database: String,
    /// Optional basic auth credentials (username, password)
    pub credentials: Option<(String, String)>,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8529".to_string(),
            database: "_system".to_string(),
            credentials: None,
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("arango-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ConnectionConfig {
    /// Create a new config builder
    pub fn builder() -> ConnectionConfigBuilder {
        ConnectionConfigBuilder::default()
    }
}

/// Builder for connection config
#[derive(Default)]
pub struct ConnectionConfigBuilder {
    config: ConnectionConfig,
}

impl ConnectionConfigBuilder {
    /// Set the server endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Set the target database name
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.config.database = database.into();
        self
    }

    /// Set basic auth credentials
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.credentials = Some((username.into(), password.into()));
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config, validating required fields
    pub fn build(self) -> Result<ConnectionConfig> {
        if self.config.endpoint.is_empty() {
            return Err(Error::config("endpoint must not be empty"));
        }
        if self.config.database.is_empty() {
            return Err(Error::config("database name must not be empty"));
        }
        Ok(self.config)
    }
}
