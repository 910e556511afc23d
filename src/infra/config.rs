//! For reading application configuration.

use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Greeting configuration.
    pub greeting: GreetingConfig,
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server address.
    pub http_address: String,
    /// Server http port.
    pub http_port: u16,
    /// How long a request may take before it is answered with a timeout.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Maximum number of requests processed at the same time.
    pub concurrency_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_address: "127.0.0.1".to_string(),
            http_port: 8080,
            request_timeout: Duration::from_secs(10),
            concurrency_limit: 500,
        }
    }
}

/// Greeting configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GreetingConfig {
    /// The names stored when the application starts.
    pub seed: Vec<String>,
    /// The service used to transform names.
    pub service: GreetingServiceConfig,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            seed: vec!["Apple".to_string(), "Pineapple".to_string()],
            service: GreetingServiceConfig::default(),
        }
    }
}

/// Which greeting service implementation to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GreetingServiceKind {
    /// Greets locally by prefixing the name.
    #[default]
    Prefix,
    /// Asks a remote HTTP service for the greeting.
    Remote,
}

/// Greeting service configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GreetingServiceConfig {
    /// The implementation to use.
    pub kind: GreetingServiceKind,
    /// The prefix used by the local service.
    pub prefix: String,
    /// The endpoint of the remote service.
    pub url: String,
    /// Timeout for calls to the remote service.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for GreetingServiceConfig {
    fn default() -> Self {
        Self {
            kind: GreetingServiceKind::default(),
            prefix: "Hello".to_string(),
            url: "http://localhost:8081/greeting".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Retrieve [`Config`] from the default configuration file and the environment.
#[tracing::instrument]
pub fn load_config() -> color_eyre::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(
            config::Environment::with_prefix("app")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("greeting.seed"),
        )
        .build()?
        .try_deserialize()?;
    Ok(config)
}
