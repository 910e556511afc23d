//! Global application state.
//!
//! Used for access to common resources such as
//! the stored greetings and the greeting service.

use super::{
    config::{GreetingConfig, GreetingServiceKind},
    error::ApiResult,
};
use crate::feature::greeting::{
    greeting_endpoint::GreetingEndpoint,
    greeting_repository::GreetingRepository,
    greeting_service::{GreetingService, PrefixGreetingService, RemoteGreetingService},
};
use axum::extract::FromRef;
use std::sync::Arc;

/// Global application state.
#[derive(Clone, Debug, FromRef)]
pub struct AppState {
    greetings: GreetingEndpoint,
}

impl AppState {
    /// Constructs a new [`AppState`].
    pub fn new(greetings: GreetingEndpoint) -> Self {
        Self { greetings }
    }

    /// Constructs a new [`AppState`] with the configured seed and greeting service.
    pub fn from_config(config: &GreetingConfig) -> ApiResult<Self> {
        let service: Arc<dyn GreetingService> = match config.service.kind {
            GreetingServiceKind::Prefix => {
                Arc::new(PrefixGreetingService::new(config.service.prefix.clone()))
            }
            GreetingServiceKind::Remote => Arc::new(RemoteGreetingService::new(
                config.service.url.clone(),
                config.service.timeout,
            )?),
        };
        tracing::info!("Using {:?} greeting service", config.service.kind);
        let repository = GreetingRepository::with_seed(config.seed.iter().cloned());
        Ok(Self::new(GreetingEndpoint::new(repository, service)))
    }

    /// Returns the greeting endpoint.
    pub fn greetings(&self) -> &GreetingEndpoint {
        &self.greetings
    }
}
