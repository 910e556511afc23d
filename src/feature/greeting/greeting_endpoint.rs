//! The greeting endpoint: lists stored greetings and greets new names.

use crate::{
    feature::greeting::{
        greeting_repository::{Greeting, GreetingRepository},
        greeting_service::GreetingService,
    },
    infra::error::ApiResult,
};
use std::{fmt::Debug, sync::Arc};
use tracing::instrument;

/// Owns the stored greetings and the service used to greet new names.
#[derive(Clone)]
pub struct GreetingEndpoint {
    repository: Arc<GreetingRepository>,
    service: Arc<dyn GreetingService>,
}

impl Debug for GreetingEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreetingEndpoint")
            .field("repository", &self.repository)
            .finish_non_exhaustive()
    }
}

impl GreetingEndpoint {
    /// Constructs a new endpoint.
    pub fn new(repository: GreetingRepository, service: Arc<dyn GreetingService>) -> Self {
        Self {
            repository: Arc::new(repository),
            service,
        }
    }

    /// The stored greetings.
    pub fn repository(&self) -> &GreetingRepository {
        &self.repository
    }

    /// Lists all stored greetings in insertion order.
    #[instrument(skip(self))]
    pub fn list(&self) -> Vec<Greeting> {
        self.repository.list()
    }

    /// Replaces the greeting's name with a greeting for that name.
    ///
    /// The result is not stored.
    #[instrument(skip(self))]
    pub async fn hello(&self, mut greeting: Greeting) -> ApiResult<Greeting> {
        let name = greeting.name.take();
        greeting.name = Some(self.service.greeting(name).await?);
        Ok(greeting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        feature::greeting::greeting_service::{MockGreetingService, PrefixGreetingService},
        infra::error::{ApiError, InternalError},
    };

    fn endpoint(service: impl GreetingService + 'static) -> GreetingEndpoint {
        GreetingEndpoint::new(
            GreetingRepository::with_seed(["Apple", "Pineapple"]),
            Arc::new(service),
        )
    }

    #[test]
    fn lists_seeded_greetings() {
        let endpoint = endpoint(PrefixGreetingService::default());
        assert_eq!(
            vec![Greeting::new("Apple"), Greeting::new("Pineapple")],
            endpoint.list()
        );
    }

    #[tokio::test]
    async fn hello_uses_service_output() {
        let mut service = MockGreetingService::new();
        service
            .expect_greeting()
            .withf(|name| name.as_deref() == Some("X"))
            .times(1)
            .returning(|name| Ok(format!("transformed {}", name.unwrap_or_default())));
        let endpoint = endpoint(service);

        let greeting = endpoint.hello(Greeting::new("X")).await.unwrap();

        assert_eq!(Greeting::new("transformed X"), greeting);
    }

    #[tokio::test]
    async fn hello_does_not_store_anything() {
        let endpoint = endpoint(PrefixGreetingService::default());
        let before = endpoint.list();

        let greeting = endpoint.hello(Greeting::new("World")).await.unwrap();

        assert_eq!(Greeting::new("Hello World"), greeting);
        assert_eq!(before, endpoint.list());
    }

    #[tokio::test]
    async fn hello_passes_missing_name_to_service() {
        let mut service = MockGreetingService::new();
        service
            .expect_greeting()
            .withf(|name| name.is_none())
            .returning(|_| Ok("nobody".to_string()));
        let endpoint = endpoint(service);

        let greeting = endpoint.hello(Greeting::default()).await.unwrap();

        assert_eq!(Some("nobody"), greeting.name());
    }

    #[tokio::test]
    async fn hello_propagates_service_errors() {
        let mut service = MockGreetingService::new();
        service.expect_greeting().returning(|_| {
            Err(InternalError::IntegrationError("unavailable".to_string()).into())
        });
        let endpoint = endpoint(service);

        let error = endpoint.hello(Greeting::new("World")).await.unwrap_err();

        assert!(matches!(
            error,
            ApiError::InternalError(InternalError::IntegrationError(_))
        ));
        assert_eq!(2, endpoint.repository().len());
    }
}
