//! Services for turning a name into a greeting.

use crate::{
    feature::greeting::greeting_repository::Greeting,
    infra::error::{ApiResult, InternalError},
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::instrument;

/// Anything that can turn a name into a greeting.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GreetingService: Send + Sync {
    /// Returns a greeting for the given name.
    async fn greeting(&self, name: Option<String>) -> ApiResult<String>;
}

/// Greets by putting a fixed prefix in front of the name.
#[derive(Clone, Debug)]
pub struct PrefixGreetingService {
    prefix: String,
}

impl PrefixGreetingService {
    /// Constructs a new service with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns a greeting based on someone's name.
    pub fn greet(&self, name: Option<&str>) -> String {
        match name {
            Some(name) => format!("{} {}", self.prefix, name),
            None => self.prefix.clone(),
        }
    }
}

impl Default for PrefixGreetingService {
    fn default() -> Self {
        Self::new("Hello")
    }
}

#[async_trait]
impl GreetingService for PrefixGreetingService {
    #[instrument(ret)]
    async fn greeting(&self, name: Option<String>) -> ApiResult<String> {
        Ok(self.greet(name.as_deref()))
    }
}

/// Asks a remote HTTP service for the greeting.
///
/// The remote service receives and answers with a JSON [`Greeting`].
#[derive(Clone, Debug)]
pub struct RemoteGreetingService {
    client: reqwest::Client,
    url: String,
}

impl RemoteGreetingService {
    /// Constructs a new service calling `url`, giving up after `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl GreetingService for RemoteGreetingService {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn greeting(&self, name: Option<String>) -> ApiResult<String> {
        tracing::info!("Sending greeting request");
        let res = self
            .client
            .post(&self.url)
            .json(&Greeting { name })
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            tracing::error!("Received response: {}", status);
            return Err(InternalError::IntegrationError(format!(
                "greeting service responded with {status}"
            ))
            .into());
        }
        let greeting: Greeting = res.json().await?;
        tracing::info!("Received greeting: {:?}", greeting);
        greeting.name.ok_or_else(|| {
            InternalError::IntegrationError("greeting service returned no name".to_string())
                .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::error::ApiError;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use tokio::net::TcpListener;

    async fn spawn_remote(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move { axum::serve(listener, router).await });
        format!("http://127.0.0.1:{port}/greeting")
    }

    #[tokio::test]
    async fn prefix_is_put_in_front_of_name() {
        let service = PrefixGreetingService::default();
        let greeting = service.greeting(Some("World".to_string())).await.unwrap();
        assert_eq!("Hello World", greeting);
    }

    #[tokio::test]
    async fn empty_and_missing_names_are_passed_through() {
        let service = PrefixGreetingService::new("Hi");
        assert_eq!("Hi ", service.greeting(Some(String::new())).await.unwrap());
        assert_eq!("Hi", service.greeting(None).await.unwrap());
    }

    #[tokio::test]
    async fn remote_service_returns_remote_name() {
        let router = Router::new().route(
            "/greeting",
            post(|Json(g): Json<Greeting>| async move {
                Json(Greeting::new(format!("Howdy {}", g.name.unwrap_or_default())))
            }),
        );
        let url = spawn_remote(router).await;
        let service = RemoteGreetingService::new(url, Duration::from_secs(5)).unwrap();
        let greeting = service.greeting(Some("World".to_string())).await.unwrap();
        assert_eq!("Howdy World", greeting);
    }

    #[tokio::test]
    async fn remote_failure_is_integration_error() {
        let router = Router::new().route(
            "/greeting",
            post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let url = spawn_remote(router).await;
        let service = RemoteGreetingService::new(url, Duration::from_secs(5)).unwrap();
        let error = service.greeting(Some("World".to_string())).await.unwrap_err();
        assert!(matches!(
            error,
            ApiError::InternalError(InternalError::IntegrationError(_))
        ));
    }

    #[tokio::test]
    async fn remote_without_name_is_integration_error() {
        let router = Router::new().route(
            "/greeting",
            post(|| async { Json(Greeting { name: None }) }),
        );
        let url = spawn_remote(router).await;
        let service = RemoteGreetingService::new(url, Duration::from_secs(5)).unwrap();
        let error = service.greeting(None).await.unwrap_err();
        assert!(matches!(
            error,
            ApiError::InternalError(InternalError::IntegrationError(_))
        ));
    }
}
