//! The axum application.
//!
//! # Examples
//!
//! Listing the stored greetings.
//!
//! ```rust
//! # use greeting_endpoint::feature::greeting::greeting_repository::Greeting;
//! # use greeting_endpoint::infra::{config::Config, state::AppState};
//! # tokio_test::block_on(async {
//! # let config = Config::default();
//! # let state = AppState::from_config(&config.greeting).unwrap();
//! # let url = greeting_endpoint::app::spawn_app(state, config.server).await.unwrap();
//! let response = reqwest::get(format!("{}/HttpExample", url)).await.unwrap();
//! assert_eq!(200, response.status());
//! assert_eq!(
//!     vec![Greeting::new("Apple"), Greeting::new("Pineapple")],
//!     response.json::<Vec<Greeting>>().await.unwrap()
//! );
//! # });
//! ```
//!
//! Greeting someone.
//!
//! ```rust
//! # use greeting_endpoint::feature::greeting::greeting_repository::Greeting;
//! # use greeting_endpoint::infra::{config::Config, state::AppState};
//! # tokio_test::block_on(async {
//! # let config = Config::default();
//! # let state = AppState::from_config(&config.greeting).unwrap();
//! # let url = greeting_endpoint::app::spawn_app(state, config.server).await.unwrap();
//! let client = reqwest::Client::new();
//! let response = client
//!     .post(format!("{}/HttpExample", url))
//!     .json(&Greeting::new("World"))
//!     .send()
//!     .await
//!     .unwrap();
//! assert_eq!(200, response.status());
//! assert_eq!(Greeting::new("Hello World"), response.json::<Greeting>().await.unwrap());
//! # });
//! ```

use crate::infra::{
    config::ServerConfig,
    error::{InternalError, PanicHandler},
    middleware::{log_request_response, MakeRequestIdSpan},
    openapi::ApiDoc,
    shutdown::shutdown_signal,
    state::AppState,
};
use axum::{error_handling::HandleErrorLayer, response::IntoResponse, Router};
use http::header::AUTHORIZATION;
use std::iter;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

/// Constructs the full axum application.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    // Fallible middleware from tower, mapped to infallible response with [`HandleErrorLayer`].
    let tower_middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|e| async move {
            InternalError::Other(format!("Tower middleware failed: {e}")).into_response()
        }))
        .concurrency_limit(config.concurrency_limit);

    Router::new()
        .merge(SwaggerUi::new("/api/swagger-ui").url("/api/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/api/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new("/api/openapi.json").path("/api/rapidoc"))
        .merge(crate::feature::api(state))
        // Layers
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(axum::middleware::from_fn(log_request_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(MakeRequestIdSpan)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(()),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(SetSensitiveRequestHeadersLayer::new(iter::once(
            AUTHORIZATION,
        )))
        .layer(tower_middleware)
        .layer(CatchPanicLayer::custom(PanicHandler))
}

/// Starts the axum server.
pub async fn run_app(
    listener: TcpListener,
    state: AppState,
    config: ServerConfig,
) -> std::io::Result<()> {
    let app = app(state, &config);

    tracing::info!("Starting axum on {}", listener.local_addr()?);
    let exit_result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    match &exit_result {
        Ok(_) => tracing::info!("Successfully shut down"),
        Err(e) => tracing::error!("Shutdown failed: {}", e),
    }

    exit_result
}

/// Spawn a server on a random port, returning its base url.
pub async fn spawn_app(state: AppState, config: ServerConfig) -> std::io::Result<String> {
    let address = "127.0.0.1";
    let listener = TcpListener::bind(format!("{address}:0")).await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(run_app(listener, state, config));
    Ok(format!("http://{address}:{port}"))
}
