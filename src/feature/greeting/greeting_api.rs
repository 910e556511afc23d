//! The greeting API implementation.

use crate::{
    feature::greeting::{greeting_endpoint::GreetingEndpoint, greeting_repository::Greeting},
    infra::{
        error::{ApiResult, ErrorBody},
        extract::Json,
        state::AppState,
    },
};
use axum::{extract::State, routing::get, Router};
use tracing::instrument;

/// The greeting API endpoints.
pub fn routes() -> Router<AppState> {
    Router::new().route("/HttpExample", get(list_greetings).post(hello))
}

/// Lists all stored greetings.
#[utoipa::path(
    get,
    path = "/HttpExample",
    responses(
        (status = 200, description = "Success", body = [Greeting]),
    )
)]
#[instrument(skip_all)]
pub async fn list_greetings(State(greetings): State<GreetingEndpoint>) -> Json<Vec<Greeting>> {
    Json(greetings.list())
}

/// Greets the given name. The greeting is not stored.
#[utoipa::path(
    post,
    path = "/HttpExample",
    request_body = Greeting,
    responses(
        (status = 200, description = "Success", body = Greeting),
        (status = 415, description = "Unsupported Media Type", body = ErrorBody),
        (status = 422, description = "Unprocessable Entity", body = ErrorBody),
        (status = 502, description = "Bad Gateway", body = ErrorBody),
    )
)]
#[instrument(skip_all, fields(name = ?greeting.name))]
pub async fn hello(
    State(greetings): State<GreetingEndpoint>,
    Json(greeting): Json<Greeting>,
) -> ApiResult<Json<Greeting>> {
    let greeting = greetings.hello(greeting).await?;
    Ok(Json(greeting))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::greeting::{
        greeting_repository::GreetingRepository, greeting_service::PrefixGreetingService,
    };
    use std::sync::Arc;

    fn endpoint() -> GreetingEndpoint {
        GreetingEndpoint::new(
            GreetingRepository::with_seed(["Apple", "Pineapple"]),
            Arc::new(PrefixGreetingService::default()),
        )
    }

    #[tokio::test]
    async fn list_greetings_returns_seed() {
        let response = list_greetings(State(endpoint())).await;

        assert_eq!(
            vec![Greeting::new("Apple"), Greeting::new("Pineapple")],
            response.0
        );
    }

    #[tokio::test]
    async fn hello_test() {
        let response = hello(State(endpoint()), Json(Greeting::new("World")))
            .await
            .unwrap();

        assert_eq!(Greeting::new("Hello World"), response.0);
    }
}
