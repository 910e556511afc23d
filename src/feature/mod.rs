use axum::Router;

use crate::infra::{error::ClientError, state::AppState};

pub mod greeting;
pub mod info;

/// Constructs the full API.
pub fn api(state: AppState) -> Router {
    Router::new()
        .merge(greeting::greeting_api::routes())
        .merge(info::info_api::routes())
        .fallback(|| async { ClientError::NotFound })
        .with_state(state)
}
