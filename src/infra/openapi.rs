//! OpenAPI configuration.

use crate::feature::{
    greeting::{greeting_api, greeting_repository},
    info::info_api,
};
use utoipa::OpenApi;

/// OpenApi configuration.
#[derive(OpenApi)]
#[openapi(
    paths(
        info_api::info,
        greeting_api::list_greetings,
        greeting_api::hello,
    ),
    components(
        schemas(
            info_api::AppInfo,
            greeting_repository::Greeting,
            crate::infra::error::ErrorBody
        )
    )
)]
#[derive(Clone, Copy, Debug)]
pub struct ApiDoc;
