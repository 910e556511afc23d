//! A small greeting service with axum.

pub mod app;
pub mod feature;
pub mod infra;
