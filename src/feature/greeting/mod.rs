//! Greetings: a stored list of names, and a way to greet new ones.

pub mod greeting_api;
pub mod greeting_endpoint;
pub mod greeting_repository;
pub mod greeting_service;
