//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.
//! Every use-case that depends on the caller takes a [`RequestContext`](crate::context::RequestContext).

pub mod answer_service;
pub mod auth_service;
pub mod question_service;
