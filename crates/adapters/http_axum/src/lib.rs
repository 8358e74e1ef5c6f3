//! # questionnaire-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON API (`/api/login`, `/api/logout`, `/api/answer`,
//!   `/api/questions`) and a `/health` probe
//! - Resolve the session cookie into a `RequestContext` once per request
//! - Map requests into application service calls (driving adapter)
//! - Wrap every result in the `{"status": …}` envelope
//!
//! ## Dependency rule
//! Depends on `questionnaire-app` (for ports and services) and
//! `questionnaire-domain` (for request/response types). Never leaks axum types
//! into the domain.

pub mod api;
pub mod context;
pub mod error;
pub mod response;
pub mod router;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
