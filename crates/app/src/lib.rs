//! # questionnaire-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `QuestionRepository`: create, lookup and composed queries over questions
//!   - `AnswerRepository`: lookup and upsert of answers
//!   - `UserRepository`: account lookup and creation
//!   - `SessionRepository`: login session storage
//! - Define **driving/inbound ports** as use-case structs:
//!   - `AuthService`: login, logout, session resolution, account creation
//!   - `AnswerService`: validated answer upsert
//!   - `QuestionService`: filtered listing with the caller's own answers
//! - Carry the caller's identity explicitly in a `RequestContext`
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `questionnaire-domain` only (plus `argon2` for password hashing).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod context;
pub mod password;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
