//! # questionnaire-domain
//!
//! Pure domain model for the questionnaire service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Questions** (titled items with an optional closing time)
//! - Define **Answers** (one per user and question)
//! - Define **Users** and **Sessions** (identities and their login tokens)
//! - Define the submission **schemas** and the listing **filters**
//! - Define the **question query builder** that repositories execute
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod answer;
pub mod filter;
pub mod form;
pub mod query;
pub mod question;
pub mod session;
pub mod user;
