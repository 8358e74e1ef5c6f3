//! # questionnaire-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `questionnaire-app::ports::storage`
//! - Manage the `SQLite` connection pool
//! - Run the embedded migrations on startup
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `questionnaire-app` (for port traits) and `questionnaire-domain`
//! (for domain types). Neither of them may reference this adapter.

mod answer_repo;
mod codec;
mod error;
mod pool;
mod question_repo;
mod session_repo;
mod user_repo;

pub use answer_repo::SqliteAnswerRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
pub use question_repo::SqliteQuestionRepository;
pub use session_repo::SqliteSessionRepository;
pub use user_repo::SqliteUserRepository;
