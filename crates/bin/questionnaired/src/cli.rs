//! Command-line interface.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use crate::config::DEFAULT_PATH;

#[derive(Debug, Parser)]
#[command(name = "questionnaired")]
#[command(about = "Questionnaire API server and operator commands")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file path
    #[arg(long, global = true, default_value = DEFAULT_PATH)]
    pub config: PathBuf,

    /// Subcommand; `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Create a user account
    CreateUser {
        username: String,
        password: String,
    },

    /// Create a question
    CreateQuestion {
        title: String,

        /// Closing time (RFC 3339); the question never closes when omitted
        #[arg(long)]
        end_time: Option<DateTime<Utc>>,
    },
}
