//! # questionnaired: questionnaire daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (CLI args, env vars, config file)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, bind and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//! - Run the operator commands `create-user` and `create-question`
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod cli;
mod config;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use questionnaire_adapter_http_axum::state::{AppState, CookieSettings};
use questionnaire_adapter_storage_sqlite_sqlx::{
    Config as StorageConfig, Database, SqliteAnswerRepository, SqliteQuestionRepository,
    SqliteSessionRepository, SqliteUserRepository,
};
use questionnaire_app::password::CredentialHasher;
use questionnaire_app::services::answer_service::AnswerService;
use questionnaire_app::services::auth_service::AuthService;
use questionnaire_app::services::question_service::QuestionService;
use questionnaire_domain::question::Question;

use crate::cli::{Cli, Command};
use crate::config::Config;

type Auth = AuthService<SqliteUserRepository, SqliteSessionRepository>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let db = StorageConfig {
        database_url: config.database.url.clone(),
    }
    .build()
    .await
    .context("opening database")?;

    let hasher = CredentialHasher::with_costs(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let auth = AuthService::new(
        SqliteUserRepository::new(db.pool().clone()),
        SqliteSessionRepository::new(db.pool().clone()),
        hasher,
        config.session_ttl(),
    );

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, &db, auth).await,
        Command::CreateUser { username, password } => {
            let user = auth.create_user(&username, &password).await?;
            println!("{}", user.id);
            Ok(())
        }
        Command::CreateQuestion { title, end_time } => {
            let mut builder = Question::builder().title(title);
            if let Some(end_time) = end_time {
                builder = builder.end_time(end_time);
            }
            let questions = QuestionService::new(SqliteQuestionRepository::new(db.pool().clone()));
            let question = questions.create_question(builder.build()?).await?;
            println!("{}", question.id);
            Ok(())
        }
    }
}

async fn serve(config: &Config, db: &Database, auth: Auth) -> anyhow::Result<()> {
    let purged = auth.purge_expired_sessions().await?;
    tracing::info!(purged, "expired sessions removed");

    let state = AppState::new(
        auth,
        AnswerService::new(
            SqliteQuestionRepository::new(db.pool().clone()),
            SqliteAnswerRepository::new(db.pool().clone()),
        ),
        QuestionService::new(SqliteQuestionRepository::new(db.pool().clone())),
        CookieSettings {
            name: config.session.cookie_name.clone(),
            secure: config.session.secure,
        },
    );
    let app = questionnaire_adapter_http_axum::router::build(state);

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("binding {}", config.bind_addr()))?;
    tracing::info!(addr = %listener.local_addr()?, "questionnaired listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
