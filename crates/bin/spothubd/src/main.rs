//! # spothubd — spothub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse the command line and configuration (config file, env vars)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! Besides `serve` (the default), `create-user` provisions an account and
//! `issue-token` prints a bearer token for an existing one.
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use spothub_adapter_http_axum::auth::TokenKeys;
use spothub_adapter_http_axum::state::AppState;
use spothub_adapter_storage_sqlite_sqlx::{
    Database, SqliteReviewRepository, SqliteSpotImageRepository, SqliteSpotRepository,
    SqliteUserRepository,
};
use spothub_app::services::review_service::ReviewService;
use spothub_app::services::spot_image_service::SpotImageService;
use spothub_app::services::spot_service::SpotService;
use spothub_app::services::user_service::UserService;
use spothub_domain::error::SpotHubError;
use spothub_domain::id::UserId;
use spothub_domain::user::NewUser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

type BoxError = Box<dyn std::error::Error>;

#[derive(Debug, Parser)]
#[command(name = "spothubd", version, about = "Spots, images and reviews REST API")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "spothub.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API (default).
    Serve,
    /// Register a user account and print its id.
    CreateUser {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
    },
    /// Print a bearer token for an existing user.
    IssueToken {
        /// Id of the user, as printed by `create-user`.
        user_id: UserId,
    },
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter)?)
        .init();

    let db = Database::connect(&config.database_url).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, &db).await,
        Command::CreateUser {
            first_name,
            last_name,
            email,
            username,
        } => {
            let new_user = NewUser {
                first_name,
                last_name,
                email,
                username,
            };
            let user = user_service(&db).register(new_user).await?;
            tracing::info!(user_id = %user.id, username = %user.username, "user created");
            println!("{}", user.id);
            Ok(())
        }
        Command::IssueToken { user_id } => {
            let keys = TokenKeys::new(config.auth.secret()?);
            let user = match user_service(&db).get_user(user_id).await {
                Err(SpotHubError::NotFound(err)) => return Err(err.into()),
                result => result?,
            };
            println!("{}", keys.issue(user.id, config.auth.token_ttl())?);
            Ok(())
        }
    }
}

fn user_service(db: &Database) -> UserService<SqliteUserRepository> {
    UserService::new(SqliteUserRepository::new(db.pool().clone()))
}

async fn serve(config: &Config, db: &Database) -> Result<(), BoxError> {
    let keys = TokenKeys::new(config.auth.secret()?);
    let pool = db.pool().clone();

    // Repositories
    let spot_repo = SqliteSpotRepository::new(pool.clone());
    let image_repo = SqliteSpotImageRepository::new(pool.clone());
    let review_repo = SqliteReviewRepository::new(pool.clone());
    let user_repo = SqliteUserRepository::new(pool);

    // Services
    let spot_service = SpotService::new(spot_repo.clone(), image_repo.clone(), user_repo.clone());
    let spot_image_service = SpotImageService::new(spot_repo.clone(), image_repo);
    let review_service = ReviewService::new(spot_repo, review_repo);
    let user_service = UserService::new(user_repo);

    // HTTP
    let state = AppState::new(
        spot_service,
        spot_image_service,
        review_service,
        user_service,
        keys,
    );
    let app = spothub_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "spothubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("spothubd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
