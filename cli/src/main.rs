//! `sos-cli`: drive the SmartResponse SOS session store from a terminal.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each invocation builds a fresh store over a file-backed state directory,
//! restores whatever session a previous invocation persisted, and runs one
//! command against it. The identity directory is the in-memory mock, so
//! accounts created with `register` last only for that invocation; the signed
//! in session they produce is persisted like any other.

mod config;
mod file_storage;
mod report;

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use futures::FutureExt;
use session::backend::{SleepFn, seed_identities};
use session::identity::UnknownRole;
use session::{AuthError, GuardDecision, ManualTimers, MockDirectory, Role, SessionStore, WithLatency, routes};
use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, ConfigError};
use crate::file_storage::FileStorage;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Role(#[from] UnknownRole),
    #[error("not signed in")]
    SignedOut,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "sos-cli", about = "SmartResponse SOS session and route guard CLI")]
struct Cli {
    #[arg(long, env = "SOS_STATE_DIR", global = true)]
    state_dir: Option<PathBuf>,

    #[arg(long, env = "SOS_LATENCY_MS", global = true)]
    latency_ms: Option<u64>,

    #[arg(long, env = "SOS_IDLE_TIMEOUT_SECS", global = true)]
    idle_timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SOS_PASSWORD")]
        password: String,
    },
    /// Create an account and sign in as it.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "SOS_PASSWORD")]
        password: String,
        #[arg(long, default_value = "public")]
        role: String,
    },
    /// Clear the persisted session.
    Logout,
    /// Show the restored session.
    Whoami {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Evaluate the route guard for a path against the restored session.
    Guard { path: String },
    /// List the route table and the roles each route admits.
    Routes,
    /// List the demo accounts.
    Accounts,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = CliConfig::resolve(cli.state_dir, cli.latency_ms, cli.idle_timeout_secs)?;
    tracing::debug!(state_dir = %config.state_dir.display(), "using state directory");
    let store = build_store(&config);
    store.restore();

    match cli.command {
        Command::Login { email, password } => {
            store.login(email.trim(), &password).await;
            signed_in(&store)
        }
        Command::Register { name, email, password, role } => {
            let role = role.parse::<Role>()?;
            store.register(name.trim(), email.trim(), &password, role).await;
            signed_in(&store)
        }
        Command::Logout => {
            let was = store.identity();
            store.logout();
            match was {
                Some(identity) => println!("signed out {}", identity.email),
                None => println!("already signed out"),
            }
            Ok(())
        }
        Command::Whoami { json } => {
            let snapshot = store.session();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot.identity())?);
            } else {
                println!("{}", report::describe_session(&snapshot));
            }
            if snapshot.is_authenticated() { Ok(()) } else { Err(CliError::SignedOut) }
        }
        Command::Guard { path } => {
            let decision = routes::decide(&store.session(), &path);
            if let GuardDecision::RedirectToLogin { from } = &decision {
                tracing::info!("Unauthorized access attempt to {from}");
            }
            println!("{}", report::describe_decision(&path, &decision));
            Ok(())
        }
        Command::Routes => {
            for route in routes::ROUTES {
                println!("{}", report::route_line(route));
            }
            Ok(())
        }
        Command::Accounts => {
            let password = &store.config().demo_password;
            for identity in seed_identities() {
                println!("{:<20} {:<9} password {password}", identity.email, identity.role);
            }
            Ok(())
        }
    }
}

fn build_store(config: &CliConfig) -> SessionStore {
    let session_config = config.session.clone();
    let directory = MockDirectory::new(session_config.demo_password.clone());
    let backend = WithLatency::new(directory, session_config.latency, tokio_sleep());
    let storage = FileStorage::new(config.state_dir.clone());
    // The process exits long before an idle timeout could elapse; timers are recorded, never fired.
    SessionStore::new(session_config, Rc::new(backend), Rc::new(storage), Rc::new(ManualTimers::new()))
}

fn tokio_sleep() -> SleepFn {
    Rc::new(|delay: Duration| tokio::time::sleep(delay).boxed_local())
}

fn signed_in(store: &SessionStore) -> Result<(), CliError> {
    if let Some(err) = store.error() {
        return Err(err.into());
    }
    println!("{}", report::describe_session(&store.session()));
    Ok(())
}
