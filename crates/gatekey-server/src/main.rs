use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use gatekey_auth::{TokenService, UserStorage, VerificationService};
use gatekey_db_memory::MemoryUserStorage;
use gatekey_server::mail::LogMailer;
use gatekey_server::{AppState, load_config, load_signing_keys, router};
use tracing_subscriber::EnvFilter;

/// How the configuration path was determined.
#[derive(Debug, Clone, Copy)]
enum ConfigSource {
    /// From --config CLI argument
    CliArgument,
    /// From GATEKEY_CONFIG environment variable
    EnvironmentVariable,
    /// Default path (gatekey.toml)
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CliArgument => write!(f, "CLI argument (--config)"),
            Self::EnvironmentVariable => write!(f, "environment variable (GATEKEY_CONFIG)"),
            Self::Default => write!(f, "default"),
        }
    }
}

fn resolve_config_path() -> (PathBuf, ConfigSource) {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" || arg == "-c" {
            if let Some(path) = args.next() {
                return (PathBuf::from(path), ConfigSource::CliArgument);
            }
        }
    }

    if let Ok(path) = env::var("GATEKEY_CONFIG") {
        return (PathBuf::from(path), ConfigSource::EnvironmentVariable);
    }

    (PathBuf::from("gatekey.toml"), ConfigSource::Default)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (before anything else).
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    init_tracing();

    let (config_path, source) = resolve_config_path();
    let config = match load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::from(2);
        }
    };
    tracing::info!(
        path = %config_path.display(),
        source = %source,
        "configuration loaded"
    );

    // Malformed key material is fatal here, never at request time.
    let keys = match load_signing_keys(&config.auth) {
        Ok(k) => k,
        Err(e) => {
            eprintln!("Key loading error: {e}");
            return ExitCode::from(2);
        }
    };
    tracing::info!(family = %keys.family(), "signing keys loaded");

    let users: Arc<dyn UserStorage> = Arc::new(MemoryUserStorage::new());
    let tokens = Arc::new(TokenService::new(keys, &config.auth));
    let verification = Arc::new(VerificationService::new(
        config.auth.nonce_length,
        Arc::clone(&users),
        Arc::clone(&tokens),
    ));

    let state = AppState {
        users,
        tokens,
        verification,
        mailer: Arc::new(LogMailer),
        require_verification: config.auth.require_verification,
    };

    let listener = match tokio::net::TcpListener::bind(config.server.listen).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Cannot bind {}: {e}", config.server.listen);
            return ExitCode::from(2);
        }
    };
    tracing::info!(listen = %config.server.listen, "gatekey listening");

    if let Err(e) = axum::serve(listener, router(state)).await {
        eprintln!("Server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
