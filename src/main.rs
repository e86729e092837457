//! Caption Gateway - video lookup, caption passthrough and signed flags.
//!
//! This binary starts the HTTP server and configures all components.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use caption_gateway::{
    config::{Cli, Command, ServeConfig, SignConfig, SignOutputFormat, VerifyConfig},
    content::{ContentSource, HttpContentSource, LocalContentSource},
    flags::FlagSigner,
    server::{create_router, AppState, RouterConfig},
    store::{GristStore, MemoryStore, RecordStore},
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Serve(config) => run_serve(config).await,
        Command::Sign(config) => run_sign(config),
        Command::Verify(config) => run_verify(config),
    }
}

// =============================================================================
// Serve Command
// =============================================================================

async fn run_serve(config: ServeConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let client = match reqwest::Client::builder()
        .user_agent(concat!("caption-gateway/", env!("CARGO_PKG_VERSION")))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let content: Arc<dyn ContentSource> = match &config.content_dir {
        Some(dir) => Arc::new(LocalContentSource::new(dir)),
        None => match HttpContentSource::new(client.clone(), &config.content_base_url) {
            Ok(source) => Arc::new(source),
            Err(e) => {
                error!(
                    "Invalid content base URL '{}': {}",
                    config.content_base_url, e
                );
                return ExitCode::FAILURE;
            }
        },
    };

    let store: Arc<dyn RecordStore> = match (&config.store_url, &config.store_doc) {
        (Some(url), Some(doc)) => {
            let store = GristStore::new(client, url.as_str(), doc.as_str(), &config.store_table);
            match &config.store_api_key {
                Some(key) => Arc::new(store.with_api_key(key)),
                None => Arc::new(store),
            }
        }
        _ => Arc::new(MemoryStore::new()),
    };

    info!("Configuration:");
    info!("  Content: {}", content.describe());
    if config.content_dir.is_some() {
        info!("  Content override: local directory");
    }
    info!("  Flag store: {}", store.describe());
    if config.store_url.is_none() {
        warn!("  Flag store is IN MEMORY - flags are lost on restart");
        warn!("        Configure a store: --store-url=<url> --store-doc=<doc>");
    }

    let signer = FlagSigner::new(config.flag_secret_or_empty());
    let state = AppState::new(content, store, signer);

    let router = create_router(state, build_router_config(&config));

    let addr = config.bind_address();
    info!("Server listening on: http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "caption_gateway=debug,tower_http=debug"
    } else {
        "caption_gateway=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application ServeConfig.
fn build_router_config(config: &ServeConfig) -> RouterConfig {
    let mut router_config = RouterConfig::new().with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}

// =============================================================================
// Sign Command
// =============================================================================

fn run_sign(config: SignConfig) -> ExitCode {
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let token = FlagSigner::new(&config.secret).mint(config.id);

    match config.format {
        SignOutputFormat::Token => println!("{}", token),
        SignOutputFormat::Json => {
            let json = serde_json::json!({
                "id": config.id,
                "flagId": token,
            });
            println!("{}", json);
        }
    }

    ExitCode::SUCCESS
}

// =============================================================================
// Verify Command
// =============================================================================

fn run_verify(config: VerifyConfig) -> ExitCode {
    match FlagSigner::new(&config.secret).verify(&config.token) {
        Ok(id) => {
            println!("{}", id);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
