use anyhow::{Context, Result};
use bookshelf_voice::{create_router, AppState, Config, Dispatcher, HttpConnector, Overrides};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn, Level};

/// Voice assistant webhook for an Audiobookshelf server
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Config file path (extension optional)
    #[arg(long, default_value = "config/bookshelf-voice")]
    config: String,

    /// HTTP port
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Verbose logging and intent reflection
    #[arg(long, env = "DEBUG")]
    debug: bool,

    /// Default media server URL
    #[arg(long, env = "AUDIOBOOKSHELF_URL")]
    server_url: Option<String>,

    /// Default media server API token
    #[arg(long, env = "AUDIOBOOKSHELF_TOKEN", hide_env_values = true)]
    server_token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut cfg = Config::load(&args.config)?;
    cfg.apply(Overrides {
        port: args.port,
        debug: args.debug.then_some(true),
        base_url: args.server_url,
        token: args.server_token,
    });

    let level = if cfg.service.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let defaults = cfg.server_defaults();
    match &defaults.base_url {
        Some(url) => info!("Default media server: {}", url),
        None => warn!("No default media server configured; sessions must supply credentials"),
    }
    if defaults.token.is_none() {
        warn!("No default media server token configured");
    }

    let connector = Arc::new(
        HttpConnector::new(cfg.client_options()).context("Failed to build media server client")?,
    );
    let dispatcher = Dispatcher::new(defaults, connector).with_debug(cfg.service.debug);
    let app = create_router(AppState::new(dispatcher, cfg.service.name.clone()));

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
