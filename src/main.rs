//! Task queue backend entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use taskhub_backend::api::{create_app, AppState};
use taskhub_backend::config::Config;
use taskhub_backend::connector::RedisConnector;
use taskhub_backend::error::ConnectorError;
use taskhub_backend::utils::shutdown_signal;

/// Task queue backend service.
#[derive(Parser, Debug)]
#[command(name = "taskhub-backend")]
#[command(about = "Backend service: Redis connector and HTTP bootstrap for the task queue")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service (default).
    Run,

    /// Check configuration validity.
    CheckConfig,

    /// Check connectivity to the configured Redis server.
    CheckRedis,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("taskhub_backend=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config().await,
        Some(Command::CheckRedis) => cmd_check_redis().await,
        Some(Command::Run) | None => cmd_run().await,
    }
}

/// Run the HTTP service.
async fn cmd_run() -> anyhow::Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    // Start the Redis connection attempt; failures are logged, not fatal
    let redis = RedisConnector::connect(&config);

    let state = AppState::new(redis.clone());
    let app = create_app(state);

    // Bind failure is fatal: nothing useful runs without the listener
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running at http://localhost:{}", config.port);
    info!("Redis status: {}", redis.status().await);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Check configuration validity.
async fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("TASKHUB BACKEND - CONFIGURATION CHECK");
    println!("======================================================================");

    // Load configuration
    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    // Validate configuration
    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    // Show configuration summary
    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Redis Host: {}", config.redis_host);
    println!("  Redis Port: {}", config.redis_port);
    println!(
        "  Redis Password: {}",
        if config.has_redis_password() {
            "present"
        } else {
            "not set"
        }
    );
    println!("  HTTP Port: {}", config.port);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Check connectivity to the configured Redis server.
async fn cmd_check_redis() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("TASKHUB BACKEND - REDIS CHECK");
    println!("======================================================================");

    // Load configuration
    let config = Config::load()?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    println!("Host: {}", config.redis_addr());
    println!(
        "Password: {}",
        if config.has_redis_password() {
            "present"
        } else {
            "not set"
        }
    );

    // Attempt one foreground connection
    print!("\n1. Connecting... ");
    match RedisConnector::establish(&config).await {
        Ok(_manager) => {
            println!("OK");
            println!("   Server answered PING at {}", config.redis_addr());
        }
        Err(ConnectorError::AuthRequired(source)) => {
            println!("FAILED");
            println!("   Error: {}", source);
            println!("   The server requires a password. Set REDIS_PASSWORD and retry.");
        }
        Err(ConnectorError::Connection(source)) => {
            println!("FAILED");
            println!("   Error: {}", source);
        }
    }

    println!("\n======================================================================");
    println!("REDIS CHECK COMPLETED");
    println!("======================================================================");

    Ok(())
}
