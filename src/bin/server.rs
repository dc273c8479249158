// Message Board - GraphQL Server
// Run with: cargo run --bin server

//! # Message Board Server Binary
//!
//! Starts the HTTP server with a fresh in-memory message store.
//!
//! ```text
//! main()
//!   ↓ parses
//! ServerArgs (flags, env, .env)
//!   ↓ configures
//! GraphQLServerBuilder
//!   ↓ serves
//! GraphQL Schema → InMemoryStorage
//! ```
//!
//! Once running:
//! - Visit http://localhost:4000 for the GraphiQL interface
//! - POST GraphQL documents to http://localhost:4000/graphql

use anyhow::{anyhow, Result};
use clap::{builder::FalseyValueParser, ArgAction, Parser};
use dotenv::dotenv;
use message_board::GraphQLServerBuilder;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "message-board-server")]
#[command(about = "In-memory message board served over GraphQL")]
#[command(version)]
struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "SERVER_PORT", default_value_t = 4000)]
    port: u16,

    /// Disable permissive CORS headers
    #[arg(
        long,
        env = "DISABLE_CORS",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    no_cors: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; remember the failure and report it once logging is up
    let dotenv_result = dotenv();

    let args = ServerArgs::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .map_err(|e| anyhow!("Invalid log filter '{}': {}", args.log_level, e))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = dotenv_result {
        warn!("No .env file loaded: {}", e);
    }

    info!("🚀 Starting Message Board Server...");
    info!("Server: {}:{}", args.host, args.port);

    GraphQLServerBuilder::new()
        .with_host(args.host)
        .with_port(args.port)
        .with_cors(!args.no_cors)
        .build_and_run()
        .await
        .map_err(|e| anyhow!(e))?;

    Ok(())
}
