//! Nimbus CLI
//!
//! Runs the caching weather front end or performs a single lookup.

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nimbus_api::{ApiConfig, ApiServer, AppState};

/// Nimbus - cached OpenWeatherMap front end
#[derive(Parser)]
#[command(name = "nimbus")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Port to listen on (defaults to 8080)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Look up current weather once and print the payload
    Lookup {
        /// City name (empty uses the fallback city)
        #[arg(default_value = "")]
        city: String,
        /// Language code
        #[arg(short, long, default_value = "")]
        lang: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "nimbus=debug,info"
    } else {
        "nimbus=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(port, &bind).await,
        Commands::Lookup { city, lang } => cmd_lookup(&city, &lang).await,
    }
}

/// Run the HTTP server
async fn cmd_serve(port: Option<u16>, bind: &str) -> Result<()> {
    let config = ApiConfig::from_env();
    if config.api_key.is_empty() {
        println!("{}", "⚠️  OWM_API_KEY is not set; uncached lookups will fail.".yellow());
    }

    let ip: IpAddr = bind
        .parse()
        .with_context(|| format!("Invalid bind address: {}", bind))?;
    let addr = SocketAddr::new(ip, port.unwrap_or(config.port));

    let server = ApiServer::new(config).context("Failed to configure server")?;

    println!("{} http://{}", "🌤  Nimbus listening on".cyan().bold(), addr);
    println!("\n{}", "Endpoints:".yellow().bold());
    println!("  GET  /");
    println!("  GET  /ping");
    println!("  POST /ping");
    println!("  GET  /user/:name");
    println!("  GET  /weather?city=&lang=");
    println!("  POST /weather  (form: city, lang)");

    server.run(addr).await.context("Server error")?;
    Ok(())
}

/// Look up weather once
async fn cmd_lookup(city: &str, lang: &str) -> Result<()> {
    let state = AppState::new(ApiConfig::from_env()).context("Failed to configure lookup")?;

    match state.lookup.lookup(city, lang).await {
        Ok(payload) => {
            info!(city, "Lookup complete");
            println!("{}", payload);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "❌ Lookup failed:".red().bold(), e);
            Err(e).context("Weather lookup failed")
        }
    }
}
