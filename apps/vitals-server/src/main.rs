//! vitals-lab server
//!
//! Hosts three pages that deliberately degrade one Core Web Vital each,
//! driven entirely by query parameters:
//!
//! - `/cls?CLS=0.8` injects a late top banner sized to the viewport
//! - `/inp?INP=3000&mode=sync` blocks interactions on the client
//! - `/lcp?LCP=3000&mode=server` delays the LCP candidate (image fetch
//!   or the server render itself)
//!
//! plus `GET /api/image?delay=<ms>`, the delayed JPEG endpoint backing the
//! LCP image mode, and `/pkg`, the built browser bundle.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{routing::get, Router};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod pages;
mod render;
#[cfg(test)]
mod tests;

/// Command-line arguments for the vitals server
#[derive(Parser, Debug)]
#[command(name = "vitals-server")]
#[command(about = "Emulator pages for deliberately poor Core Web Vitals")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// JPEG returned by the delayed image endpoint
    #[arg(long, default_value = "assets/hero.jpeg")]
    image: PathBuf,

    /// Directory holding the built browser bundle, served under /pkg
    #[arg(long, default_value = "apps/vitals-web/dist")]
    assets: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Path of the image served by /api/image
    pub image_path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState {
        image_path: args.image.clone(),
    };

    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(api::handle_health))
        // Emulator pages
        .route("/", get(pages::handle_index))
        .route("/cls", get(pages::handle_cls))
        .route("/inp", get(pages::handle_inp))
        .route("/lcp", get(pages::handle_lcp))
        // Delayed resource endpoint
        .route("/api/image", get(api::handle_image))
        // Browser bundle
        .nest_service("/pkg", ServeDir::new(&args.assets))
        // Apply middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    // Parse bind address; PORT env overrides the flag for hosted setups
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(args.port);

    let addr: SocketAddr = format!("{}:{}", args.host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("vitals-lab listening on http://{}", addr);
    info!("Delayed image: {}", args.image.display());
    info!("Browser bundle: {}", args.assets.display());

    axum::serve(listener, app).await?;

    Ok(())
}
