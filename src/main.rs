use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};

use portfolio_gateway::config::Args;
use portfolio_gateway::state::AppState;
use portfolio_gateway::{cors_layer, router};

// this is main async function with tokio
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "portfolio_gateway=debug,tower_http=info".to_string()),
        )
        .init();

    // parse cli arguments (with env fallbacks)
    let args = Args::parse();

    let state = Arc::new(AppState::from_args(&args));
    state
        .limiter
        .spawn_sweeper(Duration::from_secs(args.sweep_interval));

    let app = router(state).layer(cors_layer(&args.allowed_origin));

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            std::process::exit(1);
        }
    };

    info!("gateway listening on http://{addr}");
    info!("forwarding chat requests to {}", args.upstream_url);
    info!(
        "rate limit: {} requests per {} seconds",
        args.rate_limit, args.rate_window
    );
    if args.api_key.is_none() {
        warn!("completion API key is not set; chat requests will be rejected");
    }

    // connect info is what the rate limiter falls back to when no
    // forwarded header is present
    if let Err(err) =
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await
    {
        error!("server error: {err}");
        std::process::exit(1);
    }
}
