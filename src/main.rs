use dotenvy::dotenv;
use std::net::SocketAddr;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use hoopnight::config::AppConfig;
use hoopnight::web::{build_router, AppState};

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("configuration error: {}", e);
            eprintln!("configuration error: {}", e);
            std::process::exit(1);
        }
    };
    if config.oauth.is_none() {
        warn!("no identity provider configured; signing everyone in as DEV_USER_NAME");
    }

    let host = config.host.clone();
    let port = config.port;
    let app = build_router(AppState::new(config));

    let listener = match bind(&host, port).await {
        Ok(l) => l,
        Err(e) => {
            warn!("could not bind {}:{}: {}; trying {}", host, port, e, port.wrapping_add(1));
            match bind(&host, port.wrapping_add(1)).await {
                Ok(l) => l,
                Err(e) => {
                    error!("could not bind fallback port: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    match listener.local_addr() {
        Ok(addr) => info!(build = hoopnight::BUILD_ID, "listening on http://{}", addr),
        Err(e) => warn!("listener has no local address: {}", e),
    }

    if let Err(e) = axum::serve(listener, app).await {
        error!("server stopped: {}", e);
        std::process::exit(1);
    }
}

async fn bind(host: &str, port: u16) -> std::io::Result<tokio::net::TcpListener> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    tokio::net::TcpListener::bind(addr).await
}
