use meshcache::group::group::new_group;
use meshcache::transport::handlers;
use meshcache::transport::pool::HttpPool;
use meshcache::transport::protocol::{DEFAULT_FETCH_TIMEOUT, DEFAULT_REPLICAS};

use anyhow::Context;
use std::net::SocketAddr;
use std::path::{Component, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!(
            "Usage: {} --bind <addr:port> [--peer <addr:port>]... [--data-dir <path>]",
            args[0]
        );
        eprintln!("Example: {} --bind 127.0.0.1:9100", args[0]);
        eprintln!(
            "Example: {} --bind 127.0.0.1:9101 --peer 127.0.0.1:9100 --peer 127.0.0.1:9101",
            args[0]
        );
        std::process::exit(1);
    }

    let mut bind_addr: Option<SocketAddr> = None;
    let mut peers: Vec<String> = vec![];
    let mut data_dir = PathBuf::from("./data");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = Some(args[i + 1].parse()?);
                i += 2;
            }
            "--peer" => {
                peers.push(args[i + 1].clone());
                i += 2;
            }
            "--data-dir" => {
                data_dir = PathBuf::from(&args[i + 1]);
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let bind_addr = bind_addr.context("--bind is required")?;
    let self_addr = bind_addr.to_string();

    // A node without an explicit member list is a cluster of one.
    if peers.is_empty() {
        peers.push(self_addr.clone());
    }

    let max_bytes = std::env::var("MESHCACHE_MAX_BYTES")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(64 * 1024 * 1024);
    let replicas = std::env::var("MESHCACHE_REPLICAS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(DEFAULT_REPLICAS);
    let timeout = std::env::var("MESHCACHE_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_FETCH_TIMEOUT);

    tracing::info!("Starting cache node on {}", self_addr);
    tracing::info!("Cluster members: {:?}", peers);
    tracing::info!("Serving files from {}", data_dir.display());

    let loader_dir = data_dir.clone();
    let group = new_group("files", max_bytes, move |key: String| {
        let dir = loader_dir.clone();
        async move {
            // Keys name files under the data directory, never paths out of it.
            let relative = PathBuf::from(&key);
            if relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_)))
            {
                anyhow::bail!("invalid key {:?}", key);
            }

            let path = dir.join(relative);
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            Ok(bytes)
        }
    });

    let pool = Arc::new(HttpPool::with_config(&self_addr, replicas, timeout));
    pool.set_peers(&peers);
    group.register_peers(pool.clone());

    let app = handlers::router();

    tracing::info!("HTTP server listening on {}", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
