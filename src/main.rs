mod api;
mod blockchain;
mod config;
mod error;
mod network;
mod transaction;

use actix_web::{App, HttpServer, rt, web};
use dotenvy::dotenv;
use log::{info, warn};
use std::io;
use std::time::Duration;

use api::AppState;
use config::NodeConfig;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = NodeConfig::from_env();
    let state = AppState::new(&config).map_err(io::Error::other)?;
    let state = web::Data::new(state);

    if !config.peers.is_empty() {
        let mut nodes = state.nodes.lock().expect("mutex poisoned");
        for peer in &config.peers {
            match nodes.register(peer) {
                Ok(node) => info!("NODES - bootstrap peer {node}"),
                Err(e) => warn!("NODES - ignoring bootstrap peer: {e}"),
            }
        }
    }

    if let Some(period) = config.resolve_interval {
        rt::spawn(resolve_periodically(state.clone(), period));
    }

    println!(
        "⛓️ Starting ledger node {} at http://{}:{}",
        config.node_id, config.host, config.port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

/// Background conflict resolution against the registered peers.
async fn resolve_periodically(state: web::Data<AppState>, period: Duration) {
    let mut ticker = rt::time::interval(period);
    // the first tick completes immediately; let peers come up first
    ticker.tick().await;
    loop {
        ticker.tick().await;
        let peers = state.nodes.lock().expect("mutex poisoned").to_vec();
        if peers.is_empty() {
            continue;
        }
        if state.resolver.resolve(&state.ledger, &peers).await {
            info!("CONSENSUS - chain replaced by periodic resolution");
        }
    }
}
