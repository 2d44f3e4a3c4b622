//! HTTP API serving the building dataset.
//!
//! Two endpoints: `GET /api/buildings` returns every building on the site,
//! `POST /api/query` filters them by a free-text query. The dataset is a
//! CSV export read once at startup; malformed rows are dropped and the rest
//! clipped to the site extent.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod dataset;
mod error;
mod query;
mod routes;

use crate::routes::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let csv_path =
        env::var("EXPLORER_BUILDINGS_CSV").unwrap_or_else(|_| "data/buildings.csv".to_string());
    let addr: SocketAddr = env::var("EXPLORER_SERVER_ADDR")
        .unwrap_or_else(|_| constants::api::DEFAULT_SERVER_ADDR.to_string())
        .parse()
        .expect("invalid EXPLORER_SERVER_ADDR");

    let buildings = match dataset::load_buildings(&csv_path, dataset::site_bounds()) {
        Ok(buildings) => buildings,
        Err(err) => {
            error!("failed to load building dataset from {csv_path}: {err}");
            std::process::exit(1);
        }
    };
    info!("loaded {} buildings from {csv_path}", buildings.len());

    let state = AppState {
        buildings: Arc::new(buildings),
    };

    let app = Router::new()
        .route(constants::api::BUILDINGS_PATH, get(routes::get_buildings))
        .route(constants::api::QUERY_PATH, post(routes::post_query))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("building API listening on http://{addr}");
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}
