//! HTTP client for the building API.
//!
//! Requests never block the render loop: native builds run them on a
//! throwaway thread with a small tokio runtime, WASM builds spawn a local
//! future. Either way the result comes back over an unbounded channel
//! that a polling system drains once per frame.
//!
//! Query responses carry the request token they were issued with, so the
//! query tool can discard replies to superseded requests.

use bevy::prelude::*;
use constants::api::{BUILDINGS_PATH, GENERIC_QUERY_ERROR, QUERY_PATH};
use constants::buildings::{ApiErrorBody, BuildingRecord, QueryRequest};

use crate::engine::core::app_state::{AppState, LoadStatus};
use crate::engine::core::config::ViewerConfig;
use crate::engine::scene::scene_builder::FetchedBuildings;

#[cfg(not(target_arch = "wasm32"))]
const REQUEST_TIMEOUT_SECS: u64 = 10;

pub type BuildingsResult = Result<Vec<BuildingRecord>, String>;

/// How a query request failed.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryFailure {
    /// The server answered with an error body; show its text verbatim.
    Api(String),
    /// The request never produced a response.
    Transport(String),
}

/// A query response tagged with the token of the request that caused it.
#[derive(Debug, Clone)]
pub struct QueryResponse {
    pub token: u64,
    pub outcome: Result<Vec<BuildingRecord>, QueryFailure>,
}

/// Channel pairs connecting background requests to the polling systems.
#[derive(Resource)]
pub struct ApiChannels {
    buildings_tx: flume::Sender<BuildingsResult>,
    buildings_rx: flume::Receiver<BuildingsResult>,
    query_tx: flume::Sender<QueryResponse>,
    query_rx: flume::Receiver<QueryResponse>,
}

impl Default for ApiChannels {
    fn default() -> Self {
        let (buildings_tx, buildings_rx) = flume::unbounded();
        let (query_tx, query_rx) = flume::unbounded();
        Self {
            buildings_tx,
            buildings_rx,
            query_tx,
            query_rx,
        }
    }
}

/// Kick off the one-time dataset fetch.
pub fn start_building_fetch(channels: Res<ApiChannels>, config: Res<ViewerConfig>) {
    let url = format!("{}{}", config.api_base, BUILDINGS_PATH);
    info!("fetching buildings from {url}");
    let tx = channels.buildings_tx.clone();
    run_request(async move {
        let result = fetch_buildings(url).await;
        let _ = tx.send(result);
    });
}

/// Post a query with its token.
pub fn submit_query(channels: &ApiChannels, config: &ViewerConfig, token: u64, query: String) {
    let url = format!("{}{}", config.api_base, QUERY_PATH);
    let tx = channels.query_tx.clone();
    run_request(async move {
        let outcome = post_query(url, query).await;
        let _ = tx.send(QueryResponse { token, outcome });
    });
}

/// Drain the dataset fetch channel; drives `Loading` into `Running` or
/// `LoadFailed`.
pub fn poll_building_fetch(
    channels: Res<ApiChannels>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
    mut status: ResMut<LoadStatus>,
) {
    loop {
        match channels.buildings_rx.try_recv() {
            Ok(Ok(records)) => {
                println!("→ Transitioning to Running ({} buildings)", records.len());
                commands.insert_resource(FetchedBuildings(records));
                next_state.set(AppState::Running);
            }
            Ok(Err(message)) => {
                println!("→ Transitioning to LoadFailed");
                error!("building fetch failed: {message}");
                status.error = Some(message);
                next_state.set(AppState::LoadFailed);
            }
            Err(flume::TryRecvError::Empty) | Err(flume::TryRecvError::Disconnected) => break,
        }
    }
}

/// Channel receiver for query responses, drained by the query tool.
pub fn query_responses(channels: &ApiChannels) -> &flume::Receiver<QueryResponse> {
    &channels.query_rx
}

#[cfg(test)]
pub fn query_sender(channels: &ApiChannels) -> flume::Sender<QueryResponse> {
    channels.query_tx.clone()
}

async fn fetch_buildings(url: String) -> BuildingsResult {
    let client = make_client()?;
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|err| err.to_string())?;
    if !response.status().is_success() {
        return Err(format!("request failed with status {}", response.status()));
    }
    response
        .json::<Vec<BuildingRecord>>()
        .await
        .map_err(|err| err.to_string())
}

async fn post_query(url: String, query: String) -> Result<Vec<BuildingRecord>, QueryFailure> {
    let client = make_client().map_err(QueryFailure::Transport)?;
    let response = client
        .post(&url)
        .json(&QueryRequest { query })
        .send()
        .await
        .map_err(|err| QueryFailure::Transport(err.to_string()))?;

    if response.status().is_success() {
        response
            .json::<Vec<BuildingRecord>>()
            .await
            .map_err(|err| QueryFailure::Transport(err.to_string()))
    } else {
        // The error body carries the message the panel shows verbatim.
        let error = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => GENERIC_QUERY_ERROR.to_string(),
        };
        Err(QueryFailure::Api(error))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn make_client() -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|err| err.to_string())
}

#[cfg(target_arch = "wasm32")]
fn make_client() -> Result<reqwest::Client, String> {
    Ok(reqwest::Client::new())
}

#[cfg(not(target_arch = "wasm32"))]
fn run_request(future: impl Future<Output = ()> + Send + 'static) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!("failed to start request runtime: {err}");
                return;
            }
        };
        runtime.block_on(future);
    });
}

#[cfg(target_arch = "wasm32")]
fn run_request(future: impl Future<Output = ()> + 'static) {
    wasm_bindgen_futures::spawn_local(future);
}
