//! Query highlighting.
//!
//! Submitting a query always clears the previous matches first, then
//! posts the text with a freshly issued token. Tokens increase
//! monotonically and only the latest one is accepted back, so a slow
//! response to a superseded request can never repaint the scene. Clearing
//! invalidates all outstanding tokens outright.

use bevy::prelude::*;
use constants::api::SERVER_ERROR_TEXT;

use crate::engine::core::config::ViewerConfig;
use crate::engine::scene::registry::{BuildingMeta, BuildingRegistry, DisplayState};
use crate::net::api_client::{ApiChannels, QueryFailure, query_responses, submit_query};

/// Issue/accept guard for query request tokens.
#[derive(Debug, Default)]
pub struct RequestTracker {
    next: u64,
    latest: Option<u64>,
}

impl RequestTracker {
    /// Issue the token for a new request; it supersedes all before it.
    pub fn issue(&mut self) -> u64 {
        let token = self.next;
        self.next += 1;
        self.latest = Some(token);
        token
    }

    /// Whether a response carrying this token should still be applied.
    pub fn accept(&self, token: u64) -> bool {
        self.latest == Some(token)
    }

    /// Reject every outstanding request.
    pub fn invalidate(&mut self) {
        self.latest = None;
    }
}

/// UI-facing state of the query panel.
#[derive(Resource, Default)]
pub struct QueryPanelState {
    pub input: String,
    /// Error slot text; empty when there is nothing to report.
    pub error: String,
    pub result_count: Option<usize>,
    pub in_flight: bool,
    pub tracker: RequestTracker,
}

/// Sent by the panel when the user submits the input text.
#[derive(Event)]
pub struct QuerySubmitted(pub String);

/// Sent by the panel's clear action.
#[derive(Event)]
pub struct ClearRequested;

/// Queued network dispatches. Submission handling only queues here; a
/// separate system performs the sends, which keeps the submit flow free
/// of networking.
#[derive(Resource, Default)]
pub struct PendingQueries(pub Vec<PendingQuery>);

pub struct PendingQuery {
    pub token: u64,
    pub text: String,
}

/// Clear old matches, reset the error slot, and queue the request.
pub fn handle_query_submissions(
    mut submissions: EventReader<QuerySubmitted>,
    mut panel: ResMut<QueryPanelState>,
    mut pending: ResMut<PendingQueries>,
    registry: Res<BuildingRegistry>,
    mut displays: Query<&mut DisplayState>,
) {
    for QuerySubmitted(text) in submissions.read() {
        clear_matches(&registry, &mut displays);
        panel.error.clear();
        panel.result_count = None;
        panel.in_flight = true;
        let token = panel.tracker.issue();
        pending.0.push(PendingQuery {
            token,
            text: text.clone(),
        });
    }
}

/// Reset matches, the error slot, the input, and invalidate anything
/// still in flight.
pub fn handle_clear_requests(
    mut clears: EventReader<ClearRequested>,
    mut panel: ResMut<QueryPanelState>,
    registry: Res<BuildingRegistry>,
    mut displays: Query<&mut DisplayState>,
) {
    for ClearRequested in clears.read() {
        clear_matches(&registry, &mut displays);
        panel.input.clear();
        panel.error.clear();
        panel.result_count = None;
        panel.in_flight = false;
        panel.tracker.invalidate();
    }
}

/// Fire queued requests.
pub fn dispatch_query_requests(
    mut pending: ResMut<PendingQueries>,
    channels: Res<ApiChannels>,
    config: Res<ViewerConfig>,
) {
    for query in pending.0.drain(..) {
        info!("submitting query {:?} (token {})", query.text, query.token);
        submit_query(&channels, &config, query.token, query.text);
    }
}

/// Drain query responses. Stale tokens are discarded without touching
/// any state; accepted successes flag exactly the returned buildings as
/// matched; accepted failures land in the error slot.
pub fn poll_query_responses(
    channels: Res<ApiChannels>,
    mut panel: ResMut<QueryPanelState>,
    registry: Res<BuildingRegistry>,
    metas: Query<&BuildingMeta>,
    mut displays: Query<&mut DisplayState>,
) {
    loop {
        match query_responses(&channels).try_recv() {
            Ok(response) => {
                if !panel.tracker.accept(response.token) {
                    info!("discarding stale query response (token {})", response.token);
                    continue;
                }
                panel.in_flight = false;
                match response.outcome {
                    Ok(records) => {
                        let matched_ids: std::collections::HashSet<&str> =
                            records.iter().map(|r| r.struct_id.as_str()).collect();
                        let mut count = 0usize;
                        for &entity in &registry.entities {
                            let Ok(meta) = metas.get(entity) else {
                                continue;
                            };
                            let Ok(mut display) = displays.get_mut(entity) else {
                                continue;
                            };
                            display.matched =
                                matched_ids.contains(meta.record.struct_id.as_str());
                            if display.matched {
                                count += 1;
                            }
                        }
                        panel.result_count = Some(count);
                    }
                    Err(QueryFailure::Api(message)) => {
                        panel.error = message;
                    }
                    Err(QueryFailure::Transport(detail)) => {
                        warn!("query transport failure: {detail}");
                        panel.error = SERVER_ERROR_TEXT.to_string();
                    }
                }
            }
            Err(flume::TryRecvError::Empty) | Err(flume::TryRecvError::Disconnected) => break,
        }
    }
}

fn clear_matches(registry: &BuildingRegistry, displays: &mut Query<&mut DisplayState>) {
    for &entity in &registry.entities {
        if let Ok(mut display) = displays.get_mut(entity) {
            display.matched = false;
        }
    }
}
