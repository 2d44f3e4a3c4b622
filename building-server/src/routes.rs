use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use constants::buildings::{BuildingRecord, QueryRequest};
use tracing::info;

use crate::error::ApiError;
use crate::query;

#[derive(Clone)]
pub struct AppState {
    pub buildings: Arc<Vec<BuildingRecord>>,
}

/// GET /api/buildings — every building on the site.
pub async fn get_buildings(State(state): State<AppState>) -> Json<Vec<BuildingRecord>> {
    Json(state.buildings.as_ref().clone())
}

/// POST /api/query — parse the text into a filter and return the records
/// it matches. An absent or empty query is a 400; text the parser cannot
/// use is a 422. Both carry `{ "error": "..." }` bodies.
pub async fn post_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<Vec<BuildingRecord>>, ApiError> {
    if request.query.is_empty() {
        return Err(ApiError::MissingQuery);
    }

    let filter = query::parse_query(&request.query)?;
    info!("query {:?} parsed as {filter:?}", request.query);

    let matched: Vec<BuildingRecord> = state
        .buildings
        .iter()
        .filter(|building| query::matches(building, &filter))
        .cloned()
        .collect();
    info!("query matched {} of {} buildings", matched.len(), state.buildings.len());
    Ok(Json(matched))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        let building = |id: &str, height: f64, stage: &str| BuildingRecord {
            struct_id: id.to_string(),
            height,
            stage: stage.to_string(),
            footprint: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]],
        };
        AppState {
            buildings: Arc::new(vec![
                building("A", 12.0, "CONSTRUCTED"),
                building("B", 95.0, "NEW"),
                building("C", 180.0, "CONSTRUCTED"),
            ]),
        }
    }

    #[tokio::test]
    async fn buildings_endpoint_returns_everything() {
        let Json(buildings) = get_buildings(State(state())).await;
        assert_eq!(buildings.len(), 3);
        assert_eq!(buildings[0].struct_id, "A");
    }

    #[tokio::test]
    async fn query_endpoint_filters_records() {
        let request = QueryRequest {
            query: "height > 50".to_string(),
        };
        let Json(matched) = post_query(State(state()), Json(request)).await.unwrap();
        let ids: Vec<&str> = matched.iter().map(|b| b.struct_id.as_str()).collect();
        assert_eq!(ids, vec!["B", "C"]);
    }

    #[tokio::test]
    async fn empty_query_is_rejected() {
        let request = QueryRequest {
            query: String::new(),
        };
        let err = post_query(State(state()), Json(request)).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingQuery));
    }

    #[tokio::test]
    async fn unparseable_query_is_rejected() {
        let request = QueryRequest {
            query: "pelicans".to_string(),
        };
        let err = post_query(State(state()), Json(request)).await.unwrap_err();
        assert!(matches!(err, ApiError::UnparseableQuery(_)));
    }
}
