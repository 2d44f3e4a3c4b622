use serde::{Deserialize, Serialize};

/// One building as served by `/api/buildings` and `/api/query`.
///
/// `footprint` is the exterior ring of the footprint polygon as
/// `[longitude, latitude]` pairs, in ring order. Rings arrive closed (the
/// last vertex repeats the first); consumers that triangulate must drop
/// the duplicate themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingRecord {
    pub struct_id: String,
    /// Rooftop elevation minus minimum ground elevation, in metres.
    pub height: f64,
    /// Lifecycle stage, upper-case in the source data (e.g. `CONSTRUCTED`).
    pub stage: String,
    pub footprint: Vec<[f64; 2]>,
}

/// Body of a `POST /api/query` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Free-text query. Deserialises to empty when the field is absent so
    /// the server can answer with its own error instead of a decode failure.
    #[serde(default)]
    pub query: String,
}

/// JSON error body returned by the API, `{ "error": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
