//! API endpoint paths, default addresses, and contract strings.

/// GET endpoint serving the full building list.
pub const BUILDINGS_PATH: &str = "/api/buildings";

/// POST endpoint accepting a free-text query.
pub const QUERY_PATH: &str = "/api/query";

/// Default bind address for the server.
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:9400";

/// Default base URL the viewer fetches from.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:9400";

/// Error body text when a query request carries no usable `query` field.
pub const MISSING_QUERY_ERROR: &str = "Missing \"query\" field";

/// Error slot text when an API error response carries no message of its own.
pub const GENERIC_QUERY_ERROR: &str = "Something went wrong.";

/// Error slot text when the query request never reached the server.
pub const SERVER_ERROR_TEXT: &str = "Server error";
