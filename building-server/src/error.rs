use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use constants::api::MISSING_QUERY_ERROR;
use constants::buildings::ApiErrorBody;
use thiserror::Error;

use crate::query::QueryParseError;

/// Errors surfaced to API clients as `{ "error": "..." }` JSON.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", MISSING_QUERY_ERROR)]
    MissingQuery,
    #[error(transparent)]
    UnparseableQuery(#[from] QueryParseError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingQuery => StatusCode::BAD_REQUEST,
            ApiError::UnparseableQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_query_message_matches_the_contract() {
        assert_eq!(ApiError::MissingQuery.to_string(), "Missing \"query\" field");
    }
}
