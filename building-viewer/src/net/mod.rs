//! HTTP access to the building API.
pub mod api_client;
