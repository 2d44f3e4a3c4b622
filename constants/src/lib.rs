//! Shared constants and wire types for the building explorer.
//!
//! Everything the viewer and the API server must agree on lives here:
//! record shapes, endpoint paths, the site extent, the display palette,
//! and the lifecycle stage vocabulary. This crate is deliberately free of
//! engine dependencies so the server can use it without pulling in bevy.

/// API endpoint paths, environment variable names, and contract strings.
pub mod api;

/// Wire types exchanged between the viewer and the server.
pub mod buildings;

/// Display palette for building volumes and scene surfaces.
pub mod palette;

/// Geographic extent of the site and the projection scale.
pub mod site;

/// Lifecycle stage vocabulary and synonym lookup.
pub mod stage;
