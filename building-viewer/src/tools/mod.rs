//! Interactive tools layered on the scene.
//!
//! Two tools share the building registry. The hover tool casts a ray from
//! the cursor every frame and keeps exactly one building flagged as
//! hovered; the query tool posts free-text queries to the API and flags
//! the returned buildings as matched. Neither touches materials: both
//! write [`DisplayState`](crate::engine::scene::registry::DisplayState)
//! flags, and the registry's colour writer turns flags into material
//! updates, with hover taking precedence over match.

/// Hover picking state machine driven by the cursor ray.
pub mod hover;

/// Text query submission and match highlighting.
pub mod query;

/// Ray intersection primitives for building picking.
pub mod ray;
