//! Scene construction: projection, extrusion, and the pickable registry.

/// Footprint outlines to extruded prism meshes with pick geometry.
pub mod extrusion;

/// Flat geographic-to-scene coordinate projection.
pub mod projection;

/// Building registry, display flags, and the material colour writer.
pub mod registry;

/// Turns fetched records into spawned scene entities.
pub mod scene_builder;
