//! Overlay and panel rendering.

/// FPS readout in the corner of native builds.
pub mod fps;

/// Hover info panel following the cursor.
pub mod info_overlay;

/// Query input panel with submit, clear, and the error slot.
pub mod query_panel;

/// Loading/failure status line.
pub mod status;
