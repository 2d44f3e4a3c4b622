//! Core application setup and state management.
//!
//! Handles the application lifecycle, window configuration, state
//! transitions, and plugin initialisation for both native and WASM
//! targets.

/// Application setup and plugin configuration for the Bevy engine.
pub mod app_setup;

/// Application state machine from dataset loading to the running viewer.
pub mod app_state;

/// Environment-driven viewer configuration.
pub mod config;

/// Platform-specific window configuration for native and WASM builds.
pub mod window_config;
