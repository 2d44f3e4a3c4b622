use bevy::prelude::*;
use bevy::window::PresentMode;

/// Window settings for the current target. The WASM build renders into
/// the `#bevy` canvas and tracks its parent's size; the native build gets
/// a titled window.
pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some("#bevy".into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Building Explorer".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
