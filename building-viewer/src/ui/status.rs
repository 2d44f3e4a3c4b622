use bevy::prelude::*;

use crate::engine::core::app_state::{AppState, LoadStatus};

/// Marker for the status line in the lower-left corner.
#[derive(Component)]
pub struct StatusText;

/// Keep the status line in sync with the app state: progress text while
/// loading, the failure reason when the fetch died, nothing once running.
pub fn update_status_text(
    state: Res<State<AppState>>,
    status: Res<LoadStatus>,
    mut texts: Query<(&mut Text, &mut TextColor), With<StatusText>>,
) {
    for (mut text, mut colour) in &mut texts {
        match state.get() {
            AppState::Loading => {
                text.0 = "Loading buildings...".to_string();
                colour.0 = Color::srgb(0.35, 0.35, 0.35);
            }
            AppState::Running => {
                if !text.0.is_empty() {
                    text.0.clear();
                }
            }
            AppState::LoadFailed => {
                let reason = status.error.as_deref().unwrap_or("unknown error");
                text.0 = format!("Failed to load buildings: {reason}");
                colour.0 = Color::srgb(0.85, 0.2, 0.2);
            }
        }
    }
}
