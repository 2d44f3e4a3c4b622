use bevy::prelude::*;

/// Viewer lifecycle. `Loading` covers the initial dataset fetch; the app
/// moves to `Running` once buildings arrive, or to `LoadFailed` when the
/// fetch errors out.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
    LoadFailed,
}

/// Failure text for the load-error overlay, set alongside the
/// `LoadFailed` transition.
#[derive(Resource, Default)]
pub struct LoadStatus {
    pub error: Option<String>,
}
