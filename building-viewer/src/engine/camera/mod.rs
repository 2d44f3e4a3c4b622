/// Free-flying viewport camera with smoothed look, dolly, and move
/// controls.
pub mod viewport_camera;
