pub mod camera;
pub mod core;
pub mod scene;
