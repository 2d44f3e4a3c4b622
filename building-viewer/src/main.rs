//! 3D building explorer.
//!
//! Fetches building footprints from the companion API, extrudes them into
//! a navigable scene, and layers hover inspection and free-text query
//! highlighting on top.

mod engine;
mod net;
mod tools;
mod ui;

use crate::engine::core::app_setup::create_app;

fn main() {
    let mut app = create_app();

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            app.run();
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.run();
    }
}
