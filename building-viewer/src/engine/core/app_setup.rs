//! Application setup and system wiring.

use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use constants::palette::CLEAR_COLOUR;

use crate::engine::camera::viewport_camera::{ViewportCamera, camera_controller};
use crate::engine::core::app_state::{AppState, LoadStatus};
use crate::engine::core::config::ViewerConfig;
use crate::engine::core::window_config::create_window_config;
use crate::engine::scene::registry::{
    BuildingRegistry, ColourWriteCounter, apply_display_colours, palette_colour,
};
use crate::engine::scene::scene_builder::build_scene;
use crate::net::api_client::{ApiChannels, poll_building_fetch, start_building_fetch};
use crate::tools::hover::{HoverState, hover_picker_system};
use crate::tools::query::{
    ClearRequested, PendingQueries, QueryPanelState, QuerySubmitted, dispatch_query_requests,
    handle_clear_requests, handle_query_submissions, poll_query_responses,
};
use crate::ui::info_overlay::{InfoOverlayState, render_info_overlay};
use crate::ui::query_panel::render_query_panel;
use crate::ui::status::{StatusText, update_status_text};

/// Build the viewer application: plugins, resources, state, and systems.
pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: false,
        })
        .init_state::<AppState>();

    app.insert_resource(ClearColor(palette_colour(CLEAR_COLOUR)))
        .insert_resource(ViewerConfig::from_env())
        .init_resource::<ApiChannels>()
        .init_resource::<LoadStatus>()
        .init_resource::<BuildingRegistry>()
        .init_resource::<ColourWriteCounter>()
        .init_resource::<HoverState>()
        .init_resource::<InfoOverlayState>()
        .init_resource::<QueryPanelState>()
        .init_resource::<PendingQueries>()
        .add_event::<QuerySubmitted>()
        .add_event::<ClearRequested>();

    app.add_systems(Startup, (setup, start_building_fetch).chain())
        .add_systems(
            Update,
            poll_building_fetch.run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnEnter(AppState::Running), build_scene)
        .add_systems(
            Update,
            (
                camera_controller,
                hover_picker_system,
                handle_query_submissions,
                handle_clear_requests,
                dispatch_query_requests,
                poll_query_responses,
                apply_display_colours,
                render_query_panel,
                render_info_overlay,
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        )
        .add_systems(Update, update_status_text);

    #[cfg(not(target_arch = "wasm32"))]
    app.add_systems(Update, crate::ui::fps::fps_text_update_system);

    app
}

fn create_default_plugins() -> impl PluginGroup {
    DefaultPlugins.set(WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    })
}

fn setup(mut commands: Commands) {
    spawn_lighting(&mut commands);
    spawn_viewport_camera(&mut commands);
    create_overlays(&mut commands);
}

fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

fn spawn_viewport_camera(commands: &mut Commands) {
    let camera = ViewportCamera::default();
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(camera.position).with_rotation(camera.rotation()),
    ));
    commands.insert_resource(camera);
}

/// Native-style text overlays: a status line in the lower-left corner and,
/// on native builds, an FPS readout in the lower-right.
fn create_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("Loading buildings..."),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.35, 0.35, 0.35)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                StatusText,
            ));

            #[cfg(not(target_arch = "wasm32"))]
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.35, 0.35, 0.35)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                crate::ui::fps::FpsText,
            ));
        });
}
