//! Builds the renderable scene from fetched building records.

use bevy::prelude::*;
use constants::buildings::BuildingRecord;
use constants::palette::{GROUND_COLOUR, NEUTRAL_COLOUR};

use crate::engine::camera::viewport_camera::ViewportCamera;
use crate::engine::core::config::ViewerConfig;
use crate::engine::scene::extrusion::extrude_footprint;
use crate::engine::scene::projection::LocalProjection;
use crate::engine::scene::registry::{
    BuildingMeta, BuildingRegistry, DisplayState, PickVolume, palette_colour,
};

/// Records fetched at startup, read by [`build_scene`] on entering the
/// running state.
#[derive(Resource)]
pub struct FetchedBuildings(pub Vec<BuildingRecord>);

/// Extent of the constructed scene, in scene units.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SceneBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl SceneBounds {
    pub fn centre(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Spawn one extruded volume per building, the ground plane, and a camera
/// pose framing the result. Buildings whose footprints cannot form a
/// volume are skipped with a warning; an empty record list leaves the
/// scene empty.
pub fn build_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut registry: ResMut<BuildingRegistry>,
    fetched: Res<FetchedBuildings>,
    config: Res<ViewerConfig>,
) {
    let records = &fetched.0;
    let Some(projection) = LocalProjection::from_records(records, config.projection_scale) else {
        info!("no buildings to display");
        return;
    };

    let mut bounds: Option<SceneBounds> = None;
    let mut skipped = 0usize;

    for record in records {
        let outline: Vec<Vec2> = record
            .footprint
            .iter()
            .map(|point| {
                let (x, y) = projection.project(point[0], point[1]);
                Vec2::new(x as f32, y as f32)
            })
            .collect();

        let Some(volume) = extrude_footprint(&outline, record.height as f32) else {
            warn!(
                "skipping building {} with a degenerate footprint or height",
                record.struct_id
            );
            skipped += 1;
            continue;
        };

        bounds = Some(match bounds {
            Some(b) => SceneBounds {
                min: b.min.min(volume.shape.min),
                max: b.max.max(volume.shape.max),
            },
            None => SceneBounds {
                min: volume.shape.min,
                max: volume.shape.max,
            },
        });

        let material = materials.add(StandardMaterial {
            base_color: palette_colour(NEUTRAL_COLOUR),
            perceptual_roughness: 0.9,
            ..default()
        });

        let entity = commands
            .spawn((
                Mesh3d(meshes.add(volume.mesh)),
                MeshMaterial3d(material),
                BuildingMeta {
                    record: record.clone(),
                },
                PickVolume(volume.shape),
                DisplayState::default(),
            ))
            .id();
        registry.entities.push(entity);
    }

    if let Some(scene_bounds) = bounds {
        spawn_ground(&mut commands, &mut meshes, &mut materials, &scene_bounds);
        commands.insert_resource(ViewportCamera::with_bounds(&scene_bounds));
        commands.insert_resource(scene_bounds);
    }

    println!(
        "→ Scene built: {} buildings, {} skipped",
        registry.entities.len(),
        skipped
    );
}

fn spawn_ground(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    bounds: &SceneBounds,
) {
    let centre = bounds.centre();
    let span = (bounds.size().x.max(bounds.size().z) * 3.0).max(200.0);

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(span, span))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: palette_colour(GROUND_COLOUR),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(centre.x, 0.0, centre.z),
    ));
}
