//! Hover inspection.
//!
//! Every frame the cursor position becomes a world-space ray, the ray is
//! tested against every registered building, and the closest hit (earlier
//! registry entry on ties) becomes the hover target. The state machine
//! has two states, idle and hovering; flags and the info overlay are only
//! touched on transitions, so holding the cursor still on a building does
//! no repeated work.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::scene::registry::{BuildingMeta, BuildingRegistry, DisplayState, PickVolume};
use crate::tools::ray::ray_shape_hit_t;
use crate::ui::info_overlay::InfoOverlayState;

/// Current hover target, if any.
#[derive(Resource, Default, Debug, PartialEq)]
pub struct HoverState {
    pub current: Option<Entity>,
}

/// What one frame's pick result does to the hover state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTransition {
    None,
    Enter(Entity),
    Switch { from: Entity, to: Entity },
    Exit(Entity),
}

/// Pure transition rule: current target x new pick result.
pub fn hover_transition(current: Option<Entity>, hit: Option<Entity>) -> HoverTransition {
    match (current, hit) {
        (None, None) => HoverTransition::None,
        (None, Some(entered)) => HoverTransition::Enter(entered),
        (Some(current), Some(hit)) if current == hit => HoverTransition::None,
        (Some(from), Some(to)) => HoverTransition::Switch { from, to },
        (Some(left), None) => HoverTransition::Exit(left),
    }
}

pub fn hover_picker_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    registry: Res<BuildingRegistry>,
    volumes: Query<&PickVolume>,
    metas: Query<&BuildingMeta>,
    mut displays: Query<&mut DisplayState>,
    mut hover: ResMut<HoverState>,
    mut overlay: ResMut<InfoOverlayState>,
) {
    let hit = cursor_hit(&windows, &cameras, &registry, &volumes);

    match hover_transition(hover.current, hit) {
        HoverTransition::None => {}
        HoverTransition::Enter(entered) => {
            set_hovered(&mut displays, entered, true);
            show_overlay(&metas, entered, &mut overlay);
            hover.current = Some(entered);
        }
        HoverTransition::Switch { from, to } => {
            set_hovered(&mut displays, from, false);
            set_hovered(&mut displays, to, true);
            show_overlay(&metas, to, &mut overlay);
            hover.current = Some(to);
        }
        HoverTransition::Exit(left) => {
            set_hovered(&mut displays, left, false);
            overlay.record = None;
            hover.current = None;
        }
    }
}

/// The building under the cursor: closest ray hit, earlier registry entry
/// on exact ties.
fn cursor_hit(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    registry: &BuildingRegistry,
    volumes: &Query<&PickVolume>,
) -> Option<Entity> {
    let window = windows.single().ok()?;
    let cursor_position = window.cursor_position()?;
    let (camera_transform, camera) = cameras.single().ok()?;
    let ray = camera
        .viewport_to_world(camera_transform, cursor_position)
        .ok()?;
    let origin = ray.origin;
    let direction = ray.direction.as_vec3();

    let mut best: Option<(Entity, f32)> = None;
    for &entity in &registry.entities {
        let Ok(volume) = volumes.get(entity) else {
            continue;
        };
        if let Some(t) = ray_shape_hit_t(origin, direction, &volume.0) {
            if best.is_none_or(|(_, best_t)| t < best_t) {
                best = Some((entity, t));
            }
        }
    }
    best.map(|(entity, _)| entity)
}

fn set_hovered(displays: &mut Query<&mut DisplayState>, entity: Entity, hovered: bool) {
    if let Ok(mut display) = displays.get_mut(entity) {
        display.hovered = hovered;
    }
}

fn show_overlay(metas: &Query<&BuildingMeta>, entity: Entity, overlay: &mut InfoOverlayState) {
    if let Ok(meta) = metas.get(entity) {
        overlay.record = Some(meta.record.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_stays_idle_without_a_hit() {
        assert_eq!(hover_transition(None, None), HoverTransition::None);
    }

    #[test]
    fn idle_enters_on_a_hit() {
        let building = Entity::from_raw(7);
        assert_eq!(
            hover_transition(None, Some(building)),
            HoverTransition::Enter(building)
        );
    }

    #[test]
    fn hovering_the_same_building_is_a_no_op() {
        let building = Entity::from_raw(7);
        assert_eq!(
            hover_transition(Some(building), Some(building)),
            HoverTransition::None
        );
    }

    #[test]
    fn hovering_a_different_building_switches() {
        let first = Entity::from_raw(1);
        let second = Entity::from_raw(2);
        assert_eq!(
            hover_transition(Some(first), Some(second)),
            HoverTransition::Switch {
                from: first,
                to: second
            }
        );
    }

    #[test]
    fn losing_the_hit_exits() {
        let building = Entity::from_raw(7);
        assert_eq!(
            hover_transition(Some(building), None),
            HoverTransition::Exit(building)
        );
    }
}
