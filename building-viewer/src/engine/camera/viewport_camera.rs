//! Free-flying viewport camera.
//!
//! The camera pose lives in a [`ViewportCamera`] resource; the controller
//! system edits the pose from input and smooths the actual transform
//! toward it every frame. Right-drag looks, the wheel dollies along the
//! view direction, WASD moves in the horizontal plane, Q/E move down/up.
//! Move and dolly speeds scale with the camera's height above ground so
//! the controls feel the same whether inspecting a doorway or the whole
//! site.

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::engine::scene::scene_builder::SceneBounds;

const YAW_SENSITIVITY: f32 = 0.0035;
const PITCH_SENSITIVITY: f32 = 0.0030;
const PITCH_LIMIT: f32 = 1.55;
const SMOOTHING: f32 = 12.0;
const PIXEL_SCROLL_SCALE: f32 = 0.05;

/// Target camera pose. The transform chases this with a short lag.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ViewportCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// Height above ground used to scale movement speeds.
    pub height: f32,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 120.0, 180.0),
            yaw: 0.0,
            pitch: -0.55,
            height: 120.0,
        }
    }
}

impl ViewportCamera {
    /// A pose framing the whole scene: south of centre, looking down at
    /// the site from a height proportional to its extent.
    pub fn with_bounds(bounds: &SceneBounds) -> Self {
        let centre = bounds.centre();
        let span = bounds.size().length().max(100.0);
        Self {
            position: Vec3::new(centre.x, span * 0.45, centre.z + span * 0.6),
            yaw: 0.0,
            pitch: -0.55,
            height: span * 0.45,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

pub fn camera_controller(
    time: Res<Time>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    mut camera: ResMut<ViewportCamera>,
    mut transforms: Query<&mut Transform, With<Camera3d>>,
) {
    let delta = time.delta_secs();
    let dragging = mouse_buttons.pressed(MouseButton::Right);

    let mut look_delta = Vec2::ZERO;
    for motion in mouse_motion.read() {
        if dragging {
            look_delta += motion.delta;
        }
    }
    if look_delta != Vec2::ZERO {
        camera.yaw -= look_delta.x * YAW_SENSITIVITY;
        camera.pitch =
            (camera.pitch - look_delta.y * PITCH_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    let mut scroll = 0.0;
    for event in scroll_events.read() {
        scroll += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y * PIXEL_SCROLL_SCALE,
        };
    }
    if scroll != 0.0 {
        let dolly_speed = (camera.height * 0.2).clamp(0.5, 500.0);
        let view_direction = camera.rotation() * -Vec3::Z;
        camera.position += view_direction * scroll * dolly_speed;
    }

    let mut wish = Vec3::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        wish.z += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        wish.z -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        wish.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        wish.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyE) {
        wish.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyQ) {
        wish.y -= 1.0;
    }
    if wish != Vec3::ZERO {
        let mut speed = camera.height.clamp(2.0, 200.0);
        if keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
            speed *= 3.5;
        }
        if keys.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]) {
            speed *= 0.25;
        }

        let flat_rotation = Quat::from_rotation_y(camera.yaw);
        let forward = flat_rotation * -Vec3::Z;
        let right = flat_rotation * Vec3::X;
        let motion = forward * wish.z + right * wish.x + Vec3::Y * wish.y;
        camera.position += motion.normalize_or_zero() * speed * delta;
    }

    camera.height = camera.position.y.max(1.0);

    let Ok(mut transform) = transforms.single_mut() else {
        return;
    };
    let blend = (SMOOTHING * delta).min(1.0);
    transform.translation = transform.translation.lerp(camera.position, blend);
    transform.rotation = transform.rotation.slerp(camera.rotation(), blend);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framing_pose_sits_south_of_and_above_the_scene() {
        let bounds = SceneBounds {
            min: Vec3::new(-100.0, 0.0, -200.0),
            max: Vec3::new(300.0, 80.0, 0.0),
        };
        let camera = ViewportCamera::with_bounds(&bounds);
        let centre = bounds.centre();
        assert_eq!(camera.position.x, centre.x);
        assert!(camera.position.z > centre.z);
        assert!(camera.position.y > 0.0);
        assert!(camera.pitch < 0.0);
    }

    #[test]
    fn framing_height_scales_with_extent() {
        let small = SceneBounds {
            min: Vec3::ZERO,
            max: Vec3::splat(50.0),
        };
        let large = SceneBounds {
            min: Vec3::ZERO,
            max: Vec3::splat(500.0),
        };
        let near = ViewportCamera::with_bounds(&small);
        let far = ViewportCamera::with_bounds(&large);
        assert!(far.position.y > near.position.y);
        assert!(far.height > near.height);
    }
}
