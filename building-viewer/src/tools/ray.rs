use bevy::prelude::*;

use crate::engine::scene::extrusion::PickShape;

const TRIANGLE_EPSILON: f32 = 1e-7;

/// Slab-method ray-AABB intersection: the entry distance, or the exit
/// distance when the origin is inside the box.
pub fn ray_aabb_hit_t(
    ray_origin: Vec3,
    ray_direction: Vec3,
    min: Vec3,
    max: Vec3,
) -> Option<f32> {
    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray_origin[axis];
        let direction = ray_direction[axis];
        let axis_min = min[axis];
        let axis_max = max[axis];

        if direction.abs() < f32::EPSILON {
            if origin < axis_min || origin > axis_max {
                return None;
            }
            continue;
        }

        let inv = 1.0 / direction;
        let mut t0 = (axis_min - origin) * inv;
        let mut t1 = (axis_max - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        tmin = tmin.max(t0);
        tmax = tmax.min(t1);
        if tmin > tmax {
            return None;
        }
    }

    if tmax < 0.0 {
        return None;
    }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

/// Moller-Trumbore ray-triangle intersection; distance along the ray.
pub fn ray_triangle_hit_t(origin: Vec3, direction: Vec3, triangle: &[Vec3; 3]) -> Option<f32> {
    let edge1 = triangle[1] - triangle[0];
    let edge2 = triangle[2] - triangle[0];

    let p = direction.cross(edge2);
    let determinant = edge1.dot(p);
    if determinant.abs() < TRIANGLE_EPSILON {
        return None;
    }

    let inv_determinant = 1.0 / determinant;
    let to_origin = origin - triangle[0];
    let u = to_origin.dot(p) * inv_determinant;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = to_origin.cross(edge1);
    let v = direction.dot(q) * inv_determinant;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_determinant;
    if t > TRIANGLE_EPSILON { Some(t) } else { None }
}

/// Closest hit against one pick shape: a cheap AABB test first, exact
/// triangle tests only when it passes.
pub fn ray_shape_hit_t(origin: Vec3, direction: Vec3, shape: &PickShape) -> Option<f32> {
    ray_aabb_hit_t(origin, direction, shape.min, shape.max)?;

    let mut best: Option<f32> = None;
    for triangle in &shape.triangles {
        if let Some(t) = ray_triangle_hit_t(origin, direction, triangle) {
            if best.is_none_or(|b| t < b) {
                best = Some(t);
            }
        }
    }
    best
}

/// Closest hit over shapes in iteration order. Strict `<` keeps the
/// earliest entry on exact ties, so picking is deterministic.
pub fn pick_closest<'a, I>(origin: Vec3, direction: Vec3, shapes: I) -> Option<(usize, f32)>
where
    I: IntoIterator<Item = &'a PickShape>,
{
    let mut best: Option<(usize, f32)> = None;
    for (index, shape) in shapes.into_iter().enumerate() {
        if let Some(t) = ray_shape_hit_t(origin, direction, shape) {
            if best.is_none_or(|(_, bt)| t < bt) {
                best = Some((index, t));
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::extrusion::extrude_footprint;

    fn prism(x0: f32, y0: f32, side: f32, height: f32) -> PickShape {
        let outline = vec![
            Vec2::new(x0, y0),
            Vec2::new(x0 + side, y0),
            Vec2::new(x0 + side, y0 + side),
            Vec2::new(x0, y0 + side),
        ];
        extrude_footprint(&outline, height).unwrap().shape
    }

    #[test]
    fn aabb_hit_from_outside_returns_entry_distance() {
        let t = ray_aabb_hit_t(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
        )
        .unwrap();
        assert!((t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn aabb_hit_from_inside_returns_exit_distance() {
        let t = ray_aabb_hit_t(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
        )
        .unwrap();
        assert!((t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn aabb_misses_behind_the_origin() {
        assert!(
            ray_aabb_hit_t(
                Vec3::new(0.0, 0.0, 5.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(-1.0, -1.0, -1.0),
                Vec3::new(1.0, 1.0, 1.0),
            )
            .is_none()
        );
    }

    #[test]
    fn triangle_hit_and_miss() {
        let triangle = [
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        ];
        let hit = ray_triangle_hit_t(Vec3::new(0.0, 0.5, 3.0), Vec3::new(0.0, 0.0, -1.0), &triangle);
        assert!((hit.unwrap() - 3.0).abs() < 1e-5);

        // Outside the barycentric range.
        assert!(
            ray_triangle_hit_t(Vec3::new(2.0, 0.5, 3.0), Vec3::new(0.0, 0.0, -1.0), &triangle)
                .is_none()
        );
        // Parallel to the plane.
        assert!(
            ray_triangle_hit_t(Vec3::new(0.0, 0.5, 3.0), Vec3::new(1.0, 0.0, 0.0), &triangle)
                .is_none()
        );
    }

    #[test]
    fn shape_hit_reports_the_near_wall() {
        let shape = prism(-5.0, -5.0, 10.0, 20.0);
        // Shooting along -z from z=+30: outline y in [-5, 5] maps to
        // scene z in [-5, 5], so the near wall sits at z = 5.
        let t = ray_shape_hit_t(Vec3::new(0.0, 10.0, 30.0), Vec3::new(0.0, 0.0, -1.0), &shape);
        assert!((t.unwrap() - 25.0).abs() < 1e-4);
    }

    #[test]
    fn roof_hits_from_above() {
        let shape = prism(-5.0, -5.0, 10.0, 20.0);
        let t = ray_shape_hit_t(Vec3::new(1.0, 50.0, 2.0), Vec3::new(0.0, -1.0, 0.0), &shape);
        assert!((t.unwrap() - 30.0).abs() < 1e-4);
    }

    #[test]
    fn pick_closest_prefers_the_nearer_shape() {
        // Outline y maps to scene -z: the near prism spans z in [8, 12],
        // the far one z in [-42, -38], both ahead of a ray going -z.
        let near = prism(-2.0, -12.0, 4.0, 10.0);
        let far = prism(-2.0, 38.0, 4.0, 10.0);
        let shapes = [far, near];
        let hits = [
            ray_shape_hit_t(Vec3::new(0.0, 5.0, 20.0), Vec3::new(0.0, 0.0, -1.0), &shapes[0]),
            ray_shape_hit_t(Vec3::new(0.0, 5.0, 20.0), Vec3::new(0.0, 0.0, -1.0), &shapes[1]),
        ];
        assert!(hits.iter().all(|hit| hit.is_some()), "both prisms must hit");

        let (index, t) = pick_closest(
            Vec3::new(0.0, 5.0, 20.0),
            Vec3::new(0.0, 0.0, -1.0),
            shapes.iter(),
        )
        .unwrap();
        assert_eq!(index, 1);
        assert!((t - 8.0).abs() < 1e-4);
    }

    #[test]
    fn exact_ties_resolve_to_the_earlier_entry() {
        let first = prism(-5.0, -5.0, 10.0, 20.0);
        let second = prism(-5.0, -5.0, 10.0, 20.0);
        let shapes = [first, second];
        let (index, _) = pick_closest(
            Vec3::new(0.0, 10.0, 30.0),
            Vec3::new(0.0, 0.0, -1.0),
            shapes.iter(),
        )
        .unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn miss_returns_none() {
        let shape = prism(-5.0, -5.0, 10.0, 20.0);
        assert!(
            pick_closest(
                Vec3::new(100.0, 10.0, 30.0),
                Vec3::new(0.0, 0.0, -1.0),
                [shape].iter(),
            )
            .is_none()
        );
    }
}
