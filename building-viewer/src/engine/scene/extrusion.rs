//! Extruded building volumes.
//!
//! A projected footprint outline becomes a prism: an earcut-triangulated
//! roof at the building height and a quad per edge for the walls, with
//! flat per-face normals. The underside is left open; the ground plane
//! covers it. Outline coordinates are planar east/north scene units; the
//! emitted mesh maps east to `+x`, up to `+y`, and north to `-z`.
//!
//! The same triangles are kept CPU-side in a [`PickShape`] so the hover
//! tool can ray-test buildings without touching render assets.

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

const ROOF_UV_SCALE: f32 = 0.05;

/// CPU copy of a building's geometry for ray tests.
#[derive(Debug, Clone)]
pub struct PickShape {
    pub min: Vec3,
    pub max: Vec3,
    pub triangles: Vec<[Vec3; 3]>,
}

/// A renderable building volume plus its pick geometry.
pub struct ExtrudedVolume {
    pub mesh: Mesh,
    pub shape: PickShape,
}

/// Remove a closing vertex that duplicates the first. WKT rings arrive
/// closed; the extruder wants each corner exactly once.
pub fn drop_closing_duplicate(outline: &mut Vec<Vec2>) {
    if outline.len() > 1 && outline.first() == outline.last() {
        outline.pop();
    }
}

/// Shoelace signed area; positive for counter-clockwise outlines.
pub fn signed_area(outline: &[Vec2]) -> f32 {
    let mut doubled = 0.0;
    for (i, a) in outline.iter().enumerate() {
        let b = outline[(i + 1) % outline.len()];
        doubled += a.perp_dot(b);
    }
    doubled * 0.5
}

/// Extrude a footprint outline to `height` scene units.
///
/// The outline may arrive closed and in either winding; it is normalised
/// to an open counter-clockwise ring first. Returns `None` for outlines
/// that cannot form a volume: fewer than three distinct corners, near-zero
/// area, a non-positive height, or a failed triangulation.
pub fn extrude_footprint(outline: &[Vec2], height: f32) -> Option<ExtrudedVolume> {
    let mut ring = outline.to_vec();
    drop_closing_duplicate(&mut ring);
    if ring.len() < 3 || height <= 0.0 {
        return None;
    }
    let area = signed_area(&ring);
    if area.abs() < 1e-6 {
        return None;
    }
    if area < 0.0 {
        ring.reverse();
    }

    let roof_indices = triangulate_ring(&ring)?;

    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    // Roof ring, normal straight up.
    for p in &ring {
        positions.push([p.x, height, -p.y]);
        normals.push([0.0, 1.0, 0.0]);
        uvs.push([p.x * ROOF_UV_SCALE, p.y * ROOF_UV_SCALE]);
    }
    for triangle in roof_indices.chunks_exact(3) {
        let (a, b, c) = (triangle[0], triangle[1], triangle[2]);
        let ab = ring[b] - ring[a];
        let ac = ring[c] - ring[a];
        // Keep the up-facing winding regardless of triangulator convention.
        if ab.perp_dot(ac) >= 0.0 {
            indices.extend([a as u32, b as u32, c as u32]);
        } else {
            indices.extend([a as u32, c as u32, b as u32]);
        }
    }

    // One quad per wall, flat outward normal.
    for (i, a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        let edge = b - *a;
        let outward = Vec2::new(edge.y, -edge.x).normalize_or_zero();
        // Outline +y is world -z, so the normal's z negates outward.y.
        let normal = [outward.x, 0.0, -outward.y];

        let base = positions.len() as u32;
        positions.push([a.x, 0.0, -a.y]);
        positions.push([b.x, 0.0, -b.y]);
        positions.push([b.x, height, -b.y]);
        positions.push([a.x, height, -a.y]);
        normals.extend([normal; 4]);
        uvs.extend([[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]);
        indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    let shape = pick_shape(&positions, &indices);

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));

    Some(ExtrudedVolume { mesh, shape })
}

fn triangulate_ring(ring: &[Vec2]) -> Option<Vec<usize>> {
    let flat: Vec<f64> = ring
        .iter()
        .flat_map(|p| [p.x as f64, p.y as f64])
        .collect();
    let hole_indices: Vec<usize> = Vec::new();
    match earcutr::earcut(&flat, &hole_indices, 2) {
        Ok(indices) if !indices.is_empty() => Some(indices),
        _ => None,
    }
}

fn pick_shape(positions: &[[f32; 3]], indices: &[u32]) -> PickShape {
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for p in positions {
        let v = Vec3::from_array(*p);
        min = min.min(v);
        max = max.max(v);
    }

    let triangles = indices
        .chunks_exact(3)
        .map(|t| {
            [
                Vec3::from_array(positions[t[0] as usize]),
                Vec3::from_array(positions[t[1] as usize]),
                Vec3::from_array(positions[t[2] as usize]),
            ]
        })
        .collect();

    PickShape {
        min,
        max,
        triangles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(side, 0.0),
            Vec2::new(side, side),
            Vec2::new(0.0, side),
        ]
    }

    fn positions_of(mesh: &Mesh) -> Vec<[f32; 3]> {
        mesh.attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|values| values.as_float3())
            .expect("position attribute")
            .to_vec()
    }

    #[test]
    fn square_extrudes_to_ten_triangles() {
        let volume = extrude_footprint(&square(10.0), 25.0).unwrap();
        assert_eq!(volume.shape.triangles.len(), 10);
        // 4 roof corners + 4 walls x 4 corners.
        assert_eq!(positions_of(&volume.mesh).len(), 20);
    }

    #[test]
    fn base_sits_on_the_ground_and_roof_at_height() {
        let volume = extrude_footprint(&square(10.0), 25.0).unwrap();
        for [_, y, _] in positions_of(&volume.mesh) {
            assert!(y == 0.0 || y == 25.0, "unexpected vertex height {y}");
        }
        assert_eq!(volume.shape.min.y, 0.0);
        assert_eq!(volume.shape.max.y, 25.0);
    }

    #[test]
    fn closed_rings_match_open_ones() {
        let mut closed = square(10.0);
        closed.push(closed[0]);
        let from_closed = extrude_footprint(&closed, 5.0).unwrap();
        let from_open = extrude_footprint(&square(10.0), 5.0).unwrap();
        assert_eq!(
            from_closed.shape.triangles.len(),
            from_open.shape.triangles.len()
        );
    }

    #[test]
    fn clockwise_outlines_are_normalised() {
        let mut reversed = square(10.0);
        reversed.reverse();
        let volume = extrude_footprint(&reversed, 5.0).unwrap();
        assert_eq!(volume.shape.triangles.len(), 10);

        // Roof triangles must face up after normalisation.
        for triangle in &volume.shape.triangles {
            let normal = (triangle[1] - triangle[0]).cross(triangle[2] - triangle[0]);
            if triangle.iter().all(|v| v.y == 5.0) {
                assert!(normal.y > 0.0, "roof triangle facing down");
            } else {
                assert!(normal.y.abs() < 1e-3, "wall triangle not vertical");
            }
        }
    }

    #[test]
    fn concave_outlines_triangulate() {
        // An L: six corners, four roof triangles, twelve wall triangles.
        let outline = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(9.0, 0.0),
            Vec2::new(9.0, 3.0),
            Vec2::new(4.0, 3.0),
            Vec2::new(4.0, 6.0),
            Vec2::new(0.0, 6.0),
        ];
        let volume = extrude_footprint(&outline, 12.0).unwrap();
        assert_eq!(volume.shape.triangles.len(), 16);
    }

    #[test]
    fn degenerate_outlines_are_rejected() {
        assert!(extrude_footprint(&[], 10.0).is_none());
        assert!(extrude_footprint(&[Vec2::ZERO, Vec2::X], 10.0).is_none());
        let collinear = [Vec2::ZERO, Vec2::X, Vec2::new(2.0, 0.0)];
        assert!(extrude_footprint(&collinear, 10.0).is_none());
        assert!(extrude_footprint(&square(10.0), 0.0).is_none());
        assert!(extrude_footprint(&square(10.0), -3.0).is_none());
    }

    #[test]
    fn north_maps_to_negative_z() {
        let volume = extrude_footprint(&square(10.0), 5.0).unwrap();
        // All z values in [-10, 0]: the outline's +y side lands at -z.
        assert_eq!(volume.shape.min.z, -10.0);
        assert_eq!(volume.shape.max.z, 0.0);
        assert_eq!(volume.shape.min.x, 0.0);
        assert_eq!(volume.shape.max.x, 10.0);
    }
}
