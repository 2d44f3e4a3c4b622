use constants::buildings::BuildingRecord;

/// Flat local projection from geographic coordinates to scene units.
///
/// `x = (lon - origin_lon) * scale`, `y = (lat - origin_lat) * scale`.
/// No geodesic correction; over a site a few hundred metres across the
/// distortion is well under the width of a wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalProjection {
    pub origin_lon: f64,
    pub origin_lat: f64,
    pub scale: f64,
}

impl LocalProjection {
    /// Anchor the projection at the first vertex of the first footprint,
    /// so the scene sits near the world origin regardless of where on the
    /// globe the site is. `None` when there is nothing to anchor to.
    pub fn from_records(records: &[BuildingRecord], scale: f64) -> Option<Self> {
        let first = records.first()?.footprint.first()?;
        Some(Self {
            origin_lon: first[0],
            origin_lat: first[1],
            scale,
        })
    }

    /// Project a longitude/latitude pair to planar scene coordinates,
    /// east and north respectively.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        (
            (lon - self.origin_lon) * self.scale,
            (lat - self.origin_lat) * self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(footprint: Vec<[f64; 2]>) -> BuildingRecord {
        BuildingRecord {
            struct_id: "1".to_string(),
            height: 10.0,
            stage: "NEW".to_string(),
            footprint,
        }
    }

    #[test]
    fn origin_projects_to_zero() {
        let projection = LocalProjection {
            origin_lon: -114.08,
            origin_lat: 51.045,
            scale: 100_000.0,
        };
        assert_eq!(projection.project(-114.08, 51.045), (0.0, 0.0));
    }

    #[test]
    fn projection_is_linear_in_the_offset() {
        let projection = LocalProjection {
            origin_lon: -114.08,
            origin_lat: 51.045,
            scale: 100_000.0,
        };
        let (x1, y1) = projection.project(-114.08 + 0.001, 51.045 + 0.002);
        let (x2, y2) = projection.project(-114.08 + 0.002, 51.045 + 0.004);
        assert!((x1 - 100.0).abs() < 1e-6);
        assert!((y1 - 200.0).abs() < 1e-6);
        assert!((x2 - 2.0 * x1).abs() < 1e-6);
        assert!((y2 - 2.0 * y1).abs() < 1e-6);
    }

    #[test]
    fn scale_is_configurable() {
        let projection = LocalProjection {
            origin_lon: 0.0,
            origin_lat: 0.0,
            scale: 50_000.0,
        };
        let (x, _) = projection.project(0.001, 0.0);
        assert!((x - 50.0).abs() < 1e-9);
    }

    #[test]
    fn anchors_to_the_first_footprint_vertex() {
        let records = vec![
            record(vec![[-114.08, 51.045], [-114.079, 51.045], [-114.079, 51.046]]),
            record(vec![[-114.07, 51.047], [-114.069, 51.047], [-114.069, 51.048]]),
        ];
        let projection = LocalProjection::from_records(&records, 100_000.0).unwrap();
        assert_eq!(projection.origin_lon, -114.08);
        assert_eq!(projection.origin_lat, 51.045);
        assert!(LocalProjection::from_records(&[], 100_000.0).is_none());
    }
}
