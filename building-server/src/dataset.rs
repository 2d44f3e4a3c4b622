//! Building dataset loading.
//!
//! The source is a CSV export with twelve headerless columns: ground
//! elevation sample coordinates and values, rooftop elevation sample
//! coordinates and value, the lifecycle stage, the structure id, and the
//! footprint polygon as WKT. A row survives only if its elevations parse as
//! numbers and its WKT parses as a polygon; survivors are clipped to the
//! site extent. Height is rooftop elevation minus minimum ground elevation.

use constants::buildings::BuildingRecord;
use constants::site::{SITE_EAST, SITE_NORTH, SITE_SOUTH, SITE_WEST};
use thiserror::Error;
use tracing::warn;

const COLUMN_COUNT: usize = 12;
const COL_GRD_ELEV_MIN_Z: usize = 4;
const COL_ROOFTOP_ELEV_Z: usize = 8;
const COL_STAGE: usize = 9;
const COL_STRUCT_ID: usize = 10;
const COL_POLYGON_WKT: usize = 11;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Geographic extent used to clip the dataset, degrees.
#[derive(Debug, Clone, Copy)]
pub struct GeoBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

/// The configured site extent.
pub fn site_bounds() -> GeoBounds {
    GeoBounds {
        west: SITE_WEST,
        south: SITE_SOUTH,
        east: SITE_EAST,
        north: SITE_NORTH,
    }
}

/// Read and parse the dataset file.
pub fn load_buildings(path: &str, bounds: GeoBounds) -> Result<Vec<BuildingRecord>, DatasetError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_string(),
        source,
    })?;
    Ok(parse_buildings(&raw, bounds))
}

/// Parse CSV text into building records. Malformed rows are dropped with a
/// warning; well-formed rows outside the site extent are silently skipped.
pub fn parse_buildings(csv: &str, bounds: GeoBounds) -> Vec<BuildingRecord> {
    let mut buildings = Vec::new();
    let mut dropped = 0usize;

    for line in csv.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line) {
            Some(record) => {
                if footprint_overlaps(&record.footprint, bounds) {
                    buildings.push(record);
                }
            }
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!("dropped {dropped} malformed dataset rows");
    }
    buildings
}

/// Parse one CSV row; `None` means the row is malformed.
fn parse_row(line: &str) -> Option<BuildingRecord> {
    let fields = split_csv_row(line);
    if fields.len() != COLUMN_COUNT {
        return None;
    }

    let ground: f64 = fields[COL_GRD_ELEV_MIN_Z].trim().parse().ok()?;
    let rooftop: f64 = fields[COL_ROOFTOP_ELEV_Z].trim().parse().ok()?;
    let footprint = parse_wkt_polygon(&fields[COL_POLYGON_WKT])?;

    Some(BuildingRecord {
        struct_id: fields[COL_STRUCT_ID].trim().to_string(),
        height: rooftop - ground,
        stage: fields[COL_STAGE].trim().to_string(),
        footprint,
    })
}

/// Split one CSV row, honouring double quotes around fields (the WKT column
/// contains commas). A doubled quote inside a quoted field unescapes to one.
fn split_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Parse the exterior ring of a `POLYGON ((lon lat, lon lat, ...))` WKT
/// string. Interior rings are ignored; anything else is rejected.
fn parse_wkt_polygon(wkt: &str) -> Option<Vec<[f64; 2]>> {
    let trimmed = wkt.trim();
    if !trimmed.to_ascii_uppercase().starts_with("POLYGON") {
        return None;
    }

    let rest = trimmed["POLYGON".len()..].trim_start();
    let inner = rest.strip_prefix('(')?;
    let ring_start = inner.find('(')? + 1;
    let ring_end = inner[ring_start..].find(')')? + ring_start;
    let ring = &inner[ring_start..ring_end];

    let mut points = Vec::new();
    for pair in ring.split(',') {
        let mut numbers = pair.split_whitespace();
        let lon: f64 = numbers.next()?.parse().ok()?;
        let lat: f64 = numbers.next()?.parse().ok()?;
        points.push([lon, lat]);
    }
    if points.len() < 3 {
        return None;
    }
    Some(points)
}

/// Bounding-box overlap between a footprint and the site extent. A
/// conservative stand-in for exact polygon intersection: anything whose
/// bounding box touches the extent is kept.
fn footprint_overlaps(footprint: &[[f64; 2]], bounds: GeoBounds) -> bool {
    let mut min_lon = f64::INFINITY;
    let mut min_lat = f64::INFINITY;
    let mut max_lon = f64::NEG_INFINITY;
    let mut max_lat = f64::NEG_INFINITY;
    for point in footprint {
        min_lon = min_lon.min(point[0]);
        max_lon = max_lon.max(point[0]);
        min_lat = min_lat.min(point[1]);
        max_lat = max_lat.max(point[1]);
    }
    min_lon <= bounds.east
        && max_lon >= bounds.west
        && min_lat <= bounds.north
        && max_lat >= bounds.south
}
