//! Track geometry from GeoJSON line strings.

use std::{fs, path::Path};

use geojson::{GeoJson, Geometry, Value};
use thiserror::Error;
use tracing::debug;

use crate::{
    gtfs::GtfsShape,
    shared::{Coordinate, Distance},
};

pub const SHAPE_FILE_EXTENSION: &str = "geojson";
const SHAPE_FILE_PREFIX: &str = "shape_";

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("GeoJson error: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("Shape {0} has no line string")]
    MissingLineString(String),
    #[error("Shape {0} has a position without latitude and longitude")]
    InvalidPosition(String),
}

/// Reads the first line string of a GeoJSON document into shape points.
/// Distances are cumulative kilometers rounded to six decimals.
pub fn shape_from_geojson(shape_id: &str, text: &str) -> Result<Vec<GtfsShape>, Error> {
    let geojson: GeoJson = text.parse()?;
    let positions = match geojson {
        GeoJson::Geometry(geometry) => line_positions(&geometry),
        GeoJson::Feature(feature) => feature.geometry.as_ref().and_then(line_positions),
        GeoJson::FeatureCollection(collection) => collection
            .features
            .iter()
            .filter_map(|feature| feature.geometry.as_ref())
            .find_map(line_positions),
    }
    .ok_or_else(|| Error::MissingLineString(shape_id.into()))?;

    let mut traveled = Distance::default();
    let mut previous: Option<Coordinate> = None;
    let mut shapes = Vec::with_capacity(positions.len());
    for (i, position) in positions.iter().enumerate() {
        let [longitude, latitude, ..] = position[..] else {
            return Err(Error::InvalidPosition(shape_id.into()));
        };
        let coordinate = Coordinate::new(latitude, longitude);
        if let Some(previous) = previous {
            traveled += previous.euclidean_distance(&coordinate);
        }
        previous = Some(coordinate);
        shapes.push(GtfsShape {
            shape_id: shape_id.into(),
            shape_pt_lat: latitude,
            shape_pt_lon: longitude,
            shape_pt_sequence: i as u32,
            shape_dist_traveled: Some(round_km(traveled)),
        });
    }
    Ok(shapes)
}

/// Loads every `shape_<id>.geojson` in `dir`, the shape id is the upper cased `<id>`.
pub fn load_shapes_from_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<GtfsShape>, Error> {
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == SHAPE_FILE_EXTENSION))
        .collect();
    paths.sort();

    let mut shapes = Vec::new();
    for path in paths {
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let shape_id = stem
            .strip_prefix(SHAPE_FILE_PREFIX)
            .unwrap_or(stem)
            .to_uppercase();
        let points = shape_from_geojson(&shape_id, &fs::read_to_string(&path)?)?;
        debug!("Loaded {} points for shape {shape_id}", points.len());
        shapes.extend(points);
    }
    Ok(shapes)
}

fn line_positions(geometry: &Geometry) -> Option<Vec<Vec<f64>>> {
    match &geometry.value {
        Value::LineString(line) => Some(line.clone()),
        Value::MultiLineString(lines) => Some(lines.concat()),
        _ => None,
    }
}

fn round_km(distance: Distance) -> f64 {
    (distance.as_kilometers() * 1e6).round() / 1e6
}

#[test]
fn shape_from_line_string_test() {
    let text = r#"{"type": "LineString", "coordinates": [[13.8485, 46.6186], [14.0586, 46.4306], [14.0586, 46.4306]]}"#;
    let shapes = shape_from_geojson("EDIRNE", text).unwrap();
    assert_eq!(shapes.len(), 3);
    assert_eq!(shapes[0].shape_pt_sequence, 0);
    assert_eq!(shapes[0].shape_dist_traveled, Some(0.0));
    assert_eq!(shapes[1].shape_pt_lat, 46.4306);
    let leg = shapes[1].shape_dist_traveled.unwrap();
    assert!(leg > 25.0 && leg < 30.0);
    assert_eq!(shapes[2].shape_dist_traveled, Some(leg));
}

#[test]
fn shape_without_line_test() {
    let text = r#"{"type": "Point", "coordinates": [13.8485, 46.6186]}"#;
    assert!(matches!(
        shape_from_geojson("EDIRNE", text),
        Err(Error::MissingLineString(_))
    ));
}
