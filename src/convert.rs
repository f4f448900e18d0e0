//! GeoJSON and GPX conversion.
//!
//! GeoJSON positions are `[lon, lat]`; GPX points carry `lat`/`lon`
//! attributes. Conversions only swap the axis order: coordinates are never
//! resampled, deduplicated or reprojected, and their order is kept.

use geo_types::Point;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};
use serde_json::json;
use thiserror::Error;

use crate::api::{Profile, Route};

pub const CREATOR: &str = "hike-routes";

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("unsupported geometry: {0}")]
    InvalidGeometry(String),

    #[error("gpx error: {0}")]
    Gpx(String),
}

fn position(value: &serde_json::Value, feature: usize) -> Result<(f64, f64), ConvertError> {
    let numbers = value.as_array().map(|a| {
        a.iter()
            .map(serde_json::Value::as_f64)
            .collect::<Option<Vec<_>>>()
    });

    match numbers {
        Some(Some(p)) if p.len() >= 2 => Ok((p[0], p[1])),
        _ => Err(ConvertError::MalformedInput(format!(
            "feature {feature}: invalid position {value}"
        ))),
    }
}

fn waypoint(lon: f64, lat: f64) -> Waypoint {
    Waypoint::new(Point::new(lon, lat))
}

fn name_property(feature: &serde_json::Value) -> Option<String> {
    feature
        .get("properties")?
        .get("name")?
        .as_str()
        .map(str::to_string)
}

/// Converts a GeoJSON FeatureCollection into a GPX document.
///
/// Every LineString becomes a segment of a single track and every Point a
/// top-level waypoint. Any other geometry, or a feature without one, is
/// rejected rather than skipped.
pub fn geojson_to_gpx(data: &serde_json::Value) -> Result<Gpx, ConvertError> {
    let object = data
        .as_object()
        .ok_or_else(|| ConvertError::MalformedInput("expected a JSON object".into()))?;

    if let Some(kind) = object.get("type") {
        if kind != "FeatureCollection" {
            return Err(ConvertError::MalformedInput(format!(
                "expected a FeatureCollection, got {kind}"
            )));
        }
    }

    let features = object
        .get("features")
        .ok_or_else(|| ConvertError::MalformedInput("missing \"features\"".into()))?
        .as_array()
        .ok_or_else(|| ConvertError::MalformedInput("\"features\" is not an array".into()))?;

    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(CREATOR.into()),
        ..Default::default()
    };
    let mut track = Track::new();

    for (i, feature) in features.iter().enumerate() {
        if !feature.is_object() {
            return Err(ConvertError::MalformedInput(format!(
                "feature {i} is not an object"
            )));
        }

        let geometry = match feature.get("geometry") {
            Some(g) if !g.is_null() => g,
            _ => {
                return Err(ConvertError::InvalidGeometry(format!(
                    "feature {i} has no geometry"
                )))
            }
        };

        let kind = geometry.get("type").and_then(|t| t.as_str()).unwrap_or("");
        let coordinates = geometry.get("coordinates").unwrap_or(&serde_json::Value::Null);

        match kind {
            "Point" => {
                let (lon, lat) = position(coordinates, i)?;
                let mut point = waypoint(lon, lat);
                point.name = name_property(feature);
                gpx.waypoints.push(point);
            }
            "LineString" => {
                let positions = coordinates.as_array().ok_or_else(|| {
                    ConvertError::MalformedInput(format!("feature {i}: coordinates is not an array"))
                })?;

                let mut segment = TrackSegment::new();
                for p in positions {
                    let (lon, lat) = position(p, i)?;
                    segment.points.push(waypoint(lon, lat));
                }

                if track.segments.is_empty() {
                    track.name = name_property(feature);
                }
                track.segments.push(segment);
            }
            other => {
                return Err(ConvertError::InvalidGeometry(format!(
                    "feature {i} is a {other:?}, only Point and LineString are supported"
                )))
            }
        }
    }

    if !track.segments.is_empty() {
        gpx.tracks.push(track);
    }

    Ok(gpx)
}

pub fn write_gpx(gpx: &Gpx) -> Result<String, ConvertError> {
    let mut buffer = Vec::new();
    gpx::write(gpx, &mut buffer).map_err(|e| ConvertError::Gpx(e.to_string()))?;

    String::from_utf8(buffer).map_err(|e| ConvertError::Gpx(e.to_string()))
}

pub fn read_gpx(xml: &str) -> Result<Gpx, ConvertError> {
    gpx::read(xml.as_bytes()).map_err(|e| ConvertError::MalformedInput(e.to_string()))
}

fn feature(value: Value, name: Option<&String>) -> Feature {
    let properties = name.map(|n| {
        let mut props = JsonObject::new();
        props.insert("name".into(), json!(n));
        props
    });

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties,
        foreign_members: None,
    }
}

fn lon_lat(w: &Waypoint) -> Vec<f64> {
    let p = w.point();
    vec![p.x(), p.y()]
}

/// Converts GPX tracks and waypoints back to GeoJSON.
///
/// Each track segment becomes a LineString feature and each waypoint a
/// Point feature. GPX routes (`rte`) are not read.
pub fn gpx_to_geojson(gpx: &Gpx) -> FeatureCollection {
    let lines = gpx.tracks.iter().flat_map(|track| {
        track.segments.iter().map(move |segment| {
            let coords = segment.points.iter().map(lon_lat).collect();
            feature(Value::LineString(coords), track.name.as_ref())
        })
    });

    let points = gpx
        .waypoints
        .iter()
        .map(|w| feature(Value::Point(lon_lat(w)), w.name.as_ref()));

    FeatureCollection {
        bbox: None,
        features: lines.chain(points).collect(),
        foreign_members: None,
    }
}

/// Wraps a provider route in a single-feature collection.
pub fn route_to_feature_collection(route: &Route, profile: Profile) -> FeatureCollection {
    let coords = route.path.iter().map(|c| c.to_lon_lat()).collect();

    let mut properties = JsonObject::new();
    properties.insert("profile".into(), json!(profile.as_str()));
    if let Some(summary) = route.summary {
        properties.insert("distance_m".into(), json!(summary.distance_m));
        properties.insert("duration_s".into(), json!(summary.duration_s));
    }

    FeatureCollection {
        bbox: None,
        features: vec![Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::LineString(coords))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }],
        foreign_members: None,
    }
}
