use geojson::FeatureCollection;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::geo::{Coord, DEFAULT_OFFSET_LAT, DEFAULT_OFFSET_LON};

fn default_offset_lat() -> f64 {
    DEFAULT_OFFSET_LAT
}

fn default_offset_lon() -> f64 {
    DEFAULT_OFFSET_LON
}

#[derive(Serialize, Deserialize)]
pub struct RouteRequest {
    pub start_name: String,

    /// Free-form description of the hike. Accepted but not interpreted.
    #[serde(default)]
    pub prompt: Option<String>,

    #[serde(default = "default_offset_lat")]
    pub offset_lat: f64,

    #[serde(default = "default_offset_lon")]
    pub offset_lon: f64,
}

#[derive(Serialize, Deserialize)]
pub struct RouteResponse {
    pub start: Coord,
    pub geojson: FeatureCollection,
}

#[derive(Serialize, Deserialize)]
pub struct GeoJsonPayload {
    pub data: serde_json::Value,
}

#[derive(Serialize, Deserialize)]
pub struct MapQuery {
    pub start_name: String,

    #[serde(default = "default_offset_lat")]
    pub offset_lat: f64,

    #[serde(default = "default_offset_lon")]
    pub offset_lon: f64,
}

#[derive(Serialize, Deserialize)]
pub struct CoordsPayload {
    pub coordinates: Vec<Coord>,
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    #[serde(skip, default = "default_status")]
    pub status: StatusCode,
    pub error: String,
    pub message: String,
}

fn default_status() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}
