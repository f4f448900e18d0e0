use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct DirectionsRequest {
    /// `[lon, lat]` pairs in travel order.
    pub coordinates: Vec<[f64; 2]>,
    pub instructions: bool,
}

/// Either the plain JSON directions body or its GeoJSON variant.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum DirectionsResponse {
    Routes { routes: Vec<Route> },
    Features { features: Vec<Feature> },
}

#[derive(Deserialize, Debug)]
pub struct Route {
    #[serde(default)]
    pub summary: Option<Summary>,
    pub geometry: RouteGeometry,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum RouteGeometry {
    Encoded(String),
    LineString { coordinates: Vec<Vec<f64>> },
}

#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct Summary {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Deserialize, Debug)]
pub struct Feature {
    pub geometry: Option<FeatureGeometry>,
    #[serde(default)]
    pub properties: FeatureProperties,
}

#[derive(Deserialize, Debug)]
pub struct FeatureGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: serde_json::Value,
}

#[derive(Deserialize, Debug, Default)]
pub struct FeatureProperties {
    #[serde(default)]
    pub summary: Option<Summary>,
}

#[derive(Deserialize, Debug)]
pub struct ErrorPayload {
    pub error: ErrorDetail,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum ErrorDetail {
    Structured { code: u32, message: String },
    Message(String),
}

impl ErrorDetail {
    pub fn describe(&self) -> String {
        match self {
            ErrorDetail::Structured { code, message } => format!("{message} (code {code})"),
            ErrorDetail::Message(message) => message.clone(),
        }
    }
}
