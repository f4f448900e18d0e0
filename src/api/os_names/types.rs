use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct FindResponse {
    #[serde(default)]
    pub results: Vec<FindResult>,
}

#[derive(Deserialize, Debug)]
pub struct FindResult {
    #[serde(rename = "GAZETTEER_ENTRY")]
    pub entry: GazetteerEntry,
}

#[derive(Deserialize, Debug)]
pub struct GazetteerEntry {
    #[serde(rename = "NAME1", default)]
    pub name: String,

    #[serde(rename = "GEOMETRY_X")]
    pub x: f64,

    #[serde(rename = "GEOMETRY_Y")]
    pub y: f64,
}

#[derive(Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Deserialize, Debug)]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: String,
}
