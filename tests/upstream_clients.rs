use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Json;
use hike_routes::api::{ors, os_names, ClientError, Geocoder, Profile, RouteProvider};
use hike_routes::geo::Coord;
use serde_json::{json, Value};

mod common;
use common::spawn;

const OS_KEY: &str = "os-test-key";
const ORS_KEY: &str = "ors-test-key";

async fn find(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    if params.get("key").map(String::as_str) != Some(OS_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "statuscode": 401, "message": "Missing or unsupported API key provided." } })),
        );
    }

    let results = match params.get("query").map(String::as_str) {
        Some("Southampton Central") => json!([{ "GAZETTEER_ENTRY": {
            "ID": "osgb4000000074564392",
            "NAME1": "Southampton Central",
            "GEOMETRY_X": 441330.0,
            "GEOMETRY_Y": 112160.0
        } }]),
        _ => json!([]),
    };

    (
        StatusCode::OK,
        Json(json!({ "header": { "maxresults": 1 }, "results": results })),
    )
}

async fn directions(
    Path(profile): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some(ORS_KEY) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Access to this API has been disallowed" })),
        );
    }

    if profile != "foot-walking" && profile != "foot-hiking" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "code": 2003, "message": "Invalid profile" } })),
        );
    }

    let coordinates = body["coordinates"].clone();
    if coordinates[0] == json!([0.0, 0.0]) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "code": 2010, "message": "Could not find routable point" } })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "routes": [{
                "summary": { "distance": 1234.5, "duration": 987.0 },
                "geometry": { "type": "LineString", "coordinates": coordinates }
            }]
        })),
    )
}

async fn spawn_os_names() -> String {
    spawn(axum::Router::new().route("/search/names/v1/find", get(find))).await
}

async fn spawn_ors() -> String {
    spawn(axum::Router::new().route("/ors/v2/directions/{profile}", post(directions))).await
}

#[tokio::test]
async fn test_os_names_resolves_to_wgs84() {
    let base = spawn_os_names().await;
    let client = os_names::Client::new(&base, OS_KEY).unwrap();

    let coord = client.resolve("Southampton Central").await.unwrap();

    assert!((50.89..50.93).contains(&coord.lat), "lat {}", coord.lat);
    assert!((-1.44..-1.38).contains(&coord.lon), "lon {}", coord.lon);
}

#[tokio::test]
async fn test_os_names_unknown_place() {
    let base = spawn_os_names().await;
    let client = os_names::Client::new(&base, OS_KEY).unwrap();

    let err = client.resolve("Xyzzy Nowhere").await.unwrap_err();

    assert!(matches!(err, ClientError::NotFound(name) if name == "Xyzzy Nowhere"));
}

#[tokio::test]
async fn test_os_names_bad_key() {
    let base = spawn_os_names().await;
    let client = os_names::Client::new(&base, "wrong").unwrap();

    match client.resolve("Southampton Central").await {
        Err(ClientError::Api { status, message, .. }) => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert!(message.contains("API key"));
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_ors_routes_through_waypoints() {
    let base = spawn_ors().await;
    let client = ors::Client::new(&format!("{base}/ors/"), ORS_KEY).unwrap();

    let waypoints = [
        Coord { lat: 50.909, lon: -1.404 },
        Coord { lat: 50.929, lon: -1.354 },
        Coord { lat: 50.909, lon: -1.404 },
    ];

    let route = client.route(&waypoints, Profile::FootHiking).await.unwrap();

    assert_eq!(route.path, waypoints.to_vec());
    let summary = route.summary.unwrap();
    assert_eq!(summary.distance_m, 1234.5);
    assert_eq!(summary.duration_s, 987.0);
}

#[tokio::test]
async fn test_ors_error_payload() {
    let base = spawn_ors().await;
    let client = ors::Client::new(&format!("{base}/ors"), ORS_KEY).unwrap();

    let waypoints = [Coord { lat: 0.0, lon: 0.0 }, Coord { lat: 0.02, lon: 0.05 }];

    match client.route(&waypoints, Profile::FootWalking).await {
        Err(ClientError::Api { status, message, .. }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(message, "Could not find routable point (code 2010)");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_ors_bad_key() {
    let base = spawn_ors().await;
    let client = ors::Client::new(&format!("{base}/ors"), "wrong").unwrap();

    let waypoints = [Coord { lat: 50.909, lon: -1.404 }, Coord { lat: 50.929, lon: -1.354 }];

    match client.route(&waypoints, Profile::FootHiking).await {
        Err(ClientError::Api { status, message, .. }) => {
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(message, "Access to this API has been disallowed");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}
