use axum::extract::rejection::{JsonRejection, QueryRejection, StringRejection};
use axum::extract::{Json, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use geojson::FeatureCollection;
use gpx::Gpx;

use super::types::*;
use super::AppState;
use crate::api::{Geocoder, Route, RouteProvider};
use crate::convert;
use crate::geo::{loop_waypoints, Coord, Offset};
use crate::html::{render_map, MapPage};

pub type Result<T> = std::result::Result<T, ErrorResponse>;

fn offset(lat: f64, lon: f64) -> Result<Offset> {
    if !lat.is_finite() || !lon.is_finite() {
        return Err(ErrorResponse::invalid_input("offsets must be finite numbers"));
    }

    Ok(Offset { lat, lon })
}

/// Geocodes `start_name`, builds the loop waypoints and routes through them.
async fn plan_loop<G: Geocoder, R: RouteProvider>(
    state: &AppState<G, R>,
    start_name: &str,
    offset: Offset,
) -> Result<(Coord, Route)> {
    let start_name = start_name.trim();
    if start_name.is_empty() {
        return Err(ErrorResponse::invalid_input("start_name must not be empty"));
    }

    let start = state.geocoder.resolve(start_name).await.inspect_err(|e| {
        log::warn!("geocoding {start_name:?} failed: {e}");
    })?;

    let start = Coord::new(start.lat, start.lon).map_err(|e| {
        ErrorResponse::from(crate::api::ClientError::UnexpectedResponse {
            service: "geocoder",
            message: e.to_string(),
        })
    })?;

    let waypoints = loop_waypoints(start, offset);

    let route = state
        .directions
        .route(&waypoints, state.profile)
        .await
        .inspect_err(|e| log::warn!("routing from {start_name:?} failed: {e}"))?;

    log::info!(
        "planned {} loop from {start_name:?} ({}, {}): {} points",
        state.profile,
        start.lat,
        start.lon,
        route.path.len()
    );

    Ok((start, route))
}

fn gpx_response(gpx: &Gpx) -> Result<Response> {
    let xml = convert::write_gpx(gpx)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/gpx+xml"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"route.gpx\""),
        ],
        xml,
    )
        .into_response())
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn create_route<G: Geocoder, R: RouteProvider>(
    State(state): State<AppState<G, R>>,
    payload: std::result::Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<RouteResponse>> {
    let Json(r) = payload?;
    if let Some(prompt) = &r.prompt {
        log::debug!("route prompt (not interpreted): {prompt:?}");
    }

    let (start, route) = plan_loop(&state, &r.start_name, offset(r.offset_lat, r.offset_lon)?).await?;
    let geojson = convert::route_to_feature_collection(&route, state.profile);

    Ok(Json(RouteResponse { start, geojson }))
}

pub async fn gpx_for_route<G: Geocoder, R: RouteProvider>(
    State(state): State<AppState<G, R>>,
    payload: std::result::Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(r) = payload?;

    let (_, route) = plan_loop(&state, &r.start_name, offset(r.offset_lat, r.offset_lon)?).await?;
    let geojson = convert::route_to_feature_collection(&route, state.profile);
    let value = serde_json::to_value(&geojson).map_err(|e| ErrorResponse::internal(e.to_string()))?;

    gpx_response(&convert::geojson_to_gpx(&value)?)
}

pub async fn gpx_from_geojson(
    payload: std::result::Result<Json<GeoJsonPayload>, JsonRejection>,
) -> Result<Response> {
    let Json(r) = payload?;

    let gpx = convert::geojson_to_gpx(&r.data).inspect_err(|e| {
        log::info!("rejected GeoJSON for GPX conversion: {e}");
    })?;

    gpx_response(&gpx)
}

pub async fn geojson_from_gpx(
    body: std::result::Result<String, StringRejection>,
) -> Result<Json<FeatureCollection>> {
    let gpx = convert::read_gpx(&body?)?;

    Ok(Json(convert::gpx_to_geojson(&gpx)))
}

pub async fn map_view<G: Geocoder, R: RouteProvider>(
    State(state): State<AppState<G, R>>,
    query: std::result::Result<Query<MapQuery>, QueryRejection>,
) -> Result<Html<String>> {
    let Query(q) = query?;

    let (start, route) = plan_loop(&state, &q.start_name, offset(q.offset_lat, q.offset_lon)?).await?;
    let geojson = convert::route_to_feature_collection(&route, state.profile);

    let html = render_map(&MapPage {
        title: &format!("Hike from {}", q.start_name.trim()),
        start,
        route: &geojson,
        markers: &[],
        tiles: &state.tiles,
    })
    .map_err(|e| ErrorResponse::internal(e.to_string()))?;

    Ok(Html(html))
}

pub async fn map_from_coords<G: Geocoder, R: RouteProvider>(
    State(state): State<AppState<G, R>>,
    payload: std::result::Result<Json<CoordsPayload>, JsonRejection>,
) -> Result<Html<String>> {
    let Json(r) = payload?;

    if r.coordinates.len() < 2 {
        return Err(ErrorResponse::invalid_input(
            "provide at least two coordinates to draw a line",
        ));
    }

    let path = r
        .coordinates
        .iter()
        .map(|c| Coord::new(c.lat, c.lon))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ErrorResponse::invalid_input(e.to_string()))?;

    let route = Route { path, summary: None };
    let geojson = convert::route_to_feature_collection(&route, state.profile);

    let html = render_map(&MapPage {
        title: "Custom Coordinates Map",
        start: route.path[0],
        route: &geojson,
        markers: &route.path,
        tiles: &state.tiles,
    })
    .map_err(|e| ErrorResponse::internal(e.to_string()))?;

    Ok(Html(html))
}
