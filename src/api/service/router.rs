use axum::routing::{get, post};

use super::endpoints::*;
use super::AppState;
use crate::api::{Geocoder, RouteProvider};

pub fn router<G: Geocoder, R: RouteProvider>(state: AppState<G, R>) -> axum::Router {
    axum::Router::new()
        .route("/health", get(health))
        .route("/route", post(create_route::<G, R>))
        .route("/gpx", post(gpx_for_route::<G, R>))
        .route("/gpx-from-geojson", post(gpx_from_geojson))
        .route("/geojson-from-gpx", post(geojson_from_gpx))
        .route("/map", get(map_view::<G, R>))
        .route("/map-from-coords", post(map_from_coords::<G, R>))
        .with_state(state)
}
