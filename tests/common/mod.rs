#![allow(dead_code)]

use hike_routes::api::service::{router::router, AppState};
use hike_routes::api::{ClientError, Geocoder, Profile, Route, RouteProvider, RouteSummary};
use hike_routes::geo::Coord;
use hike_routes::html::TileSource;
use reqwest::StatusCode;

pub const SOUTHAMPTON: Coord = Coord {
    lat: 50.907_595,
    lon: -1.413_791,
};

/// Geocoder that knows a single place.
#[derive(Clone)]
pub struct FakeGeocoder;

impl Geocoder for FakeGeocoder {
    async fn resolve(&self, name: &str) -> Result<Coord, ClientError> {
        match name {
            "Southampton Central Station" => Ok(SOUTHAMPTON),
            "Outage" => Err(ClientError::Api {
                service: "OS Names",
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: "maintenance".into(),
            }),
            other => Err(ClientError::NotFound(other.to_string())),
        }
    }
}

/// Route provider that walks straight through the waypoints it is given.
#[derive(Clone)]
pub struct FakeRouter {
    pub fail: bool,
}

impl RouteProvider for FakeRouter {
    async fn route(&self, waypoints: &[Coord], _profile: Profile) -> Result<Route, ClientError> {
        if self.fail {
            return Err(ClientError::Api {
                service: "openrouteservice",
                status: StatusCode::BAD_REQUEST,
                message: "Could not find routable point (code 2010)".into(),
            });
        }

        Ok(Route {
            path: waypoints.to_vec(),
            summary: Some(RouteSummary {
                distance_m: 8250.0,
                duration_s: 6100.0,
            }),
        })
    }
}

pub async fn spawn(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

pub async fn spawn_service(fail_routing: bool) -> String {
    let state = AppState::new(
        FakeGeocoder,
        FakeRouter { fail: fail_routing },
        Profile::FootHiking,
        TileSource::Os {
            key: "test-os-key".into(),
        },
    );

    spawn(router(state)).await
}
