use std::time::Duration;

use anyhow::anyhow;
use reqwest::Url;

use super::types::*;
use crate::api::{ClientError, Profile, Route, RouteProvider, RouteSummary};
use crate::geo::{polyline, Coord};

const SERVICE: &str = "openrouteservice";
const TIMEOUT: Duration = Duration::from_secs(40);

/// openrouteservice directions client.
#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
    base: Url,
    key: String,
}

impl Client {
    pub fn new(base: &str, key: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(TIMEOUT).build()?;
        // Relative joins keep any path prefix, e.g. a self-hosted `/ors`.
        let base = Url::parse(&format!("{}/", base.trim_end_matches('/')))
            .map_err(|e| anyhow!("{} is not a valid url: {}", base, e))?;

        Ok(Self {
            inner: client,
            base,
            key: key.into(),
        })
    }

    pub async fn directions(
        &self,
        r: &DirectionsRequest,
        profile: Profile,
    ) -> Result<DirectionsResponse, ClientError> {
        let url = self
            .base
            .join(&format!("v2/directions/{profile}"))
            .map_err(|e| unexpected(format!("error joining url: {e}")))?;

        log::debug!(
            "[ORS] directions ({profile}) through {} waypoints",
            r.coordinates.len()
        );

        let response = self
            .inner
            .post(url)
            .header("Authorization", &self.key)
            .json(r)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorPayload>(&text) {
                Ok(payload) => payload.error.describe(),
                Err(_) => text,
            };
            log::error!("ORS returned {status}: {message}");

            return Err(ClientError::Api {
                service: SERVICE,
                status,
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            log::error!("Failed to parse DirectionsResponse: {e}. Body: {text}");
            unexpected(format!("{e}"))
        })
    }
}

impl RouteProvider for Client {
    async fn route(&self, waypoints: &[Coord], profile: Profile) -> Result<Route, ClientError> {
        let request = DirectionsRequest {
            coordinates: waypoints.iter().map(|c| [c.lon, c.lat]).collect(),
            instructions: false,
        };

        let response = self.directions(&request, profile).await?;
        let route = into_route(response)?;

        log::debug!("[ORS] route has {} points", route.path.len());

        Ok(route)
    }
}

fn unexpected(message: String) -> ClientError {
    ClientError::UnexpectedResponse {
        service: SERVICE,
        message,
    }
}

fn summary(s: Summary) -> RouteSummary {
    RouteSummary {
        distance_m: s.distance,
        duration_s: s.duration,
    }
}

fn positions_to_path(positions: Vec<Vec<f64>>) -> Result<Vec<Coord>, ClientError> {
    positions
        .into_iter()
        .map(|p| match p[..] {
            [lon, lat, ..] => Ok(Coord { lat, lon }),
            _ => Err(unexpected(format!("position {p:?} has fewer than two values"))),
        })
        .collect()
}

pub(crate) fn into_route(response: DirectionsResponse) -> Result<Route, ClientError> {
    match response {
        DirectionsResponse::Routes { routes } => {
            let route = routes
                .into_iter()
                .next()
                .ok_or_else(|| unexpected("no route found in success response".to_string()))?;

            let path = match route.geometry {
                RouteGeometry::Encoded(encoded) => {
                    polyline::decode_route(&encoded)
                        .map_err(|e| unexpected(format!("bad route geometry: {e}")))?
                }
                RouteGeometry::LineString { coordinates } => positions_to_path(coordinates)?,
            };

            Ok(Route {
                path,
                summary: route.summary.map(summary),
            })
        }
        DirectionsResponse::Features { features } => {
            let (geometry, properties) = features
                .into_iter()
                .find_map(|f| match f.geometry {
                    Some(g) if g.kind == "LineString" => Some((g, f.properties)),
                    _ => None,
                })
                .ok_or_else(|| unexpected("no LineString feature in response".to_string()))?;

            let positions: Vec<Vec<f64>> = serde_json::from_value(geometry.coordinates)
                .map_err(|e| unexpected(format!("bad route geometry: {e}")))?;

            Ok(Route {
                path: positions_to_path(positions)?,
                summary: properties.summary.map(summary),
            })
        }
    }
}
