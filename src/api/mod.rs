use std::fmt;
use std::future::Future;
use std::str::FromStr;

use reqwest::StatusCode;
use thiserror::Error;

use crate::geo::Coord;

pub mod ors;
pub mod os_names;
pub mod service;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("no match for place name {0:?}")]
    NotFound(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{service} returned {status}: {message}")]
    Api {
        service: &'static str,
        status: StatusCode,
        message: String,
    },

    #[error("unexpected response from {service}: {message}")]
    UnexpectedResponse {
        service: &'static str,
        message: String,
    },
}

/// Travel mode passed to the route provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profile {
    #[default]
    FootHiking,
    FootWalking,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::FootHiking => "foot-hiking",
            Profile::FootWalking => "foot-walking",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "foot-hiking" => Ok(Profile::FootHiking),
            "foot-walking" => Ok(Profile::FootWalking),
            other => Err(format!("unsupported profile {other:?}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteSummary {
    pub distance_m: f64,
    pub duration_s: f64,
}

/// Path returned by a route provider, in travel order.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub path: Vec<Coord>,
    pub summary: Option<RouteSummary>,
}

/// Resolves a free-text place name to a single position.
pub trait Geocoder: Clone + Send + Sync + 'static {
    fn resolve(&self, name: &str) -> impl Future<Output = Result<Coord, ClientError>> + Send;
}

/// Connects an ordered list of waypoints with a travelable path.
pub trait RouteProvider: Clone + Send + Sync + 'static {
    fn route(
        &self,
        waypoints: &[Coord],
        profile: Profile,
    ) -> impl Future<Output = Result<Route, ClientError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_parses_and_prints() {
        assert_eq!("foot-hiking".parse::<Profile>(), Ok(Profile::FootHiking));
        assert_eq!("foot-walking".parse::<Profile>(), Ok(Profile::FootWalking));
        assert!("driving-car".parse::<Profile>().is_err());
        assert_eq!(Profile::default().to_string(), "foot-hiking");
    }
}
