pub mod endpoints;
pub mod router;
pub mod types;

use axum::extract::rejection::{JsonRejection, QueryRejection, StringRejection};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::StatusCode;

use crate::api::{ClientError, Geocoder, Profile, RouteProvider};
use crate::convert::ConvertError;
use crate::html::TileSource;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState<G, R> {
    pub geocoder: G,
    pub directions: R,
    pub profile: Profile,
    pub tiles: TileSource,
}

impl<G: Geocoder, R: RouteProvider> AppState<G, R> {
    pub fn new(geocoder: G, directions: R, profile: Profile, tiles: TileSource) -> Self {
        Self {
            geocoder,
            directions,
            profile,
            tiles,
        }
    }
}

impl IntoResponse for types::ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl types::ErrorResponse {
    fn new(status: StatusCode, error: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.to_string(),
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_input", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
    }
}

impl From<ClientError> for types::ErrorResponse {
    fn from(value: ClientError) -> Self {
        match value {
            ClientError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "not_found", value.to_string()),
            _ => Self::new(StatusCode::BAD_GATEWAY, "upstream_error", value.to_string()),
        }
    }
}

impl From<ConvertError> for types::ErrorResponse {
    fn from(value: ConvertError) -> Self {
        match value {
            ConvertError::MalformedInput(_) => {
                Self::new(StatusCode::BAD_REQUEST, "malformed_input", value.to_string())
            }
            ConvertError::InvalidGeometry(_) => {
                Self::new(StatusCode::BAD_REQUEST, "invalid_geometry", value.to_string())
            }
            ConvertError::Gpx(_) => Self::internal(value.to_string()),
        }
    }
}

impl From<JsonRejection> for types::ErrorResponse {
    fn from(value: JsonRejection) -> Self {
        Self::invalid_input(value.body_text())
    }
}

impl From<QueryRejection> for types::ErrorResponse {
    fn from(value: QueryRejection) -> Self {
        Self::invalid_input(value.body_text())
    }
}

impl From<StringRejection> for types::ErrorResponse {
    fn from(value: StringRejection) -> Self {
        Self::invalid_input(value.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::types::ErrorResponse;
    use super::*;

    #[test]
    fn maps_errors_to_statuses() {
        let not_found = ErrorResponse::from(ClientError::NotFound("Atlantis".into()));
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.error, "not_found");

        let upstream = ErrorResponse::from(ClientError::Api {
            service: "openrouteservice",
            status: StatusCode::FORBIDDEN,
            message: "Access to this API has been disallowed".into(),
        });
        assert_eq!(upstream.status, StatusCode::BAD_GATEWAY);
        assert!(upstream.message.contains("disallowed"));

        let geometry = ErrorResponse::from(ConvertError::InvalidGeometry("Polygon".into()));
        assert_eq!(geometry.status, StatusCode::BAD_REQUEST);
        assert_eq!(geometry.error, "invalid_geometry");

        let malformed = ErrorResponse::from(ConvertError::MalformedInput("no features".into()));
        assert_eq!(malformed.error, "malformed_input");
    }
}
