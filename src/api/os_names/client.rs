use std::time::Duration;

use anyhow::anyhow;
use reqwest::Url;

use super::types::*;
use crate::api::{ClientError, Geocoder};
use crate::geo::{bng, Coord};

const SERVICE: &str = "OS Names";
const TIMEOUT: Duration = Duration::from_secs(20);

/// Ordnance Survey Names API geocoder.
#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
    base: Url,
    key: String,
}

impl Client {
    pub fn new(base: &str, key: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(TIMEOUT).build()?;
        // Joined relatively so a path prefix on the base url is kept.
        let base = Url::parse(&format!("{}/", base.trim_end_matches('/')))
            .map_err(|e| anyhow!("{} is not a valid url: {}", base, e))?;

        Ok(Self {
            inner: client,
            base,
            key: key.into(),
        })
    }

    async fn find(&self, query: &str) -> Result<FindResponse, ClientError> {
        let url = self
            .base
            .join("search/names/v1/find")
            .map_err(|e| ClientError::UnexpectedResponse {
                service: SERVICE,
                message: format!("error joining url: {e}"),
            })?;

        log::debug!("[OS Names] find {query:?}");

        let response = self
            .inner
            .get(url)
            .query(&[("query", query), ("maxresults", "1"), ("key", self.key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            log::error!("OS Names returned {status}: {message}");

            return Err(ClientError::Api {
                service: SERVICE,
                status,
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| ClientError::UnexpectedResponse {
            service: SERVICE,
            message: format!("{e}"),
        })
    }
}

impl Geocoder for Client {
    async fn resolve(&self, name: &str) -> Result<Coord, ClientError> {
        let response = self.find(name).await?;

        let entry = response
            .results
            .into_iter()
            .next()
            .map(|r| r.entry)
            .ok_or_else(|| ClientError::NotFound(name.to_string()))?;

        let coord = bng::to_wgs84(entry.x, entry.y);
        log::debug!(
            "[OS Names] {name:?} resolved to {} ({}, {})",
            entry.name,
            coord.lat,
            coord.lon
        );

        Ok(coord)
    }
}
