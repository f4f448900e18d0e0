use std::env::VarError;

use anyhow::anyhow;

use crate::api::Profile;
use crate::html::TileSource;

pub const REQUIRED_VARIABLES: [&str; 2] = ["OS_API_KEY", "ORS_API_KEY"];

pub const DEFAULT_LISTEN_PORT: u16 = 8000;
pub const DEFAULT_OS_NAMES_URL: &str = "https://api.os.uk";
pub const DEFAULT_ORS_URL: &str = "https://api.openrouteservice.org";

pub struct Config {
    pub os_api_key: String,
    pub ors_api_key: String,
    pub listen_port: u16,
    pub os_names_url: String,
    pub ors_url: String,
    pub profile: Profile,
    pub tiles: TileSource,
}

impl Config {
    pub fn env() -> anyhow::Result<Self> {
        Self::from_vars(|name| std::env::var(name))
    }

    /// Builds the configuration from a variable lookup such as `std::env::var`.
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let required = |name: &str| -> anyhow::Result<String> {
            match var(name) {
                Ok(v) if !v.trim().is_empty() => Ok(v),
                Ok(_) => Err(anyhow!("{name} is empty")),
                Err(e) => Err(var_error(name, e)),
            }
        };
        let optional = |name: &str| -> anyhow::Result<Option<String>> {
            match var(name) {
                Ok(v) => Ok(Some(v)),
                Err(VarError::NotPresent) => Ok(None),
                Err(e) => Err(var_error(name, e)),
            }
        };

        let os_api_key = required("OS_API_KEY")?;
        let ors_api_key = required("ORS_API_KEY")?;

        let listen_port = match optional("LISTEN_PORT")? {
            Some(port) => port
                .parse()
                .map_err(|e| anyhow!("LISTEN_PORT {port:?} is not a valid port: {e}"))?,
            None => DEFAULT_LISTEN_PORT,
        };

        let profile = match optional("ORS_PROFILE")? {
            Some(profile) => profile.parse().map_err(|e| anyhow!("ORS_PROFILE: {e}"))?,
            None => Profile::default(),
        };

        let tiles = match optional("MAP_TILES")?.as_deref() {
            None | Some("os") => TileSource::Os {
                key: os_api_key.clone(),
            },
            Some("osm") => TileSource::OpenStreetMap,
            Some(other) => return Err(anyhow!("MAP_TILES {other:?} must be \"os\" or \"osm\"")),
        };

        Ok(Self {
            os_api_key,
            ors_api_key,
            listen_port,
            os_names_url: optional("OS_NAMES_URL")?.unwrap_or_else(|| DEFAULT_OS_NAMES_URL.into()),
            ors_url: optional("ORS_URL")?.unwrap_or_else(|| DEFAULT_ORS_URL.into()),
            profile,
            tiles,
        })
    }

    pub fn log(&self) {
        log::info!("OS_API_KEY: {}", mask(&self.os_api_key));
        log::info!("ORS_API_KEY: {}", mask(&self.ors_api_key));
        log::info!("LISTEN_PORT: {}", self.listen_port);
        log::info!("OS_NAMES_URL: {}", self.os_names_url);
        log::info!("ORS_URL: {}", self.ors_url);
        log::info!("ORS_PROFILE: {}", self.profile);
        log::info!(
            "MAP_TILES: {}",
            match self.tiles {
                TileSource::Os { .. } => "os",
                TileSource::OpenStreetMap => "osm",
            }
        );
    }
}

fn var_error(name: &str, e: VarError) -> anyhow::Error {
    match e {
        VarError::NotPresent => anyhow!("{name} not set"),
        VarError::NotUnicode(_) => anyhow!("{name} value is not valid unicode"),
    }
}

fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
