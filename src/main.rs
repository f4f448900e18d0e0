use env_logger::{Builder, Env};
use hike_routes::api::service::{router::router, AppState};
use hike_routes::api::{ors, os_names};
use hike_routes::config::{Config, REQUIRED_VARIABLES};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        log::error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::env().inspect_err(|e| {
        log::error!(
            "config: {e}. Check all required environment variables ({}) are set.",
            REQUIRED_VARIABLES.join(", ")
        );
    })?;

    config.log();

    let geocoder = os_names::Client::new(&config.os_names_url, config.os_api_key.clone())?;
    log::info!("Using OS Names at {}", config.os_names_url);

    let directions = ors::Client::new(&config.ors_url, config.ors_api_key.clone())?;
    log::info!("Using openrouteservice at {}", config.ors_url);

    let state = AppState::new(geocoder, directions, config.profile, config.tiles.clone());

    let listen_addr = format!("0.0.0.0:{}", config.listen_port);
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;

    log::info!("Listening on {listen_addr}");
    axum::serve(listener, router(state)).await?;

    Ok(())
}
