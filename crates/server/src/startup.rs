use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::hospitals::HospitalStore;
use service::storage::json_file::JsonFileStorage;

use crate::routes;
use crate::state::ServerState;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load bind address and data file from configs or env vars, with sensible
/// fallbacks
fn load_settings() -> anyhow::Result<(SocketAddr, String)> {
    let (host, port, data_file) = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => (cfg.server.host, cfg.server.port, cfg.storage.data_file),
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(3000);
            let data_file =
                env::var("DATA_FILE").unwrap_or_else(|_| "data/hospitals.json".to_string());
            (host, port, data_file)
        }
    };
    Ok((format!("{}:{}", host, port).parse()?, data_file))
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let (addr, data_file) = load_settings()?;

    // Hospital collection persisted as a single JSON file
    let storage = JsonFileStorage::new(&data_file).await?;
    let hospitals = HospitalStore::new(Arc::new(storage));

    let state = ServerState { hospitals };

    let cors = build_cors();
    let app: Router = routes::build_router(cors, state);

    info!(%addr, %data_file, "hospital record service listening");
    println!("hospital record service listening at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
