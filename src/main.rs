// doorscale service binary: read configuration, kick off the one-shot
// reference-asset load, and serve the relay + pipeline endpoints.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use doorscale::asset::{AssetCache, ReferenceAsset};
use doorscale::config::ServiceConfig;
use doorscale::server::{self, AppState};
use doorscale::storage::S3Store;
use doorscale::traits::Transformable;
use parking_lot::RwLock;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Missing storage configuration aborts here, before anything binds.
    let config = ServiceConfig::from_env().context("incomplete service configuration")?;
    let bind_addr = config.bind_addr.clone();
    let max_upload_bytes = config.max_upload_bytes;

    let store = S3Store::connect(&config.storage).await;
    let state = web::Data::new(AppState {
        cache: RwLock::new(AssetCache::Loading),
        store: Arc::new(store),
        config,
    });

    // One-shot load in the background: the server accepts requests
    // immediately and answers 503 until the cache is Ready.
    let loader_state = state.clone();
    actix_web::rt::spawn(async move {
        let path = loader_state.config.model_path.clone();
        match ReferenceAsset::load(&path).await {
            Ok(asset) => {
                let size = asset.scene().size();
                info!(
                    path = %path.display(),
                    width_m = size.x,
                    height_m = size.y,
                    depth_m = size.z,
                    "reference asset ready"
                );
                *loader_state.cache.write() = AssetCache::Ready(Arc::new(asset));
            },
            Err(e) => {
                error!(path = %path.display(), "reference asset load failed: {e}");
                *loader_state.cache.write() = AssetCache::Failed(e.to_string());
            },
        }
    });

    info!(addr = %bind_addr, "doorscale listening");
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(max_upload_bytes))
            .wrap(Cors::permissive())
            .configure(server::configure)
    })
    .bind(&bind_addr)
    .with_context(|| format!("could not bind {bind_addr}"))?
    .run()
    .await?;

    Ok(())
}
