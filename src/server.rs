//! HTTP surface: the upload relay plus the full scale-and-publish
//! pipeline endpoint.
//!
//! Every request is an independent unit of work against an `Arc` snapshot
//! of the reference asset; nothing here holds a lock across an await.
//! Failures are request-scoped and reported as JSON `{"error": ...}`
//! bodies with the status codes the error taxonomy calls for.

use crate::asset::AssetCache;
use crate::config::ServiceConfig;
use crate::dims::{RawDimensions, TargetDimensions};
use crate::float_types::Real;
use crate::io::glb::{self, GLB_MIME};
use crate::io::IoError;
use crate::scaling::ScaleFactors;
use crate::storage::{self, ObjectStore};
use actix_web::{get, post, web, HttpResponse, Responder};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

/// Shared per-process state handed to every handler.
pub struct AppState {
    pub cache: RwLock<AssetCache>,
    pub store: Arc<dyn ObjectStore>,
    pub config: ServiceConfig,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        ErrorBody {
            error: error.into(),
            details: None,
        }
    }
}

#[derive(Serialize)]
struct UploadResponse {
    url: String,
}

#[derive(Serialize)]
struct DoorResponse {
    url: String,
    height_m: Real,
    width_m: Real,
    scale: ScaleFactors,
}

/// Relay endpoint: accept a raw GLB body and persist it.
///
/// Contract: `Content-Type: application/octet-stream`, empty bodies are a
/// 400, success is `{"url": ...}`, storage failures are a 500 with a
/// generic message (the cause goes to the log, not the client).
#[post("/upload-glb")]
async fn upload_glb(state: web::Data<AppState>, body: web::Bytes) -> impl Responder {
    if body.is_empty() {
        return HttpResponse::BadRequest().json(ErrorBody::new("no data received, body is empty"));
    }

    let key = storage::object_key();
    info!(bytes = body.len(), key = %key, "relaying upload to storage");

    match state.store.put(&key, body.to_vec(), GLB_MIME).await {
        Ok(()) => {
            let url = storage::public_url(&state.config.storage.public_base_url, &key);
            HttpResponse::Ok().json(UploadResponse { url })
        },
        Err(e) => {
            error!(key = %key, "storage upload failed: {e}");
            HttpResponse::InternalServerError()
                .json(ErrorBody::new("failed to upload model to storage"))
        },
    }
}

/// Full pipeline: validate dimensions, scale a copy of the reference,
/// serialize it, upload it, return the public URL.
#[post("/doors")]
async fn create_door(
    state: web::Data<AppState>,
    raw: web::Json<RawDimensions>,
) -> impl Responder {
    // Fail fast until the one-shot load has succeeded. The guard is
    // released before any await point.
    let cache = state.cache.read();
    let Some(asset) = cache.ready() else {
        return HttpResponse::ServiceUnavailable().json(ErrorBody {
            error: "asset not ready".into(),
            details: Some(cache.state_name().into()),
        });
    };
    drop(cache);

    let dims = match TargetDimensions::from_feet_inches(&raw, &state.config.limits) {
        Ok(dims) => dims,
        Err(e) => {
            info!("rejected dimensions: {e}");
            return HttpResponse::UnprocessableEntity().json(ErrorBody::new(e.to_string()));
        },
    };

    // Clone-scale-serialize is CPU-bound; keep it off the async executor.
    let floor = state.config.min_export_bytes;
    let ceiling = state.config.max_upload_bytes;
    let export = web::block(move || -> Result<(Vec<u8>, ScaleFactors), IoError> {
        let (scaled, factors) = asset.scaled(&dims);
        let buffer = glb::to_glb(&scaled, "door")?;
        glb::check_output_size(&buffer, floor, ceiling)?;
        Ok((buffer, factors))
    })
    .await;

    let (buffer, factors) = match export {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            error!("export failed: {e}");
            return HttpResponse::InternalServerError()
                .json(ErrorBody::new("failed to generate the scaled model"));
        },
        Err(e) => {
            error!("export task aborted: {e}");
            return HttpResponse::InternalServerError()
                .json(ErrorBody::new("failed to generate the scaled model"));
        },
    };

    let key = storage::object_key();
    info!(
        bytes = buffer.len(),
        key = %key,
        sx = factors.sx,
        sy = factors.sy,
        "uploading scaled door"
    );

    match state.store.put(&key, buffer, GLB_MIME).await {
        Ok(()) => {
            let url = storage::public_url(&state.config.storage.public_base_url, &key);
            HttpResponse::Ok().json(DoorResponse {
                url,
                height_m: dims.height_m(),
                width_m: dims.width_m(),
                scale: factors,
            })
        },
        Err(e) => {
            error!(key = %key, "storage upload failed: {e}");
            HttpResponse::BadGateway().json(ErrorBody::new("failed to store the scaled model"))
        },
    }
}

#[derive(Serialize)]
struct Health {
    asset: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

#[get("/healthz")]
async fn healthz(state: web::Data<AppState>) -> impl Responder {
    let cache = state.cache.read();
    let detail = match &*cache {
        AssetCache::Failed(cause) => Some(cause.clone()),
        _ => None,
    };
    HttpResponse::Ok().json(Health {
        asset: cache.state_name(),
        detail,
    })
}

/// Mount every route on an actix `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(upload_glb).service(create_door).service(healthz);
}
