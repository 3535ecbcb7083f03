use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use carenav_checklists::ChecklistRegistry;

mod config;
mod error;
mod middleware;
mod routes;
mod state;

use config::ApiConfig;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ApiConfig::from_env();

    let registry = match &config.checklist_dir {
        Some(dir) => ChecklistRegistry::from_dir(dir)?,
        None => ChecklistRegistry::embedded()?,
    };
    tracing::info!(checklists = registry.len(), "checklist registry ready");

    let s3 = carenav_storage::client::build_client(config.region.clone()).await;

    let state = AppState {
        s3,
        bucket: config.bucket,
        registry: Arc::new(registry),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        // Schemas and the visibility engine
        .route("/checklists", get(routes::checklists::list_checklists))
        .route("/checklists/{id}", get(routes::checklists::get_checklist))
        .route(
            "/checklists/{id}/evaluate",
            post(routes::checklists::evaluate_checklist),
        )
        .route(
            "/checklists/{id}/fields/{field_id}",
            post(routes::checklists::change_field),
        )
        // Saved records per client
        .route(
            "/clients/{client_id}/checklists",
            get(routes::records::list_records),
        )
        .route(
            "/clients/{client_id}/checklists/{id}",
            get(routes::records::get_record)
                .put(routes::records::save_record)
                .delete(routes::records::delete_record),
        )
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state);

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
