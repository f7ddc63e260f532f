//! Server wiring: state, routes, startup

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use chat_store::{FileDocumentStorage, TreeStore};
use gemini_client::GenerationGateway;
use log::info;
use turn_engine::TurnEngine;

use crate::auth::JwtVerifier;
use crate::controllers::{chat_controller, system_controller, turn_controller};

const DEFAULT_WORKER_COUNT: usize = 4;

/// Shared application state, built once at startup.
pub struct AppState {
    pub engine: TurnEngine<FileDocumentStorage>,
    pub verifier: JwtVerifier,
}

impl AppState {
    pub fn new(
        store: Arc<TreeStore<FileDocumentStorage>>,
        gateway: Arc<dyn GenerationGateway>,
        verifier: JwtVerifier,
    ) -> Self {
        Self {
            engine: TurnEngine::new(store, gateway),
            verifier,
        }
    }
}

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1")
            .configure(system_controller::config)
            .configure(chat_controller::config)
            .configure(turn_controller::config),
    );
}

pub async fn run(state: AppState, port: u16) -> std::io::Result<()> {
    info!("Starting chat web service on port {port}...");

    let data = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .configure(app_config)
    })
    .workers(DEFAULT_WORKER_COUNT)
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
