use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::propagation::{Sgp4Propagator, TleLoader};

use super::api::health as health_handlers;
use super::api::orbits as orbit_handlers;
use super::api::revisit as revisit_handlers;
use super::api_doc::ApiDoc;
use super::state::AppState;

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();

    let mut loader = TleLoader::new(config.tle.path.clone());
    if let Err(e) = loader.load_all() {
        log::warn!("Failed to initialize TLE loader: {}", e);
    }

    let state = AppState {
        config: Arc::new(config),
        tle_loader: Arc::new(RwLock::new(loader)),
        propagator: Arc::new(Sgp4Propagator::new()),
    };

    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/api/orbits", get(orbit_handlers::list_orbits))
        .route("/api/revisit", get(revisit_handlers::calculate_revisit))
        .route("/api/health", get(health_handlers::health))
        .route("/api/tle/reload", post(health_handlers::reload_tle));

    if let Some(dir) = &state.config.web.static_dir {
        app = app.nest_service("/static", ServeDir::new(dir));
    }

    app.merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
