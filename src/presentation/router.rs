// Route table and middleware
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    chart_view, health_check, method_not_allowed, proxy_exchange_rates, reload_rates,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

pub fn build_router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let mut router = Router::new()
        .route("/healthz", get(health_check))
        .route(
            "/api/exchange-rates",
            get(proxy_exchange_rates).fallback(method_not_allowed),
        )
        .route("/api/rates", get(chart_view))
        .route("/api/rates/reload", post(reload_rates))
        .with_state(state);

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
