pub mod format;
pub mod state;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers;

pub use state::AppState;

/// Full HTTP surface. OPTIONS on any route is answered by the CORS layer
/// with an empty 200.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security);

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // VPN endpoints
        .route(
            "/vpn-auth",
            post(handlers::auth::post).fallback(handlers::method_not_allowed),
        )
        .route(
            "/vpn-connect",
            post(handlers::connect::post).fallback(handlers::method_not_allowed),
        )
        .route(
            "/vpn-servers",
            get(handlers::servers::get).fallback(handlers::method_not_allowed),
        )
        .route(
            "/vpn-logs",
            get(handlers::logs::get).fallback(handlers::method_not_allowed),
        )
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origin = if security.cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            security
                .cors_origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "SecureVPN API",
            "version": version,
            "endpoints": {
                "auth": "POST /vpn-auth (action: register | login)",
                "connect": "POST /vpn-connect (action: connect | disconnect)",
                "servers": "GET /vpn-servers",
                "logs": "GET /vpn-logs?userId=",
                "health": "GET /health",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
