//! HTTP surface of the generation proxy

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ProxyError;
use crate::proxy::{GenerateAlternativesRequest, GenerateAlternativesResponse, GenerationProxy};

/// Create the axum router for the proxy
pub fn create_router(proxy: GenerationProxy) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ]);

    Router::new()
        .route("/health", get(health_check))
        .route("/generate-alternatives", post(generate_alternatives))
        .with_state(proxy)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Serve the router until the listener fails
pub async fn serve(proxy: GenerationProxy, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Generation proxy listening on http://{}", addr);
    axum::serve(listener, create_router(proxy)).await?;
    Ok(())
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn generate_alternatives(
    State(proxy): State<GenerationProxy>,
    body: Bytes,
) -> Result<Json<GenerateAlternativesResponse>, ProxyError> {
    let result = match serde_json::from_slice::<GenerateAlternativesRequest>(&body) {
        Ok(request) => proxy.handle(request).await,
        Err(e) => Err(ProxyError::Unknown(format!("invalid request body: {}", e))),
    };

    match result {
        Ok(response) => {
            tracing::info!(count = response.alternatives.len(), "generate-alternatives ok");
            Ok(Json(response))
        }
        Err(err) => {
            tracing::warn!(kind = err.kind(), error = %err, "generate-alternatives failed");
            Err(err)
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}
