//! HTTP adapters - axum router for procedure calls.
//!
//! `app_router` wraps the RPC routes with the cross-cutting layers every
//! request passes through: request ids, tracing spans, timeouts, and CORS.

pub mod middleware;
pub mod rpc;

pub use middleware::{SessionCookie, SessionCredential};
pub use rpc::{rpc_routes, RpcState};

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Method, Request},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Builds the application router with all layers applied.
pub fn app_router(state: RpcState, config: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    rpc_routes(state).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri().path(),
                        request_id = %request_id,
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(TimeoutLayer::new(config.request_timeout()))
            .layer(cors_layer(config)),
    )
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::http::StatusCode;
    use tower::ServiceExt;

    use crate::adapters::memory::{InMemoryAgentStore, InMemorySessionStore};
    use crate::application::{build_registry, ContextBuilder, Dispatcher, ProcedureDeps};

    fn router(config: &ServerConfig) -> Router {
        let sessions = Arc::new(InMemorySessionStore::new());
        let agents = Arc::new(InMemoryAgentStore::new());
        let registry = build_registry(ProcedureDeps {
            sessions: sessions.clone(),
            agents: agents.clone(),
            agent_reader: agents,
        })
        .unwrap();
        let dispatcher = Dispatcher::new(Arc::new(registry), ContextBuilder::new(sessions));
        app_router(
            RpcState::new(dispatcher, SessionCookie::new("meet_assist.session_token")),
            config,
        )
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let response = router(&ServerConfig::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn incoming_request_id_is_propagated() {
        let response = router(&ServerConfig::default())
            .oneshot(
                Request::get("/health")
                    .header(REQUEST_ID_HEADER, "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-42");
    }

    #[tokio::test]
    async fn configured_origin_is_allowed() {
        let config = ServerConfig {
            cors_origins: Some("http://localhost:5173".to_string()),
            ..Default::default()
        };

        let response = router(&config)
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
    }
}
