//! User registry server library
//!
//! Exposes the router and state so the server can be driven in-process by
//! tests or embedded in another binary.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use axum::{Router, http::HeaderValue};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use state::AppState;

/// Creates the application router with all routes configured.
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    let app = api::create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match cors {
        Some(cors) => app.layer(cors),
        None => app,
    }
}

/// Builds the CORS layer, or `None` when CORS is disabled.
fn cors_layer(config: &ServerConfig) -> Option<CorsLayer> {
    if !config.enable_cors {
        return None;
    }

    let origin = if config.cors_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "user_registry_server={log_level},user_store={log_level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header},
    };
    use tower::ServiceExt;
    use user_store::MemoryUserStore;

    use super::*;

    fn app_with(config: ServerConfig) -> Router {
        create_app(AppState::new(config, MemoryUserStore::new()))
    }

    fn list_request() -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri("/users")
            .header(header::ORIGIN, "http://a.test")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_cors_disabled_by_default() {
        let response = app_with(ServerConfig::default())
            .oneshot(list_request())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            !response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let config = ServerConfig {
            enable_cors: true,
            cors_origins: vec!["http://a.test".to_string()],
            ..Default::default()
        };
        let response = app_with(config).oneshot(list_request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://a.test"
        );
    }

    #[test]
    fn test_cors_layer_skipped_when_disabled() {
        assert!(cors_layer(&ServerConfig::default()).is_none());
    }
}
