//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the account handlers
//! - Wire up middleware (timeout, request ID, tracing)
//! - Own the shared store handle and the validator
//! - Bind server to listener and stop on the shutdown signal

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::accounts::account_routes;
use crate::config::AppConfig;
use crate::http::request::{request_span, MakeRequestUuid};
use crate::lifecycle::shutdown;
use crate::store::Store;
use crate::validation::Validator;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub validator: Validator,
}

/// HTTP server for the account service.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server over the given store.
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Self {
        let state = AppState {
            store,
            validator: Validator::new(),
        };

        let router = Self::build_router(&config, state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .merge(account_routes())
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                request_span(request)
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::X_REQUEST_ID;
    use crate::store::MemoryStore;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    fn server() -> HttpServer {
        HttpServer::new(AppConfig::default(), Arc::new(MemoryStore::new()))
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let server = server();

        let (status, body) = send(
            server.router(),
            json_request("POST", "/accounts", r#"{"owner":"alice","currency":"CAD"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Account is created successfully!");
        assert_eq!(body["account"]["balance"], 0);
        let id = body["account"]["id"].as_i64().unwrap();

        let (status, body) = send(server.router(), empty_request("GET", &format!("/accounts/{id}"))).await;
        assert_eq!(status, StatusCode::FOUND);
        assert_eq!(body["account"]["owner"], "alice");
        assert_eq!(body["account"]["currency"], "CAD");
    }

    #[tokio::test]
    async fn test_unsupported_currency_names_field() {
        let (status, body) = send(
            server().router(),
            json_request("POST", "/accounts", r#"{"owner":"alice","currency":"GBP"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Currency field has failed. Validation is: oneof");
    }

    #[tokio::test]
    async fn test_malformed_body_is_generic_bad_input() {
        let (status, body) = send(
            server().router(),
            json_request("POST", "/accounts", r#"{"owner": 5"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Enter proper parameters.");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_input() {
        let (status, body) = send(server().router(), empty_request("GET", "/accounts/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Enter proper parameters.");
    }

    #[tokio::test]
    async fn test_zero_id_fails_required() {
        let (status, body) = send(server().router(), empty_request("GET", "/accounts/0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "ID field has failed. Validation is: required");

        let (status, body) = send(server().router(), empty_request("DELETE", "/accounts/-1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "ID field has failed. Validation is: min");
    }

    #[tokio::test]
    async fn test_zero_paging_fails_required() {
        let (status, body) = send(
            server().router(),
            empty_request("GET", "/accounts?page_id=0&page_size=5"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "PageID field has failed. Validation is: required");

        let (_, body) = send(
            server().router(),
            empty_request("GET", "/accounts?page_id=1&page_size=0"),
        )
        .await;
        assert_eq!(body, "PageSize field has failed. Validation is: required");
    }

    #[tokio::test]
    async fn test_null_owner_fails_required() {
        let (status, body) = send(
            server().router(),
            json_request("POST", "/accounts", r#"{"owner":null,"currency":"USD"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Owner field has failed. Validation is: required");
    }

    #[tokio::test]
    async fn test_update_to_zero_balance() {
        let server = server();
        let (status, _) = send(
            server.router(),
            json_request("POST", "/accounts", r#"{"owner":"erin","currency":"EUR"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            server.router(),
            json_request("PUT", "/accounts", r#"{"id":1,"balance":0}"#),
        )
        .await;
        assert_eq!(status, StatusCode::FOUND);
        assert_eq!(body["account"]["balance"], 0);

        let stored = server.state().store.get_account(1).await.unwrap();
        assert_eq!(stored.balance, 0);
        assert_eq!(stored.owner, "erin");
    }

    #[tokio::test]
    async fn test_list_page_size_over_max() {
        let (status, body) = send(
            server().router(),
            empty_request("GET", "/accounts?page_id=1&page_size=11"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "PageSize field has failed. Validation is: max");
    }

    #[tokio::test]
    async fn test_update_missing_account() {
        let (status, body) = send(
            server().router(),
            json_request("PUT", "/accounts", r#"{"id":42,"balance":10}"#),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "no rows in result set");
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(server().router(), empty_request("GET", "/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_request_id_is_set_and_propagated() {
        let router = server().router();

        let response = router
            .clone()
            .oneshot(empty_request("GET", "/health"))
            .await
            .unwrap();
        let generated = response.headers().get(X_REQUEST_ID).unwrap().to_str().unwrap();
        assert!(uuid::Uuid::parse_str(generated).is_ok());

        let request = Request::builder()
            .uri("/health")
            .header(X_REQUEST_ID, "client-id-1")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.headers().get(X_REQUEST_ID).unwrap(), "client-id-1");
    }
}
