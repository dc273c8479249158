// GraphQL server implementation for the message board
// This creates a standalone GraphQL server over one message store

use std::net::SocketAddr;
use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router, Server,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::engine::{
    graphql::{create_schema_with_storage, MessageBoardSchema},
    storage::{InMemoryStorage, MessageStorage},
};

/// GraphQL server configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphQLServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,
}

impl Default for GraphQLServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            cors_enabled: true,
        }
    }
}

/// Shared state handed to every route
#[derive(Clone)]
pub struct AppState {
    pub schema: MessageBoardSchema,
    pub storage: Arc<dyn MessageStorage>,
}

impl AppState {
    /// Build the schema over `storage` and keep a handle for health checks
    pub fn new(storage: Arc<dyn MessageStorage>) -> Self {
        Self {
            schema: create_schema_with_storage(storage.clone()),
            storage,
        }
    }
}

/// Routes of the GraphQL server, without binding a socket
pub fn router(state: AppState, cors_enabled: bool) -> Router {
    let app = Router::new()
        .route("/", get(graphiql).post(graphql_handler))
        .route("/graphql", post(graphql_handler))
        .route("/health", get(health_check))
        .with_state(state);

    if cors_enabled {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// GraphQL server
pub struct GraphQLServer {
    config: GraphQLServerConfig,
    storage: Arc<dyn MessageStorage>,
}

impl GraphQLServer {
    pub fn new() -> Self {
        Self {
            config: GraphQLServerConfig::default(),
            storage: Arc::new(InMemoryStorage::new()),
        }
    }

    pub fn with_config(mut self, config: GraphQLServerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_storage(mut self, storage: Arc<dyn MessageStorage>) -> Self {
        self.storage = storage;
        self
    }

    pub fn config(&self) -> &GraphQLServerConfig {
        &self.config
    }

    /// Resolve the configured host (name or IP literal) to socket addresses
    ///
    /// Bracketed IPv6 literals such as `[::1]` are accepted as well.
    pub async fn resolve_addrs(&self) -> std::io::Result<Vec<SocketAddr>> {
        let host = self
            .config
            .host
            .trim_start_matches('[')
            .trim_end_matches(']');

        let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, self.config.port))
            .await?
            .collect();
        if addrs.is_empty() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::AddrNotAvailable,
                format!("no address found for host '{}'", self.config.host),
            ));
        }
        Ok(addrs)
    }

    /// Bind, serve until Ctrl-C, then shut down gracefully
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let app = router(AppState::new(self.storage.clone()), self.config.cors_enabled);

        // First resolved address that binds wins
        let mut bound = None;
        let mut last_error = None;
        for addr in self.resolve_addrs().await? {
            match Server::try_bind(&addr) {
                Ok(server) => {
                    bound = Some((addr, server));
                    break;
                }
                Err(e) => {
                    warn!("Could not bind {}: {}", addr, e);
                    last_error = Some(e);
                }
            }
        }
        let (addr, server) = match (bound, last_error) {
            (Some(bound), _) => bound,
            (None, Some(e)) => return Err(e.into()),
            (None, None) => return Err("no address to bind".into()),
        };

        info!("🚀 GraphQL server running on http://{}", addr);
        info!("📊 GraphiQL interface: http://{}/", addr);
        info!("🔗 GraphQL endpoint: http://{}/graphql", addr);
        info!("   CORS enabled: {}", self.config.cors_enabled);

        server
            .serve(app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("👋 GraphQL server stopped");
        Ok(())
    }
}

impl Default for GraphQLServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder pattern for server setup
pub struct GraphQLServerBuilder {
    server: GraphQLServer,
}

impl GraphQLServerBuilder {
    pub fn new() -> Self {
        Self {
            server: GraphQLServer::new(),
        }
    }

    pub fn with_storage(mut self, storage: Arc<dyn MessageStorage>) -> Self {
        self.server = self.server.with_storage(storage);
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.server.config.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.server.config.port = port;
        self
    }

    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.server.config.cors_enabled = enabled;
        self
    }

    pub fn build(self) -> GraphQLServer {
        self.server
    }

    pub async fn build_and_run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.server.run().await
    }
}

impl Default for GraphQLServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

// GraphQL handler
async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

// GraphiQL interface
async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.storage.message_count().await {
        Ok(count) => (StatusCode::OK, Json(json!({ "status": "ok", "messages": count }))),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "error", "error": e.to_string() })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request},
        response::Response,
    };
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    fn create_test_app(storage: Arc<dyn MessageStorage>) -> Router {
        router(AppState::new(storage), true)
    }

    fn graphql_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_graphql_endpoint_round_trip() {
        let storage: Arc<dyn MessageStorage> = Arc::new(InMemoryStorage::new());
        let app = create_test_app(storage.clone());

        let add = json!({
            "query": "mutation($content: String!) { addMessage(content: $content) { id content } }",
            "variables": { "content": "hello" }
        });
        let response = app.clone().oneshot(graphql_request("/graphql", add)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["data"]["addMessage"], json!({ "id": "1", "content": "hello" }));

        // The root path accepts POSTed queries too
        let list = json!({ "query": "{ messages { id content } }" });
        let response = app.oneshot(graphql_request("/", list)).await.unwrap();
        let body = json_body(response).await;
        assert_eq!(body["data"]["messages"], json!([{ "id": "1", "content": "hello" }]));

        assert_eq!(storage.message_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_graphql_validation_error_in_body() {
        let app = create_test_app(Arc::new(InMemoryStorage::new()));

        let add = json!({ "query": "mutation { addMessage(content: \"\") { id } }" });
        let response = app.oneshot(graphql_request("/graphql", add)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["errors"][0]["extensions"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_health_reports_message_count() {
        let storage: Arc<dyn MessageStorage> = Arc::new(InMemoryStorage::new());
        storage.append_message("one".to_string()).await.unwrap();
        storage.append_message("two".to_string()).await.unwrap();
        let app = create_test_app(storage);

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "status": "ok", "messages": 2 }));
    }

    #[tokio::test]
    async fn test_graphiql_served_at_root() {
        let app = create_test_app(Arc::new(InMemoryStorage::new()));

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.to_lowercase().contains("graphiql"));
        assert!(html.contains("/graphql"));
    }

    #[tokio::test]
    async fn test_cors_header_only_when_enabled() {
        let origin_request = || {
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap()
        };

        let with_cors = router(AppState::new(Arc::new(InMemoryStorage::new())), true);
        let response = with_cors.oneshot(origin_request()).await.unwrap();
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));

        let without_cors = router(AppState::new(Arc::new(InMemoryStorage::new())), false);
        let response = without_cors.oneshot(origin_request()).await.unwrap();
        assert!(!response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[test]
    fn test_builder_sets_config() {
        let server = GraphQLServerBuilder::new()
            .with_host("127.0.0.1")
            .with_port(8081)
            .with_cors(false)
            .build();

        assert_eq!(
            server.config(),
            &GraphQLServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8081,
                cors_enabled: false,
            }
        );
        assert_eq!(GraphQLServerConfig::default().port, 4000);
    }

    #[tokio::test]
    async fn test_resolve_addrs_accepts_names_and_literals() {
        let resolve = |host: &str| {
            GraphQLServerBuilder::new()
                .with_host(host)
                .with_port(4100)
                .build()
        };

        let localhost = resolve("localhost").resolve_addrs().await.unwrap();
        assert!(localhost.iter().all(|a| a.ip().is_loopback()));
        assert!(localhost.iter().all(|a| a.port() == 4100));

        for literal in ["127.0.0.1", "::1", "[::1]"] {
            let addrs = resolve(literal).resolve_addrs().await.unwrap();
            assert_eq!(addrs.len(), 1, "{}", literal);
            assert!(addrs[0].ip().is_loopback(), "{}", literal);
        }

        assert!(resolve("not a host name").resolve_addrs().await.is_err());
    }

    #[tokio::test]
    async fn test_run_binds_localhost() {
        let server = GraphQLServerBuilder::new()
            .with_host("localhost")
            .with_port(0)
            .build();

        // A healthy server keeps serving, so the timeout must be what ends it
        let outcome = tokio::time::timeout(Duration::from_millis(300), server.run()).await;
        assert!(outcome.is_err(), "server exited early: {:?}", outcome);
    }
}
