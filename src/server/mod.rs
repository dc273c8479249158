// Message Board Server Implementations

//! # Message Board Server Module
//!
//! This module exposes the GraphQL schema over HTTP.
//!
//! ## Server Architecture
//!
//! ```text
//! Client (browser, board CLI, curl)
//!        ↓ HTTP/GraphQL
//! Server Layer (this module)  ← Axum routes, CORS, GraphiQL
//!        ↓ Function calls
//! Engine Layer                ← GraphQL schema, MessageStorage
//!        ↓ Function calls
//! Domain Layer                ← Message, MessageId
//! ```
//!
//! ## Routes
//!
//! - `GET /`: GraphiQL IDE
//! - `POST /` and `POST /graphql`: GraphQL execution
//! - `GET /health`: liveness plus the current message count

/// GraphQL HTTP server implementation
pub mod graphql;

pub use graphql::{router, AppState, GraphQLServer, GraphQLServerBuilder, GraphQLServerConfig};
