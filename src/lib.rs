// Message Board - Rust Edition
// An in-memory, append-only message list served over GraphQL

//! # Message Board Library
//!
//! This is the library crate for Message Board, a tiny GraphQL service that
//! keeps an ordered list of messages in memory. This file is the **library
//! root** and defines the public API used by the `server` and `board`
//! binaries.
//!
//! ## Core Components
//!
//! ### Domain Models
//! - [`Message`]: An immutable record with an id and text content
//! - [`MessageId`]: The store-assigned identifier (`"1"`, `"2"`, ...)
//!
//! ### Storage Layer
//! - [`MessageStorage`]: The two-operation store contract (list, append)
//! - [`InMemoryStorage`]: The process-lifetime implementation
//!
//! ### GraphQL Engine
//! A statically declared schema with one query (`messages`) and one
//! mutation (`addMessage`).
//!
//! ### Server
//! An Axum HTTP server that exposes the schema at `/graphql`.
//!
//! **Usage Example:**
//! ```rust
//! use message_board::{InMemoryStorage, MessageStorage};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = InMemoryStorage::new();
//! let first = store.append_message("hello".to_string()).await.unwrap();
//! assert_eq!(first.id().as_str(), "1");
//! assert_eq!(store.list_messages().await.unwrap().len(), 1);
//! # }
//! ```

// Core domain models
pub mod models;

// Storage and GraphQL schema
pub mod engine;

// HTTP server setup
pub mod server;

// Re-export core domain types for easy access
pub use models::{Message, MessageId};

// Re-export engine types for convenience
pub use engine::{
    graphql::{
        create_schema, create_schema_with_storage, schema_sdl, MessageBoardSchema, MessageGQL,
        Mutation, Query,
    },
    storage::{InMemoryStorage, MessageStorage},
};

// Re-export server types for convenience
pub use server::{GraphQLServer, GraphQLServerBuilder, GraphQLServerConfig};

use async_graphql::ErrorExtensions;
use thiserror::Error;

/// Error types for Message Board operations
///
/// ## Rust Learning Notes:
///
/// ### The `thiserror` Crate
/// `#[derive(Error)]` implements `std::error::Error`, and each
/// `#[error("...")]` attribute becomes the `Display` output for its variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessageBoardError {
    /// Content rejected before it reached the collection
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal failure, such as a poisoned lock
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MessageBoardError {
    /// Machine-readable code surfaced in GraphQL error extensions
    pub fn code(&self) -> &'static str {
        match self {
            MessageBoardError::Validation(_) => "VALIDATION_ERROR",
            MessageBoardError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Converts store errors into GraphQL errors carrying a `code` extension
impl ErrorExtensions for MessageBoardError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

/// Type alias for Results that use our custom error type
pub type Result<T> = std::result::Result<T, MessageBoardError>;
