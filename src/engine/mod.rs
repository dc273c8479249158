// Message Board Engine
// This contains the store and the GraphQL schema built on top of it

//! # Message Board Engine Module
//!
//! The engine is the layer between the domain model and the HTTP server.
//!
//! ## Engine Components
//!
//! ### Storage Engine (`storage` module)
//! - Defines the `MessageStorage` contract (list, append)
//! - Provides the in-memory implementation
//! - Owns id assignment
//!
//! ### GraphQL Engine (`graphql` module)
//! - Declares the schema through Rust types
//! - Translates between GraphQL types and domain models
//! - Maps store errors to GraphQL error codes

/// GraphQL schema, resolvers and schema builders
pub mod graphql;

/// Storage trait and in-memory implementation
pub mod storage;

pub use graphql::{create_schema, create_schema_with_storage, MessageBoardSchema};
pub use storage::{InMemoryStorage, MessageStorage};
