// Storage abstraction for the message board
// This defines the interface for listing and appending messages

//! # Storage Abstraction Layer
//!
//! This module provides the message store: an ordered, append-only
//! collection of [`Message`] records with exactly two operations.
//!
//! ## Storage Architecture
//!
//! The storage layer follows the **Repository Pattern**:
//! - **MessageStorage trait**: the list/append contract the GraphQL layer calls
//! - **InMemoryStorage**: the process-lifetime implementation
//!
//! ## Concurrency
//!
//! The server handles requests in parallel, so id assignment
//! (`len + 1`) and the push happen under one write-lock acquisition.
//! Two appends can never observe the same length.
//!
//! ## Rust Learning Notes:
//!
//! - Async traits with the async-trait crate
//! - Interior mutability through `RwLock`
//! - Owned state per store instance instead of a global

use std::sync::RwLock;
use tracing::debug;

use crate::models::{Message, MessageId};
use crate::{MessageBoardError, Result};

/// Storage trait for the message collection
///
/// ## Design Principles
///
/// - **Append-only**: there is no update or delete
/// - **Ordered**: `list_messages` returns records in append order
/// - **Thread-Safe**: `Send + Sync` lets the schema share one store
///   across concurrent requests
#[async_trait::async_trait]
pub trait MessageStorage: Send + Sync {
    /// List every stored message in insertion order
    ///
    /// Returns an empty vector for an empty store. Has no side effects.
    async fn list_messages(&self) -> Result<Vec<Message>>;

    /// Append a new message and return it
    ///
    /// The id is `(messages stored before this call) + 1` as text.
    ///
    /// ## Errors
    /// - `Validation` when `content` is empty or whitespace-only; the
    ///   collection is left untouched and no id is consumed
    async fn append_message(&self, content: String) -> Result<Message>;

    /// Number of stored messages
    async fn message_count(&self) -> Result<usize>;
}

/// In-memory storage implementation
///
/// ## Limitations
///
/// - **Not persistent**: data is lost when the process exits
/// - **Not distributed**: each process has its own board
/// - **Memory bound**: limited by available RAM
///
/// ## Rust Learning Notes:
///
/// ### RwLock for Concurrent Access
/// `RwLock<T>` provides reader-writer lock semantics:
/// - `.read()` gets a read-only guard (multiple readers allowed)
/// - `.write()` gets a mutable guard (exclusive access)
/// - Guards automatically unlock when dropped (RAII pattern)
///
/// ### Lock Poisoning
/// If a thread panics while holding the lock, later `read()`/`write()`
/// calls return an error. We surface that as `MessageBoardError::Internal`
/// instead of panicking again.
#[derive(Default)]
pub struct InMemoryStorage {
    messages: RwLock<Vec<Message>>,
}

impl InMemoryStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> MessageBoardError {
    MessageBoardError::Internal("message store lock poisoned".to_string())
}

#[async_trait::async_trait]
impl MessageStorage for InMemoryStorage {
    async fn list_messages(&self) -> Result<Vec<Message>> {
        let messages = self.messages.read().map_err(poisoned)?;
        Ok(messages.clone())
    }

    async fn append_message(&self, content: String) -> Result<Message> {
        Message::validate_content(&content)?;

        // Length read and push share one guard
        let mut messages = self.messages.write().map_err(poisoned)?;
        let message = Message::new(MessageId::from_position(messages.len() + 1), content);
        messages.push(message.clone());

        debug!(id = %message.id(), total = messages.len(), "Appended message");
        Ok(message)
    }

    async fn message_count(&self) -> Result<usize> {
        let messages = self.messages.read().map_err(poisoned)?;
        Ok(messages.len())
    }
}
