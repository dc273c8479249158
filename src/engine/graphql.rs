// GraphQL API for the message board
// Exposes the two store operations as `messages` and `addMessage`

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Schema, SimpleObject, ID};
use tracing::debug;

use crate::engine::storage::{InMemoryStorage, MessageStorage};
use crate::models::Message;

// GraphQL types - API representations of the domain models

/// A message on the board
#[derive(SimpleObject, Debug, Clone, PartialEq, Eq)]
#[graphql(name = "Message")]
pub struct MessageGQL {
    pub id: ID,
    pub content: String,
}

impl From<&Message> for MessageGQL {
    fn from(message: &Message) -> Self {
        Self {
            id: ID(message.id().to_string()),
            content: message.content().to_string(),
        }
    }
}

// Query root
pub struct Query;

#[Object]
impl Query {
    /// List all messages in the order they were added
    async fn messages(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<MessageGQL>> {
        let storage = ctx.data::<Arc<dyn MessageStorage>>()?;
        let messages = storage.list_messages().await.map_err(|e| e.extend())?;
        debug!(count = messages.len(), "Resolved messages");
        Ok(messages.iter().map(MessageGQL::from).collect())
    }
}

// Mutation root
pub struct Mutation;

#[Object]
impl Mutation {
    /// Add a message to the end of the board
    async fn add_message(
        &self,
        ctx: &Context<'_>,
        content: String,
    ) -> async_graphql::Result<MessageGQL> {
        let storage = ctx.data::<Arc<dyn MessageStorage>>()?;
        let message = storage
            .append_message(content)
            .await
            .map_err(|e| e.extend())?;
        debug!(id = %message.id(), "Resolved addMessage");
        Ok(MessageGQL::from(&message))
    }
}

// Schema type alias
pub type MessageBoardSchema = Schema<Query, Mutation, EmptySubscription>;

/// Create the GraphQL schema over a fresh in-memory store
pub fn create_schema() -> MessageBoardSchema {
    create_schema_with_storage(Arc::new(InMemoryStorage::new()))
}

/// Create schema with storage backend
pub fn create_schema_with_storage(storage: Arc<dyn MessageStorage>) -> MessageBoardSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(storage)
        .finish()
}

/// SDL text of the schema, generated from the Rust types above
pub fn schema_sdl() -> String {
    Schema::build(Query, Mutation, EmptySubscription).finish().sdl()
}
