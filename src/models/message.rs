// Message records - the only entity on the board
//
// A message is created once by the store and never changes afterwards:
// - `id` is assigned by the store from the collection size at insertion time
// - `content` is supplied by the caller
//
// Fields are private and only read accessors exist, so nothing outside this
// module can edit a stored record.

use serde::{Deserialize, Serialize};

use crate::{MessageBoardError, Result};

/// **Message identifier** - text id assigned by the store
///
/// Ids are the decimal position of the message in insertion order,
/// starting at one: `"1"`, `"2"`, `"3"`, ...
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Build the id for the message stored at one-based `position`
    ///
    /// ```rust
    /// # use message_board::MessageId;
    /// assert_eq!(MessageId::from_position(3).as_str(), "3");
    /// ```
    pub fn from_position(position: usize) -> Self {
        MessageId(position.to_string())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        MessageId(s.to_string())
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        MessageId(s)
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// **Message** - an immutable record with an id and text content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    content: String,
}

impl Message {
    /// Create a message record
    ///
    /// Storage backends call this after assigning the id; it does not
    /// validate `content` (see [`Message::validate_content`]).
    pub fn new(id: MessageId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Presence check applied before a message is appended
    ///
    /// Empty and whitespace-only content is rejected. Anything else is
    /// accepted verbatim, surrounding whitespace included.
    pub fn validate_content(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(MessageBoardError::Validation(
                "message content must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
