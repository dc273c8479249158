// Core domain models for Message Board

//! # Domain Models Module
//!
//! This module contains the single domain entity of the message board: the
//! [`Message`] and its store-assigned [`MessageId`].
//!
//! ## Rust Learning Notes:
//!
//! ### Module Organization
//! This `mod.rs` file is the **module root** for the `models` directory.
//! The `pub use` below flattens the API so callers can write
//! `message_board::models::Message` instead of
//! `message_board::models::message::Message`.

// Contains Message and MessageId
pub mod message;

pub use message::{Message, MessageId};
