//! Domain model for the companion app views.
//!
//! # Responsibility
//! - Define the records rendered by the home, chat, schedule and settings tabs.
//! - Keep mutation helpers next to the data they guard.
//!
//! # Invariants
//! - Ids are unique within their own collection.
//! - Chat history is append-only; reminders only change through completion.

pub mod chat;
pub mod family;
pub mod notice;
pub mod profile;
pub mod reminder;
pub mod routine;
