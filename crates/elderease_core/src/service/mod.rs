//! Core use-case services.
//!
//! # Responsibility
//! - Own one slice of application state each and enforce its transitions.
//! - Stay clock-agnostic: timer ids and instants are passed in by the app.

pub mod alert_service;
pub mod chat_service;
pub mod profile_service;
pub mod reminder_service;
pub mod schedule_service;
pub mod voice;
