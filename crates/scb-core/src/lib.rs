//! Core domain logic for the shot-cook Telegram bot.
//!
//! This crate does not know about Telegram. The adapter crate converts incoming
//! updates into [`messaging::types`] models and implements
//! [`messaging::port::MessagingPort`] for outbound replies.

pub mod bot;
pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod ledger;
pub mod logging;
pub mod messaging;
pub mod picker;
pub mod replies;
pub mod triggers;

pub use errors::{Error, Result};
