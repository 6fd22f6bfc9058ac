//! Zoilist GitHub - GitHub integration for Zoilist
//!
//! This crate provides the octocrab-backed [`zoilist_core::ReviewSource`]
//! used by the reminder job, and the webhook payload types consumed by the
//! event notifier.

mod activity;
mod client;
mod error;
pub mod events;
mod search;
mod source;
mod team;
mod wire;

pub use client::GitHubClient;
pub use error::{Error, Result};
pub use events::parse_event;
