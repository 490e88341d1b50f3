//! Outbound HTTP integrations.

pub mod client;
pub mod feed;
pub mod user_agent;

pub use client::HTTP_CLIENT;
