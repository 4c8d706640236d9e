//! recap - A small HTTP relay that summarizes transcripts with the DeepSeek chat API
//!
//! A POST with `{"transcript": "..."}` becomes one chat-completion call; the
//! generated summary comes back as `{"success": true, "summary": "..."}`.

pub mod cli;
pub mod config;
pub mod llm;
pub mod server;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "recap";
