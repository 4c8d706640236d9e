//! Configuration module for recap
//!
//! Handles loading settings from a TOML file plus the API key environment override.

mod settings;

pub use settings::{LlmSettings, ServerSettings, Settings, API_KEY_ENV};
