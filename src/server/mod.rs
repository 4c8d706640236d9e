//! HTTP server for recap
//!
//! A single catch-all endpoint that relays transcripts to the completion API.

pub mod error;
pub mod handler;
pub mod routes;

pub use error::SummarizeError;
pub use handler::{
    HandlerConfig, IncomingRequest, OutgoingResponse, ResponseBody, SummaryHandler,
};
pub use routes::{router, serve};
