use axum::http::StatusCode;
use thiserror::Error;
use tracing::error;

use crate::server::handler::{OutgoingResponse, ResponseBody};

/// Every way a summary request can fail.
#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Transcript is required")]
    MissingTranscript,

    #[error("API key not configured")]
    MissingApiKey,

    #[error("DeepSeek API error ({status}): {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("No summary generated")]
    EmptyCompletion,

    #[error("Internal server error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl SummarizeError {
    pub fn status(&self) -> StatusCode {
        match self {
            SummarizeError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            SummarizeError::MissingTranscript => StatusCode::BAD_REQUEST,
            SummarizeError::Upstream { status, .. } => *status,
            SummarizeError::MissingApiKey
            | SummarizeError::EmptyCompletion
            | SummarizeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_body(self) -> ResponseBody {
        let (message, details) = match self {
            SummarizeError::Upstream { body, .. } => ("DeepSeek API error", Some(body)),
            SummarizeError::Internal(e) => ("Internal server error", Some(format!("{:#}", e))),
            SummarizeError::MethodNotAllowed => ("Method not allowed", None),
            SummarizeError::MissingTranscript => ("Transcript is required", None),
            SummarizeError::MissingApiKey => ("API key not configured", None),
            SummarizeError::EmptyCompletion => ("No summary generated", None),
        };

        ResponseBody::Error {
            error: message.to_string(),
            details,
        }
    }
}

impl From<SummarizeError> for OutgoingResponse {
    fn from(err: SummarizeError) -> Self {
        match &err {
            SummarizeError::Upstream { status, body } => {
                error!("DeepSeek API error ({}): {}", status, body);
            }
            SummarizeError::Internal(e) => {
                error!("Summary request failed: {:#}", e);
            }
            _ => {}
        }

        let status = err.status();
        OutgoingResponse::json(status, err.into_body())
    }
}
