use crate::types::variable::Variable;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Transport failed for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Failed to parse CSV payload for variable '{variable}'")]
    CsvDecode {
        variable: Variable,
        #[source]
        source: PolarsError,
    },

    #[error("Unexpected payload shape for variable '{variable}': {message}")]
    PayloadShape { variable: Variable, message: String },

    #[error("Failed to parse timestamp '{value}' in payload for variable '{variable}'")]
    TimestampParse { variable: Variable, value: String },

    #[error("Date index of '{variable}' does not match '{reference}' after concatenation")]
    CalendarMismatch {
        variable: Variable,
        reference: Variable,
    },

    #[error("Failed to decode gridded payload for variable '{variable}'")]
    GridDecode {
        variable: Variable,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Could not merge gridded responses into one dataset: {reason}")]
    GridMerge { reason: String },

    #[error("Failed processing DataFrame: {0}")]
    Frame(#[from] PolarsError),
}
