//! Error types for the Craftgate client.

use reqwest::header::InvalidHeaderValue;

/// Errors surfaced by the client.
///
/// Every failure is returned as a value to the immediate caller; the client
/// never retries, suppresses, or panics on a failed exchange.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network, timeout, or request-construction failure from the HTTP layer.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway rejected the call and returned a structured error envelope.
    ///
    /// Displays exactly the gateway's human-readable description.
    #[error("{description}")]
    Gateway {
        /// HTTP status code of the response.
        status: u16,
        /// Machine-readable error group, when the gateway sent one.
        error_group: Option<String>,
        /// Gateway-specific error code, when the gateway sent one.
        error_code: Option<String>,
        /// Human-readable description from the error envelope.
        description: String,
    },

    /// Non-success status with a body that did not decode as an error envelope.
    #[error("unknown error, status code: {status}")]
    UnexpectedStatus {
        /// HTTP status code of the response.
        status: u16,
    },

    /// A response body did not match the expected JSON shape.
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A credential or nonce could not be encoded as an HTTP header value.
    #[error("invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),

    /// The request carries a streaming body, which cannot be hashed for the
    /// signature and then replayed for transmission.
    #[error("request body is not buffered in memory and cannot be signed")]
    UnbufferedBody,

    /// The gateway reported success but the envelope carried no `data` field.
    #[error("response envelope missing data, status code: {status}")]
    MissingData {
        /// HTTP status code of the response.
        status: u16,
    },
}
