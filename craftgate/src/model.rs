//! Response envelopes and shared gateway types.
//!
//! Every gateway response is wrapped in a [`Response`] envelope: success
//! payloads arrive under `data`, failures under `errors`. Classification is
//! done by HTTP status code, not by envelope shape — see
//! [`crate::client::CraftgateClient`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Top-level JSON envelope returned by every gateway endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Response<T> {
    /// Payload on success.
    pub data: Option<T>,
    /// Structured error on failure.
    pub errors: Option<ErrorBody>,
}

impl<T> Response<T> {
    /// Unwraps the success payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingData`] when the gateway answered with a
    /// success status but no `data` field.
    pub fn into_data(self, status: u16) -> Result<T, Error> {
        self.data.ok_or(Error::MissingData { status })
    }
}

/// Structured error description inside an error envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Machine-readable error group.
    pub error_group: Option<String>,
    /// Gateway-specific error code.
    pub error_code: Option<String>,
    /// Human-readable description of the failure.
    pub error_description: Option<String>,
}

/// Paginated collection payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    /// Items on the current page.
    pub items: Vec<T>,
    /// Zero-based page index.
    pub page: Option<i32>,
    /// Page size.
    pub size: Option<i32>,
    /// Total number of items across all pages.
    pub total_size: Option<i64>,
}

/// Payment-level error details nested in refund responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentError {
    /// Machine-readable error group.
    pub error_group: Option<String>,
    /// Gateway-specific error code.
    pub error_code: Option<String>,
    /// Human-readable description.
    pub error_description: Option<String>,
}

/// ISO currency codes accepted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Turkish lira.
    Try,
    /// United States dollar.
    Usd,
    /// Euro.
    Eur,
    /// Pound sterling.
    Gbp,
}

/// Record activity flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Record is live.
    Active,
    /// Record is disabled.
    Passive,
}

/// Payout progress of a wallet transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionPayoutStatus {
    /// No payout will be made for this transaction.
    NoPayout,
    /// Waiting to be included in a payout run.
    WaitingForPayout,
    /// Payout run started.
    PayoutStarted,
    /// Payout completed.
    PayoutCompleted,
}

/// Source transaction type for a wallet-to-card refund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundCardTransactionType {
    /// Refund drawn against a card payment.
    Payment,
    /// Refund drawn against a wallet balance.
    Wallet,
}

/// Timestamp format used by the gateway (`2023-07-12T14:33:41`).
pub type GatewayDateTime = NaiveDateTime;
