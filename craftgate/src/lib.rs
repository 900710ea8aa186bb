#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Async client for the Craftgate payment gateway REST API.
//!
//! Every call goes through a single signed dispatch pipeline: the request
//! body is buffered, a per-request nonce is generated, a SHA-256 signature
//! over URL + credentials + nonce + body is attached alongside the
//! authentication headers, and the response envelope is classified by HTTP
//! status code and decoded into typed results.
//!
//! # Modules
//!
//! - [`client`] — [`CraftgateClient`], configuration, and the dispatch pipeline
//! - [`auth`] — nonce generation and the request signature
//! - [`constants`] — header names, version constants, base URLs
//! - [`error`] — the [`Error`] type returned by every call
//! - [`model`] — response envelopes and shared gateway types
//! - [`wallet`] — wallet, remittance, and withdraw endpoints
//!
//! # Feature Flags
//!
//! - `telemetry` — emits a `tracing` debug event per dispatched request
//!
//! # Example
//!
//! ```no_run
//! use craftgate::{ClientConfig, CraftgateClient};
//!
//! # async fn run() -> Result<(), craftgate::Error> {
//! let client = CraftgateClient::new(
//!     ClientConfig::new("api-key", "secret-key")
//!         .with_base_url(craftgate::constants::SANDBOX_API_URL),
//! );
//! let wallet = client.wallet().retrieve_merchant_member_wallet().await?;
//! println!("merchant balance: {:?}", wallet.amount);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod constants;
pub mod error;
pub mod model;
pub mod wallet;

pub use client::{ClientConfig, CraftgateClient};
pub use error::Error;
pub use model::{Currency, ListResponse, Response, Status};
