//! Protocol constants for the Craftgate REST API.

/// HTTP header carrying the merchant API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// HTTP header carrying the per-request nonce.
pub const RANDOM_HEADER: &str = "x-rnd-key";

/// HTTP header carrying the signature scheme version.
pub const AUTH_VERSION_HEADER: &str = "x-auth-version";

/// HTTP header identifying this client library.
pub const CLIENT_VERSION_HEADER: &str = "x-client-version";

/// HTTP header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "x-signature";

/// Signature scheme version understood by the gateway.
pub const AUTH_VERSION: &str = "1";

/// Client identifier sent with every request.
pub const CLIENT_VERSION: &str = concat!("craftgate-rust-client:", env!("CARGO_PKG_VERSION"));

/// Production API base URL.
pub const API_URL: &str = "https://api.craftgate.io";

/// Sandbox API base URL.
pub const SANDBOX_API_URL: &str = "https://sandbox-api.craftgate.io";

/// Whole-call timeout applied to every request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
