//! The Craftgate client and its request dispatch pipeline.
//!
//! [`CraftgateClient`] owns a shared connection pool and the merchant
//! credentials. Every call runs the same linear pipeline: buffer the body,
//! generate a nonce, sign, attach the authentication headers, execute once,
//! classify by status code, decode. There are no retries and no state kept
//! across calls; the caller decides what to do with a failure.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use reqwest::{Method, Request, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::auth;
use crate::constants::{
    API_KEY_HEADER, API_URL, AUTH_VERSION, AUTH_VERSION_HEADER, CLIENT_VERSION,
    CLIENT_VERSION_HEADER, DEFAULT_TIMEOUT_SECS, RANDOM_HEADER, SIGNATURE_HEADER,
};
use crate::error::Error;
use crate::model::Response;
use crate::wallet::Wallet;

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Configuration for [`CraftgateClient`].
pub struct ClientConfig {
    /// Merchant API key.
    pub api_key: String,

    /// Merchant secret key.
    pub secret_key: String,

    /// Gateway base URL (without trailing slash).
    pub base_url: String,

    /// Whole-call HTTP timeout.
    pub timeout: Duration,

    /// Optional pre-configured reqwest client. If `None`, a new client is
    /// created with the configured timeout.
    pub http_client: Option<reqwest::Client>,
}

impl ClientConfig {
    /// Creates a config for the production gateway with the given credentials.
    #[must_use]
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
            base_url: API_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            http_client: None,
        }
    }

    /// Sets the gateway base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the whole-call timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a pre-configured reqwest client.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("has_http_client", &self.http_client.is_some())
            .finish_non_exhaustive()
    }
}

/// Async client for the Craftgate payment gateway.
///
/// Cheap to clone; all clones share one connection pool. Calls are
/// independent and may run concurrently — every piece of per-call state
/// (body buffer, nonce, signature) is local to the call.
///
/// # Example
///
/// ```no_run
/// use craftgate::{ClientConfig, CraftgateClient};
///
/// # async fn run() -> Result<(), craftgate::Error> {
/// let client = CraftgateClient::new(ClientConfig::new("api-key", "secret-key"));
/// let wallet = client.wallet().retrieve_member_wallet(42).await?;
/// println!("balance: {:?}", wallet.amount);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CraftgateClient {
    http: reqwest::Client,
    api_key: String,
    secret_key: String,
    base_url: String,
}

impl CraftgateClient {
    /// Creates a new client from the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying TLS backend cannot be initialized when
    /// building the connection pool.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let base_url = config.base_url.trim_end_matches('/').to_owned();
        let http = config.http_client.unwrap_or_else(|| {
            reqwest::Client::builder()
                .timeout(config.timeout)
                .build()
                .expect("failed to build reqwest::Client")
        });

        Self {
            http,
            api_key: config.api_key,
            secret_key: config.secret_key,
            base_url,
        }
    }

    /// Returns the gateway base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Wallet, remittance, and withdraw endpoints.
    #[must_use]
    pub fn wallet(&self) -> Wallet<'_> {
        Wallet::new(self)
    }

    /// Starts a request against a gateway path, relative to the base URL.
    ///
    /// Useful for endpoints this crate does not wrap yet; pair with
    /// [`send`](Self::send) or [`send_discarding`](Self::send_discarding).
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
    }

    /// Signs and sends a request, decoding the `data` payload of the
    /// success envelope into `T`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] on transport failure, a gateway error envelope,
    /// or an undecodable response.
    pub async fn send<T: DeserializeOwned>(&self, request: Request) -> Result<T, Error> {
        let (status, body) = self.dispatch(request).await?;
        let envelope: Response<T> = serde_json::from_slice(&body)?;
        envelope.into_data(status)
    }

    /// Signs and sends a request whose response body the caller does not
    /// want. The body is never decoded, malformed JSON included; error
    /// classification still applies.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] on transport failure, a gateway error envelope,
    /// or a request body that is not buffered in memory.
    pub async fn send_discarding(&self, request: Request) -> Result<(), Error> {
        self.dispatch(request).await.map(|_| ())
    }

    /// Core pipeline: sign, attach headers, execute once, classify.
    ///
    /// The signature must cover exactly the bytes the transport sends, so
    /// only in-memory bodies are accepted; a streaming body cannot be
    /// hashed and replayed and is rejected up front.
    async fn dispatch(&self, mut request: Request) -> Result<(u16, Vec<u8>), Error> {
        let nonce = auth::generate_nonce();
        let signature = {
            let body_bytes = match request.body() {
                Some(body) => body.as_bytes().ok_or(Error::UnbufferedBody)?,
                None => &[],
            };
            auth::request_signature(
                request.url().as_str(),
                &self.api_key,
                &self.secret_key,
                &nonce,
                body_bytes,
            )
        };

        #[cfg(feature = "telemetry")]
        tracing::debug!(url = %request.url(), nonce = %nonce, "dispatching signed gateway request");

        let headers = request.headers_mut();
        headers.insert(API_KEY_HEADER, HeaderValue::from_str(&self.api_key)?);
        headers.insert(RANDOM_HEADER, HeaderValue::from_str(&nonce)?);
        headers.insert(AUTH_VERSION_HEADER, HeaderValue::from_static(AUTH_VERSION));
        headers.insert(CLIENT_VERSION_HEADER, HeaderValue::from_static(CLIENT_VERSION));
        headers.insert(SIGNATURE_HEADER, HeaderValue::from_str(&signature)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_UTF8));

        let response = self.http.execute(request).await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        if (200..400).contains(&status) {
            Ok((status, body.to_vec()))
        } else {
            Err(classify_failure(status, &body))
        }
    }
}

impl std::fmt::Debug for CraftgateClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CraftgateClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Maps a non-success response to an error, preferring the gateway's own
/// description when the error envelope decodes.
fn classify_failure(status: u16, body: &[u8]) -> Error {
    if let Ok(envelope) = serde_json::from_slice::<Response<serde_json::Value>>(body)
        && let Some(errors) = envelope.errors
        && let Some(description) = errors.error_description
    {
        return Error::Gateway {
            status,
            error_group: errors.error_group,
            error_code: errors.error_code,
            description,
        };
    }
    Error::UnexpectedStatus { status }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct Payload {
        id: i64,
    }

    fn client_for(server: &MockServer) -> CraftgateClient {
        CraftgateClient::new(
            ClientConfig::new("test-api-key", "test-secret-key").with_base_url(server.uri()),
        )
    }

    #[tokio::test]
    async fn success_envelope_decodes_into_destination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/x"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"data":{"id":1}}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = client.request(Method::GET, "/x").build().unwrap();
        let payload: Payload = client.send(request).await.unwrap();
        assert_eq!(payload.id, 1);
    }

    #[tokio::test]
    async fn gateway_error_surfaces_the_description() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/x"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_string(r#"{"errors":{"errorDescription":"bad request"}}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = client.request(Method::GET, "/x").build().unwrap();
        let err = client.send::<Payload>(request).await.unwrap_err();
        assert_eq!(err.to_string(), "bad request");
    }

    #[tokio::test]
    async fn undecodable_error_body_reports_the_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/x"))
            .respond_with(ResponseTemplate::new(500).set_body_string("not json at all"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = client.request(Method::GET, "/x").build().unwrap();
        let err = client.send::<Payload>(request).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn discarding_send_never_decodes_the_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/x"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{malformed json"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = client.request(Method::POST, "/x").build().unwrap();
        client.send_discarding(request).await.unwrap();
    }

    #[tokio::test]
    async fn success_without_data_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/x"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = client.request(Method::GET, "/x").build().unwrap();
        let err = client.send::<Payload>(request).await.unwrap_err();
        assert!(matches!(err, Error::MissingData { status: 200 }));
    }

    #[tokio::test]
    async fn every_auth_header_is_attached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/x"))
            .and(header_exists(API_KEY_HEADER))
            .and(header_exists(RANDOM_HEADER))
            .and(header_exists(AUTH_VERSION_HEADER))
            .and(header_exists(CLIENT_VERSION_HEADER))
            .and(header_exists(SIGNATURE_HEADER))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"data":{"id":7}}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = client.request(Method::GET, "/x").build().unwrap();
        let payload: Payload = client.send(request).await.unwrap();
        assert_eq!(payload.id, 7);
    }

    #[tokio::test]
    async fn signature_covers_the_bytes_actually_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/x"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"data":{"id":1}}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = client
            .request(Method::POST, "/x")
            .json(&serde_json::json!({"memberId": 42, "price": 10.5}))
            .build()
            .unwrap();
        let sent_body = request
            .body()
            .and_then(reqwest::Body::as_bytes)
            .unwrap()
            .to_vec();
        let _: Payload = client.send(request).await.unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        let received = &received[0];

        // Round trip: the body on the wire is the body that was built.
        assert_eq!(received.body, sent_body);

        // The signature recomputed from the bytes the server saw must match
        // the signature header, proving the hash covered the transmitted
        // bytes. The URL is recomputed client-side: the mock server does not
        // see the authority the client dialed and signed.
        let nonce = received.headers[RANDOM_HEADER].to_str().unwrap();
        let signature = received.headers[SIGNATURE_HEADER].to_str().unwrap();
        let expected = auth::request_signature(
            &format!("{}/x", server.uri()),
            "test-api-key",
            "test-secret-key",
            nonce,
            &received.body,
        );
        assert_eq!(signature, expected);
    }

    #[tokio::test]
    async fn non_utf8_body_is_signed_over_its_raw_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/x"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let raw = vec![0xff_u8, 0xfe, 0x01];
        let request = client
            .request(Method::POST, "/x")
            .body(raw.clone())
            .build()
            .unwrap();
        client.send_discarding(request).await.unwrap();

        let received = &server.received_requests().await.unwrap()[0];
        assert_eq!(received.body, raw);

        let nonce = received.headers[RANDOM_HEADER].to_str().unwrap();
        let signature = received.headers[SIGNATURE_HEADER].to_str().unwrap();
        let expected = auth::request_signature(
            &format!("{}/x", server.uri()),
            "test-api-key",
            "test-secret-key",
            nonce,
            &received.body,
        );
        assert_eq!(signature, expected);
    }

    #[tokio::test]
    async fn bodyless_request_signs_an_empty_body_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/x"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"data":{"id":1}}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = client.request(Method::GET, "/x").build().unwrap();
        let _: Payload = client.send(request).await.unwrap();

        let received = &server.received_requests().await.unwrap()[0];
        let nonce = received.headers[RANDOM_HEADER].to_str().unwrap();
        let signature = received.headers[SIGNATURE_HEADER].to_str().unwrap();
        let expected = auth::request_signature(
            &format!("{}/x", server.uri()),
            "test-api-key",
            "test-secret-key",
            nonce,
            b"",
        );
        assert_eq!(signature, expected);
    }

    #[tokio::test]
    async fn two_calls_use_distinct_nonces() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/x"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"data":{"id":1}}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        for _ in 0..2 {
            let request = client.request(Method::GET, "/x").build().unwrap();
            let _: Payload = client.send(request).await.unwrap();
        }

        let received = server.received_requests().await.unwrap();
        let first = received[0].headers[RANDOM_HEADER].to_str().unwrap();
        let second = received[1].headers[RANDOM_HEADER].to_str().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn debug_output_redacts_credentials() {
        let client = CraftgateClient::new(ClientConfig::new("key-value", "secret-value"));
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("key-value"));
        assert!(!rendered.contains("secret-value"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = CraftgateClient::new(
            ClientConfig::new("k", "s").with_base_url("https://sandbox-api.craftgate.io/"),
        );
        assert_eq!(client.base_url(), "https://sandbox-api.craftgate.io");
    }
}
