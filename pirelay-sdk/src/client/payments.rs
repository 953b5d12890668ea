//! Payments client (relay server → Pi Network API).
//!
//! Every request authenticates with `Authorization: Key <secret>`. The
//! secret is passed per call and never stored by the client.

use bytes::BytesMut;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use serde::Serialize;
use url::Url;

use super::ClientError;
use crate::objects::{PaymentAction, UpstreamResult};

/// Production root of the Pi Network platform API.
pub const DEFAULT_BASE_URL: &str = "https://api.minepi.com";

#[derive(Serialize)]
struct CompleteBody<'a> {
    txid: &'a str,
}

/// Typed HTTP client for the Pi **payments** endpoints.
#[derive(Debug, Clone)]
pub struct PiClient {
    http: Client,
    base_url: Url,
}

impl PiClient {
    /// Create a client pointed at `base_url` (e.g. [`DEFAULT_BASE_URL`]).
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `POST /v2/payments/{payment_id}/cancel`.
    pub async fn cancel(
        &self,
        api_key: &str,
        payment_id: &str,
    ) -> Result<UpstreamResult, ClientError> {
        self.send(PaymentAction::Cancel, api_key, payment_id, None)
            .await
    }

    /// `POST /v2/payments/{payment_id}/complete` with `{"txid": ...}`.
    pub async fn complete(
        &self,
        api_key: &str,
        payment_id: &str,
        txid: &str,
    ) -> Result<UpstreamResult, ClientError> {
        self.send(PaymentAction::Complete, api_key, payment_id, Some(txid))
            .await
    }

    /// Issue exactly one request for `action` and collect the whole body.
    ///
    /// A `txid` is only sent for [`PaymentAction::Complete`].
    pub async fn send(
        &self,
        action: PaymentAction,
        api_key: &str,
        payment_id: &str,
        txid: Option<&str>,
    ) -> Result<UpstreamResult, ClientError> {
        let url = self.payment_url(payment_id, action)?;

        let request = self
            .http
            .post(url)
            .header(AUTHORIZATION, format!("Key {api_key}"));

        let request = match (action, txid) {
            (PaymentAction::Complete, Some(txid)) => {
                let payload = serde_json::to_vec(&CompleteBody { txid })?;
                request
                    .header(CONTENT_TYPE, "application/json")
                    .header(CONTENT_LENGTH, payload.len())
                    .body(payload)
            }
            _ => request.header(CONTENT_LENGTH, 0),
        };

        let mut response = request.send().await?;
        let status_code = response.status().as_u16();

        let mut body = BytesMut::new();
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
        }

        Ok(UpstreamResult {
            status_code,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }

    /// `{base}/v2/payments/{percent-encoded id}/{operation}`.
    fn payment_url(&self, payment_id: &str, action: PaymentAction) -> Result<Url, ClientError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = format!(
            "{base}/v2/payments/{}/{}",
            urlencoding::encode(payment_id),
            action.operation()
        );
        Ok(Url::parse(&url)?)
    }
}

impl Default for PiClient {
    fn default() -> Self {
        Self::new(Url::parse(DEFAULT_BASE_URL).expect("valid default base url"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PiClient {
        PiClient::new(Url::parse(&server.uri()).unwrap())
    }

    #[test]
    fn test_payment_url_encodes_id() {
        let client = PiClient::default();
        let url = client
            .payment_url("a b/c?d", PaymentAction::Cancel)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.minepi.com/v2/payments/a%20b%2Fc%3Fd/cancel"
        );
    }

    #[test]
    fn test_payment_url_tolerates_trailing_slash() {
        let client = PiClient::new(Url::parse("http://localhost:9000/").unwrap());
        let url = client
            .payment_url("PI123", PaymentAction::Complete)
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/v2/payments/PI123/complete");
    }

    #[tokio::test]
    async fn test_cancel_sends_key_and_no_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/payments/PI123/cancel"))
            .and(header("authorization", "Key secret-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":"cancelled"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .cancel("secret-key", "PI123")
            .await
            .unwrap();

        assert_eq!(result.status_code, 200);
        assert_eq!(result.body, r#"{"status":"cancelled"}"#);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].body.is_empty());
        assert_eq!(requests[0].headers["content-length"], "0");
        assert!(requests[0].headers.get("content-type").is_none());
    }

    #[tokio::test]
    async fn test_complete_sends_txid_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/payments/PI999/complete"))
            .and(header("authorization", "Key k"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({ "txid": "abc" })))
            .respond_with(ResponseTemplate::new(200).set_body_string("done"))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .complete("k", "PI999", "abc")
            .await
            .unwrap();

        assert_eq!(result.status_code, 200);
        assert_eq!(result.body, "done");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body, br#"{"txid":"abc"}"#);
        assert_eq!(requests[0].headers["content-length"], "14");
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/payments/PI1/cancel"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let result = client_for(&server).cancel("k", "PI1").await.unwrap();

        assert_eq!(result.status_code, 404);
        assert_eq!(result.body, "not found");
        assert!(!result.is_success());
    }

    #[tokio::test]
    async fn test_connection_failure_is_http_error() {
        // Nothing listens on the discard port.
        let client = PiClient::new(Url::parse("http://127.0.0.1:9").unwrap());
        let err = client.cancel("k", "PI1").await.unwrap_err();
        assert!(matches!(err, ClientError::Http(_)));
    }
}
