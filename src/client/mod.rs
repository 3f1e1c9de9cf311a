//! Client layer: orchestrates the send pipeline over an HTTP transport.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::{Config, Message, SendResponse, ValidationError};
use crate::transport::encode_send_sms_form;

/// Connect timeout applied to every gateway request.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Total request timeout applied unless overridden via the builder.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.post(url).form(&params).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SkebbyClient`].
///
/// This error preserves:
/// - HTTP-level failures (non-2xx status or transport failures),
/// - domain validation failures, including recipient phone numbers that
///   cannot be normalized.
pub enum SkebbyError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the gateway.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// `send` was called with an empty recipient list.
    #[error("message has no recipients")]
    NoRecipients,

    /// A domain constructor or the request encoder rejected a value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`SkebbyClient`].
///
/// Use this when you need to override the request timeout or user-agent.
pub struct SkebbyClientBuilder {
    config: Config,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SkebbyClientBuilder {
    /// Create a builder with the default timeouts and no user-agent override.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the total request timeout (the connect timeout stays fixed).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`SkebbyClient`].
    pub fn build(self) -> Result<SkebbyClient, SkebbyError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(self.timeout.unwrap_or(REQUEST_TIMEOUT));
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| SkebbyError::Transport(Box::new(err)))?;

        Ok(SkebbyClient {
            config: self.config,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level gateway client.
///
/// Holds the resolved [`Config`] and an HTTP client built once with the
/// gateway timeouts. [`SkebbyClient::send`] is the only runtime entry point:
/// it splits the message into gateway-sized chunks and performs one POST per
/// chunk, strictly in order.
pub struct SkebbyClient {
    config: Config,
    http: Arc<dyn HttpTransport>,
}

impl SkebbyClient {
    /// Create a client with the default timeouts.
    ///
    /// For more customization, use [`SkebbyClient::builder`].
    pub fn new(config: Config) -> Result<Self, SkebbyError> {
        SkebbyClientBuilder::new(config).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(config: Config) -> SkebbyClientBuilder {
        SkebbyClientBuilder::new(config)
    }

    /// Send a message, one request per chunk of recipients.
    ///
    /// Chunks are dispatched sequentially; the returned responses match
    /// chunk order. The first failing chunk aborts the remaining ones —
    /// already-sent chunks are not rolled back, the gateway has no such
    /// mechanism.
    ///
    /// Errors:
    /// - [`SkebbyError::NoRecipients`] for an empty recipient list, before
    ///   any network activity,
    /// - [`SkebbyError::Validation`] when a recipient cannot be normalized,
    /// - [`SkebbyError::Transport`] / [`SkebbyError::HttpStatus`] for
    ///   network and gateway failures.
    pub async fn send(&self, message: &Message) -> Result<Vec<SendResponse>, SkebbyError> {
        if message.recipients().is_empty() {
            return Err(SkebbyError::NoRecipients);
        }

        let chunks = message.chunks();
        debug!(
            recipients = message.recipients().len(),
            chunks = chunks.len(),
            "sending message"
        );

        let mut responses = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            let params = encode_send_sms_form(&self.config, chunk)?;
            debug!(
                chunk = index,
                recipients = chunk.recipients().len(),
                "posting chunk"
            );

            let response = self
                .http
                .post_form(self.config.endpoint(), params)
                .await
                .map_err(SkebbyError::Transport)?;

            if !(200..=299).contains(&response.status) {
                let body = if response.body.trim().is_empty() {
                    None
                } else {
                    Some(response.body)
                };
                return Err(SkebbyError::HttpStatus {
                    status: response.status,
                    body,
                });
            }

            responses.push(SendResponse::new(response.body));
        }

        Ok(responses)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::domain::{
        MessageOptions, MessageText, Method, Password, RawPhoneNumber, SEND_SMS_MAX_RECIPIENTS,
        Sender, Username,
    };

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        requests: Vec<(String, Vec<(String, String)>)>,
        responses: VecDeque<HttpResponse>,
    }

    impl FakeTransport {
        fn new(responses: Vec<(u16, &str)>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    requests: Vec::new(),
                    responses: responses
                        .into_iter()
                        .map(|(status, body)| HttpResponse {
                            status,
                            body: body.to_owned(),
                        })
                        .collect(),
                })),
            }
        }

        fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
            self.state.lock().unwrap().requests.clone()
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_form<'a>(
            &'a self,
            url: &'a str,
            params: Vec<(String, String)>,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let mut state = self.state.lock().unwrap();
                state.requests.push((url.to_owned(), params));
                Ok(state.responses.pop_front().expect("unexpected request"))
            })
        }
    }

    fn assert_param(params: &[(String, String)], key: &str, value: &str) {
        assert!(
            params.iter().any(|(k, v)| k == key && v == value),
            "missing param {key}={value}; got: {params:?}"
        );
    }

    fn config() -> Config {
        Config::new(
            Username::new("user").unwrap(),
            Password::new("pass").unwrap(),
            Sender::new("ACME").unwrap(),
            Method::TestClassic,
        )
        .with_endpoint("https://example.invalid/send")
        .unwrap()
    }

    fn make_client(config: Config, transport: FakeTransport) -> SkebbyClient {
        SkebbyClient {
            config,
            http: Arc::new(transport),
        }
    }

    fn message_to(count: usize) -> Message {
        let recipients = (0..count)
            .map(|idx| RawPhoneNumber::new(format!("+39333{idx:07}")).unwrap())
            .collect();
        Message::new(
            recipients,
            MessageText::new("hello").unwrap(),
            MessageOptions::default(),
        )
    }

    #[tokio::test]
    async fn send_posts_credentials_and_wraps_the_raw_body() {
        let transport = FakeTransport::new(vec![(200, "status=success\nid=42\n")]);
        let client = make_client(config(), transport.clone());

        let responses = client.send(&message_to(1)).await.unwrap();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].raw(), "status=success\nid=42\n");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let (url, params) = &requests[0];
        assert_eq!(url, "https://example.invalid/send");
        assert_param(params, "username", "user");
        assert_param(params, "password", "pass");
        assert_param(params, "method", "test_send_sms_classic");
        assert_param(params, "recipients", r#"["393330000000"]"#);
    }

    #[tokio::test]
    async fn send_posts_one_request_per_chunk_in_order() {
        let transport = FakeTransport::new(vec![(200, "first"), (200, "second")]);
        let client = make_client(config(), transport.clone());

        let responses = client
            .send(&message_to(SEND_SMS_MAX_RECIPIENTS + 1))
            .await
            .unwrap();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].raw(), "first");
        assert_eq!(responses[1].raw(), "second");

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);

        let recipients_of = |params: &[(String, String)]| {
            let json = params
                .iter()
                .find(|(k, _)| k == "recipients")
                .unwrap()
                .1
                .clone();
            serde_json::from_str::<Vec<String>>(&json).unwrap()
        };
        let first = recipients_of(&requests[0].1);
        let second = recipients_of(&requests[1].1);
        assert_eq!(first.len(), SEND_SMS_MAX_RECIPIENTS);
        assert_eq!(second.len(), 1);
        assert_eq!(first[0], "393330000000");
        assert_eq!(second[0], format!("39333{:07}", SEND_SMS_MAX_RECIPIENTS));
    }

    #[tokio::test]
    async fn send_without_recipients_makes_no_requests() {
        let transport = FakeTransport::new(vec![]);
        let client = make_client(config(), transport.clone());

        let err = client.send(&message_to(0)).await.unwrap_err();
        assert!(matches!(err, SkebbyError::NoRecipients));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn send_with_unparseable_recipient_makes_no_requests() {
        let transport = FakeTransport::new(vec![]);
        let client = make_client(config(), transport.clone());

        let message = Message::new(
            vec![RawPhoneNumber::new("not-a-number").unwrap()],
            MessageText::new("hello").unwrap(),
            MessageOptions::default(),
        );

        let err = client.send(&message).await.unwrap_err();
        assert!(matches!(
            err,
            SkebbyError::Validation(ValidationError::InvalidPhoneNumber { .. })
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn failing_chunk_aborts_the_remaining_chunks() {
        let transport = FakeTransport::new(vec![(200, "first"), (500, "oops")]);
        let client = make_client(config(), transport.clone());

        let err = client
            .send(&message_to(2 * SEND_SMS_MAX_RECIPIENTS + 1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SkebbyError::HttpStatus {
                status: 500,
                body: Some(_)
            }
        ));
        // The third chunk is never dispatched.
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn blank_error_body_maps_to_none() {
        let transport = FakeTransport::new(vec![(503, "   ")]);
        let client = make_client(config(), transport);

        let err = client.send(&message_to(1)).await.unwrap_err();
        assert!(matches!(
            err,
            SkebbyError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[test]
    fn builder_accepts_timeout_and_user_agent_overrides() {
        let client = SkebbyClient::builder(config())
            .timeout(Duration::from_secs(5))
            .user_agent("skebby-tests/1.0")
            .build()
            .unwrap();
        assert_eq!(client.config.endpoint(), "https://example.invalid/send");
    }
}
