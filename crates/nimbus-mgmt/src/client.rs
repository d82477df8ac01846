//! HTTP plumbing shared by the resource handlers.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::{RestError, Result};
use crate::recording::{Exchange, RecordedRequest, RecordedResponse, Recorder};

/// Response header carrying the service-assigned request id.
pub const REQUEST_ID_HEADER: &str = "x-nimbus-request-id";

const DEFAULT_USER_AGENT: &str = concat!("nimbus-mgmt/", env!("CARGO_PKG_VERSION"));

/// Typed response envelope.
///
/// Every handler call returns the deserialized body together with the HTTP
/// status and the request id the service attached, so callers can surface
/// both alongside the payload.
#[derive(Debug, Clone)]
pub struct MgmtResponse<T> {
    pub body: T,
    pub status: u16,
    pub request_id: Option<String>,
}

/// Authenticated client for the Nimbus management plane.
///
/// One request in flight per call; retry and timeout policy are the caller's
/// concern.
#[derive(Clone)]
pub struct MgmtClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
    subscription: String,
    recorder: Option<Recorder>,
}

/// Builder for [`MgmtClient`].
#[derive(Default)]
pub struct MgmtClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    subscription: Option<String>,
    user_agent: Option<String>,
    recorder: Option<Recorder>,
}

impl MgmtClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn subscription(mut self, subscription: impl Into<String>) -> Self {
        self.subscription = Some(subscription.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Attach an exchange recorder as an additional client behavior.
    ///
    /// Production code paths never attach one; the scenario-test harness does.
    pub fn recorder(mut self, recorder: Recorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn build(self) -> Result<MgmtClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| RestError::Validation("base URL is required".into()))?;
        let token = self
            .token
            .ok_or_else(|| RestError::Validation("token is required".into()))?;
        let subscription = self
            .subscription
            .ok_or_else(|| RestError::Validation("subscription is required".into()))?;

        // Url::join treats a missing trailing slash as a file component.
        let normalized = if base_url.ends_with('/') {
            base_url
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)?;

        let http = reqwest::Client::builder()
            .user_agent(
                self.user_agent
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            )
            .build()
            .map_err(|e| RestError::Connection(e.to_string()))?;

        Ok(MgmtClient {
            http,
            base_url,
            token,
            subscription,
            recorder: self.recorder,
        })
    }
}

struct RawResponse {
    status: u16,
    request_id: Option<String>,
    body: Value,
}

impl MgmtClient {
    pub fn builder() -> MgmtClientBuilder {
        MgmtClientBuilder::default()
    }

    /// Subscription scope this client was built for.
    pub fn subscription(&self) -> &str {
        &self.subscription
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<MgmtResponse<T>> {
        let raw = self.execute(Method::GET, path, query, None).await?;
        Self::into_typed(raw)
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<MgmtResponse<T>> {
        let body = serde_json::to_value(body)?;
        let raw = self.execute(Method::POST, path, &[], Some(body)).await?;
        Self::into_typed(raw)
    }

    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<MgmtResponse<T>> {
        let body = serde_json::to_value(body)?;
        let raw = self.execute(Method::PUT, path, &[], Some(body)).await?;
        Self::into_typed(raw)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<MgmtResponse<()>> {
        let raw = self.execute(Method::DELETE, path, &[], None).await?;
        Ok(MgmtResponse {
            body: (),
            status: raw.status,
            request_id: raw.request_id,
        })
    }

    fn into_typed<T: DeserializeOwned>(raw: RawResponse) -> Result<MgmtResponse<T>> {
        Ok(MgmtResponse {
            body: serde_json::from_value(raw.body)?,
            status: raw.status,
            request_id: raw.request_id,
        })
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<RawResponse> {
        let url = self.base_url.join(path)?;
        debug!("{} {}", method, url);

        let mut request = self.http.request(method.clone(), url).bearer_auth(&self.token);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(ref body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RestError::Connection(e.to_string()))?;

        let status = response.status();
        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let text = response
            .text()
            .await
            .map_err(|e| RestError::Connection(e.to_string()))?;
        trace!("response status={} body={}", status, text);

        // Error responses are not guaranteed to be JSON.
        let response_body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text.clone()))
        };

        if let Some(ref recorder) = self.recorder {
            recorder.record(Exchange {
                request: RecordedRequest {
                    method: method.to_string(),
                    path: format!("/{}", path.trim_start_matches('/')),
                    query: query
                        .iter()
                        .map(|(k, v)| ((*k).to_string(), v.clone()))
                        .collect(),
                    body,
                },
                response: RecordedResponse {
                    status: status.as_u16(),
                    body: response_body.clone(),
                    request_id: request_id.clone(),
                },
            });
        }

        if status.is_success() {
            return Ok(RawResponse {
                status: status.as_u16(),
                request_id,
                body: response_body,
            });
        }

        Err(match status.as_u16() {
            401 => RestError::AuthenticationFailed,
            404 => RestError::NotFound,
            code if (400..500).contains(&code) => RestError::Api {
                code,
                message: error_message(&response_body, &text),
            },
            _ => RestError::Server(error_message(&response_body, &text)),
        })
    }
}

/// Pull the service's error message out of the standard envelope, falling
/// back to the raw body.
fn error_message(body: &Value, raw: &str) -> String {
    body.get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| raw.trim().to_string())
}

/// List responses wrap their items in a `value` array.
#[derive(Debug, serde::Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub(crate) struct ListResult<T> {
    #[serde(default)]
    pub value: Vec<T>,
}
