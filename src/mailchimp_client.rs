use reqwest::{Client, Method, Response, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time;

use crate::error::GatewayError;

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(10);
// MailChimp ignores the basic auth user name, only the password (the API key) matters.
const API_USER: &str = "apikey";

#[derive(Clone, Debug)]
pub struct MailChimpClient {
    http_client: Client,
    base_url: Url,
    api_key: Secret<String>,
    request_timeout: Option<time::Duration>,
}

/// Error body MailChimp sends back for every 4xx/5xx response.
#[derive(serde::Deserialize, Default)]
struct ProblemDetail {
    #[serde(default)]
    title: String,
    #[serde(default)]
    detail: String,
}

impl MailChimpClient {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        timeout: Option<time::Duration>,
    ) -> Result<MailChimpClient, GatewayError> {
        if api_key.expose_secret().trim().is_empty() {
            return Err(GatewayError::Configuration(
                "MailChimp API key is missing".to_string(),
            ));
        }

        let base_url = Url::parse(&base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                GatewayError::Configuration(format!(
                    "{} is not a valid MailChimp base URL",
                    base_url
                ))
            })?;

        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()?;

        Ok(MailChimpClient {
            http_client,
            base_url,
            api_key,
            request_timeout: None,
        })
    }

    /// Returns a handle sharing the same connection pool whose requests give
    /// up after `timeout`.
    pub fn with_timeout(&self, timeout: time::Duration) -> MailChimpClient {
        MailChimpClient {
            request_timeout: Some(timeout),
            ..self.clone()
        }
    }

    pub async fn get(&self, segments: &[&str]) -> Result<serde_json::Value, GatewayError> {
        self.send::<()>(Method::GET, segments, None).await
    }

    pub async fn put<B: Serialize>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<serde_json::Value, GatewayError> {
        self.send(Method::PUT, segments, Some(body)).await
    }

    pub async fn patch<B: Serialize>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<serde_json::Value, GatewayError> {
        self.send(Method::PATCH, segments, Some(body)).await
    }

    /// Every segment is percent-encoded, so ids coming from callers or from
    /// MailChimp responses can never escape their place in the path.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();

        // `new` rejects cannot-be-a-base URLs
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        url
    }

    #[tracing::instrument(
        name = "Calling the MailChimp API",
        skip(self, method, segments, body),
        fields(
            http.method = %method,
            http.path = tracing::field::Empty
        )
    )]
    async fn send<B: Serialize>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<serde_json::Value, GatewayError> {
        let url = self.url(segments);

        tracing::Span::current().record("http.path", url.path());

        let mut request = self
            .http_client
            .request(method, url)
            .basic_auth(API_USER, Some(self.api_key.expose_secret()));

        if let Some(timeout) = self.request_timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| {
            tracing::error!("MailChimp request failed: {:?}", err);
            err
        })?;

        decode_response(response).await
    }
}

async fn decode_response(response: Response) -> Result<serde_json::Value, GatewayError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(GatewayError::NotFound);
    }

    let body = response.bytes().await?;

    if !status.is_success() {
        let problem: ProblemDetail = serde_json::from_slice(&body).unwrap_or_default();
        let title = if problem.title.is_empty() {
            status.canonical_reason().unwrap_or("Unknown").to_string()
        } else {
            problem.title
        };

        tracing::warn!(
            status = status.as_u16(),
            "MailChimp rejected the request: {}",
            title
        );

        return Err(GatewayError::Api {
            status: status.as_u16(),
            title,
            detail: problem.detail,
        });
    }

    // 204 No Content and friends
    if body.is_empty() {
        return Ok(serde_json::Value::Null);
    }

    serde_json::from_slice(&body).map_err(GatewayError::Decode)
}
