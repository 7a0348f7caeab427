use std::{collections::HashMap, time::Duration};

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Method, StatusCode,
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::{de::DeserializeOwned, Serialize};

/// Failures the caller is expected to branch on. Everything else is a plain report.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("status code not 2xx: {status}, {body}")]
    Status { status: StatusCode, body: String },
}

pub struct RequestParams<'a, S: Serialize> {
    pub url: &'a str,
    pub method: Method,
    pub body: Option<S>,
    pub query_args: Option<HashMap<&'a str, &'a str>>,
    pub bearer: Option<&'a str>,
    pub headers: Option<HeaderMap>,
}

/// Only GET and HEAD are retried on transient failures. Every other method is
/// sent once and its failure reported as is.
pub struct HttpClients {
    retrying: ClientWithMiddleware,
    single_shot: ClientWithMiddleware,
}

impl HttpClients {
    pub fn new() -> Self {
        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(5))
            .build_with_max_retries(3);

        let retrying = ClientBuilder::new(build_reqwest_client())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();
        let single_shot = ClientBuilder::new(build_reqwest_client()).build();

        Self {
            retrying,
            single_shot,
        }
    }

    pub fn for_method(&self, method: &Method) -> &ClientWithMiddleware {
        if is_retry_safe(method) {
            &self.retrying
        } else {
            &self.single_shot
        }
    }
}

impl Default for HttpClients {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_retry_safe(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD
}

fn build_reqwest_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|err| {
            tracing::error!("Failed to build a client with timeout. Error: {err}");
            reqwest::Client::new()
        })
}

fn build_headers(
    bearer: Option<&str>,
    extra: Option<&HeaderMap>,
    has_body: bool,
) -> eyre::Result<HeaderMap> {
    let mut headers = extra.cloned().unwrap_or_default();

    if let Some(token) = bearer {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
    }

    if has_body {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    Ok(headers)
}

async fn send(
    clients: &HttpClients,
    request_params: RequestParams<'_, impl Serialize>,
) -> eyre::Result<String> {
    let client = clients.for_method(&request_params.method);
    let mut request = client.request(request_params.method.clone(), request_params.url);

    if let Some(params) = &request_params.query_args {
        request = request.query(&params);
    }

    if let Some(body) = &request_params.body {
        request = request.body(serde_json::to_vec(body)?);
    }

    request = request.headers(build_headers(
        request_params.bearer,
        request_params.headers.as_ref(),
        request_params.body.is_some(),
    )?);

    let response = request
        .send()
        .await
        .inspect_err(|e| tracing::error!("Request failed: {}", e))?;

    let status = response.status();

    let text = response
        .text()
        .await
        .inspect_err(|e| tracing::error!("Failed to retrieve response text: {}", e))?;

    if status == StatusCode::UNAUTHORIZED {
        return Err(FetchError::Unauthorized(text).into());
    }

    if !status.is_success() {
        return Err(FetchError::Status { status, body: text }.into());
    }

    Ok(text)
}

pub async fn send_http_request<R: DeserializeOwned>(
    clients: &HttpClients,
    request_params: RequestParams<'_, impl Serialize>,
) -> eyre::Result<R> {
    let text = send(clients, request_params).await?;

    let deserialized_body = serde_json::from_str::<R>(&text)
        .inspect_err(|e| tracing::error!("Failed to deserialize response: {}\n {} ", e, text))?;

    Ok(deserialized_body)
}

/// Same as [`send_http_request`] for endpoints whose response body carries nothing we use.
pub async fn send_http_request_discarding(
    clients: &HttpClients,
    request_params: RequestParams<'_, impl Serialize>,
) -> eyre::Result<()> {
    send(clients, request_params).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_and_content_type_headers() {
        let headers = build_headers(Some("abc"), None, true).unwrap();

        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn no_credential_means_no_authorization_header() {
        let headers = build_headers(None, None, false).unwrap();

        assert!(headers.get(AUTHORIZATION).is_none());
        assert!(headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn only_reads_go_through_the_retrying_client() {
        let clients = HttpClients::new();

        for method in [Method::GET, Method::HEAD] {
            assert!(std::ptr::eq(clients.for_method(&method), &clients.retrying));
        }

        for method in [Method::POST, Method::PUT, Method::PATCH, Method::DELETE] {
            assert!(!is_retry_safe(&method));
            assert!(std::ptr::eq(clients.for_method(&method), &clients.single_shot));
        }
    }
}
