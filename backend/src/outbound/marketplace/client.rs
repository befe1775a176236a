//! Shared reqwest plumbing for the marketplace API adapters.
//!
//! Every outbound request forwards the caller's `Cookie` header and the
//! current trace identifier. Response bodies are read up to
//! [`MAX_BODY_BYTES`] before status handling so failures can carry a short
//! preview.

use std::time::Duration;

use reqwest::header::{ACCEPT, COOKIE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};

use crate::domain::{SessionCredentials, TRACE_ID_HEADER, TraceId};

const USER_AGENT: &str = concat!("portal-gateway/", env!("CARGO_PKG_VERSION"));

/// Largest upstream response body accepted, in bytes.
pub(crate) const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Why an upstream exchange failed before a usable body was available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UpstreamFailure {
    /// Connection, timeout, or body read failure.
    Transport(String),
    /// The upstream answered with a non-success status.
    Status {
        status: StatusCode,
        message: String,
    },
}

/// Base URL and HTTP client shared by the marketplace adapters.
#[derive(Debug, Clone)]
pub struct MarketplaceClient {
    client: Client,
    base: Url,
}

impl MarketplaceClient {
    /// Build a client rooted at `base` with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base: with_trailing_slash(base),
        })
    }

    /// Base URL all endpoint paths are resolved against.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve an endpoint path relative to the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, UpstreamFailure> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|error| UpstreamFailure::Transport(format!("invalid endpoint {path}: {error}")))
    }

    /// Start a request carrying the caller's cookies and the trace id.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        credentials: &SessionCredentials,
    ) -> Result<RequestBuilder, UpstreamFailure> {
        let url = self.endpoint(path)?;
        let mut builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(cookie) = credentials.cookie_header() {
            builder = builder.header(COOKIE, cookie);
        }
        if let Some(trace_id) = TraceId::current() {
            builder = builder.header(TRACE_ID_HEADER, trace_id.to_string());
        }
        Ok(builder)
    }
}

/// Send the request and return the body of a successful response.
pub(crate) async fn send(request: RequestBuilder) -> Result<Vec<u8>, UpstreamFailure> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = read_bounded(response).await?;
    if !status.is_success() {
        return Err(map_status_error(status, &body));
    }
    Ok(body)
}

async fn read_bounded(mut response: Response) -> Result<Vec<u8>, UpstreamFailure> {
    if declared_too_large(response.content_length()) {
        return Err(oversized_body());
    }
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(map_transport_error)? {
        append_bounded(&mut body, &chunk)?;
    }
    Ok(body)
}

fn declared_too_large(content_length: Option<u64>) -> bool {
    content_length.is_some_and(|len| !usize::try_from(len).is_ok_and(|len| len <= MAX_BODY_BYTES))
}

fn append_bounded(body: &mut Vec<u8>, chunk: &[u8]) -> Result<(), UpstreamFailure> {
    if body.len().saturating_add(chunk.len()) > MAX_BODY_BYTES {
        return Err(oversized_body());
    }
    body.extend_from_slice(chunk);
    Ok(())
}

fn oversized_body() -> UpstreamFailure {
    UpstreamFailure::Transport(format!("response body exceeds {MAX_BODY_BYTES} bytes"))
}

fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

fn map_transport_error(error: reqwest::Error) -> UpstreamFailure {
    if error.is_timeout() {
        UpstreamFailure::Transport(format!("timed out: {error}"))
    } else {
        UpstreamFailure::Transport(error.to_string())
    }
}

pub(crate) fn map_status_error(status: StatusCode, body: &[u8]) -> UpstreamFailure {
    let preview = upstream_message(body).unwrap_or_else(|| body_preview(body));
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        preview
    };
    UpstreamFailure::Status { status, message }
}

/// Prefer the envelope's `message`/`error` field when the body is JSON.
fn upstream_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .into_iter()
        .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_owned)
}

pub(crate) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
