//! Reqwest-backed session lookup against `GET /auth/get-session`.

use async_trait::async_trait;
use reqwest::Method;

use super::client::{self, MarketplaceClient, UpstreamFailure};
use super::dto::SessionDto;
use crate::domain::ports::{SessionSource, SessionSourceError};
use crate::domain::{Identity, SessionCredentials};

const SESSION_PATH: &str = "auth/get-session";

/// Session source adapter calling the marketplace auth endpoint.
#[derive(Debug, Clone)]
pub struct HttpSessionSource {
    client: MarketplaceClient,
}

impl HttpSessionSource {
    /// Wrap a shared marketplace client.
    pub fn new(client: MarketplaceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionSource for HttpSessionSource {
    async fn fetch_session(
        &self,
        credentials: &SessionCredentials,
    ) -> Result<Option<Identity>, SessionSourceError> {
        let request = self
            .client
            .request(Method::GET, SESSION_PATH, credentials)
            .map_err(map_failure)?;
        let body = client::send(request).await.map_err(map_failure)?;
        parse_session(&body)
    }
}

fn parse_session(body: &[u8]) -> Result<Option<Identity>, SessionSourceError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let decoded: Option<SessionDto> = serde_json::from_slice(body).map_err(|error| {
        SessionSourceError::decode(format!("invalid session JSON payload: {error}"))
    })?;
    decoded
        .and_then(|session| session.user)
        .map(|user| user.into_identity().map_err(SessionSourceError::decode))
        .transpose()
}

fn map_failure(failure: UpstreamFailure) -> SessionSourceError {
    match failure {
        UpstreamFailure::Transport(message) => SessionSourceError::transport(message),
        UpstreamFailure::Status { status, .. } => SessionSourceError::status(status.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network session decoding.

    use super::*;
    use crate::domain::Role;
    use reqwest::StatusCode;
    use rstest::rstest;

    #[rstest]
    #[case::null(b"null".as_slice())]
    #[case::empty(b"".as_slice())]
    #[case::no_user(br#"{"session":null,"user":null}"#.as_slice())]
    fn absent_sessions_decode_to_none(#[case] body: &[u8]) {
        assert_eq!(parse_session(body).expect("decodes"), None);
    }

    #[test]
    fn decodes_identity() {
        let body = br#"{"user":{"id":"usr_7","name":"Ada","email":"ada@example.com","role":"ADMIN","emailVerified":true}}"#;
        let identity = parse_session(body)
            .expect("decodes")
            .expect("identity present");
        assert_eq!(identity.role().role(), Some(Role::Admin));
        assert_eq!(identity.id().as_ref(), "usr_7");
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        let error = parse_session(b"<html>").expect_err("decode failure");
        assert!(matches!(error, SessionSourceError::Decode { .. }));
    }

    #[test]
    fn status_failures_keep_the_code() {
        let error = map_failure(client::map_status_error(
            StatusCode::BAD_GATEWAY,
            b"bad gateway",
        ));
        assert_eq!(error, SessionSourceError::status(502_u16));
    }
}
