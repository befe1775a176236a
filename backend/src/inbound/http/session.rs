//! Session extraction and the session, access and navigation endpoints.
//!
//! ```text
//! GET /api/v1/session
//! GET /api/v1/access?path=/admin-dashboard/users
//! GET /api/v1/navigation
//! ```
//!
//! Handlers never read cookies themselves. [`SessionCredentials`] is
//! extracted from the `Cookie` header and [`ResolvedSession`] reuses a
//! resolution already made by the role guard, resolving on demand
//! otherwise.

use actix_web::http::header::{self, HeaderMap};
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, dev::Payload, get, web};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde::{Deserialize, Serialize};

use crate::domain::navigation::{self, NavSection};
use crate::domain::{Error, Role, SessionCredentials, SessionResolution, access};
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{
    AccessDecisionSchema, NavSectionSchema, RoleSchema, SessionResolutionSchema,
};
use crate::inbound::http::state::HttpState;

/// Gather every `Cookie` header into one forwardable credential.
pub(crate) fn forwarded_credentials(headers: &HeaderMap) -> SessionCredentials {
    let cookies = headers
        .get_all(header::COOKIE)
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>();
    if cookies.is_empty() {
        SessionCredentials::none()
    } else {
        SessionCredentials::from_cookie_header(cookies.join("; "))
    }
}

impl FromRequest for SessionCredentials {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(forwarded_credentials(req.headers())))
    }
}

/// The caller's forwarded credentials together with their resolution.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    /// Cookies to forward on further upstream calls.
    pub credentials: SessionCredentials,
    /// Who the caller is.
    pub resolution: SessionResolution,
}

impl FromRequest for ResolvedSession {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let credentials = forwarded_credentials(req.headers());
        let cached = req.extensions().get::<SessionResolution>().cloned();
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let resolution = match cached {
                Some(resolution) => resolution,
                None => {
                    let state =
                        state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
                    state.sessions.resolve(&credentials).await
                }
            };
            Ok(Self {
                credentials,
                resolution,
            })
        })
    }
}

/// Query string for `GET /api/v1/access`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct AccessQuery {
    /// Path to evaluate, e.g. `/admin-dashboard/users`.
    pub path: String,
}

/// Sidebar navigation for the caller.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct NavigationResponse {
    /// Recognised role, absent for anonymous or unrecognised callers.
    #[schema(value_type = Option<RoleSchema>)]
    pub role: Option<Role>,
    /// Sections in display order.
    #[schema(value_type = Vec<NavSectionSchema>)]
    pub sections: &'static [NavSection],
}

/// Report who the caller is.
///
/// Any upstream failure reports the caller as anonymous.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Resolved session", body = SessionResolutionSchema)
    ),
    tags = ["session"],
    operation_id = "getSession"
)]
#[get("/session")]
pub async fn current_session(session: ResolvedSession) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(&session.resolution)
}

/// Evaluate whether the caller may view `path`.
#[utoipa::path(
    get,
    path = "/api/v1/access",
    params(AccessQuery),
    responses(
        (status = 200, description = "Access decision", body = AccessDecisionSchema),
        (status = 400, description = "Missing path", body = Error)
    ),
    tags = ["session"],
    operation_id = "checkAccess"
)]
#[get("/access")]
pub async fn check_access(
    session: ResolvedSession,
    query: web::Query<AccessQuery>,
) -> HttpResponse {
    let decision = access::route(&session.resolution, &query.path);
    HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(decision)
}

/// Sidebar sections for the caller's role.
#[utoipa::path(
    get,
    path = "/api/v1/navigation",
    responses(
        (status = 200, description = "Navigation sections", body = NavigationResponse)
    ),
    tags = ["session"],
    operation_id = "getNavigation"
)]
#[get("/navigation")]
pub async fn get_navigation(session: ResolvedSession) -> HttpResponse {
    let role = session.resolution.role();
    HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(NavigationResponse {
            role,
            sections: navigation::sections_for(role),
        })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for session extraction and the session endpoints.

    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::FixtureSessionSource;
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{identity, state_with_session};

    #[rstest]
    #[::core::prelude::v1::test]
    fn joins_multiple_cookie_headers() {
        let req = test::TestRequest::default()
            .append_header((header::COOKIE, "a=1"))
            .append_header((header::COOKIE, "b=2"))
            .to_http_request();
        let creds = forwarded_credentials(req.headers());
        assert_eq!(creds.cookie_header(), Some("a=1; b=2"));
    }

    #[rstest]
    #[::core::prelude::v1::test]
    fn missing_cookie_header_is_empty() {
        let req = test::TestRequest::default().to_http_request();
        assert!(forwarded_credentials(req.headers()).is_empty());
    }

    #[actix_web::test]
    async fn anonymous_session_reports_unauthenticated() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::from(HttpStatePorts::fixture())))
                .service(web::scope("/api/v1").service(current_session)),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/session").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, serde_json::json!({ "authenticated": false }));
    }

    #[actix_web::test]
    async fn authenticated_session_exposes_identity() {
        let app = test::init_service(
            App::new()
                .app_data(state_with_session(Some(Role::Tutor)))
                .service(web::scope("/api/v1").service(current_session)),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/v1/session")
            .insert_header((header::COOKIE, "session=abc"))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["authenticated"], true);
        assert_eq!(body["identity"]["role"], "TUTOR");
    }

    #[rstest]
    #[case::student_to_admin(Some(Role::Student), "/admin-dashboard/users", "redirect", Some("/dashboard"))]
    #[case::tutor_profile(Some(Role::Tutor), "/profile", "allow", None)]
    #[case::anonymous_dashboard(None, "/dashboard", "redirect", Some("/login"))]
    #[case::public_path(None, "/tutors", "allow", None)]
    #[actix_rt::test]
    async fn access_endpoint_reports_decision(
        #[case] role: Option<Role>,
        #[case] path: &str,
        #[case] decision: &str,
        #[case] location: Option<&str>,
    ) {
        let app = test::init_service(
            App::new()
                .app_data(state_with_session(role))
                .service(web::scope("/api/v1").service(check_access)),
        )
        .await;
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/access?path={path}"))
            .insert_header((header::COOKIE, "session=abc"))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["decision"], decision);
        assert_eq!(body["location"].as_str(), location);
    }

    #[actix_web::test]
    async fn access_without_path_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::from(HttpStatePorts::fixture())))
                .service(web::scope("/api/v1").service(check_access)),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/access").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn navigation_is_empty_for_unrecognised_role() {
        let ports = HttpStatePorts {
            sessions: Arc::new(FixtureSessionSource::authenticated(identity("MODERATOR"))),
            ..HttpStatePorts::fixture()
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::from(ports)))
                .service(web::scope("/api/v1").service(get_navigation)),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/v1/navigation")
            .insert_header((header::COOKIE, "session=abc"))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["role"], Value::Null);
        assert_eq!(body["sections"], serde_json::json!([]));
    }

    #[actix_web::test]
    async fn navigation_lists_student_sections() {
        let app = test::init_service(
            App::new()
                .app_data(state_with_session(Some(Role::Student)))
                .service(web::scope("/api/v1").service(get_navigation)),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/v1/navigation")
            .insert_header((header::COOKIE, "session=abc"))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["role"], "STUDENT");
        assert_eq!(body["sections"][0]["items"][0]["url"], "/dashboard");
    }
}
