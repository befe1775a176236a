//! Guarded pages: role dashboards and the shared profile page.
//!
//! ```text
//! GET /dashboard[/...]        student
//! GET /tutor-dashboard[/...]  tutor
//! GET /admin-dashboard[/...]  administrator
//! GET /profile                any recognised role
//! ```
//!
//! These handlers sit behind [`crate::middleware::RoleGuard`], which has
//! already redirected callers who may not see the path. Each page load
//! settles its own [`PageGate`] once and loads only the selected variant's
//! data.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, get, web};
use serde::Serialize;

use crate::domain::access::LOGIN_PATH;
use crate::domain::navigation::{self, NavSection};
use crate::domain::{DashboardPage, Error, Identity, PageGate, ViewState};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{IdentitySchema, NavSectionSchema};
use crate::inbound::http::session::ResolvedSession;
use crate::inbound::http::state::HttpState;

/// A composed dashboard page.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Requested path, so one payload can serve every sub-page.
    #[schema(example = "/dashboard/bookings")]
    pub path: String,
    /// Settled view.
    #[schema(value_type = String, example = "studentView")]
    pub view: ViewState,
    /// Sidebar sections for the caller's role.
    #[schema(value_type = Vec<NavSectionSchema>)]
    pub navigation: &'static [NavSection],
    /// Role-specific data tagged by `variant`.
    #[schema(value_type = Object)]
    pub dashboard: DashboardPage,
}

/// The profile page.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    /// The caller.
    #[schema(value_type = IdentitySchema)]
    pub identity: Identity,
    /// Sidebar sections for the caller's role.
    #[schema(value_type = Vec<NavSectionSchema>)]
    pub navigation: &'static [NavSection],
}

const DASHBOARD_PATTERNS: [&str; 6] = [
    "/dashboard",
    "/dashboard/{tail:.*}",
    "/tutor-dashboard",
    "/tutor-dashboard/{tail:.*}",
    "/admin-dashboard",
    "/admin-dashboard/{tail:.*}",
];

/// Register the page handlers. Wrap the enclosing scope in
/// [`crate::middleware::RoleGuard`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(DASHBOARD_PATTERNS).route(web::get().to(dashboard_page)))
        .service(profile_page);
}

fn to_login() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, LOGIN_PATH))
        .insert_header(private_no_cache_header())
        .finish()
}

/// Render the caller's dashboard.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Composed dashboard", body = DashboardResponse),
        (status = 303, description = "Redirect to login or the caller's own dashboard"),
        (status = 503, description = "Dashboard data unavailable", body = Error)
    ),
    tags = ["pages"],
    operation_id = "dashboardPage"
)]
pub async fn dashboard_page(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: ResolvedSession,
) -> ApiResult<HttpResponse> {
    let mut gate = PageGate::new();
    let view = gate
        .settle(&session.resolution)
        .map_err(|err| Error::internal(err.to_string()))?;
    if view == ViewState::Denied {
        return Ok(to_login());
    }

    let role = session.resolution.role();
    let Some(dashboard) = state.dashboards.load(role, &session.credentials).await? else {
        return Ok(to_login());
    };
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(DashboardResponse {
            path: req.match_info().as_str().to_owned(),
            view,
            navigation: navigation::sections_for(role),
            dashboard,
        }))
}

/// Render the caller's profile.
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Caller's identity", body = ProfileResponse),
        (status = 303, description = "Redirect to login")
    ),
    tags = ["pages"],
    operation_id = "profilePage"
)]
#[get("/profile")]
pub async fn profile_page(session: ResolvedSession) -> HttpResponse {
    let role = session.resolution.role();
    match session.resolution.identity() {
        Some(identity) => HttpResponse::Ok()
            .insert_header(private_no_cache_header())
            .json(ProfileResponse {
                identity: identity.clone(),
                navigation: navigation::sections_for(role),
            }),
        None => to_login(),
    }
}
