//! Role guard for dashboard pages.
//!
//! Resolves the caller's session once per request, asks
//! [`access::route`] whether the path may be served, and either forwards the
//! request with the resolution stored in its extensions or answers with
//! `303 See Other`. Decisions use the percent-decoded path that actix routes
//! on, so an encoded spelling of a guarded prefix is still guarded. Handlers
//! behind the guard read the stored resolution via
//! [`crate::inbound::http::session::ResolvedSession`] instead of resolving
//! again.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header;
use actix_web::{Error, HttpMessage, HttpResponse, web};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::{AccessDecision, access};
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::session::forwarded_credentials;
use crate::inbound::http::state::HttpState;

/// Middleware enforcing role-based access on guarded page paths.
///
/// Requires [`HttpState`] to be registered as app data.
///
/// # Examples
/// ```
/// use actix_web::web;
/// use portal::middleware::RoleGuard;
///
/// let pages = web::scope("").wrap(RoleGuard);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleGuard;

impl<S, B> Transform<S, ServiceRequest> for RoleGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RoleGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleGuardMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Service wrapper produced by [`RoleGuard`].
pub struct RoleGuardMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RoleGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<HttpState>>().cloned() else {
                return Err(Error::from(crate::domain::Error::internal(
                    "HTTP state is not configured",
                )));
            };
            let credentials = forwarded_credentials(req.headers());
            let resolution = state.sessions.resolve(&credentials).await;

            let path = req.match_info().as_str().to_owned();
            match access::route(&resolution, &path) {
                AccessDecision::Allow => {
                    req.extensions_mut().insert(resolution);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                AccessDecision::Redirect { location, reason } => {
                    debug!(path = %path, location, ?reason, "guarded page redirected");
                    let response = HttpResponse::SeeOther()
                        .insert_header((header::LOCATION, location))
                        .insert_header(private_no_cache_header())
                        .finish();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}
