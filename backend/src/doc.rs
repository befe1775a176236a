//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the gateway. It registers:
//!
//! - **Paths**: session, access, navigation, quote and booking endpoints,
//!   the guarded pages and the health probes
//! - **Schemas**: wrappers from [`crate::inbound::http::schemas`] that
//!   describe domain types without coupling them to utoipa
//! - **Security**: the forwarded marketplace session cookie
//!
//! Swagger UI serves the document at `/docs` in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::bookings::CreateBookingRequest;
use crate::inbound::http::pages::{DashboardResponse, ProfileResponse};
use crate::inbound::http::quotes::{QuoteRequest, QuoteResponse};
use crate::inbound::http::schemas::{
    AccessDecisionSchema, BookingConfirmationSchema, BookingSchema, BookingStatusSchema,
    IdentitySchema, NavItemSchema, NavSectionSchema, RedirectReasonSchema, RoleSchema,
    SessionResolutionSchema,
};
use crate::inbound::http::session::NavigationResponse;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "better-auth.session_token",
                "Marketplace session cookie, forwarded upstream unchanged.",
            ))),
        );
    }
}

/// OpenAPI document for the gateway.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Tutor portal gateway",
        description = "Role-aware session, pricing, booking and dashboard endpoints.",
        license(name = "ISC", url = "https://opensource.org/licenses/ISC")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::session::current_session,
        crate::inbound::http::session::check_access,
        crate::inbound::http::session::get_navigation,
        crate::inbound::http::quotes::quote_booking,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::pages::dashboard_page,
        crate::inbound::http::pages::profile_page,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        RoleSchema,
        IdentitySchema,
        SessionResolutionSchema,
        RedirectReasonSchema,
        AccessDecisionSchema,
        NavItemSchema,
        NavSectionSchema,
        NavigationResponse,
        QuoteRequest,
        QuoteResponse,
        CreateBookingRequest,
        BookingStatusSchema,
        BookingSchema,
        BookingConfirmationSchema,
        DashboardResponse,
        ProfileResponse,
    )),
    tags(
        (name = "session", description = "Who the caller is and where they may go"),
        (name = "bookings", description = "Pricing and booking submission"),
        (name = "pages", description = "Role-guarded dashboard and profile pages"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the registered paths and schema structure.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn registers_every_endpoint() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/session",
            "/api/v1/access",
            "/api/v1/navigation",
            "/api/v1/quote",
            "/api/v1/bookings",
            "/dashboard",
            "/profile",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn quote_schema_uses_wire_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let quote = schemas.get("QuoteRequest").expect("QuoteRequest schema");

        assert_object_schema_has_field(quote, "startTime");
        assert_object_schema_has_field(quote, "hourlyRate");
    }

    #[test]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
