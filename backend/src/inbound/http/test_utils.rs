//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::FixtureSessionSource;
use crate::domain::{Identity, Role, RoleClaim, UserId};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Clock pinned to 2026-03-01T09:00:00Z so booking dates are deterministic.
pub struct FixedClock;

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid fixed timestamp")
    }
}

/// An identity carrying the given role claim.
pub fn identity(role: impl Into<RoleClaim>) -> Identity {
    Identity::new(
        UserId::new("usr_test").expect("fixture id"),
        "Test User",
        "test@example.com",
        role,
    )
    .with_email_verified(true)
}

/// Build handler state from `ports` with the fixed clock.
pub fn state_from(ports: HttpStatePorts) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(ports, Arc::new(FixedClock)))
}

/// Fixture state whose session source reports `role`, or nobody.
pub fn state_with_session(role: Option<Role>) -> web::Data<HttpState> {
    let sessions = match role {
        Some(role) => FixtureSessionSource::authenticated(identity(role)),
        None => FixtureSessionSource::anonymous(),
    };
    state_from(HttpStatePorts {
        sessions: Arc::new(sessions),
        ..HttpStatePorts::fixture()
    })
}
