//! Per-page-load view selection.
//!
//! A page starts [`ViewState::Unresolved`] and moves exactly once to one of
//! the role views or to [`ViewState::Denied`]. Every settled state is
//! terminal.
//!
//! Cancellation is the page load's future being dropped. actix drops a
//! handler future when the client goes away, and a settle that never ran
//! leaves nothing behind, so a late session result never reaches a view.

use std::fmt;

use serde::Serialize;

use super::{Role, SessionResolution};

/// What a page load is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewState {
    /// Waiting for the session to resolve.
    Unresolved,
    /// Student dashboard.
    StudentView,
    /// Tutor dashboard.
    TutorView,
    /// Administrator dashboard.
    AdminView,
    /// No session, or a role without a dashboard.
    Denied,
}

impl ViewState {
    /// Whether the state can no longer change.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Unresolved)
    }

    fn for_role(role: Option<Role>) -> Self {
        match role {
            Some(Role::Student) => Self::StudentView,
            Some(Role::Tutor) => Self::TutorView,
            Some(Role::Admin) => Self::AdminView,
            None => Self::Denied,
        }
    }
}

/// Raised when a page load tries to settle twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadySettled {
    /// The state the page already settled on.
    pub state: ViewState,
}

impl fmt::Display for AlreadySettled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page view already settled as {:?}", self.state)
    }
}

impl std::error::Error for AlreadySettled {}

/// The view state machine for one page load.
///
/// # Examples
/// ```
/// use portal::domain::page_gate::{PageGate, ViewState};
/// use portal::domain::SessionResolution;
///
/// let mut gate = PageGate::new();
/// assert_eq!(gate.settle(&SessionResolution::Anonymous), Ok(ViewState::Denied));
/// assert!(gate.settle(&SessionResolution::Anonymous).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGate {
    state: ViewState,
}

impl Default for PageGate {
    fn default() -> Self {
        Self::new()
    }
}

impl PageGate {
    /// A gate for a fresh page load.
    pub fn new() -> Self {
        Self {
            state: ViewState::Unresolved,
        }
    }

    /// Current state.
    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Move out of `Unresolved` based on the resolved session.
    pub fn settle(&mut self, resolution: &SessionResolution) -> Result<ViewState, AlreadySettled> {
        if self.state.is_terminal() {
            return Err(AlreadySettled { state: self.state });
        }
        self.state = ViewState::for_role(resolution.role());
        Ok(self.state)
    }
}
