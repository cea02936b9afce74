use crate::{
    role::{role_satisfies, Role},
    session::Session,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    Unauthenticated,
    InsufficientRole { required: Role, actual: Role },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Session hydration has not finished; render a placeholder.
    Checking,
    Denied(DenyReason),
    Allowed,
}

/// Client-side route guard decision.
#[must_use]
pub fn evaluate(is_loading: bool, session: Option<&Session>, required: Option<Role>) -> GuardState {
    if is_loading {
        return GuardState::Checking;
    }
    let Some(session) = session else {
        return GuardState::Denied(DenyReason::Unauthenticated);
    };
    match required {
        Some(required) if !role_satisfies(required, session.role()) => {
            GuardState::Denied(DenyReason::InsufficientRole {
                required,
                actual: session.role(),
            })
        }
        _ => GuardState::Allowed,
    }
}

/// Ensures a denial triggers at most one redirect. Re-arms only after the
/// guard has been allowed again.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RedirectLatch {
    fired: bool,
}

impl RedirectLatch {
    #[must_use]
    pub const fn new() -> Self {
        Self { fired: false }
    }

    /// Feed the current guard state; returns `true` exactly when a redirect
    /// should be issued now.
    pub fn observe(&mut self, state: GuardState) -> bool {
        match state {
            GuardState::Denied(DenyReason::Unauthenticated) => {
                if self.fired {
                    false
                } else {
                    self.fired = true;
                    true
                }
            }
            GuardState::Allowed => {
                self.fired = false;
                false
            }
            GuardState::Checking | GuardState::Denied(DenyReason::InsufficientRole { .. }) => false,
        }
    }

    #[must_use]
    pub const fn has_fired(&self) -> bool {
        self.fired
    }
}
