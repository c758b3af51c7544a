// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The authorization seam for ops-only operations.
//!
//! Authentication itself is an external collaborator: a real deployment
//! resolves a caller to a staff identity before any guarded operation is
//! invoked. This module carries only the role model and a stub resolver
//! so the guard points exist and are testable; it deliberately has no
//! credential or session machinery.

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Roles apply to staff operating the system, never to customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Ops role: office staff with dispatch and corrective authority.
    ///
    /// Ops may open and assign daily runs, run bulk reassignment,
    /// override next collection dates, manage pause windows and
    /// cancellations, resolve issues, and manage the route catalogue.
    Ops,
    /// Driver role: crew members out on a run.
    ///
    /// Drivers may mark stops collected, undo a mis-tap, and raise
    /// issues against stops on their run.
    Driver,
}

impl Role {
    /// Returns the wire label for this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ops => "ops",
            Self::Driver => "driver",
        }
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }
}

/// Stub authentication function.
///
/// A real deployment replaces this with the platform's identity
/// provider; the engine only requires that some upstream layer produces
/// an [`AuthenticatedActor`] before a guarded operation runs.
///
/// # Arguments
///
/// * `actor_id` - The identifier of the actor to authenticate
/// * `role` - The role to assign to the actor
///
/// # Errors
///
/// Returns an error if the actor ID is empty.
pub fn authenticate_stub(actor_id: String, role: Role) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role))
}

/// Authorization checks for guarded operations.
///
/// Authorization is enforced before a command executes, never after.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Authorizes an ops-only action.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the actor is not ops.
    pub fn authorize_ops_action(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        if actor.role == Role::Ops {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: action.to_string(),
            required_role: String::from("ops"),
        })
    }

    /// Authorizes an action available to any staff member (driver or
    /// ops).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the actor holds no staff
    /// role. Kept explicit so every guarded operation has a named check,
    /// even where all current roles pass.
    pub fn authorize_staff_action(
        actor: &AuthenticatedActor,
        _action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Ops | Role::Driver => Ok(()),
        }
    }
}
