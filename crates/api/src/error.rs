// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Every failure crossing the API boundary carries a short
//! human-readable message plus a machine-distinguishable kind. Domain,
//! engine, and persistence errors are translated explicitly so internal
//! error types never leak, and so "user typo" (`InvalidInput`) stays
//! distinguishable from "bad historical data" (`DataIntegrity`).

use kerbside::CoreError;
use kerbside_domain::DomainError;
use kerbside_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/engine errors and represent the API
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided. Rejected before any state change.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A normal, expected conflict: undo with an empty ledger, resolving
    /// an already-resolved issue.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// Stored data failed an integrity check (e.g., the recurrence scan
    /// cap). Distinct from `InvalidInput` so operators can tell a user
    /// typo from corrupt history.
    DataIntegrity {
        /// A description of the integrity failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::DataIntegrity { message } => {
                write!(f, "Data integrity error: {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::EmptyPostcode => ApiError::InvalidInput {
            field: String::from("postcode"),
            message: String::from("Postcode must not be empty"),
        },
        DomainError::InvalidFrequency { days } => ApiError::InvalidInput {
            field: String::from("frequency"),
            message: format!("Invalid frequency: {days} days. Must be 7, 14, or 21"),
        },
        DomainError::InvalidFrequencyLabel(label) => ApiError::InvalidInput {
            field: String::from("frequency"),
            message: format!(
                "Invalid frequency '{label}'. Must be 'weekly', 'fortnightly', or 'three_weekly'"
            ),
        },
        DomainError::InvalidSlot(label) => ApiError::InvalidInput {
            field: String::from("route_slot"),
            message: format!("Invalid slot '{label}'. Must be 'AM', 'PM', or 'ANY'"),
        },
        DomainError::InvalidWeekday(name) => ApiError::InvalidInput {
            field: String::from("route_day"),
            message: format!("Invalid weekday '{name}'. Must be a full English day name"),
        },
        DomainError::InvalidStatus(label) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid subscription status '{label}'"),
        },
        DomainError::InvalidExtraBags { count } => ApiError::InvalidInput {
            field: String::from("extra_bags"),
            message: format!("Invalid extra bag count: {count}. Must be between 0 and 10"),
        },
        DomainError::InvalidPauseWindow { from, to } => ApiError::InvalidInput {
            field: String::from("pause_from"),
            message: format!("Invalid pause window: {from} is after {to}"),
        },
        DomainError::RouteDayMismatch {
            area,
            configured,
            requested,
        } => ApiError::InvalidInput {
            field: String::from("route_day"),
            message: format!(
                "Route day {requested} does not match area '{area}' which runs on {configured}"
            ),
        },
        DomainError::UnknownRouteArea(area) => ApiError::InvalidInput {
            field: String::from("route_area"),
            message: format!("Route area '{area}' does not exist in the catalogue"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
        DomainError::RecurrenceOverflow { .. } => ApiError::DataIntegrity {
            message: err.to_string(),
        },
    }
}

/// Translates an engine error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NoCollectionToUndo { .. } | CoreError::LifecycleViolation { .. } => {
            ApiError::Conflict {
                message: err.to_string(),
            }
        }
        CoreError::EmptyResolutionAction => ApiError::InvalidInput {
            field: String::from("action"),
            message: String::from("Issue resolution requires a non-empty action note"),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::UniqueViolation(message) => ApiError::Conflict { message },
        PersistenceError::ReconstructionError(message) => ApiError::DataIntegrity { message },
        _ => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
