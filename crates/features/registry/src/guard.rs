//! Pure guard predicates over declarative action metadata.
//!
//! Each guard takes already-resolved catalogue rows and answers yes/no, so
//! adding an object or action never touches the router. Status values are
//! compared verbatim; only codes get normalized, statuses do not.

use crate::error::RegistryError;
use ohub_domain::registry::{Action, DomainObject};

/// Rejects actions switched off for agent callers.
///
/// Role-agnostic on purpose; the router applies it only when the effective
/// role is the agent role.
pub fn ensure_enabled_for_agents(
    object: &DomainObject,
    action: &Action,
) -> Result<(), RegistryError> {
    if action.enabled_for_agents {
        Ok(())
    } else {
        Err(RegistryError::ActionForbiddenForAgent {
            object_code: object.code.clone(),
            action_code: action.code.clone(),
        })
    }
}

/// Rejects callers whose role does not match the action's `requiredRole`.
///
/// The system role satisfies any required role. This is a deliberate trusted
/// internal-caller escape hatch carried over unchanged; review it before
/// wiring untrusted transports to the router.
pub fn ensure_role_allowed(
    action: &Action,
    role: &str,
    system_role: &str,
) -> Result<(), RegistryError> {
    match action.required_role.as_deref() {
        Some(required) if role != required && role != system_role => {
            Err(RegistryError::ActionForbidden {
                action_code: action.code.clone(),
                required_role: required.to_owned(),
                role: role.to_owned(),
            })
        },
        _ => Ok(()),
    }
}

/// Applies the status machine: `allowedFromStatuses` + `allowWhenNoStatus`.
///
/// An empty allowed set means unrestricted, any status or none. A restricted
/// action with no current status passes only when `allowWhenNoStatus` is set.
pub fn ensure_status_allowed(
    object: &DomainObject,
    action: &Action,
    current_status: Option<&str>,
) -> Result<(), RegistryError> {
    match current_status {
        None => {
            if action.allow_when_no_status || !action.is_status_restricted() {
                Ok(())
            } else {
                Err(RegistryError::ActionStatusRequired {
                    object_code: object.code.clone(),
                    action_code: action.code.clone(),
                    allowed_from_statuses: action.allowed_from_statuses.clone(),
                })
            }
        },
        Some(status) => {
            if action.is_status_restricted() && !action.allows_status(status) {
                Err(RegistryError::ActionInvalidStatus {
                    object_code: object.code.clone(),
                    action_code: action.code.clone(),
                    current_status: status.to_owned(),
                    allowed_from_statuses: action.allowed_from_statuses.clone(),
                })
            } else {
                Ok(())
            }
        },
    }
}
