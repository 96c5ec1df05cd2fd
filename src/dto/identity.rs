//! Caller identity extracted from proxy-provided headers.
//!
//! The backend performs no authentication itself; a fronting proxy is
//! expected to set `x-user-id` and `x-user-role`. Absent headers mean an
//! anonymous single-tenant caller with no owner scoping applied.

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::AppError;

const USER_ID_HEADER: &str = "x-user-id";
const USER_ROLE_HEADER: &str = "x-user-role";

/// Role attached to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallerRole {
    /// Regular organizer, sees and manages only owned quizzes.
    #[default]
    Organizer,
    /// Elevated role with access to every quiz.
    Admin,
}

/// Identity of the caller issuing a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct Caller {
    /// Organizer id, `None` for anonymous single-tenant deployments.
    pub user_id: Option<Uuid>,
    /// Caller role, defaults to organizer.
    pub role: CallerRole,
}

impl Caller {
    /// Whether the caller holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == CallerRole::Admin
    }

    /// Whether the caller may access a quiz owned by `owner_id`.
    ///
    /// Unowned quizzes and anonymous callers bypass scoping entirely.
    pub fn can_access(&self, owner_id: Option<Uuid>) -> bool {
        match (owner_id, self.user_id) {
            (Some(owner), Some(user)) => self.is_admin() || owner == user,
            _ => true,
        }
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = match parts.headers.get(USER_ID_HEADER) {
            Some(value) => {
                let raw = value.to_str().map_err(|_| {
                    AppError::BadRequest(format!("invalid {USER_ID_HEADER} header"))
                })?;
                let id = Uuid::parse_str(raw).map_err(|_| {
                    AppError::BadRequest(format!("invalid {USER_ID_HEADER} header"))
                })?;
                Some(id)
            }
            None => None,
        };

        let role = match parts.headers.get(USER_ROLE_HEADER) {
            Some(value) if value.to_str().is_ok_and(|v| v.eq_ignore_ascii_case("admin")) => {
                CallerRole::Admin
            }
            _ => CallerRole::Organizer,
        };

        Ok(Caller { user_id, role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_caller_accesses_everything() {
        let caller = Caller::default();
        assert!(caller.can_access(None));
        assert!(caller.can_access(Some(Uuid::new_v4())));
    }

    #[test]
    fn organizer_scoped_to_own_quizzes() {
        let user = Uuid::new_v4();
        let caller = Caller {
            user_id: Some(user),
            role: CallerRole::Organizer,
        };
        assert!(caller.can_access(Some(user)));
        assert!(!caller.can_access(Some(Uuid::new_v4())));
        // Unowned quizzes stay reachable.
        assert!(caller.can_access(None));
    }

    #[test]
    fn admin_bypasses_scoping() {
        let caller = Caller {
            user_id: Some(Uuid::new_v4()),
            role: CallerRole::Admin,
        };
        assert!(caller.can_access(Some(Uuid::new_v4())));
    }
}
