// src/session.rs

use crate::error::AppError;

/// The caller of a core operation: an authenticated user id, or nobody.
///
/// Resolved once per request by `utils::jwt::session_middleware` and passed
/// explicitly into every service function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<i64>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn authenticated(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// Returns the logged-in user id or fails with `AuthError`.
    pub fn require_user(&self) -> Result<i64, AppError> {
        self.user_id.ok_or_else(AppError::unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_session_is_rejected() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert!(matches!(session.require_user(), Err(AppError::AuthError(_))));
    }

    #[test]
    fn authenticated_session_yields_user_id() {
        let session = Session::authenticated(7);
        assert_eq!(session.user_id(), Some(7));
        assert_eq!(session.require_user().ok(), Some(7));
    }
}
