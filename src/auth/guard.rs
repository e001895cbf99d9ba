use uuid::Uuid;

use crate::error::ApiError;

/// Ownership check applied inline by every mutating handler on an owned
/// resource. Callers must 404 a missing resource before reaching this, so a
/// denial never leaks whether the resource exists.
pub fn ensure_owner(owner_id: Uuid, caller_id: Uuid) -> Result<(), ApiError> {
    if owner_id == caller_id {
        Ok(())
    } else {
        Err(ApiError::NotAuthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_is_allowed() {
        let id = Uuid::new_v4();
        assert!(ensure_owner(id, id).is_ok());
    }

    #[test]
    fn non_owner_is_denied() {
        let err = ensure_owner(Uuid::new_v4(), Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ApiError::NotAuthorized));
    }
}
