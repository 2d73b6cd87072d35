use crate::error::AppError;
use crate::extractors::auth::AuthUser;

/// The one ownership rule: only the author of a resource may mutate it.
pub fn can_mutate(user: &AuthUser, author_id: i32) -> bool {
    user.user_id == author_id
}

/// Returns `Ok(())` if the caller authored the resource, `Err(PermissionDenied)` otherwise.
pub fn require_author(user: &AuthUser, author_id: i32) -> Result<(), AppError> {
    if can_mutate(user, author_id) {
        Ok(())
    } else {
        Err(AppError::PermissionDenied)
    }
}
