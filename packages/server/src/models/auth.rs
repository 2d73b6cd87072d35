use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Request body for user registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Unique username (1-32 chars, alphanumeric and underscores).
    #[schema(example = "kimchi_lover")]
    pub username: String,
    /// Unique email address.
    #[schema(example = "kimchi@example.com")]
    pub email: String,
    /// Password (8+ chars with a letter, a digit, and a special character).
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_register_request(payload: &RegisterRequest) -> Result<(), AppError> {
    let username = payload.username.trim();
    if username.is_empty() || username.chars().count() > 32 {
        return Err(AppError::FieldValidation {
            field: "username",
            message: "Username must be 1-32 characters".into(),
        });
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(AppError::FieldValidation {
            field: "username",
            message: "Username must contain only letters, digits, and underscores".into(),
        });
    }
    validate_email(&payload.email)?;
    validate_password_strength(&payload.password)?;
    Ok(())
}

fn validate_email(email: &str) -> Result<(), AppError> {
    let email = email.trim();
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    });
    if !valid || email.chars().count() > 254 {
        return Err(AppError::FieldValidation {
            field: "email",
            message: "Email address is not valid".into(),
        });
    }
    Ok(())
}

/// Password policy: at least 8 characters, one letter, one digit,
/// and one special character from `!@#$%^&*()`.
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    if password.len() < 8 {
        return Err(AppError::FieldValidation {
            field: "password",
            message: "Password must be at least 8 characters".into(),
        });
    }
    if password.len() > 128 {
        return Err(AppError::FieldValidation {
            field: "password",
            message: "Password must be at most 128 characters".into(),
        });
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::FieldValidation {
            field: "password",
            message: "Password must contain at least one letter".into(),
        });
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::FieldValidation {
            field: "password",
            message: "Password must contain at least one digit".into(),
        });
    }
    if !password.chars().any(|c| "!@#$%^&*()".contains(c)) {
        return Err(AppError::FieldValidation {
            field: "password",
            message: "Password must contain at least one special character (!@#$%^&*())".into(),
        });
    }
    Ok(())
}

/// Request body for user login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Username of the account to log into.
    #[schema(example = "kimchi_lover")]
    pub username: String,
    /// Account password.
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::FieldValidation {
            field: "username",
            message: "Username must not be empty".into(),
        });
    }
    if payload.password.is_empty() {
        return Err(AppError::FieldValidation {
            field: "password",
            message: "Password must not be empty".into(),
        });
    }
    Ok(())
}

/// Successful registration response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    /// ID of the newly created user.
    #[schema(example = 42)]
    pub id: i32,
    /// Username of the newly created user.
    #[schema(example = "kimchi_lover")]
    pub username: String,
    /// Email of the newly created user.
    #[schema(example = "kimchi@example.com")]
    pub email: String,
}

impl From<crate::entity::user::Model> for RegisterResponse {
    fn from(user: crate::entity::user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token valid for 7 days.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// Authenticated user's username.
    #[schema(example = "kimchi_lover")]
    pub username: String,
}

/// Current authenticated user's profile.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    /// User ID.
    #[schema(example = 42)]
    pub id: i32,
    /// Username.
    #[schema(example = "kimchi_lover")]
    pub username: String,
}
