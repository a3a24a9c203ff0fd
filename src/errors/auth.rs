//! Authentication error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Login with an email nobody signed up with
    #[error("No user found for email {0}")]
    NoUserForEmail(String),

    #[error("Invalid password")]
    InvalidPassword,

    /// Resolver needs a user but the request carried no token
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid authentication token")]
    InvalidToken,

    #[error("Authentication token has expired")]
    TokenExpired,

    /// Token is valid but its user no longer exists
    #[error("User with id '{0}' not found")]
    UserNotFound(i32),

    #[error("User with email {0} already exists")]
    EmailTaken(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl AuthError {
    /// Errors the caller can fix by authenticating again
    pub fn is_authentication_error(&self) -> bool {
        matches!(
            self,
            AuthError::NotAuthenticated | AuthError::InvalidToken | AuthError::TokenExpired
        )
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidEmail(_) | AuthError::InvalidName(_) | AuthError::WeakPassword(_)
        )
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::NoUserForEmail(_) => "USER_NOT_FOUND",
            AuthError::InvalidPassword => "INVALID_PASSWORD",
            AuthError::NotAuthenticated => "UNAUTHENTICATED",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::UserNotFound(_) => "USER_NOT_FOUND",
            AuthError::EmailTaken(_) => "CONFLICT",
            AuthError::InvalidEmail(_)
            | AuthError::InvalidName(_)
            | AuthError::WeakPassword(_) => "VALIDATION_FAILED",
            AuthError::Hashing(_) | AuthError::Signing(_) => "INTERNAL_ERROR",
            AuthError::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}
