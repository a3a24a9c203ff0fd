use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Link with id '{0}' not found")]
    NotFound(i32),

    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    #[error("Invalid link: {0}")]
    Invalid(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl LinkError {
    pub fn error_code(&self) -> &'static str {
        match self {
            LinkError::NotFound(_) => "NOT_FOUND",
            LinkError::InvalidPagination(_) | LinkError::Invalid(_) => "VALIDATION_FAILED",
            LinkError::Database(_) => "DATABASE_ERROR",
        }
    }
}
