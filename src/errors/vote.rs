use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoteError {
    /// The user already has a vote on this link
    #[error("Already voted for link: {0}")]
    AlreadyVoted(i32),

    #[error("Link with id '{0}' not found")]
    LinkNotFound(i32),

    /// Vote row points at a link or user that no longer exists
    #[error("Vote {0} references a missing {1}")]
    Dangling(i32, &'static str),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl VoteError {
    pub fn error_code(&self) -> &'static str {
        match self {
            VoteError::AlreadyVoted(_) => "ALREADY_VOTED",
            VoteError::LinkNotFound(_) | VoteError::Dangling(..) => "NOT_FOUND",
            VoteError::Database(_) => "DATABASE_ERROR",
        }
    }
}
