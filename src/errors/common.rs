//! GraphQL conversion for domain errors
//!
//! ```rust
//! use hackernews::errors::{LinkError, ToGraphQLError};
//!
//! let err = LinkError::NotFound(42).to_graphql_error();
//! assert_eq!(err.message, "Link with id '42' not found");
//! ```

use async_graphql::{Error as GraphQLError, ErrorExtensions};
use sea_orm::{DbErr, SqlErr};

use super::*;

/// Convert domain errors to GraphQL errors with error codes
pub trait ToGraphQLError {
    fn to_graphql_error(&self) -> GraphQLError;
}

impl ToGraphQLError for AuthError {
    fn to_graphql_error(&self) -> GraphQLError {
        let code = self.error_code();

        GraphQLError::new(self.to_string()).extend_with(|_, e| {
            e.set("code", code);

            match self {
                AuthError::NoUserForEmail(email)
                | AuthError::EmailTaken(email)
                | AuthError::InvalidEmail(email) => {
                    e.set("email", email.as_str());
                }
                AuthError::UserNotFound(id) => {
                    e.set("userId", *id);
                }
                _ => {}
            }
        })
    }
}

impl ToGraphQLError for LinkError {
    fn to_graphql_error(&self) -> GraphQLError {
        let code = self.error_code();

        GraphQLError::new(self.to_string()).extend_with(|_, e| {
            e.set("code", code);

            if let LinkError::NotFound(id) = self {
                e.set("linkId", *id);
            }
        })
    }
}

impl ToGraphQLError for VoteError {
    fn to_graphql_error(&self) -> GraphQLError {
        let code = self.error_code();

        GraphQLError::new(self.to_string()).extend_with(|_, e| {
            e.set("code", code);

            match self {
                VoteError::AlreadyVoted(link_id) | VoteError::LinkNotFound(link_id) => {
                    e.set("linkId", *link_id);
                }
                VoteError::Dangling(vote_id, _) => {
                    e.set("voteId", *vote_id);
                }
                VoteError::Database(_) => {}
            }
        })
    }
}

/// True when the database rejected a write because of a unique index.
///
/// Used to turn a lost check-then-insert race into the same error the
/// check would have produced.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
