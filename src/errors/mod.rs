//! Domain-specific error types
//!
//! Each area of the API owns one error enum:
//!
//! - **AuthError**: signup, login and token handling
//! - **LinkError**: link lookups and edits
//! - **VoteError**: voting, including duplicate-vote rejection
//!
//! Every enum exposes a stable `error_code()` which ends up in the
//! `extensions.code` field of GraphQL errors via [`ToGraphQLError`].
//!
//! ```rust
//! use hackernews::errors::VoteError;
//!
//! let err = VoteError::AlreadyVoted(7);
//! assert_eq!(err.to_string(), "Already voted for link: 7");
//! assert_eq!(err.error_code(), "ALREADY_VOTED");
//! ```

pub mod auth;
pub mod common;
pub mod link;
pub mod vote;

pub use auth::AuthError;
pub use common::{is_unique_violation, ToGraphQLError};
pub use link::LinkError;
pub use vote::VoteError;

pub type AuthResult<T> = Result<T, AuthError>;

pub type LinkResult<T> = Result<T, LinkError>;

pub type VoteResult<T> = Result<T, VoteError>;
