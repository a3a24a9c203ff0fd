pub mod auth_service;
pub mod link_service;
pub mod user_service;
pub mod vote_service;

pub use auth_service::*;
pub use link_service::*;
pub use user_service::*;
pub use vote_service::*;
