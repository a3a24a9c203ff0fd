pub mod auth_payload;
pub mod feed;
pub mod link;
pub mod order;
pub mod user;
pub mod vote;

pub use auth_payload::AuthPayload;
pub use feed::Feed;
pub use link::Link;
pub use order::LinkOrderByInput;
pub use user::User;
pub use vote::Vote;
