use async_graphql::MergedObject;

pub mod auth;
pub mod link;
pub mod vote;

pub use auth::AuthMutation;
pub use link::LinkMutation;
pub use vote::VoteMutation;

#[derive(MergedObject, Default)]
pub struct Mutation(LinkMutation, AuthMutation, VoteMutation);
