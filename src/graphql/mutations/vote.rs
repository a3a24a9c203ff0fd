use async_graphql::*;

use crate::errors::ToGraphQLError;
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::parse_id;
use crate::graphql::types::Vote;

#[derive(Default)]
pub struct VoteMutation;

#[Object]
impl VoteMutation {
    /// Upvote a link. Each user can vote for a link once.
    async fn vote(&self, ctx: &Context<'_>, link_id: ID) -> Result<Option<Vote>> {
        let context = ctx.data::<GraphQLContext>()?;
        let user_id = context.current_user_id(ctx).await?;
        let link_id = parse_id("link", &link_id)?;

        let vote = context
            .vote_service
            .vote(user_id, link_id)
            .await
            .map_err(|e| e.to_graphql_error())?;

        context.events.publish_new_vote(vote.clone()).await;

        Ok(Some(Vote::from(vote)))
    }
}
