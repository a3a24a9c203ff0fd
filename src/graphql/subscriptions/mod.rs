use async_graphql::*;
use futures_util::{Stream, StreamExt};
use std::pin::Pin;

use crate::graphql::context::GraphQLContext;
use crate::graphql::types::{Link, Vote};

pub struct Subscription;

#[Subscription]
impl Subscription {
    /// Every link posted after the subscription started
    async fn new_link(&self, ctx: &Context<'_>) -> Result<Pin<Box<dyn Stream<Item = Link> + Send>>> {
        let context = ctx.data::<GraphQLContext>()?;
        let stream = context.events.new_links().await.map(Link::from);

        Ok(Box::pin(stream))
    }

    /// Every vote cast after the subscription started
    async fn new_vote(&self, ctx: &Context<'_>) -> Result<Pin<Box<dyn Stream<Item = Vote> + Send>>> {
        let context = ctx.data::<GraphQLContext>()?;
        let stream = context.events.new_votes().await.map(Vote::from);

        Ok(Box::pin(stream))
    }
}
