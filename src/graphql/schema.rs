use async_graphql::*;

use crate::graphql::context::GraphQLContext;
use crate::graphql::mutations::Mutation;
use crate::graphql::queries::Query;
use crate::graphql::subscriptions::Subscription;

pub type HackernewsSchema = Schema<Query, Mutation, Subscription>;

pub fn build_schema(context: GraphQLContext) -> HackernewsSchema {
    Schema::build(Query, Mutation::default(), Subscription)
        .data(context)
        .finish()
}
