use async_graphql::*;

use crate::errors::ToGraphQLError;
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::parse_id;
use crate::graphql::types::{Feed, Link, LinkOrderByInput};
use crate::services::FeedQuery;

pub const API_INFO: &str = "This is the API of a Hackernews Clone";

pub struct Query;

#[Object]
impl Query {
    async fn info(&self) -> &'static str {
        API_INFO
    }

    /// Links whose description or url contains `filter`, paged by `skip`/`first`
    async fn feed(
        &self,
        ctx: &Context<'_>,
        filter: Option<String>,
        skip: Option<i32>,
        first: Option<i32>,
        order_by: Option<LinkOrderByInput>,
    ) -> Result<Feed> {
        let context = ctx.data::<GraphQLContext>()?;
        let page = context
            .link_service
            .feed(FeedQuery {
                filter,
                skip,
                first,
                order_by: order_by.map(Into::into),
            })
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(Feed::from(page))
    }

    async fn link(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Link>> {
        let context = ctx.data::<GraphQLContext>()?;
        let id = parse_id("link", &id)?;
        let link = context
            .link_service
            .find(id)
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(link.map(Link::from))
    }
}
