use async_graphql::*;

use crate::errors::ToGraphQLError;
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::parse_id;
use crate::graphql::types::Link;

#[derive(Default)]
pub struct LinkMutation;

#[Object]
impl LinkMutation {
    /// Post a new link as the authenticated user
    async fn post(&self, ctx: &Context<'_>, url: String, description: String) -> Result<Link> {
        post_link(ctx, &url, &description).await
    }

    /// Same as `post`
    async fn create_link(
        &self,
        ctx: &Context<'_>,
        url: String,
        description: String,
    ) -> Result<Link> {
        post_link(ctx, &url, &description).await
    }

    async fn update_link(
        &self,
        ctx: &Context<'_>,
        id: ID,
        url: Option<String>,
        description: Option<String>,
    ) -> Result<Option<Link>> {
        let context = ctx.data::<GraphQLContext>()?;
        let id = parse_id("link", &id)?;

        let link = context
            .link_service
            .update(id, url.as_deref(), description.as_deref())
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(Some(Link::from(link)))
    }

    async fn delete_link(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Link>> {
        let context = ctx.data::<GraphQLContext>()?;
        let id = parse_id("link", &id)?;

        let link = context
            .link_service
            .delete(id)
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(Some(Link::from(link)))
    }
}

async fn post_link(ctx: &Context<'_>, url: &str, description: &str) -> Result<Link> {
    let context = ctx.data::<GraphQLContext>()?;
    let user_id = context.current_user_id(ctx).await?;

    let link = context
        .link_service
        .create(user_id, url, description)
        .await
        .map_err(|e| e.to_graphql_error())?;

    context.events.publish_new_link(link.clone()).await;

    Ok(Link::from(link))
}
