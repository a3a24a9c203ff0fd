use async_graphql::*;

use crate::database::entities::users;
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::StructuredError;
use crate::graphql::types::{Link, Vote};

/// A registered user. The password hash is never exposed.
#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub email: String,
    #[graphql(skip)]
    pub user_id: i32,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: ID::from(model.id.to_string()),
            name: model.name,
            email: model.email,
            user_id: model.id,
        }
    }
}

#[ComplexObject]
impl User {
    async fn links(&self, ctx: &Context<'_>) -> Result<Vec<Link>> {
        let context = ctx.data::<GraphQLContext>()?;
        let links = context
            .user_service
            .links_posted_by(self.user_id)
            .await
            .map_err(|e| StructuredError::database("links::Entity::find (posted_by_id)", e))?;

        Ok(links.into_iter().map(Link::from).collect())
    }

    async fn votes(&self, ctx: &Context<'_>) -> Result<Vec<Vote>> {
        let context = ctx.data::<GraphQLContext>()?;
        let votes = context
            .user_service
            .votes_by(self.user_id)
            .await
            .map_err(|e| StructuredError::database("votes::Entity::find (user_id)", e))?;

        Ok(votes.into_iter().map(Vote::from).collect())
    }
}
