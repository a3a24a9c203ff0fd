use async_graphql::*;

use crate::database::entities::votes;
use crate::errors::ToGraphQLError;
use crate::graphql::context::GraphQLContext;
use crate::graphql::types::{Link, User};

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Vote {
    pub id: ID,
    #[graphql(skip)]
    pub record: votes::Model,
}

impl From<votes::Model> for Vote {
    fn from(model: votes::Model) -> Self {
        Self {
            id: ID::from(model.id.to_string()),
            record: model,
        }
    }
}

#[ComplexObject]
impl Vote {
    async fn link(&self, ctx: &Context<'_>) -> Result<Link> {
        let context = ctx.data::<GraphQLContext>()?;
        let link = context
            .vote_service
            .link_of(&self.record)
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(Link::from(link))
    }

    async fn user(&self, ctx: &Context<'_>) -> Result<User> {
        let context = ctx.data::<GraphQLContext>()?;
        let user = context
            .vote_service
            .user_of(&self.record)
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(User::from(user))
    }
}
