use async_graphql::*;
use chrono::{DateTime, Utc};

use crate::database::entities::links;
use crate::errors::ToGraphQLError;
use crate::graphql::context::GraphQLContext;
use crate::graphql::types::{User, Vote};

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Link {
    pub id: ID,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub url: String,
    #[graphql(skip)]
    pub record: links::Model,
}

impl From<links::Model> for Link {
    fn from(model: links::Model) -> Self {
        Self {
            id: ID::from(model.id.to_string()),
            created_at: model.created_at,
            description: model.description.clone(),
            url: model.url.clone(),
            record: model,
        }
    }
}

#[ComplexObject]
impl Link {
    async fn posted_by(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let context = ctx.data::<GraphQLContext>()?;
        let user = context
            .link_service
            .posted_by(&self.record)
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(user.map(User::from))
    }

    async fn votes(&self, ctx: &Context<'_>) -> Result<Vec<Vote>> {
        let context = ctx.data::<GraphQLContext>()?;
        let votes = context
            .link_service
            .votes_for(self.record.id)
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(votes.into_iter().map(Vote::from).collect())
    }
}
