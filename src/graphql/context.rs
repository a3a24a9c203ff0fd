use std::sync::Arc;

use async_graphql::{Context, Result};
use sea_orm::DatabaseConnection;

use crate::auth::{AuthSettings, BearerToken};
use crate::errors::ToGraphQLError;
use crate::events::EventBus;
use crate::services::{AuthService, LinkService, UserService, VoteService};

#[derive(Clone)]
pub struct GraphQLContext {
    pub auth_service: Arc<AuthService>,
    pub link_service: Arc<LinkService>,
    pub user_service: Arc<UserService>,
    pub vote_service: Arc<VoteService>,
    pub events: EventBus,
}

impl GraphQLContext {
    pub fn new(db: DatabaseConnection, settings: AuthSettings, events: EventBus) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(db.clone(), settings)),
            link_service: Arc::new(LinkService::new(db.clone())),
            user_service: Arc::new(UserService::new(db.clone())),
            vote_service: Arc::new(VoteService::new(db)),
            events,
        }
    }

    /// Id of the user whose token came with this request.
    ///
    /// The token is attached as request data by the HTTP and WebSocket
    /// handlers; it is only checked here, when a resolver asks for it.
    pub async fn current_user_id(&self, ctx: &Context<'_>) -> Result<i32> {
        self.auth_service
            .authenticate(ctx.data_opt::<BearerToken>())
            .await
            .map_err(|e| e.to_graphql_error())
    }
}
