use async_graphql::*;

use crate::graphql::types::User;
use crate::services;

#[derive(SimpleObject)]
pub struct AuthPayload {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl From<services::AuthPayload> for AuthPayload {
    fn from(payload: services::AuthPayload) -> Self {
        Self {
            token: Some(payload.token),
            user: Some(User::from(payload.user)),
        }
    }
}
