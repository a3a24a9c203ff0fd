use async_graphql::*;

use crate::errors::ToGraphQLError;
use crate::graphql::context::GraphQLContext;
use crate::graphql::types::AuthPayload;
use crate::services::SignupInput;

#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    /// Create an account and return a token for it
    async fn signup(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
        name: String,
    ) -> Result<Option<AuthPayload>> {
        let context = ctx.data::<GraphQLContext>()?;
        let payload = context
            .auth_service
            .signup(SignupInput {
                name,
                email,
                password,
            })
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(Some(AuthPayload::from(payload)))
    }

    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<Option<AuthPayload>> {
        let context = ctx.data::<GraphQLContext>()?;
        let payload = context
            .auth_service
            .login(&email, &password)
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(Some(AuthPayload::from(payload)))
    }
}
