use bcrypt::{hash, verify};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::{debug, info};

use crate::auth::{decode_token, issue_token, AuthSettings, BearerToken};
use crate::database::entities::users;
use crate::errors::{is_unique_violation, AuthError, AuthResult};

/// Token plus the user it was issued for
#[derive(Clone, Debug)]
pub struct AuthPayload {
    pub token: String,
    pub user: users::Model,
}

#[derive(Clone, Debug)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Signup, login and resolving the caller behind a token
#[derive(Clone)]
pub struct AuthService {
    db: DatabaseConnection,
    settings: AuthSettings,
}

impl AuthService {
    pub fn new(db: DatabaseConnection, settings: AuthSettings) -> Self {
        Self { db, settings }
    }

    pub fn settings(&self) -> &AuthSettings {
        &self.settings
    }

    pub async fn signup(&self, input: SignupInput) -> AuthResult<AuthPayload> {
        let email = input.email.trim().to_string();
        Self::validate_email(&email)?;
        Self::validate_name(&input.name)?;
        Self::validate_password(&input.password)?;

        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(&email))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(AuthError::EmailTaken(email));
        }

        let password_hash = Self::hash_password(&input.password, self.settings.bcrypt_cost)?;

        let user = users::ActiveModel::new(input.name.trim().to_string(), email.clone(), password_hash)
            .insert(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AuthError::EmailTaken(email.clone())
                } else {
                    AuthError::Database(e)
                }
            })?;

        let token = issue_token(user.id, &self.settings)?;
        info!("User {} signed up", user.id);

        Ok(AuthPayload { token, user })
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthResult<AuthPayload> {
        let email = email.trim();
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .ok_or_else(|| AuthError::NoUserForEmail(email.to_string()))?;

        if !Self::verify_password(password, &user.password)? {
            debug!("Rejected login for user {}", user.id);
            return Err(AuthError::InvalidPassword);
        }

        let token = issue_token(user.id, &self.settings)?;
        info!("User {} logged in", user.id);

        Ok(AuthPayload { token, user })
    }

    /// Resolve the id of the user behind `token`.
    ///
    /// Fails when there is no token, when it does not verify, or when its
    /// user has since been removed.
    pub async fn authenticate(&self, token: Option<&BearerToken>) -> AuthResult<i32> {
        let token = token.ok_or(AuthError::NotAuthenticated)?;
        let claims = decode_token(token.as_str(), &self.settings.app_secret)?;

        let exists = users::Entity::find_by_id(claims.user_id)
            .one(&self.db)
            .await?
            .is_some();

        if !exists {
            return Err(AuthError::UserNotFound(claims.user_id));
        }

        Ok(claims.user_id)
    }

    pub fn hash_password(password: &str, cost: u32) -> AuthResult<String> {
        Self::validate_password(password)?;
        Ok(hash(password, cost)?)
    }

    pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
        Ok(verify(password, hash)?)
    }

    pub fn validate_password(password: &str) -> AuthResult<()> {
        if password.is_empty() {
            return Err(AuthError::WeakPassword("Password cannot be empty".to_string()));
        }

        // bcrypt only looks at the first 72 bytes
        if password.len() > 72 {
            return Err(AuthError::WeakPassword(
                "Password is too long (max 72 bytes)".to_string(),
            ));
        }

        Ok(())
    }

    pub fn validate_email(email: &str) -> AuthResult<()> {
        let invalid = || AuthError::InvalidEmail(email.to_string());

        if email.is_empty() || email.len() > 254 {
            return Err(invalid());
        }

        let (local_part, domain_part) = email.split_once('@').ok_or_else(invalid)?;

        // Exactly one '@' with something on both sides
        if local_part.is_empty() || domain_part.is_empty() || domain_part.contains('@') {
            return Err(invalid());
        }

        Ok(())
    }

    pub fn validate_name(name: &str) -> AuthResult<()> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(AuthError::InvalidName("Name cannot be empty".to_string()));
        }

        if trimmed.len() > 100 {
            return Err(AuthError::InvalidName(
                "Name is too long (max 100 characters)".to_string(),
            ));
        }

        Ok(())
    }
}
