use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::info;

use crate::database::entities::{links, users, votes};
use crate::errors::{is_unique_violation, VoteError, VoteResult};

#[derive(Clone)]
pub struct VoteService {
    db: DatabaseConnection,
}

impl VoteService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Record `user_id`'s vote on `link_id`. A second vote is rejected.
    pub async fn vote(&self, user_id: i32, link_id: i32) -> VoteResult<votes::Model> {
        links::Entity::find_by_id(link_id)
            .one(&self.db)
            .await?
            .ok_or(VoteError::LinkNotFound(link_id))?;

        let existing = votes::Entity::find()
            .filter(votes::Column::UserId.eq(user_id))
            .filter(votes::Column::LinkId.eq(link_id))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(VoteError::AlreadyVoted(link_id));
        }

        // The unique index catches a concurrent vote that slipped past the check
        let vote = votes::ActiveModel::new(link_id, user_id)
            .insert(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    VoteError::AlreadyVoted(link_id)
                } else {
                    VoteError::Database(e)
                }
            })?;

        info!("User {} voted for link {}", user_id, link_id);
        Ok(vote)
    }

    pub async fn link_of(&self, vote: &votes::Model) -> VoteResult<links::Model> {
        links::Entity::find_by_id(vote.link_id)
            .one(&self.db)
            .await?
            .ok_or(VoteError::Dangling(vote.id, "link"))
    }

    pub async fn user_of(&self, vote: &votes::Model) -> VoteResult<users::Model> {
        users::Entity::find_by_id(vote.user_id)
            .one(&self.db)
            .await?
            .ok_or(VoteError::Dangling(vote.id, "user"))
    }
}
