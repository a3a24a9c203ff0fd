use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::database::entities::{links, users, votes};

/// Read-side lookups for users and the rows that hang off them
#[derive(Clone)]
pub struct UserService {
    db: DatabaseConnection,
}

impl UserService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(&self, id: i32) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    pub async fn links_posted_by(&self, user_id: i32) -> Result<Vec<links::Model>, DbErr> {
        links::Entity::find()
            .filter(links::Column::PostedById.eq(user_id))
            .order_by_asc(links::Column::Id)
            .all(&self.db)
            .await
    }

    pub async fn votes_by(&self, user_id: i32) -> Result<Vec<votes::Model>, DbErr> {
        votes::Entity::find()
            .filter(votes::Column::UserId.eq(user_id))
            .order_by_asc(votes::Column::Id)
            .all(&self.db)
            .await
    }
}
