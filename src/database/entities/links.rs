use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "links")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: ChronoDateTimeUtc,
    pub description: String,
    pub url: String,
    /// Cleared when the posting user is removed
    pub posted_by_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::PostedById",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    PostedBy,
    #[sea_orm(has_many = "super::votes::Entity")]
    Votes,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostedBy.def()
    }
}

impl Related<super::votes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn new(url: String, description: String, posted_by_id: i32) -> Self {
        Self {
            id: ActiveValue::NotSet,
            created_at: Set(chrono::Utc::now()),
            description: Set(description),
            url: Set(url),
            posted_by_id: Set(Some(posted_by_id)),
        }
    }
}
