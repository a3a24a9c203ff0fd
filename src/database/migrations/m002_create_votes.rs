use sea_orm_migration::prelude::*;

use super::m001_create_tables::{Links, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Votes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Votes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Votes::LinkId).integer().not_null())
                    .col(ColumnDef::new(Votes::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_votes_link_id")
                            .from(Votes::Table, Votes::LinkId)
                            .to(Links::Table, Links::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_votes_user_id")
                            .from(Votes::Table, Votes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One vote per user and link
        manager
            .create_index(
                Index::create()
                    .name("idx_votes_user_link_unique")
                    .table(Votes::Table)
                    .col(Votes::UserId)
                    .col(Votes::LinkId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_votes_link_id")
                    .table(Votes::Table)
                    .col(Votes::LinkId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Votes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Votes {
    Table,
    Id,
    LinkId,
    UserId,
}
