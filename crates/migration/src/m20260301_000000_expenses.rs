//! Creates the `expenses` table holding every ledger record.
//!
//! One row per record, whatever its kind. Split columns are only set for
//! shared expenses, `paid_by`/`paid_to`/`settled_by` only for settlements.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Expenses {
    Table,
    Key,
    Id,
    Kind,
    Payer,
    Category,
    AmountMinor,
    Date,
    CreatedAt,
    UpdatedAt,
    Note,
    SplitMinor,
    SplitWith,
    CustomSplit,
    PaidBy,
    PaidTo,
    SettledBy,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Key)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::Id).string().not_null())
                    .col(ColumnDef::new(Expenses::Kind).string())
                    .col(ColumnDef::new(Expenses::Payer).string())
                    .col(ColumnDef::new(Expenses::Category).string())
                    .col(
                        ColumnDef::new(Expenses::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::Date).date().not_null())
                    .col(ColumnDef::new(Expenses::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Expenses::UpdatedAt).timestamp())
                    .col(ColumnDef::new(Expenses::Note).string())
                    .col(ColumnDef::new(Expenses::SplitMinor).big_integer())
                    .col(ColumnDef::new(Expenses::SplitWith).string())
                    .col(
                        ColumnDef::new(Expenses::CustomSplit)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Expenses::PaidBy).string())
                    .col(ColumnDef::new(Expenses::PaidTo).string())
                    .col(ColumnDef::new(Expenses::SettledBy).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-date")
                    .table(Expenses::Table)
                    .col(Expenses::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await
    }
}
