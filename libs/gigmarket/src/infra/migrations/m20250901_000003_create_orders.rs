use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::CustomerUserId).uuid().not_null())
                    .col(ColumnDef::new(Orders::BusinessUserId).uuid().not_null())
                    .col(ColumnDef::new(Orders::Title).string().not_null())
                    .col(ColumnDef::new(Orders::Revisions).integer().not_null())
                    .col(
                        ColumnDef::new(Orders::DeliveryTimeInDays)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Orders::Price).double().not_null())
                    .col(ColumnDef::new(Orders::Features).json().not_null())
                    .col(ColumnDef::new(Orders::OfferType).string().not_null())
                    .col(ColumnDef::new(Orders::Status).string().not_null())
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Orders::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-orders-customer-user-id")
                            .from(Orders::Table, Orders::CustomerUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-orders-business-user-id")
                            .from(Orders::Table, Orders::BusinessUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-orders-business-user-id-status")
                    .table(Orders::Table)
                    .col(Orders::BusinessUserId)
                    .col(Orders::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    CustomerUserId,
    BusinessUserId,
    Title,
    Revisions,
    DeliveryTimeInDays,
    Price,
    Features,
    OfferType,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
