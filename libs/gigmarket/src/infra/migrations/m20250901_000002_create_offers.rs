use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Offers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Offers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Offers::UserId).uuid().not_null())
                    .col(ColumnDef::new(Offers::Title).string().not_null())
                    .col(ColumnDef::new(Offers::Image).string())
                    .col(ColumnDef::new(Offers::Description).text().not_null())
                    .col(
                        ColumnDef::new(Offers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Offers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-offers-user-id")
                            .from(Offers::Table, Offers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OfferDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OfferDetails::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OfferDetails::OfferId).uuid().not_null())
                    .col(ColumnDef::new(OfferDetails::Title).string().not_null())
                    .col(ColumnDef::new(OfferDetails::Revisions).integer().not_null())
                    .col(
                        ColumnDef::new(OfferDetails::DeliveryTimeInDays)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OfferDetails::Price).double().not_null())
                    .col(ColumnDef::new(OfferDetails::Features).json().not_null())
                    .col(ColumnDef::new(OfferDetails::OfferType).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-offer-details-offer-id")
                            .from(OfferDetails::Table, OfferDetails::OfferId)
                            .to(Offers::Table, Offers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One detail per tier per offer.
        manager
            .create_index(
                Index::create()
                    .name("idx-offer-details-offer-id-offer-type")
                    .table(OfferDetails::Table)
                    .col(OfferDetails::OfferId)
                    .col(OfferDetails::OfferType)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OfferDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Offers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Offers {
    Table,
    Id,
    UserId,
    Title,
    Image,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum OfferDetails {
    Table,
    Id,
    OfferId,
    Title,
    Revisions,
    DeliveryTimeInDays,
    Price,
    Features,
    OfferType,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
