use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_catalog_tables::Migration),
            Box::new(m20250101_000002_create_packs_tables::Migration),
            Box::new(m20250101_000003_create_reservations_table::Migration),
            Box::new(m20250101_000004_create_reservation_added_option_table::Migration),
        ]
    }
}

// Migration implementations

mod m20250101_000001_create_catalog_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000001_create_catalog_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Cars::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Cars::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Cars::Brand).string().not_null())
                        .col(ColumnDef::new(Cars::Model).string().not_null())
                        .col(ColumnDef::new(Cars::Category).string().not_null())
                        .col(ColumnDef::new(Cars::FuelType).string().not_null())
                        .col(ColumnDef::new(Cars::Transmission).string().not_null())
                        .col(ColumnDef::new(Cars::LuggageCount).integer().not_null())
                        .col(ColumnDef::new(Cars::SeatCount).integer().not_null())
                        .col(ColumnDef::new(Cars::HasAirCon).boolean().not_null())
                        .col(ColumnDef::new(Cars::DoorCount).integer().not_null())
                        .col(ColumnDef::new(Cars::ImageUrl).string().null())
                        .col(
                            ColumnDef::new(Cars::DiscountPercent)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Cars::PricePerDay).decimal().not_null())
                        .col(ColumnDef::new(Cars::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Cars::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Clients::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Clients::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Clients::PassportNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Clients::FullName).string().not_null())
                        .col(
                            ColumnDef::new(Clients::Email)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Clients::MobileNumber).string().not_null())
                        .col(ColumnDef::new(Clients::Address).string().not_null())
                        .col(ColumnDef::new(Clients::LicenseNumber).string().not_null())
                        .col(ColumnDef::new(Clients::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Clients::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Places::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Places::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Places::Title).string().not_null())
                        .col(ColumnDef::new(Places::Description).text().not_null())
                        .col(ColumnDef::new(Places::ImageUrl).string().null())
                        .col(ColumnDef::new(Places::ExtraFee).decimal().not_null())
                        .col(
                            ColumnDef::new(Places::ShowOnHome)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Places::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Places::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(AddedOptions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AddedOptions::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(AddedOptions::Title).string().not_null())
                        .col(ColumnDef::new(AddedOptions::Description).text().not_null())
                        .col(
                            ColumnDef::new(AddedOptions::PricePerDay)
                                .decimal()
                                .not_null(),
                        )
                        .col(ColumnDef::new(AddedOptions::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(AddedOptions::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(AddedOptions::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Places::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Clients::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Cars::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Cars {
        Table,
        Id,
        Brand,
        Model,
        Category,
        FuelType,
        Transmission,
        LuggageCount,
        SeatCount,
        HasAirCon,
        DoorCount,
        ImageUrl,
        DiscountPercent,
        PricePerDay,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Clients {
        Table,
        Id,
        PassportNumber,
        FullName,
        Email,
        MobileNumber,
        Address,
        LicenseNumber,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Places {
        Table,
        Id,
        Title,
        Description,
        ImageUrl,
        ExtraFee,
        ShowOnHome,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum AddedOptions {
        Table,
        Id,
        Title,
        Description,
        PricePerDay,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000002_create_packs_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000002_create_packs_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Packs::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Packs::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Packs::Title)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Packs::Description).text().not_null())
                        .col(
                            ColumnDef::new(Packs::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Packs::PricePerDay).decimal().not_null())
                        .col(ColumnDef::new(Packs::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Packs::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PackItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PackItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PackItems::PackId).uuid().not_null())
                        .col(ColumnDef::new(PackItems::Title).string().not_null())
                        .col(ColumnDef::new(PackItems::Description).text().not_null())
                        .col(ColumnDef::new(PackItems::CreatedAt).timestamp().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_pack_items_pack_id")
                                .from(PackItems::Table, PackItems::PackId)
                                .to(Packs::Table, Packs::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_pack_items_pack_id")
                        .table(PackItems::Table)
                        .col(PackItems::PackId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PackItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Packs::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Packs {
        Table,
        Id,
        Title,
        Description,
        IsActive,
        PricePerDay,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum PackItems {
        Table,
        Id,
        PackId,
        Title,
        Description,
        CreatedAt,
    }
}

mod m20250101_000003_create_reservations_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000003_create_reservations_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Reservations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Reservations::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Reservations::FlightNumber).string().null())
                        .col(ColumnDef::new(Reservations::DateFrom).date().not_null())
                        .col(ColumnDef::new(Reservations::DateTo).date().not_null())
                        .col(
                            ColumnDef::new(Reservations::PickUpPlaceId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Reservations::DropOffPlaceId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Reservations::CarId).uuid().not_null())
                        .col(ColumnDef::new(Reservations::ClientId).uuid().not_null())
                        .col(ColumnDef::new(Reservations::PackId).uuid().null())
                        .col(ColumnDef::new(Reservations::Status).string().not_null())
                        .col(
                            ColumnDef::new(Reservations::TotalPrice)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Reservations::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Reservations::UpdatedAt).timestamp().null())
                        .col(
                            ColumnDef::new(Reservations::Version)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_reservations_car_id")
                                .from(Reservations::Table, Reservations::CarId)
                                .to(Cars::Table, Cars::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_reservations_client_id")
                                .from(Reservations::Table, Reservations::ClientId)
                                .to(Clients::Table, Clients::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_reservations_pack_id")
                                .from(Reservations::Table, Reservations::PackId)
                                .to(Packs::Table, Packs::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_reservations_pick_up_place_id")
                                .from(Reservations::Table, Reservations::PickUpPlaceId)
                                .to(Places::Table, Places::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_reservations_drop_off_place_id")
                                .from(Reservations::Table, Reservations::DropOffPlaceId)
                                .to(Places::Table, Places::Id),
                        )
                        .to_owned(),
                )
                .await?;

            // The availability guard filters by car and date range on every
            // booking; the status filter backs the back-office list.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_reservations_car_id_dates")
                        .table(Reservations::Table)
                        .col(Reservations::CarId)
                        .col(Reservations::DateFrom)
                        .col(Reservations::DateTo)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_reservations_status")
                        .table(Reservations::Table)
                        .col(Reservations::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_reservations_client_id")
                        .table(Reservations::Table)
                        .col(Reservations::ClientId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Reservations::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Reservations {
        Table,
        Id,
        FlightNumber,
        DateFrom,
        DateTo,
        PickUpPlaceId,
        DropOffPlaceId,
        CarId,
        ClientId,
        PackId,
        Status,
        TotalPrice,
        CreatedAt,
        UpdatedAt,
        Version,
    }

    #[derive(DeriveIden)]
    enum Cars {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Clients {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Packs {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Places {
        Table,
        Id,
    }
}

mod m20250101_000004_create_reservation_added_option_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000004_create_reservation_added_option_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ReservationAddedOption::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ReservationAddedOption::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ReservationAddedOption::ReservationId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ReservationAddedOption::AddedOptionId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ReservationAddedOption::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ReservationAddedOption::PricePerDay)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ReservationAddedOption::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_reservation_added_option_reservation_id")
                                .from(
                                    ReservationAddedOption::Table,
                                    ReservationAddedOption::ReservationId,
                                )
                                .to(Reservations::Table, Reservations::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_reservation_added_option_added_option_id")
                                .from(
                                    ReservationAddedOption::Table,
                                    ReservationAddedOption::AddedOptionId,
                                )
                                .to(AddedOptions::Table, AddedOptions::Id),
                        )
                        .to_owned(),
                )
                .await?;

            // One row per (reservation, option); quantity carries repeats.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_reservation_added_option_unique_pair")
                        .table(ReservationAddedOption::Table)
                        .col(ReservationAddedOption::ReservationId)
                        .col(ReservationAddedOption::AddedOptionId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(
                    Table::drop()
                        .table(ReservationAddedOption::Table)
                        .to_owned(),
                )
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum ReservationAddedOption {
        Table,
        Id,
        ReservationId,
        AddedOptionId,
        Quantity,
        PricePerDay,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum Reservations {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum AddedOptions {
        Table,
        Id,
    }
}
