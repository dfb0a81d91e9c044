//! Embedded schema migrations.

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_parties::Migration),
            Box::new(m20240101_000002_create_inventory_and_catalog::Migration),
            Box::new(m20240101_000003_create_orders::Migration),
            Box::new(m20240101_000004_create_operations::Migration),
        ]
    }
}

mod m20240101_000001_create_parties {
    use sea_orm_migration::prelude::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[derive(DeriveIden)]
    pub enum Companies {
        Table,
        Id,
        Name,
        ContactPerson,
        Phone,
        Email,
        Address,
        GstNumber,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum Vendors {
        Table,
        Id,
        Name,
        ContactPerson,
        Phone,
        Email,
        Address,
        GstNumber,
        CreatedAt,
        UpdatedAt,
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Companies::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Companies::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Companies::Name).string().not_null())
                        .col(ColumnDef::new(Companies::ContactPerson).string())
                        .col(ColumnDef::new(Companies::Phone).string())
                        .col(ColumnDef::new(Companies::Email).string())
                        .col(ColumnDef::new(Companies::Address).string())
                        .col(ColumnDef::new(Companies::GstNumber).string())
                        .col(
                            ColumnDef::new(Companies::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Companies::UpdatedAt).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Vendors::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Vendors::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Vendors::Name).string().not_null())
                        .col(ColumnDef::new(Vendors::ContactPerson).string())
                        .col(ColumnDef::new(Vendors::Phone).string())
                        .col(ColumnDef::new(Vendors::Email).string())
                        .col(ColumnDef::new(Vendors::Address).string())
                        .col(ColumnDef::new(Vendors::GstNumber).string())
                        .col(
                            ColumnDef::new(Vendors::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Vendors::UpdatedAt).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Vendors::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Companies::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000002_create_inventory_and_catalog {
    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_parties::Vendors;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[derive(DeriveIden)]
    pub enum InventoryItems {
        Table,
        Id,
        Name,
        Color,
        Gsm,
        Unit,
        PurchaseRate,
        RollWidth,
        QuantityInStock,
        VendorId,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum CatalogTemplates {
        Table,
        Id,
        Name,
        ProductQuantity,
        MaterialCost,
        CuttingCharge,
        PrintingCharge,
        StitchingCharge,
        TransportCharge,
        Margin,
        SellingRate,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum CatalogComponents {
        Table,
        Id,
        TemplateId,
        ComponentType,
        CustomName,
        Length,
        Width,
        RollWidth,
        Formula,
        Consumption,
        MaterialId,
        CreatedAt,
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InventoryItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryItems::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(InventoryItems::Name).string().not_null())
                        .col(ColumnDef::new(InventoryItems::Color).string())
                        .col(ColumnDef::new(InventoryItems::Gsm).integer())
                        .col(ColumnDef::new(InventoryItems::Unit).string().not_null())
                        .col(
                            ColumnDef::new(InventoryItems::PurchaseRate)
                                .decimal()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryItems::RollWidth).decimal())
                        .col(
                            ColumnDef::new(InventoryItems::QuantityInStock)
                                .decimal()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryItems::VendorId).uuid())
                        .col(
                            ColumnDef::new(InventoryItems::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryItems::UpdatedAt).timestamp_with_time_zone())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inventory_items_vendor")
                                .from(InventoryItems::Table, InventoryItems::VendorId)
                                .to(Vendors::Table, Vendors::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(CatalogTemplates::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CatalogTemplates::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(CatalogTemplates::Name).string().not_null())
                        .col(
                            ColumnDef::new(CatalogTemplates::ProductQuantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CatalogTemplates::MaterialCost)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CatalogTemplates::CuttingCharge)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CatalogTemplates::PrintingCharge)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CatalogTemplates::StitchingCharge)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CatalogTemplates::TransportCharge)
                                .decimal()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CatalogTemplates::Margin).decimal().not_null())
                        .col(
                            ColumnDef::new(CatalogTemplates::SellingRate)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CatalogTemplates::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CatalogTemplates::UpdatedAt)
                                .timestamp_with_time_zone(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(CatalogComponents::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CatalogComponents::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(CatalogComponents::TemplateId).uuid().not_null())
                        .col(
                            ColumnDef::new(CatalogComponents::ComponentType)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CatalogComponents::CustomName).string())
                        .col(ColumnDef::new(CatalogComponents::Length).decimal())
                        .col(ColumnDef::new(CatalogComponents::Width).decimal())
                        .col(ColumnDef::new(CatalogComponents::RollWidth).decimal())
                        .col(ColumnDef::new(CatalogComponents::Formula).string().not_null())
                        .col(ColumnDef::new(CatalogComponents::Consumption).decimal())
                        .col(ColumnDef::new(CatalogComponents::MaterialId).uuid())
                        .col(
                            ColumnDef::new(CatalogComponents::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_catalog_components_template")
                                .from(CatalogComponents::Table, CatalogComponents::TemplateId)
                                .to(CatalogTemplates::Table, CatalogTemplates::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_catalog_components_template")
                        .table(CatalogComponents::Table)
                        .col(CatalogComponents::TemplateId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(CatalogComponents::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(CatalogTemplates::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(InventoryItems::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000003_create_orders {
    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_parties::Companies;
    use super::m20240101_000002_create_inventory_and_catalog::CatalogTemplates;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[derive(DeriveIden)]
    pub enum Orders {
        Table,
        Id,
        OrderNumber,
        CompanyId,
        Status,
        Quantity,
        ProductQuantity,
        TotalQuantity,
        BagLength,
        BagWidth,
        CatalogTemplateId,
        MaterialCost,
        CuttingCharge,
        PrintingCharge,
        StitchingCharge,
        TransportCharge,
        GstAmount,
        MarginPercent,
        TotalCost,
        PerUnitCost,
        SellingPrice,
        Notes,
        CreatedAt,
        UpdatedAt,
        Version,
    }

    #[derive(DeriveIden)]
    pub enum OrderComponents {
        Table,
        Id,
        OrderId,
        ComponentType,
        CustomName,
        Length,
        Width,
        RollWidth,
        Formula,
        MaterialId,
        BaseConsumption,
        Consumption,
        IsManual,
        MaterialCost,
        CreatedAt,
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                        .col(
                            ColumnDef::new(Orders::OrderNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Orders::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(Orders::Status).string().not_null())
                        .col(ColumnDef::new(Orders::Quantity).integer().not_null())
                        .col(ColumnDef::new(Orders::ProductQuantity).integer().not_null())
                        .col(ColumnDef::new(Orders::TotalQuantity).integer().not_null())
                        .col(ColumnDef::new(Orders::BagLength).decimal())
                        .col(ColumnDef::new(Orders::BagWidth).decimal())
                        .col(ColumnDef::new(Orders::CatalogTemplateId).uuid())
                        .col(ColumnDef::new(Orders::MaterialCost).decimal().not_null())
                        .col(ColumnDef::new(Orders::CuttingCharge).decimal().not_null())
                        .col(ColumnDef::new(Orders::PrintingCharge).decimal().not_null())
                        .col(ColumnDef::new(Orders::StitchingCharge).decimal().not_null())
                        .col(ColumnDef::new(Orders::TransportCharge).decimal().not_null())
                        .col(ColumnDef::new(Orders::GstAmount).decimal().not_null())
                        .col(ColumnDef::new(Orders::MarginPercent).decimal().not_null())
                        .col(ColumnDef::new(Orders::TotalCost).decimal().not_null())
                        .col(ColumnDef::new(Orders::PerUnitCost).decimal().not_null())
                        .col(ColumnDef::new(Orders::SellingPrice).decimal().not_null())
                        .col(ColumnDef::new(Orders::Notes).string())
                        .col(
                            ColumnDef::new(Orders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Orders::UpdatedAt).timestamp_with_time_zone())
                        .col(ColumnDef::new(Orders::Version).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_company")
                                .from(Orders::Table, Orders::CompanyId)
                                .to(Companies::Table, Companies::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_catalog_template")
                                .from(Orders::Table, Orders::CatalogTemplateId)
                                .to(CatalogTemplates::Table, CatalogTemplates::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_orders_company")
                        .table(Orders::Table)
                        .col(Orders::CompanyId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_orders_status")
                        .table(Orders::Table)
                        .col(Orders::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OrderComponents::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrderComponents::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(OrderComponents::OrderId).uuid().not_null())
                        .col(
                            ColumnDef::new(OrderComponents::ComponentType)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrderComponents::CustomName).string())
                        .col(ColumnDef::new(OrderComponents::Length).decimal())
                        .col(ColumnDef::new(OrderComponents::Width).decimal())
                        .col(ColumnDef::new(OrderComponents::RollWidth).decimal())
                        .col(ColumnDef::new(OrderComponents::Formula).string().not_null())
                        .col(ColumnDef::new(OrderComponents::MaterialId).uuid())
                        .col(ColumnDef::new(OrderComponents::BaseConsumption).decimal())
                        .col(ColumnDef::new(OrderComponents::Consumption).decimal())
                        .col(
                            ColumnDef::new(OrderComponents::IsManual)
                                .boolean()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrderComponents::MaterialCost)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrderComponents::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_components_order")
                                .from(OrderComponents::Table, OrderComponents::OrderId)
                                .to(Orders::Table, Orders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_order_components_order")
                        .table(OrderComponents::Table)
                        .col(OrderComponents::OrderId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderComponents::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000004_create_operations {
    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_parties::{Companies, Vendors};
    use super::m20240101_000002_create_inventory_and_catalog::InventoryItems;
    use super::m20240101_000003_create_orders::Orders;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[derive(DeriveIden)]
    pub enum Purchases {
        Table,
        Id,
        VendorId,
        MaterialId,
        Quantity,
        Rate,
        TotalAmount,
        InvoiceNumber,
        PurchaseDate,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub enum JobCards {
        Table,
        Id,
        OrderId,
        Stage,
        Status,
        AssignedTo,
        QuantityCompleted,
        StartedAt,
        CompletedAt,
        Notes,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum Bills {
        Table,
        Id,
        BillNumber,
        OrderId,
        CompanyId,
        Amount,
        GstAmount,
        TotalAmount,
        Status,
        BilledAt,
        CreatedAt,
        UpdatedAt,
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Purchases::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Purchases::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Purchases::VendorId).uuid().not_null())
                        .col(ColumnDef::new(Purchases::MaterialId).uuid().not_null())
                        .col(ColumnDef::new(Purchases::Quantity).decimal().not_null())
                        .col(ColumnDef::new(Purchases::Rate).decimal().not_null())
                        .col(ColumnDef::new(Purchases::TotalAmount).decimal().not_null())
                        .col(ColumnDef::new(Purchases::InvoiceNumber).string())
                        .col(
                            ColumnDef::new(Purchases::PurchaseDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Purchases::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchases_vendor")
                                .from(Purchases::Table, Purchases::VendorId)
                                .to(Vendors::Table, Vendors::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchases_material")
                                .from(Purchases::Table, Purchases::MaterialId)
                                .to(InventoryItems::Table, InventoryItems::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(JobCards::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(JobCards::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(JobCards::OrderId).uuid().not_null())
                        .col(ColumnDef::new(JobCards::Stage).string().not_null())
                        .col(ColumnDef::new(JobCards::Status).string().not_null())
                        .col(ColumnDef::new(JobCards::AssignedTo).string())
                        .col(
                            ColumnDef::new(JobCards::QuantityCompleted)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(JobCards::StartedAt).timestamp_with_time_zone())
                        .col(ColumnDef::new(JobCards::CompletedAt).timestamp_with_time_zone())
                        .col(ColumnDef::new(JobCards::Notes).string())
                        .col(
                            ColumnDef::new(JobCards::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(JobCards::UpdatedAt).timestamp_with_time_zone())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_job_cards_order")
                                .from(JobCards::Table, JobCards::OrderId)
                                .to(Orders::Table, Orders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_job_cards_order_stage")
                        .table(JobCards::Table)
                        .col(JobCards::OrderId)
                        .col(JobCards::Stage)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Bills::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Bills::Id).uuid().not_null().primary_key())
                        .col(
                            ColumnDef::new(Bills::BillNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Bills::OrderId).uuid().not_null())
                        .col(ColumnDef::new(Bills::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(Bills::Amount).decimal().not_null())
                        .col(ColumnDef::new(Bills::GstAmount).decimal().not_null())
                        .col(ColumnDef::new(Bills::TotalAmount).decimal().not_null())
                        .col(ColumnDef::new(Bills::Status).string().not_null())
                        .col(
                            ColumnDef::new(Bills::BilledAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Bills::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Bills::UpdatedAt).timestamp_with_time_zone())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_bills_order")
                                .from(Bills::Table, Bills::OrderId)
                                .to(Orders::Table, Orders::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_bills_company")
                                .from(Bills::Table, Bills::CompanyId)
                                .to(Companies::Table, Companies::Id),
                        )
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Bills::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(JobCards::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Purchases::Table).to_owned())
                .await
        }
    }
}
