//! Initial database migration.
//!
//! Creates the receipt aggregate tables, the tenant-independent item-name
//! lookup, and per-tenant merchants, categories, and settings.
//!
//! Schema notes:
//! - `item_names.name` carries a unique constraint; item-name resolution
//!   relies on it for its atomic upsert.
//! - `item_names.category_id` is a weak reference (no foreign key): deleting
//!   a category must not block on, or clear, lookup rows.
//! - `receipt_items.receipt_id` cascades on delete; `receipts.merchant_id`
//!   restricts.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .col(
                        ColumnDef::new(Categories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(ColumnDef::new(Categories::Icon).string())
                    .col(ColumnDef::new(Categories::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Categories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Categories::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ItemNames::Table)
                    .col(
                        ColumnDef::new(ItemNames::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ItemNames::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ItemNames::CategoryId).uuid())
                    .col(
                        ColumnDef::new(ItemNames::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ItemNames::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Merchants::Table)
                    .col(
                        ColumnDef::new(Merchants::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Merchants::Name).string().not_null())
                    .col(ColumnDef::new(Merchants::Address).string())
                    .col(ColumnDef::new(Merchants::Phone).string())
                    .col(ColumnDef::new(Merchants::Email).string())
                    .col(ColumnDef::new(Merchants::Website).string())
                    .col(ColumnDef::new(Merchants::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Merchants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Merchants::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Settings::Table)
                    .col(
                        ColumnDef::new(Settings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Settings::UserId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Settings::CurrencyName).string().not_null())
                    .col(
                        ColumnDef::new(Settings::CurrencySymbol)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Settings::ThresholdType).string_len(16))
                    .col(ColumnDef::new(Settings::ThresholdRate).decimal_len(12, 2))
                    .col(
                        ColumnDef::new(Settings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Settings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Receipts::Table)
                    .col(
                        ColumnDef::new(Receipts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Receipts::ReceiptNumber)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Receipts::ReceiptDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Receipts::SubTotal)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Receipts::TaxAmount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Receipts::TotalAmount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Receipts::Reward).decimal_len(12, 2))
                    .col(ColumnDef::new(Receipts::Currency).string().not_null())
                    .col(ColumnDef::new(Receipts::ImagePath).string())
                    .col(ColumnDef::new(Receipts::RawText).text())
                    .col(ColumnDef::new(Receipts::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Receipts::MerchantId).uuid().not_null())
                    .col(ColumnDef::new(Receipts::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Receipts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Receipts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_receipts_merchant")
                            .from(Receipts::Table, Receipts::MerchantId)
                            .to(Merchants::Table, Merchants::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReceiptItems::Table)
                    .col(
                        ColumnDef::new(ReceiptItems::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReceiptItems::ReceiptId).uuid().not_null())
                    .col(ColumnDef::new(ReceiptItems::Name).string().not_null())
                    .col(ColumnDef::new(ReceiptItems::Description).string())
                    .col(
                        ColumnDef::new(ReceiptItems::Quantity)
                            .decimal_len(12, 3)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ReceiptItems::QuantityUnit).string())
                    .col(
                        ColumnDef::new(ReceiptItems::UnitPrice)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReceiptItems::TotalPrice)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ReceiptItems::Category).string())
                    .col(ColumnDef::new(ReceiptItems::Sku).string())
                    .col(ColumnDef::new(ReceiptItems::ItemNameId).big_integer())
                    .col(ColumnDef::new(ReceiptItems::UserId).string().not_null())
                    .col(ColumnDef::new(ReceiptItems::LineNo).integer().not_null())
                    .col(
                        ColumnDef::new(ReceiptItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReceiptItems::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_receipt_items_receipt")
                            .from(ReceiptItems::Table, ReceiptItems::ReceiptId)
                            .to(Receipts::Table, Receipts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_receipt_items_item_name")
                            .from(ReceiptItems::Table, ReceiptItems::ItemNameId)
                            .to(ItemNames::Table, ItemNames::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_receipts_user_created")
                    .table(Receipts::Table)
                    .col(Receipts::UserId)
                    .col(Receipts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_receipts_user_date")
                    .table(Receipts::Table)
                    .col(Receipts::UserId)
                    .col(Receipts::ReceiptDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_receipt_items_receipt")
                    .table(ReceiptItems::Table)
                    .col(ReceiptItems::ReceiptId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_merchants_user_name")
                    .table(Merchants::Table)
                    .col(Merchants::UserId)
                    .col(Merchants::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReceiptItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Receipts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Settings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Merchants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ItemNames::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Icon,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ItemNames {
    Table,
    Id,
    Name,
    CategoryId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Merchants {
    Table,
    Id,
    Name,
    Address,
    Phone,
    Email,
    Website,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Settings {
    Table,
    Id,
    UserId,
    CurrencyName,
    CurrencySymbol,
    ThresholdType,
    ThresholdRate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Receipts {
    Table,
    Id,
    ReceiptNumber,
    ReceiptDate,
    SubTotal,
    TaxAmount,
    TotalAmount,
    Reward,
    Currency,
    ImagePath,
    RawText,
    Status,
    MerchantId,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ReceiptItems {
    Table,
    Id,
    ReceiptId,
    Name,
    Description,
    Quantity,
    QuantityUnit,
    UnitPrice,
    TotalPrice,
    Category,
    Sku,
    ItemNameId,
    UserId,
    LineNo,
    CreatedAt,
    UpdatedAt,
}
