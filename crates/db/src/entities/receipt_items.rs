//! `SeaORM` Entity for the receipt_items table.
//!
//! Items are owned by their receipt (cascade on delete) and ordered by
//! `line_no`, assigned at insert time in creation order. The free-text
//! `category` column is legacy denormalized data; the normalized path goes
//! through `item_name_id` and the item-name's category reference.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receipt_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub receipt_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((12, 3)))")]
    pub quantity: Decimal,
    pub quantity_unit: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub unit_price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_price: Decimal,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub item_name_id: Option<i64>,
    pub user_id: String,
    pub line_no: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::receipts::Entity",
        from = "Column::ReceiptId",
        to = "super::receipts::Column::Id"
    )]
    Receipts,
    #[sea_orm(
        belongs_to = "super::item_names::Entity",
        from = "Column::ItemNameId",
        to = "super::item_names::Column::Id"
    )]
    ItemNames,
}

impl Related<super::receipts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipts.def()
    }
}

impl Related<super::item_names::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemNames.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
