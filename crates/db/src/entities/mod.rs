//! `SeaORM` entity definitions.

pub mod categories;
pub mod item_names;
pub mod merchants;
pub mod receipt_items;
pub mod receipts;
pub mod sea_orm_active_enums;
pub mod settings;
