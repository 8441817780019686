//! `SeaORM` Entity for the settings table.
//!
//! One row per tenant (unique user_id): default currency plus an optional
//! spending threshold.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ThresholdType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: String,
    pub currency_name: String,
    pub currency_symbol: String,
    pub threshold_type: Option<ThresholdType>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub threshold_rate: Option<Decimal>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
