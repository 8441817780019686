//! `SeaORM` Entity for the categories table.
//!
//! Referenced weakly (by id) from item_names; deleting a category does not
//! clear those references.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
    pub user_id: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::item_names::Entity")]
    ItemNames,
}

impl Related<super::item_names::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemNames.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
