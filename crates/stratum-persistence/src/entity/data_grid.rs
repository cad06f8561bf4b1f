//! `SeaORM` Entity for the data_grid table
//!
//! Stores an account's saved data-grid configuration (column widths,
//! sorting, visibility) keyed by the grid's settings id. The pair
//! (settings_id, account_id) is unique; the index is created in
//! [`crate::setup`] with NULLS NOT DISTINCT.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "data_grid")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub settings_id: Uuid,
    #[sea_orm(nullable)]
    pub settings: Option<Json>,
    // Internal information only
    pub created_at: DateTimeUtc,
    pub last_modified_at: Option<DateTimeUtc>,
    // Foreign keys
    pub account_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Account,
    #[sea_orm(has_many = "super::data_grid_filter::Entity")]
    DataGridFilter,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::data_grid_filter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DataGridFilter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
