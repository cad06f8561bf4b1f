//! `SeaORM` Entity for the data_grid_filter table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "data_grid_filter")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(nullable)]
    pub filter: Option<Json>,
    // Internal information only
    pub created_at: DateTimeUtc,
    pub last_modified_at: Option<DateTimeUtc>,
    // Foreign keys
    pub data_grid_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::data_grid::Entity",
        from = "Column::DataGridId",
        to = "super::data_grid::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    DataGrid,
}

impl Related<super::data_grid::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DataGrid.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
