//! `SeaORM` Entity for the country table
//!
//! Static lookup table seeded from a JSON resource file.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "country")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub phone: String,
    /// Default countries sort first in dropdown menus.
    pub default: bool,
    #[sea_orm(column_type = "Text")]
    pub svg_image: String,
    // Internal information only
    pub created_at: DateTimeUtc,
    pub last_modified_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
