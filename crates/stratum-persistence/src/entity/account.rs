//! `SeaORM` Entity for the account table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category of account types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[sea_orm(num_value = 10)]
    Personal,
    #[sea_orm(num_value = 20)]
    Technical,
    #[sea_orm(num_value = 30)]
    Obsolete,
}

/// Data-grid table density preferred by the account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
#[serde(rename_all = "lowercase")]
pub enum TableDensity {
    #[sea_orm(num_value = 0)]
    Comfortable,
    #[sea_orm(num_value = 10)]
    Standard,
    #[sea_orm(num_value = 20)]
    Compact,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique, indexed)]
    pub email: String,
    pub locked: bool,
    pub account_type: AccountType,
    pub full_name: String,
    /// Before this date, the account cannot log in.
    pub active_from: Date,
    /// After this date, the account cannot log in. Open-ended when absent.
    pub active_until: Option<Date>,
    // Account settings
    pub light_mode: bool,
    pub sidebar_collapsed: bool,
    pub table_density: TableDensity,
    pub avatar: Option<Vec<u8>>,
    /// Role names held by the account.
    pub roles: Vec<String>,
    // Internal information only
    pub last_login: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub last_modified_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::access_token::Entity")]
    AccessToken,
    #[sea_orm(has_many = "super::notification::Entity")]
    Notification,
    #[sea_orm(has_many = "super::data_grid::Entity")]
    DataGrid,
}

impl Related<super::access_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccessToken.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notification.def()
    }
}

impl Related<super::data_grid::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DataGrid.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
