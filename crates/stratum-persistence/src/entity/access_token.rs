//! `SeaORM` Entity for the access_token table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of issued token.
///
/// A `User` token backs an interactive login session; an `Api` token is a
/// named, long-lived credential for programmatic access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    #[sea_orm(num_value = 10)]
    User,
    #[sea_orm(num_value = 20)]
    Api,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "access_token")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Only set for API tokens.
    pub name: Option<String>,
    pub token_type: TokenType,
    pub revoked: bool,
    pub expiration: DateTimeUtc,
    /// SHA-256 fingerprint of the JWT. Used for validation and revocation;
    /// the token itself is never stored.
    #[sea_orm(unique, indexed)]
    pub value: String,
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
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
