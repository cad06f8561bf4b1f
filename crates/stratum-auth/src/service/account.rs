//! Account service

use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Asterisk;
use sea_orm::*;
use uuid::Uuid;

use stratum_api::model::{AccountLookup, Page};
use stratum_common::StratumError;
use stratum_persistence::entity::account::{self, AccountType, TableDensity};

use crate::model::AccountInfo;

/// Optional UI settings changes applied by the account itself.
#[derive(Clone, Debug, Default)]
pub struct SettingsUpdate {
    pub light_mode: Option<bool>,
    pub sidebar_collapsed: Option<bool>,
    pub table_density: Option<TableDensity>,
}

/// Optional administrative changes. Absent fields are left unchanged.
#[derive(Clone, Debug, Default)]
pub struct AdminUpdate {
    pub locked: Option<bool>,
    pub active_from: Option<NaiveDate>,
    pub active_until: Option<NaiveDate>,
}

pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> anyhow::Result<Option<account::Model>> {
    let account = account::Entity::find()
        .filter(account::Column::Email.eq(email))
        .one(db)
        .await?;

    Ok(account)
}

pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> anyhow::Result<account::Model> {
    match account::Entity::find_by_id(id).one(db).await? {
        Some(model) => Ok(model),
        None => Err(StratumError::not_found(format!("account '{}' not found", id)).into()),
    }
}

pub async fn search_page(
    db: &DatabaseConnection,
    email: &str,
    page_no: u64,
    page_size: u64,
    accurate: bool,
) -> anyhow::Result<Page<AccountInfo>> {
    let mut count_select = account::Entity::find();
    let mut query_select = account::Entity::find();

    if !email.is_empty() {
        if accurate {
            count_select = count_select.filter(account::Column::Email.eq(email));
            query_select = query_select.filter(account::Column::Email.eq(email));
        } else {
            count_select = count_select.filter(account::Column::Email.contains(email));
            query_select = query_select.filter(account::Column::Email.contains(email));
        }
    }

    let total_count = count_select
        .select_only()
        .column_as(prelude::Expr::col(Asterisk).count(), "count")
        .into_tuple::<i64>()
        .one(db)
        .await?
        .unwrap_or_default() as u64;

    if total_count > 0 {
        let offset = (page_no - 1) * page_size;
        let page_items = query_select
            .order_by_asc(account::Column::Email)
            .offset(offset)
            .limit(page_size)
            .all(db)
            .await?
            .into_iter()
            .map(AccountInfo::from)
            .collect();

        return Ok(Page::<AccountInfo>::new(
            total_count,
            page_no,
            page_size,
            page_items,
        ));
    }

    Ok(Page::<AccountInfo>::default())
}

/// Accounts matching the name fragment, as dropdown lookups.
pub async fn lookup(
    db: &DatabaseConnection,
    full_name: &str,
) -> anyhow::Result<Vec<AccountLookup>> {
    let rows = account::Entity::find()
        .select_only()
        .column(account::Column::Id)
        .column(account::Column::FullName)
        .filter(account::Column::FullName.contains(full_name))
        .order_by_asc(account::Column::FullName)
        .into_tuple::<(Uuid, String)>()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(id, full_name)| AccountLookup { id, full_name })
        .collect())
}

pub async fn create(
    db: &DatabaseConnection,
    email: &str,
    full_name: &str,
    account_type: AccountType,
    roles: Vec<String>,
) -> anyhow::Result<account::Model> {
    let model = account::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        locked: Set(false),
        account_type: Set(account_type),
        full_name: Set(full_name.to_string()),
        active_from: Set(Utc::now().date_naive()),
        active_until: Set(None),
        light_mode: Set(true),
        sidebar_collapsed: Set(false),
        table_density: Set(TableDensity::Compact),
        avatar: Set(None),
        roles: Set(roles),
        last_login: Set(None),
        created_at: Set(Utc::now()),
        last_modified_at: Set(None),
    }
    .insert(db)
    .await?;

    tracing::info!(email = %model.email, "account created");
    Ok(model)
}

pub async fn update_settings(
    db: &DatabaseConnection,
    id: Uuid,
    update: SettingsUpdate,
) -> anyhow::Result<account::Model> {
    let mut model: account::ActiveModel = get_by_id(db, id).await?.into();

    if let Some(light_mode) = update.light_mode {
        model.light_mode = Set(light_mode);
    }
    if let Some(sidebar_collapsed) = update.sidebar_collapsed {
        model.sidebar_collapsed = Set(sidebar_collapsed);
    }
    if let Some(table_density) = update.table_density {
        model.table_density = Set(table_density);
    }
    model.last_modified_at = Set(Some(Utc::now()));

    Ok(model.update(db).await?)
}

pub async fn update_admin(
    db: &DatabaseConnection,
    id: Uuid,
    update: AdminUpdate,
) -> anyhow::Result<account::Model> {
    let mut model: account::ActiveModel = get_by_id(db, id).await?.into();

    if let Some(locked) = update.locked {
        model.locked = Set(locked);
    }
    if let Some(active_from) = update.active_from {
        model.active_from = Set(active_from);
    }
    if let Some(active_until) = update.active_until {
        model.active_until = Set(Some(active_until));
    }
    model.last_modified_at = Set(Some(Utc::now()));

    Ok(model.update(db).await?)
}

pub async fn set_avatar(
    db: &DatabaseConnection,
    id: Uuid,
    avatar: Option<Vec<u8>>,
) -> anyhow::Result<()> {
    let mut model: account::ActiveModel = get_by_id(db, id).await?.into();
    model.avatar = Set(avatar);
    model.last_modified_at = Set(Some(Utc::now()));
    model.update(db).await?;

    Ok(())
}

pub async fn touch_last_login(db: &DatabaseConnection, id: Uuid) -> anyhow::Result<()> {
    let mut model: account::ActiveModel = get_by_id(db, id).await?.into();
    model.last_login = Set(Some(Utc::now()));
    model.update(db).await?;

    Ok(())
}

pub async fn delete(db: &DatabaseConnection, id: Uuid) -> anyhow::Result<()> {
    match account::Entity::find_by_id(id).one(db).await? {
        Some(model) => {
            model.delete(db).await?;
            Ok(())
        }
        None => Err(StratumError::not_found(format!("account '{}' not found", id)).into()),
    }
}
