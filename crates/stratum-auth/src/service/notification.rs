//! Notification service

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use stratum_common::StratumError;
use stratum_persistence::entity::notification;

/// Send a notification to an account.
///
/// With `dedup` on, an unread notification carrying the same subject and
/// message only gets its timestamp refreshed instead of piling up a
/// duplicate.
pub async fn notify(
    db: &DatabaseConnection,
    account_id: Uuid,
    subject: &str,
    message: &str,
    dedup: bool,
) -> anyhow::Result<notification::Model> {
    if dedup {
        let duplicate = notification::Entity::find()
            .filter(notification::Column::AccountId.eq(account_id))
            .filter(notification::Column::Subject.eq(subject))
            .filter(notification::Column::Message.eq(message))
            .filter(notification::Column::Read.eq(false))
            .one(db)
            .await?;
        if let Some(existing) = duplicate {
            let mut model: notification::ActiveModel = existing.into();
            model.created_at = Set(Utc::now());
            model.last_modified_at = Set(Some(Utc::now()));
            return Ok(model.update(db).await?);
        }
    }

    let model = notification::ActiveModel {
        id: Set(Uuid::new_v4()),
        subject: Set(subject.to_string()),
        message: Set(message.to_string()),
        read: Set(false),
        created_at: Set(Utc::now()),
        last_modified_at: Set(None),
        account_id: Set(account_id),
    }
    .insert(db)
    .await?;

    tracing::debug!(%account_id, subject, "notification stored");
    Ok(model)
}

/// An account's notifications, newest first.
pub async fn list(
    db: &DatabaseConnection,
    account_id: Uuid,
) -> anyhow::Result<Vec<notification::Model>> {
    let notifications = notification::Entity::find()
        .filter(notification::Column::AccountId.eq(account_id))
        .order_by_desc(notification::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(notifications)
}

/// Mark one of the account's notifications as read.
pub async fn mark_read(
    db: &DatabaseConnection,
    account_id: Uuid,
    notification_id: Uuid,
) -> anyhow::Result<()> {
    let model = notification::Entity::find_by_id(notification_id)
        .filter(notification::Column::AccountId.eq(account_id))
        .one(db)
        .await?
        .ok_or_else(|| {
            StratumError::not_found(format!("notification '{}' not found", notification_id))
        })?;

    let mut model: notification::ActiveModel = model.into();
    model.read = Set(true);
    model.last_modified_at = Set(Some(Utc::now()));
    model.update(db).await?;

    Ok(())
}

/// Delete every read notification of the account. Returns the number of
/// deleted rows.
pub async fn clear_read(db: &DatabaseConnection, account_id: Uuid) -> anyhow::Result<u64> {
    let result = notification::Entity::delete_many()
        .filter(notification::Column::AccountId.eq(account_id))
        .filter(notification::Column::Read.eq(true))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
