//! Database setup
//!
//! Creates and drops the schema derived from the entities, applies the
//! managed database objects, and loads static seed data.

use std::path::Path;

use chrono::Utc;
use sea_orm::sea_query::Table;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityName, EntityTrait,
    QueryFilter, Schema, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entity::{access_token, account, country, data_grid, data_grid_filter, notification};
use crate::model::CountryLoad;
use crate::objects;

/// What [`init_db`] should do.
#[derive(Clone, Copy, Debug, Default)]
pub struct InitOptions {
    pub drop_objects: bool,
    pub create_objects: bool,
    pub load_seed_data: bool,
}

/// Create all tables, indexes, and managed objects.
pub async fn create_tables(db: &DatabaseConnection) -> anyhow::Result<()> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    macro_rules! create_entity {
        ($entity:expr) => {
            db.execute(backend.build(&schema.create_table_from_entity($entity)))
                .await?;
            for statement in schema.create_index_from_entity($entity) {
                db.execute(backend.build(&statement)).await?;
            }
        };
    }

    create_entity!(account::Entity);
    create_entity!(access_token::Entity);
    create_entity!(notification::Entity);
    create_entity!(data_grid::Entity);
    create_entity!(data_grid_filter::Entity);
    create_entity!(country::Entity);

    // Composite unique constraint the entity derive cannot express. NULLS
    // NOT DISTINCT so a missing account still cannot claim a settings id
    // twice.
    db.execute_unprepared(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_data_grid_settings_account \
         ON data_grid (settings_id, account_id) NULLS NOT DISTINCT;",
    )
    .await?;

    tracing::info!("database tables created");
    Ok(())
}

/// Drop all tables, children first.
pub async fn drop_tables(db: &DatabaseConnection) -> anyhow::Result<()> {
    let backend = db.get_database_backend();

    macro_rules! drop_entity {
        ($entity:expr) => {
            let mut statement = Table::drop();
            statement.table($entity.table_ref()).if_exists().cascade();
            db.execute(backend.build(&statement)).await?;
        };
    }

    drop_entity!(data_grid_filter::Entity);
    drop_entity!(data_grid::Entity);
    drop_entity!(notification::Entity);
    drop_entity!(access_token::Entity);
    drop_entity!(account::Entity);
    drop_entity!(country::Entity);

    tracing::info!("database tables dropped");
    Ok(())
}

/// Parse the country seed file.
pub fn read_seed_file(path: &Path) -> anyhow::Result<Vec<CountryLoad>> {
    let content = std::fs::read_to_string(path)?;
    let entries: Vec<CountryLoad> = serde_json::from_str(&content)?;
    Ok(entries)
}

/// Import countries from the JSON seed file.
///
/// Idempotent: entries whose code already exists are skipped. Returns the
/// number of inserted rows.
pub async fn import_countries(db: &DatabaseConnection, path: &Path) -> anyhow::Result<usize> {
    let entries = read_seed_file(path)?;
    let txn = db.begin().await?;
    let mut inserted = 0usize;

    for entry in entries {
        let exists = country::Entity::find()
            .filter(country::Column::Code.eq(entry.code.as_str()))
            .one(&txn)
            .await?
            .is_some();
        if exists {
            continue;
        }
        country::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(entry.name),
            code: Set(entry.code),
            phone: Set(entry.phone),
            default: Set(false),
            svg_image: Set(entry.svg_image),
            created_at: Set(Utc::now()),
            last_modified_at: Set(None),
        }
        .insert(&txn)
        .await?;
        inserted += 1;
    }

    txn.commit().await?;
    tracing::info!(inserted, "country seed data imported");
    Ok(inserted)
}

/// Initialize the database.
///
/// Drops objects and tables when requested, creates tables then managed
/// objects, and finally loads seed data.
pub async fn init_db(
    db: &DatabaseConnection,
    seed_file: Option<&Path>,
    options: InitOptions,
) -> anyhow::Result<()> {
    if options.drop_objects {
        tracing::info!("dropping database objects");
        objects::drop_objects(db).await?;
        drop_tables(db).await?;
    }
    if options.create_objects {
        tracing::info!("creating database objects");
        create_tables(db).await?;
        objects::create_objects(db).await?;
    }
    if options.load_seed_data {
        tracing::info!("loading seed data");
        let path = seed_file.ok_or_else(|| {
            anyhow::anyhow!("seed data requested but no seed file configured")
        })?;
        import_countries(db, path).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_read_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"code": "CH", "name": "Switzerland", "phone": "41", "svg_image": "<svg/>"}},
                {{"code": "DE", "name": "Germany", "phone": "49", "svg_image": "<svg/>"}}
            ]"#
        )
        .unwrap();
        let entries = read_seed_file(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].code, "CH");
        assert_eq!(entries[1].name, "Germany");
    }

    #[test]
    fn test_read_seed_file_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(read_seed_file(file.path()).is_err());
    }
}
