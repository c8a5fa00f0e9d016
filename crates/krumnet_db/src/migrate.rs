//! Versioned schema migrations.
//!
//! Migration sources live under `migrations/` as reversible up/down pairs and
//! are embedded at compile time. Execution is delegated to sqlx's migrator;
//! this module only adds pending/applied bookkeeping on top.

use sqlx::migrate::{MigrationType, Migrator};
use sqlx::{PgPool, Row};
use tracing::info;

use crate::error::{DbError, Result};

/// Embedded migration set.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// One migration's applied state, for the status listing.
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    pub version: i64,
    pub description: String,
    pub applied: bool,
}

/// Apply all pending migrations. Returns how many were applied.
pub async fn run_migrations(pool: &PgPool) -> Result<usize> {
    let applied = applied_versions(pool).await?;
    let pending = up_migrations()
        .filter(|version| !applied.contains(version))
        .count();

    MIGRATOR.run(pool).await?;

    info!(applied = pending, "migrations up to date");
    Ok(pending)
}

/// Revert the most recently applied migration. Returns its version.
pub async fn revert_last(pool: &PgPool) -> Result<i64> {
    let applied = applied_versions(pool).await?;
    let last = applied.last().copied().ok_or(DbError::NothingToRevert)?;
    let target = applied.iter().rev().nth(1).copied().unwrap_or(0);

    MIGRATOR.undo(pool, target).await?;

    info!(version = last, "reverted migration");
    Ok(last)
}

/// Applied state of every known migration, in version order.
///
/// Works against a database that has never been migrated.
pub async fn migration_status(pool: &PgPool) -> Result<Vec<MigrationStatus>> {
    let applied = applied_versions(pool).await?;

    Ok(MIGRATOR
        .iter()
        .filter(|migration| !matches!(migration.migration_type, MigrationType::ReversibleDown))
        .map(|migration| MigrationStatus {
            version: migration.version,
            description: migration.description.to_string(),
            applied: applied.contains(&migration.version),
        })
        .collect())
}

fn up_migrations() -> impl Iterator<Item = i64> {
    MIGRATOR
        .iter()
        .filter(|migration| !matches!(migration.migration_type, MigrationType::ReversibleDown))
        .map(|migration| migration.version)
}

/// Versions recorded in `_sqlx_migrations`, oldest first.
///
/// An absent bookkeeping table (error 42P01) reads as "nothing applied".
async fn applied_versions(pool: &PgPool) -> Result<Vec<i64>> {
    let rows = sqlx::query("select version from _sqlx_migrations order by version")
        .fetch_all(pool)
        .await;

    match rows {
        Ok(rows) => Ok(rows
            .iter()
            .map(|row| row.get::<i64, _>("version"))
            .collect()),
        Err(sqlx::Error::Database(err)) if err.code().as_deref() == Some("42P01") => {
            Ok(Vec::new())
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_migration_set_is_complete_and_ordered() {
        let versions: Vec<i64> = up_migrations().collect();
        assert_eq!(
            versions,
            vec![20200528095042, 20200529162707, 20200603123002]
        );
    }

    #[test]
    fn every_migration_is_reversible() {
        let ups = MIGRATOR
            .iter()
            .filter(|m| matches!(m.migration_type, MigrationType::ReversibleUp))
            .count();
        let downs = MIGRATOR
            .iter()
            .filter(|m| matches!(m.migration_type, MigrationType::ReversibleDown))
            .count();
        assert_eq!(ups, 3);
        assert_eq!(downs, 3);
    }
}
