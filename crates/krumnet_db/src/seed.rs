//! Data seeds.

use sqlx::PgPool;
use tracing::info;

use crate::error::Result;

/// Marker distinguishing seeded prompt rows from user-created ones.
pub const SEED_SOURCE: &str = "initial-import";

const INITIAL_PROMPTS: &str = include_str!("../seeds/add_initial_prompts.sql");

/// Load the initial prompt set, replacing any previously seeded rows.
///
/// Runs in one transaction so a failed seed leaves the old rows in place.
pub async fn seed_initial_prompts(pool: &PgPool) -> Result<u64> {
    let mut tx = pool.begin().await?;

    let deleted = sqlx::query("delete from krumnet.prompts where source = $1")
        .bind(SEED_SOURCE)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    info!(deleted, source = SEED_SOURCE, "cleared previously seeded prompts");

    let inserted = sqlx::query(INITIAL_PROMPTS)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    info!(inserted, "seeded initial prompts");
    Ok(inserted)
}
