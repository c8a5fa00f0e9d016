//! Migration commands: apply, revert, status.

use anyhow::Result;
use krumnet_db::RecordStore;

pub async fn run() -> Result<()> {
    let resolution = super::resolve().await?;
    let store = RecordStore::open(&resolution.descriptor).await?;

    let applied = krumnet_db::run_migrations(store.pool()).await?;
    store.close().await;

    if applied == 0 {
        println!("schema already up to date");
    } else {
        println!("applied {applied} migration(s)");
    }
    Ok(())
}

pub async fn revert() -> Result<()> {
    let resolution = super::resolve().await?;
    let store = RecordStore::open(&resolution.descriptor).await?;

    let version = krumnet_db::revert_last(store.pool()).await?;
    store.close().await;

    println!("reverted migration {version}");
    Ok(())
}

pub async fn status() -> Result<()> {
    let resolution = super::resolve().await?;
    let store = RecordStore::open(&resolution.descriptor).await?;

    let statuses = krumnet_db::migration_status(store.pool()).await?;
    store.close().await;

    for migration in statuses {
        let marker = if migration.applied { "applied" } else { "pending" };
        println!("{:<16} {:<8} {}", migration.version, marker, migration.description);
    }
    Ok(())
}
