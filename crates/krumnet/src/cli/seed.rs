//! Seed command: load the initial prompt data.

use anyhow::Result;
use krumnet_db::RecordStore;

pub async fn run() -> Result<()> {
    let resolution = super::resolve().await?;
    let store = RecordStore::open(&resolution.descriptor).await?;

    let seeded = krumnet_db::seed_initial_prompts(store.pool()).await?;
    store.close().await;

    println!("seeded {seeded} prompt(s)");
    Ok(())
}
