//! Print the resolved connection configuration and where it came from.

use anyhow::Result;

pub async fn run(json: bool) -> Result<()> {
    let resolution = super::resolve().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution.descriptor)?);
    } else {
        println!("source: {}", resolution.source);
        println!("connection: {}", resolution.descriptor);
    }
    Ok(())
}
