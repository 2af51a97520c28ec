//! Health command implementation.

use crate::client::PomoTaskClient;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the health command.
pub async fn execute_health(client: &PomoTaskClient, formatter: &Formatter) -> Result<()> {
    let health = client.health().await?;
    println!(
        "{}",
        formatter.success(&format!(
            "{} ({}, {})",
            health.message,
            health.status,
            client.base_url()
        ))
    );
    Ok(())
}
