//! Clarify command implementation.

use crate::cli::TaskArgs;
use crate::client::PomoTaskClient;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the clarify command.
pub async fn execute_clarify(
    args: TaskArgs,
    client: &PomoTaskClient,
    formatter: &Formatter,
) -> Result<()> {
    let result = client.clarify(&args.title()).await?;
    println!("{}", formatter.format_metadata(&result.task_context)?);
    Ok(())
}
