//! Categorize command implementation.

use crate::cli::TaskArgs;
use crate::client::PomoTaskClient;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the categorize command.
///
/// The server's top-level fields and any JSON buried in its description are
/// merged into one record before display.
pub async fn execute_categorize(
    args: TaskArgs,
    client: &PomoTaskClient,
    formatter: &Formatter,
) -> Result<()> {
    let result = client.categorize(&args.title()).await?;
    println!("{}", formatter.format_category(&result.record())?);
    Ok(())
}
