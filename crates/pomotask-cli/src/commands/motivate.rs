//! Motivate command implementation.

use crate::cli::MotivateArgs;
use crate::client::PomoTaskClient;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the motivate command.
pub async fn execute_motivate(
    args: MotivateArgs,
    client: &PomoTaskClient,
    formatter: &Formatter,
) -> Result<()> {
    let title = args.title();
    let quote = client.motivate(title.as_deref()).await?;
    println!("{}", formatter.format_quote(&quote)?);
    Ok(())
}
