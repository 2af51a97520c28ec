//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// PomoTask CLI - Plan focus sessions with model-suggested task metadata.
#[derive(Debug, Parser)]
#[command(name = "pomotask")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Server URL (overrides the configured one)
    #[arg(short, long, global = true, env = "POMOTASK_SERVER")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (values only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Suggest scheduling metadata for a task
    Clarify(TaskArgs),

    /// Classify a task into a category
    Categorize(TaskArgs),

    /// Get a motivational quote
    Motivate(MotivateArgs),

    /// Check that the server is reachable
    Health,

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments naming a task.
#[derive(Debug, Parser)]
pub struct TaskArgs {
    /// Task title (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub task: Vec<String>,
}

impl TaskArgs {
    /// The task title as one string
    pub fn title(&self) -> String {
        self.task.join(" ")
    }
}

/// Arguments for the motivate command.
#[derive(Debug, Parser)]
pub struct MotivateArgs {
    /// Optional task the quote should be about
    pub task: Vec<String>,
}

impl MotivateArgs {
    /// The task title, if any words were given
    pub fn title(&self) -> Option<String> {
        if self.task.is_empty() {
            None
        } else {
            Some(self.task.join(" "))
        }
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_no_command_means_repl() {
        let cli = Cli::parse_from(["pomotask"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_clarify_joins_words() {
        let cli = Cli::parse_from(["pomotask", "clarify", "Go", "to", "the", "gym"]);
        match cli.command {
            Some(Command::Clarify(args)) => assert_eq!(args.title(), "Go to the gym"),
            _ => panic!("Expected Clarify command"),
        }
    }

    #[test]
    fn test_clarify_requires_task() {
        assert!(Cli::try_parse_from(["pomotask", "clarify"]).is_err());
    }

    #[test]
    fn test_motivate_task_is_optional() {
        let cli = Cli::parse_from(["pomotask", "motivate"]);
        match cli.command {
            Some(Command::Motivate(args)) => assert!(args.title().is_none()),
            _ => panic!("Expected Motivate command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "pomotask",
            "categorize",
            "Pay rent",
            "--format",
            "json",
            "--server",
            "http://127.0.0.1:4000",
        ]);
        assert!(matches!(cli.command, Some(Command::Categorize(_))));
        assert_eq!(cli.server.as_deref(), Some("http://127.0.0.1:4000"));

        let format: OutputFormat = cli.format.unwrap().into();
        assert_eq!(format, OutputFormat::Json);
    }
}
