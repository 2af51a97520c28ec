//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use pomotask_domain::metadata::label_for;
use pomotask_domain::{CategoryRecord, MetadataRecord, Task, TaskBoard};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format task metadata.
    ///
    /// Tables show the human-readable label of each key; JSON keeps the
    /// wire names.
    pub fn format_metadata(&self, record: &MetadataRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Quiet => Ok(record
                .iter()
                .map(|(_, value)| value)
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let rows = record.iter().map(|(key, value)| (label_for(key.as_str()), value));
                Ok(self.key_value_table(rows))
            }
        }
    }

    /// Format a merged category classification.
    pub fn format_category(&self, record: &CategoryRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Quiet => Ok(record.category.clone()),
            OutputFormat::Table => {
                let alternatives = record.alternatives.join(", ");
                let mut rows = vec![("Category", record.category.as_str())];
                if let Some(confidence) = &record.confidence {
                    rows.push(("Confidence", confidence.as_str()));
                }
                if let Some(rationale) = &record.rationale {
                    rows.push(("Rationale", rationale.as_str()));
                }
                if !alternatives.is_empty() {
                    rows.push(("Alternatives", alternatives.as_str()));
                }
                Ok(self.key_value_table(rows.into_iter()))
            }
        }
    }

    /// Format a motivational quote.
    pub fn format_quote(&self, quote: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(
                &serde_json::json!({ "quote": quote }),
            )?),
            OutputFormat::Quiet => Ok(quote.to_string()),
            OutputFormat::Table => Ok(self.colorize(&format!("\u{201c}{}\u{201d}", quote), "magenta")),
        }
    }

    /// Format the task board.
    pub fn format_tasks(&self, board: &TaskBoard) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_tasks_json(board),
            OutputFormat::Table => self.format_tasks_table(board),
            OutputFormat::Quiet => Ok(board
                .iter()
                .map(|t| t.title.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_tasks_json(&self, board: &TaskBoard) -> Result<String> {
        let tasks: Vec<serde_json::Value> = board
            .iter()
            .map(|t| {
                serde_json::json!({
                    "id": t.id.to_string(),
                    "title": t.title,
                    "status": t.status.as_str(),
                    "sessions": t.sessions,
                    "category": t.category,
                    "ai_suggestions": t.ai_suggestions,
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&tasks)?)
    }

    fn format_tasks_table(&self, board: &TaskBoard) -> Result<String> {
        if board.is_empty() {
            return Ok(self.colorize("No tasks yet. Use 'add <title>' to create one.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Task", "Status", "Sessions", "Category", "Suggestions"]);

        for (index, task) in board.iter().enumerate() {
            builder.push_record([
                (index + 1).to_string(),
                task.title.clone(),
                task.status.as_str().to_string(),
                task.sessions.to_string(),
                task.category.clone().unwrap_or_default(),
                suggestion_summary(task),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        Ok(table.to_string())
    }

    fn key_value_table<'a>(&self, rows: impl Iterator<Item = (&'a str, &'a str)>) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (label, value) in rows {
            builder.push_record([label, value]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn suggestion_summary(task: &Task) -> String {
    match &task.ai_suggestions {
        Some(record) => record
            .labeled()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("; "),
        None => String::new(),
    }
}
