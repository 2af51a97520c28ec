//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! The REPL owns an in-memory [`TaskBoard`]. Tasks are addressed by their
//! 1-based position in `list` output.

use crate::client::PomoTaskClient;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use pomotask_domain::{TaskBoard, TaskId};
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use tracing::debug;

/// Run the interactive REPL.
pub async fn run_repl(config: &Config, client: &PomoTaskClient, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.info("PomoTask REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    let editor_config = EditorConfig::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    let history_path = Config::history_path()?;
    let _ = editor.load_history(&history_path);

    let mut board = TaskBoard::new();

    loop {
        match editor.readline("pomotask> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, &mut board, client, formatter).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e)))
}

/// A parsed REPL line. Positions are 1-based.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    List,
    Add(String),
    Edit(usize, String),
    Done(usize),
    Delete(usize),
    Move(usize, usize),
    Session(usize),
    Suggest(usize),
    Categorize(usize),
    SetCategory(usize, Option<String>),
    Quote(Option<usize>),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "list" | "ls" => Ok(ReplCommand::List),
        "add" => {
            if rest.is_empty() {
                return Err(usage("add <title>"));
            }
            Ok(ReplCommand::Add(rest.to_string()))
        }
        "edit" => {
            let (position, title) = split_position(rest, "edit <n> <title>")?;
            if title.is_empty() {
                return Err(usage("edit <n> <title>"));
            }
            Ok(ReplCommand::Edit(position, title.to_string()))
        }
        "done" => Ok(ReplCommand::Done(parse_position(rest, "done <n>")?)),
        "delete" | "rm" => Ok(ReplCommand::Delete(parse_position(rest, "delete <n>")?)),
        "move" => {
            let (from, to) = split_position(rest, "move <from> <to>")?;
            Ok(ReplCommand::Move(from, parse_position(to, "move <from> <to>")?))
        }
        "session" => Ok(ReplCommand::Session(parse_position(rest, "session <n>")?)),
        "suggest" => Ok(ReplCommand::Suggest(parse_position(rest, "suggest <n>")?)),
        "categorize" => Ok(ReplCommand::Categorize(parse_position(rest, "categorize <n>")?)),
        "category" => {
            let (position, name) = split_position(rest, "category <n> <name|clear>")?;
            let name = match name {
                "" => return Err(usage("category <n> <name|clear>")),
                "clear" => None,
                name => Some(name.to_string()),
            };
            Ok(ReplCommand::SetCategory(position, name))
        }
        "quote" => {
            if rest.is_empty() {
                Ok(ReplCommand::Quote(None))
            } else {
                Ok(ReplCommand::Quote(Some(parse_position(rest, "quote [n]")?)))
            }
        }
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            word
        ))),
    }
}

fn usage(text: &str) -> CliError {
    CliError::InvalidInput(format!("Usage: {}", text))
}

/// Parse a 1-based position.
fn parse_position(arg: &str, usage_text: &str) -> Result<usize> {
    match arg.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(usage(usage_text)),
    }
}

/// Split a leading position from the rest of the arguments.
fn split_position<'a>(args: &'a str, usage_text: &str) -> Result<(usize, &'a str)> {
    let (first, rest) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
    Ok((parse_position(first, usage_text)?, rest.trim()))
}

fn task_at(board: &TaskBoard, position: usize) -> Result<TaskId> {
    Ok(board.id_at(position - 1)?)
}

fn title_of(board: &TaskBoard, id: TaskId) -> String {
    board.get(id).map(|t| t.title.clone()).unwrap_or_default()
}

/// Execute a board or server command.
async fn execute_repl_command(
    cmd: ReplCommand,
    board: &mut TaskBoard,
    client: &PomoTaskClient,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::Suggest(position) => {
            let id = task_at(board, position)?;
            if board.needs_suggestions(id)? {
                let title = title_of(board, id);
                debug!("Fetching suggestions for '{}'", title);
                let result = client.clarify(&title).await?;
                board.attach_suggestions(id, result.task_context)?;
            }
            if let Some(record) = board.get(id).and_then(|t| t.ai_suggestions.as_ref()) {
                println!("{}", formatter.format_metadata(record)?);
            }
        }
        ReplCommand::Categorize(position) => {
            let id = task_at(board, position)?;
            let result = client.categorize(&title_of(board, id)).await?;
            let record = result.record();
            println!("{}", formatter.format_category(&record)?);
            board.attach_category(id, record)?;
        }
        ReplCommand::Quote(position) => {
            let title = match position {
                Some(position) => Some(title_of(board, task_at(board, position)?)),
                None => None,
            };
            let quote = client.motivate(title.as_deref()).await?;
            println!("{}", formatter.format_quote(&quote)?);
        }
        cmd => println!("{}", apply_board_command(cmd, board, formatter)?),
    }

    Ok(())
}

/// Apply a command that only touches the board, returning what to print.
fn apply_board_command(cmd: ReplCommand, board: &mut TaskBoard, formatter: &Formatter) -> Result<String> {
    let message = match cmd {
        ReplCommand::List => return formatter.format_tasks(board),
        ReplCommand::Add(title) => {
            board.add(&title)?;
            formatter.success(&format!("Added task #{}", board.len()))
        }
        ReplCommand::Edit(position, title) => {
            let id = task_at(board, position)?;
            board.rename(id, &title)?;
            formatter.success(&format!("Renamed task #{}", position))
        }
        ReplCommand::Done(position) => {
            let id = task_at(board, position)?;
            if board.toggle_status(id)? {
                formatter.success(&format!("Completed task #{}", position))
            } else {
                formatter.info(&format!("Reopened task #{}", position))
            }
        }
        ReplCommand::Delete(position) => {
            let id = task_at(board, position)?;
            let task = board.remove(id)?;
            formatter.success(&format!("Deleted '{}'", task.title))
        }
        ReplCommand::Move(from, to) => {
            board.move_task(from - 1, to - 1)?;
            formatter.success(&format!("Moved task #{} to #{}", from, to))
        }
        ReplCommand::Session(position) => {
            let id = task_at(board, position)?;
            let sessions = board.record_session(id)?;
            formatter.success(&format!("Task #{} has {} focus session(s)", position, sessions))
        }
        ReplCommand::SetCategory(position, name) => {
            let id = task_at(board, position)?;
            board.set_category(id, name.as_deref())?;
            match name {
                Some(name) => formatter.success(&format!("Task #{} filed under {}", position, name)),
                None => formatter.info(&format!("Cleared category of task #{}", position)),
            }
        }
        other => {
            return Err(CliError::InvalidInput(format!(
                "{:?} is not a board command",
                other
            )))
        }
    };
    Ok(message)
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  add <title>                - Add a task");
    println!("  list, ls                   - Show the board");
    println!("  edit <n> <title>           - Rename task n");
    println!("  done <n>                   - Toggle task n between pending and done");
    println!("  delete, rm <n>             - Delete task n");
    println!("  move <from> <to>           - Reorder tasks");
    println!("  session <n>                - Count a focus session on task n");
    println!("  suggest <n>                - Fetch metadata suggestions (cached per task)");
    println!("  categorize <n>             - Ask the server to categorize task n");
    println!("  category <n> <name|clear>  - Set or clear the category by hand");
    println!("  quote [n]                  - Get a motivational quote");
    println!("  help, ?                    - Show this help");
    println!("  exit, quit, q              - Exit REPL");
    println!();
}
