//! Task module - the ephemeral task list the pipeline's records attach to
//!
//! Tasks live only in client memory. The board owns them; the extraction
//! pipeline never does. It only produces records the board stores.

use crate::{CategoryRecord, MetadataRecord};
use std::fmt;
use thiserror::Error;

/// Default maximum title length (characters)
pub const DEFAULT_MAX_TITLE_LENGTH: usize = 50;

/// Unique identifier for a task based on UUIDv7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u128);

impl TaskId {
    /// Generate a new UUIDv7-based TaskId
    ///
    /// # Examples
    ///
    /// ```
    /// use pomotask_domain::TaskId;
    ///
    /// let id = TaskId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a TaskId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a TaskId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid task id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Completion state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskStatus {
    /// Not done yet
    #[default]
    Pending,
    /// Done
    Done,
}

impl TaskStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Done => "done",
        }
    }

    /// The opposite status
    pub fn toggled(&self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Pending,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// What needs to be done
    pub title: String,

    /// Completion state
    pub status: TaskStatus,

    /// Focus sessions spent on the task
    pub sessions: u32,

    /// Cached metadata suggestions; once set, never refetched
    pub ai_suggestions: Option<MetadataRecord>,

    /// Category shown on the task (model-assigned or user-chosen)
    pub category: Option<String>,

    /// Full classification from the last categorize call
    pub category_details: Option<CategoryRecord>,
}

impl Task {
    fn new(title: String) -> Self {
        Self {
            id: TaskId::new(),
            title,
            status: TaskStatus::Pending,
            sessions: 0,
            ai_suggestions: None,
            category: None,
            category_details: None,
        }
    }
}

/// Errors raised by board operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// Title is empty after trimming
    #[error("Task title cannot be empty")]
    EmptyTitle,
    /// Title exceeds the board's limit
    #[error("Task title too long: {len} chars (max: {max})")]
    TitleTooLong {
        /// Title length in characters
        len: usize,
        /// Configured maximum
        max: usize,
    },
    /// No task with that id
    #[error("Task not found: {0}")]
    NotFound(TaskId),
    /// No task at that position
    #[error("No task at position {index} (board has {len})")]
    InvalidPosition {
        /// Requested position
        index: usize,
        /// Number of tasks on the board
        len: usize,
    },
    /// Suggestions were already attached to the task
    #[error("Suggestions already cached for task {0}")]
    SuggestionsCached(TaskId),
}

/// Ordered, in-memory list of tasks
#[derive(Debug, Clone)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    max_title_length: usize,
}

impl Default for TaskBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskBoard {
    /// Create an empty board with the default title limit
    pub fn new() -> Self {
        Self::with_max_title_length(DEFAULT_MAX_TITLE_LENGTH)
    }

    /// Create an empty board with a custom title limit
    pub fn with_max_title_length(max_title_length: usize) -> Self {
        Self {
            tasks: Vec::new(),
            max_title_length,
        }
    }

    fn check_title(&self, title: &str) -> Result<String, TaskError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        let len = title.chars().count();
        if len > self.max_title_length {
            return Err(TaskError::TitleTooLong {
                len,
                max: self.max_title_length,
            });
        }
        Ok(title.to_string())
    }

    /// Add a pending task at the end of the board
    pub fn add(&mut self, title: &str) -> Result<TaskId, TaskError> {
        let task = Task::new(self.check_title(title)?);
        let id = task.id;
        self.tasks.push(task);
        Ok(id)
    }

    /// Get a task by id
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: TaskId) -> Result<&mut Task, TaskError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))
    }

    /// Id of the task at a zero-based position
    pub fn id_at(&self, index: usize) -> Result<TaskId, TaskError> {
        self.tasks
            .get(index)
            .map(|t| t.id)
            .ok_or(TaskError::InvalidPosition {
                index,
                len: self.tasks.len(),
            })
    }

    /// Change a task's title
    pub fn rename(&mut self, id: TaskId, title: &str) -> Result<(), TaskError> {
        let title = self.check_title(title)?;
        self.get_mut(id)?.title = title;
        Ok(())
    }

    /// Flip a task between pending and done.
    ///
    /// Returns `true` when the task has just been completed.
    pub fn toggle_status(&mut self, id: TaskId) -> Result<bool, TaskError> {
        let task = self.get_mut(id)?;
        let was_pending = task.status == TaskStatus::Pending;
        task.status = task.status.toggled();
        Ok(was_pending)
    }

    /// Count one more focus session on a task
    pub fn record_session(&mut self, id: TaskId) -> Result<u32, TaskError> {
        let task = self.get_mut(id)?;
        task.sessions += 1;
        Ok(task.sessions)
    }

    /// Remove a task from the board
    pub fn remove(&mut self, id: TaskId) -> Result<Task, TaskError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;
        Ok(self.tasks.remove(index))
    }

    /// Move the task at `from` so it ends up at `to` (zero-based)
    pub fn move_task(&mut self, from: usize, to: usize) -> Result<(), TaskError> {
        let len = self.tasks.len();
        if from >= len {
            return Err(TaskError::InvalidPosition { index: from, len });
        }
        if to >= len {
            return Err(TaskError::InvalidPosition { index: to, len });
        }
        if from != to {
            let task = self.tasks.remove(from);
            self.tasks.insert(to, task);
        }
        Ok(())
    }

    /// Whether metadata suggestions still have to be fetched for a task
    pub fn needs_suggestions(&self, id: TaskId) -> Result<bool, TaskError> {
        self.get(id)
            .map(|t| t.ai_suggestions.is_none())
            .ok_or(TaskError::NotFound(id))
    }

    /// Cache metadata suggestions on a task. Refuses to overwrite.
    pub fn attach_suggestions(
        &mut self,
        id: TaskId,
        record: MetadataRecord,
    ) -> Result<(), TaskError> {
        let task = self.get_mut(id)?;
        if task.ai_suggestions.is_some() {
            return Err(TaskError::SuggestionsCached(id));
        }
        task.ai_suggestions = Some(record);
        Ok(())
    }

    /// Store a classification, replacing any earlier one
    pub fn attach_category(&mut self, id: TaskId, record: CategoryRecord) -> Result<(), TaskError> {
        let task = self.get_mut(id)?;
        task.category = Some(record.category.clone());
        task.category_details = Some(record);
        Ok(())
    }

    /// Override the displayed category by hand. Blank clears it.
    pub fn set_category(&mut self, id: TaskId, category: Option<&str>) -> Result<(), TaskError> {
        let task = self.get_mut(id)?;
        task.category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        Ok(())
    }

    /// Tasks in board order
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Number of tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the board is empty
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
