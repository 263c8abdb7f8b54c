use serde::{Deserialize, Serialize};
use std::fmt;

pub type TaskId = u32;

/// The three board columns a task can sit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Todo,
    Doing,
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Todo, Status::Doing, Status::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::Doing => "doing",
            Status::Done => "done",
        }
    }

    /// Column heading shown on the board.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Todo => "TODO",
            Status::Doing => "DOING",
            Status::Done => "DONE",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Status::Todo => 0,
            Status::Doing => 1,
            Status::Done => 2,
        }
    }

    /// Accepts only the exact lowercase names "todo", "doing" and "done".
    pub fn parse_strict(raw: &str) -> Option<Status> {
        Status::ALL.into_iter().find(|s| s.as_str() == raw)
    }

    /// Maps loosely written statuses from legacy data onto a column.
    ///
    /// "in-progress", "in progress" and "inprogress" mean doing; anything
    /// unrecognized falls back to todo.
    pub fn normalize(raw: &str) -> Status {
        let lowered = raw.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "in-progress" | "in progress" | "inprogress" => Status::Doing,
            other => Status::parse_strict(other).unwrap_or(Status::Todo),
        }
    }

    pub fn next(&self) -> Status {
        Status::ALL[(self.index() + 1) % Status::ALL.len()]
    }

    pub fn prev(&self) -> Status {
        Status::ALL[(self.index() + Status::ALL.len() - 1) % Status::ALL.len()]
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: Status,
}

impl Task {
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        status: Status,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            status,
        }
    }
}
