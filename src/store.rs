use std::collections::HashSet;

use tracing::debug;

use crate::error::{Field, StoreError, ValidationErrors};
use crate::task::{Status, Task, TaskId};

/// Owns the board's tasks and the id of the task currently being edited.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    active_edit: Option<TaskId>,
}

impl TaskStore {
    /// Seeds the store once; tasks keep the given order for the whole session.
    pub fn new(tasks: Vec<Task>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            if !seen.insert(task.id) {
                return Err(StoreError::DuplicateId(task.id));
            }
            validate_text(&task.title, &task.description).into_result()?;
        }
        debug!(count = tasks.len(), "task store seeded");
        Ok(Self {
            tasks,
            active_edit: None,
        })
    }

    /// Store holding the built-in starter tasks.
    pub fn seeded() -> Self {
        Self {
            tasks: default_tasks(),
            active_edit: None,
        }
    }

    pub fn list(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn find_by_id(&self, id: TaskId) -> Result<&Task, StoreError> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    pub fn active_edit(&self) -> Option<TaskId> {
        self.active_edit
    }

    pub fn begin_edit(&mut self, id: TaskId) -> Result<(), StoreError> {
        self.find_by_id(id)?;
        self.active_edit = Some(id);
        Ok(())
    }

    pub fn end_edit(&mut self) {
        self.active_edit = None;
    }

    /// Replaces title, description and status of the task being edited.
    ///
    /// Nothing is written unless every field is valid. The edit session is
    /// left open either way; closing it is up to the caller.
    pub fn apply_edit(
        &mut self,
        title: &str,
        description: &str,
        status: &str,
    ) -> Result<&Task, StoreError> {
        let id = self.active_edit.ok_or(StoreError::NoActiveEdit)?;

        let mut errors = validate_text(title, description);
        let parsed = Status::parse_strict(status);
        if parsed.is_none() {
            errors.push(Field::Status, "Status must be todo, doing, or done.");
        }
        errors.into_result()?;

        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        task.title = title.trim().to_string();
        task.description = description.trim().to_string();
        if let Some(status) = parsed {
            task.status = status;
        }
        Ok(task)
    }
}

fn validate_text(title: &str, description: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if title.trim().is_empty() {
        errors.push(Field::Title, "Title is required.");
    }
    if description.trim().is_empty() {
        errors.push(Field::Description, "Description is required.");
    }
    errors
}

pub fn default_tasks() -> Vec<Task> {
    vec![
        Task::new(1, "Launch Epic Career", "Create a killer Resume", Status::Todo),
        Task::new(
            2,
            "Master JavaScript",
            "Get comfortable with the fundamentals",
            Status::Doing,
        ),
        Task::new(
            3,
            "Contribute to Open Source Projects",
            "Gain practical experience and collaborate with others",
            Status::Done,
        ),
    ]
}
