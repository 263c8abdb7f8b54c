use crate::error::ValidationErrors;
use crate::task::Task;

/// Field values shown in, or submitted from, the edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    pub title: String,
    pub description: String,
    pub status: String,
}

impl EditForm {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: status.into(),
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Self::new(
            task.title.clone(),
            task.description.clone(),
            task.status.as_str(),
        )
    }
}

/// How the user left the dialog without saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    CloseButton,
    Backdrop,
    EscapeKey,
}

/// A modal edit form.
///
/// Submit and dismiss events are delivered to the presenter by whoever
/// owns the event loop; the dialog itself only shows state.
pub trait Dialog {
    /// Populates the fields with `initial` and shows the dialog.
    fn open(&mut self, initial: EditForm);

    fn close(&mut self);

    /// Shows per-field messages while staying open.
    fn show_errors(&mut self, errors: &ValidationErrors);

    fn is_open(&self) -> bool;
}
