//! Keeps the rendered board and the edit dialog in step with the store.

use tracing::{debug, info, warn};

use crate::board::{compute_columns, ColumnCards, RenderTarget};
use crate::dialog::{Dialog, DismissReason, EditForm};
use crate::error::StoreError;
use crate::store::TaskStore;
use crate::task::TaskId;

/// Where the current edit session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Closed,
    Open { dirty: bool },
}

/// Result of a dialog submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The task was updated and the dialog closed.
    Saved(TaskId),
    /// Field errors are showing; the dialog stays open.
    Rejected,
    /// There was nothing to save into.
    Ignored,
}

/// Drives a render target and a dialog from a [`TaskStore`] it owns.
pub struct BoardPresenter<R, D> {
    store: TaskStore,
    target: R,
    dialog: D,
    state: EditState,
}

impl<R: RenderTarget, D: Dialog> BoardPresenter<R, D> {
    pub fn new(store: TaskStore, target: R, dialog: D) -> Self {
        Self {
            store,
            target,
            dialog,
            state: EditState::Closed,
        }
    }

    /// Draws the board for the first time.
    pub fn start(&mut self) {
        info!(tasks = self.store.len(), "board started");
        self.render();
    }

    /// Regroups every task and repopulates the three columns.
    pub fn render(&mut self) {
        let columns = compute_columns(self.store.list());
        self.target.show_columns(ColumnCards::from_columns(&columns));
    }

    /// Click action bound to a card: starts editing `id` and opens the dialog.
    pub fn on_card_click(&mut self, id: TaskId) {
        if let Err(err) = self.store.begin_edit(id) {
            debug!(%err, "card click ignored");
            return;
        }
        let form = match self.store.find_by_id(id) {
            Ok(task) => EditForm::from_task(task),
            Err(err) => {
                debug!(%err, "card click ignored");
                self.store.end_edit();
                return;
            }
        };
        debug!(task_id = id, "edit started");
        self.dialog.open(form);
        self.state = EditState::Open { dirty: false };
    }

    pub fn on_field_edited(&mut self) {
        if let EditState::Open { .. } = self.state {
            self.state = EditState::Open { dirty: true };
        }
    }

    pub fn on_submit(&mut self, form: &EditForm) -> SubmitOutcome {
        let result = self
            .store
            .apply_edit(&form.title, &form.description, &form.status)
            .map(|task| task.id);
        match result {
            Ok(id) => {
                info!(task_id = id, "task updated");
                self.render();
                self.close_session();
                SubmitOutcome::Saved(id)
            }
            Err(StoreError::Validation(errors)) => {
                debug!(%errors, "edit rejected");
                self.dialog.show_errors(&errors);
                self.state = EditState::Open { dirty: true };
                SubmitOutcome::Rejected
            }
            Err(err) => {
                warn!(%err, "submit ignored");
                SubmitOutcome::Ignored
            }
        }
    }

    pub fn on_cancel(&mut self) {
        debug!(task_id = ?self.store.active_edit(), "edit cancelled");
        self.close_session();
    }

    pub fn on_dismiss(&mut self, reason: DismissReason) {
        debug!(task_id = ?self.store.active_edit(), ?reason, "dialog dismissed");
        self.close_session();
    }

    fn close_session(&mut self) {
        self.store.end_edit();
        self.dialog.close();
        self.state = EditState::Closed;
    }

    pub fn edit_state(&self) -> EditState {
        self.state
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn target(&self) -> &R {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut R {
        &mut self.target
    }

    pub fn dialog(&self) -> &D {
        &self.dialog
    }

    pub fn dialog_mut(&mut self) -> &mut D {
        &mut self.dialog
    }

    /// Both collaborators at once, for drawing.
    pub fn parts_mut(&mut self) -> (&mut R, &mut D) {
        (&mut self.target, &mut self.dialog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrors;

    #[derive(Default)]
    struct CountingTarget {
        renders: usize,
        last: ColumnCards,
    }

    impl RenderTarget for CountingTarget {
        fn show_columns(&mut self, cards: ColumnCards) {
            self.renders += 1;
            self.last = cards;
        }
    }

    #[derive(Default)]
    struct StubDialog {
        form: Option<EditForm>,
        errors: Option<ValidationErrors>,
    }

    impl Dialog for StubDialog {
        fn open(&mut self, initial: EditForm) {
            self.form = Some(initial);
            self.errors = None;
        }

        fn close(&mut self) {
            self.form = None;
        }

        fn show_errors(&mut self, errors: &ValidationErrors) {
            self.errors = Some(errors.clone());
        }

        fn is_open(&self) -> bool {
            self.form.is_some()
        }
    }

    fn presenter() -> BoardPresenter<CountingTarget, StubDialog> {
        let mut p = BoardPresenter::new(
            TaskStore::seeded(),
            CountingTarget::default(),
            StubDialog::default(),
        );
        p.start();
        p
    }

    #[test]
    fn start_renders_once() {
        let p = presenter();
        assert_eq!(p.target().renders, 1);
        assert_eq!(p.target().last.todo.len(), 1);
        assert_eq!(p.edit_state(), EditState::Closed);
    }

    #[test]
    fn click_on_unknown_card_keeps_dialog_closed() {
        let mut p = presenter();
        p.on_card_click(99);
        assert!(!p.dialog().is_open());
        assert_eq!(p.store().active_edit(), None);
        assert_eq!(p.edit_state(), EditState::Closed);
    }

    #[test]
    fn field_edit_marks_session_dirty_only_while_open() {
        let mut p = presenter();
        p.on_field_edited();
        assert_eq!(p.edit_state(), EditState::Closed);

        p.on_card_click(1);
        assert_eq!(p.edit_state(), EditState::Open { dirty: false });
        p.on_field_edited();
        assert_eq!(p.edit_state(), EditState::Open { dirty: true });
    }

    #[test]
    fn submit_without_session_is_ignored() {
        let mut p = presenter();
        let outcome = p.on_submit(&EditForm::new("x", "y", "done"));
        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert_eq!(p.target().renders, 1);
    }
}
