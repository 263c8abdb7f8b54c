//! Edit sessions driven through the presenter with recording collaborators.

use taskboard::board::{compute_columns, ColumnCards, RenderTarget};
use taskboard::dialog::{Dialog, DismissReason, EditForm};
use taskboard::error::{Field, ValidationErrors};
use taskboard::presenter::{BoardPresenter, EditState, SubmitOutcome};
use taskboard::store::TaskStore;
use taskboard::task::{Status, Task, TaskId};

#[derive(Default)]
struct RecordingTarget {
    frames: Vec<ColumnCards>,
}

impl RecordingTarget {
    fn last_ids(&self, status: Status) -> Vec<TaskId> {
        self.frames
            .last()
            .map(|cards| cards.get(status).iter().map(|c| c.task_id).collect())
            .unwrap_or_default()
    }
}

impl RenderTarget for RecordingTarget {
    fn show_columns(&mut self, cards: ColumnCards) {
        self.frames.push(cards);
    }
}

#[derive(Default)]
struct RecordingDialog {
    open: bool,
    opened_with: Vec<EditForm>,
    errors: Vec<ValidationErrors>,
    closes: usize,
}

impl Dialog for RecordingDialog {
    fn open(&mut self, initial: EditForm) {
        self.open = true;
        self.opened_with.push(initial);
    }

    fn close(&mut self) {
        self.open = false;
        self.closes += 1;
    }

    fn show_errors(&mut self, errors: &ValidationErrors) {
        self.errors.push(errors.clone());
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

type Board = BoardPresenter<RecordingTarget, RecordingDialog>;

fn abc_board() -> Board {
    let store = TaskStore::new(vec![
        Task::new(1, "A", "d1", Status::Todo),
        Task::new(2, "B", "d2", Status::Doing),
        Task::new(3, "C", "d3", Status::Done),
    ])
    .unwrap();
    let mut presenter =
        BoardPresenter::new(store, RecordingTarget::default(), RecordingDialog::default());
    presenter.start();
    presenter
}

#[test]
fn initial_render_puts_each_task_in_its_column() {
    let p = abc_board();
    assert_eq!(p.target().frames.len(), 1);
    assert_eq!(p.target().last_ids(Status::Todo), vec![1]);
    assert_eq!(p.target().last_ids(Status::Doing), vec![2]);
    assert_eq!(p.target().last_ids(Status::Done), vec![3]);
}

#[test]
fn card_click_opens_dialog_with_current_values() {
    let mut p = abc_board();
    p.on_card_click(2);
    assert_eq!(p.store().active_edit(), Some(2));
    assert_eq!(p.edit_state(), EditState::Open { dirty: false });
    assert_eq!(
        p.dialog().opened_with,
        vec![EditForm::new("B", "d2", "doing")]
    );
}

#[test]
fn valid_submit_updates_task_rerenders_and_closes() {
    let mut p = abc_board();
    p.on_card_click(2);
    p.on_field_edited();
    let outcome = p.on_submit(&EditForm::new("B2", "d2-new", "done"));

    assert_eq!(outcome, SubmitOutcome::Saved(2));
    assert_eq!(
        p.store().find_by_id(2).unwrap(),
        &Task::new(2, "B2", "d2-new", Status::Done)
    );
    assert_eq!(p.target().frames.len(), 2);
    assert!(p.target().last_ids(Status::Doing).is_empty());
    assert_eq!(p.target().last_ids(Status::Done), vec![2, 3]);
    assert!(!p.dialog().is_open());
    assert_eq!(p.store().active_edit(), None);
    assert_eq!(p.edit_state(), EditState::Closed);

    let columns = compute_columns(p.store().list());
    assert_eq!(columns.done.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 3]);
}

#[test]
fn invalid_submit_shows_field_errors_and_keeps_session() {
    let mut p = abc_board();
    p.on_card_click(2);
    let outcome = p.on_submit(&EditForm::new("", "x", "done"));

    assert_eq!(outcome, SubmitOutcome::Rejected);
    assert_eq!(
        p.store().find_by_id(2).unwrap(),
        &Task::new(2, "B", "d2", Status::Doing)
    );
    assert!(p.dialog().is_open());
    assert_eq!(p.store().active_edit(), Some(2));
    assert_eq!(p.edit_state(), EditState::Open { dirty: true });
    assert_eq!(p.target().frames.len(), 1);

    let errors = p.dialog().errors.last().unwrap();
    assert_eq!(errors.message_for(Field::Title), Some("Title is required."));
    assert_eq!(errors.message_for(Field::Description), None);
}

#[test]
fn corrected_resubmit_after_rejection_saves() {
    let mut p = abc_board();
    p.on_card_click(1);
    assert_eq!(
        p.on_submit(&EditForm::new("A", "   ", "todo")),
        SubmitOutcome::Rejected
    );
    assert_eq!(
        p.on_submit(&EditForm::new("A", "fixed", "todo")),
        SubmitOutcome::Saved(1)
    );
    assert_eq!(p.store().find_by_id(1).unwrap().description, "fixed");
}

#[test]
fn cancel_and_dismiss_never_mutate() {
    let closers: [fn(&mut Board); 4] = [
        |p| p.on_cancel(),
        |p| p.on_dismiss(DismissReason::Backdrop),
        |p| p.on_dismiss(DismissReason::EscapeKey),
        |p| p.on_dismiss(DismissReason::CloseButton),
    ];
    for close in closers {
        let mut p = abc_board();
        let before: Vec<Task> = p.store().list().cloned().collect();
        p.on_card_click(3);
        p.on_field_edited();
        close(&mut p);

        assert_eq!(p.store().list().cloned().collect::<Vec<_>>(), before);
        assert!(!p.dialog().is_open());
        assert_eq!(p.dialog().closes, 1);
        assert_eq!(p.store().active_edit(), None);
        assert_eq!(p.edit_state(), EditState::Closed);
    }
}

#[test]
fn submit_after_close_is_ignored() {
    let mut p = abc_board();
    p.on_card_click(1);
    p.on_cancel();
    assert_eq!(
        p.on_submit(&EditForm::new("late", "late", "done")),
        SubmitOutcome::Ignored
    );
    assert_eq!(p.store().find_by_id(1).unwrap().title, "A");
}

#[test]
fn sessions_cycle_indefinitely() {
    let mut p = abc_board();
    for round in 0..3 {
        p.on_card_click(1);
        let title = format!("A{round}");
        assert_eq!(
            p.on_submit(&EditForm::new(title.as_str(), "d1", "todo")),
            SubmitOutcome::Saved(1)
        );
        assert_eq!(p.store().find_by_id(1).unwrap().title, title);
    }
    assert_eq!(p.target().frames.len(), 4);
}
