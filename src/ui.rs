use crate::board::{Card, ColumnCards, RenderTarget};
use crate::dialog::{Dialog, DismissReason, EditForm};
use crate::error::{Field, ValidationErrors};
use crate::presenter::{BoardPresenter, SubmitOutcome};
use crate::task::{Status, TaskId};
use crossterm::{
    cursor::Show,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{self, Write};

pub type TerminalPresenter = BoardPresenter<TerminalBoard, FormDialog>;

const BOARD_HINTS: &str = " ←/→/↑/↓ move   Enter edit   click card edit   q quit";
const DIALOG_HINTS: &str =
    " Tab next field   ←/→ change status   Enter save   Esc close   click outside close";

/// Three-column board drawn with ratatui.
#[derive(Debug, Default)]
pub struct TerminalBoard {
    cards: ColumnCards,
    pub selected_status: usize,
    pub selected_task: usize,
    hit_areas: Vec<(Rect, TaskId)>,
}

impl RenderTarget for TerminalBoard {
    fn show_columns(&mut self, cards: ColumnCards) {
        self.cards = cards;
        self.clamp_task();
    }
}

impl TerminalBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &ColumnCards {
        &self.cards
    }

    fn column(&self, index: usize) -> &[Card] {
        self.cards.get(Status::ALL[index])
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.column(self.selected_status).get(self.selected_task)
    }

    pub fn move_left(&mut self) {
        if self.selected_status > 0 {
            self.selected_status -= 1;
            self.clamp_task();
        }
    }

    pub fn move_right(&mut self) {
        if self.selected_status < Status::ALL.len() - 1 {
            self.selected_status += 1;
            self.clamp_task();
        }
    }

    pub fn move_up(&mut self) {
        if self.selected_task > 0 {
            self.selected_task -= 1;
        }
    }

    pub fn move_down(&mut self) {
        let max_tasks = self.column(self.selected_status).len();
        if self.selected_task + 1 < max_tasks {
            self.selected_task += 1;
        }
    }

    /// Moves the cursor onto the card for `id`, wherever it is now.
    pub fn select_task(&mut self, id: TaskId) {
        for (i, status) in Status::ALL.iter().enumerate() {
            if let Some(row) = self.cards.get(*status).iter().position(|c| c.task_id == id) {
                self.selected_status = i;
                self.selected_task = row;
                return;
            }
        }
    }

    /// The card drawn at a screen cell during the last frame.
    pub fn card_at(&self, column: u16, row: u16) -> Option<TaskId> {
        let pos = Position::new(column, row);
        self.hit_areas
            .iter()
            .find(|(area, _)| area.contains(pos))
            .map(|(_, id)| *id)
    }

    fn clamp_task(&mut self) {
        let len = self.column(self.selected_status).len();
        self.selected_task = self.selected_task.min(len.saturating_sub(1));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Title,
    Description,
    Status,
    Save,
    Cancel,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Title,
        Focus::Description,
        Focus::Status,
        Focus::Save,
        Focus::Cancel,
    ];

    fn position(self) -> usize {
        Focus::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Focus {
        Focus::ORDER[(self.position() + 1) % Focus::ORDER.len()]
    }

    fn prev(self) -> Focus {
        Focus::ORDER[(self.position() + Focus::ORDER.len() - 1) % Focus::ORDER.len()]
    }
}

impl From<Field> for Focus {
    fn from(field: Field) -> Self {
        match field {
            Field::Title => Focus::Title,
            Field::Description => Focus::Description,
            Field::Status => Focus::Status,
        }
    }
}

/// What the user did inside the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    Edited,
    Submit(EditForm),
    Cancel,
    Dismiss(DismissReason),
}

/// Modal edit form drawn over the board.
#[derive(Debug)]
pub struct FormDialog {
    open: bool,
    title: String,
    description: String,
    status: Status,
    focus: Focus,
    errors: ValidationErrors,
    area: Option<Rect>,
    close_area: Option<Rect>,
}

impl Default for FormDialog {
    fn default() -> Self {
        Self {
            open: false,
            title: String::new(),
            description: String::new(),
            status: Status::Todo,
            focus: Focus::Title,
            errors: ValidationErrors::new(),
            area: None,
            close_area: None,
        }
    }
}

impl Dialog for FormDialog {
    fn open(&mut self, initial: EditForm) {
        self.title = initial.title;
        self.description = initial.description;
        self.status = Status::normalize(&initial.status);
        self.focus = Focus::Title;
        self.errors = ValidationErrors::new();
        self.open = true;
    }

    fn close(&mut self) {
        self.open = false;
        self.errors = ValidationErrors::new();
        self.area = None;
        self.close_area = None;
    }

    fn show_errors(&mut self, errors: &ValidationErrors) {
        if let Some(first) = errors.iter().next() {
            self.focus = first.field.into();
        }
        self.errors = errors.clone();
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

impl FormDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> EditForm {
        EditForm::new(
            self.title.clone(),
            self.description.clone(),
            self.status.as_str(),
        )
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<DialogEvent> {
        if !self.open {
            return None;
        }
        match key.code {
            KeyCode::Esc => Some(DialogEvent::Dismiss(DismissReason::EscapeKey)),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::Enter => match self.focus {
                Focus::Cancel => Some(DialogEvent::Cancel),
                _ => Some(DialogEvent::Submit(self.form())),
            },
            KeyCode::Left | KeyCode::Right => match self.focus {
                Focus::Status => {
                    self.status = if key.code == KeyCode::Left {
                        self.status.prev()
                    } else {
                        self.status.next()
                    };
                    Some(DialogEvent::Edited)
                }
                Focus::Save => {
                    self.focus = Focus::Cancel;
                    None
                }
                Focus::Cancel => {
                    self.focus = Focus::Save;
                    None
                }
                _ => None,
            },
            KeyCode::Backspace => self
                .focused_text_mut()
                .and_then(|text| text.pop())
                .map(|_| DialogEvent::Edited),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let text = self.focused_text_mut()?;
                text.push(c);
                Some(DialogEvent::Edited)
            }
            _ => None,
        }
    }

    /// Left click at a screen cell while the dialog is showing.
    pub fn handle_click(&self, column: u16, row: u16) -> Option<DialogEvent> {
        if !self.open {
            return None;
        }
        let pos = Position::new(column, row);
        if self.close_area.is_some_and(|area| area.contains(pos)) {
            return Some(DialogEvent::Dismiss(DismissReason::CloseButton));
        }
        match self.area {
            Some(area) if !area.contains(pos) => {
                Some(DialogEvent::Dismiss(DismissReason::Backdrop))
            }
            _ => None,
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Title => Some(&mut self.title),
            Focus::Description => Some(&mut self.description),
            _ => None,
        }
    }
}

/// Raw mode and the alternate screen, undone on drop.
///
/// Restoring is best effort: every step runs even if an earlier one fails.
pub struct TerminalRestore<W: Write> {
    out: W,
    mouse: bool,
}

impl<W: Write> TerminalRestore<W> {
    pub fn enter(out: W, mouse: bool) -> io::Result<Self> {
        enable_raw_mode()?;
        // From here on an early return drops the guard and restores.
        let mut guard = Self::new(out, mouse);
        execute!(guard.out, EnterAlternateScreen)?;
        if mouse {
            execute!(guard.out, EnableMouseCapture)?;
        }
        Ok(guard)
    }

    fn new(out: W, mouse: bool) -> Self {
        Self { out, mouse }
    }
}

impl<W: Write> Drop for TerminalRestore<W> {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        if self.mouse {
            let _ = execute!(self.out, DisableMouseCapture);
        }
        let _ = execute!(self.out, LeaveAlternateScreen, Show);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    presenter: &mut TerminalPresenter,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| {
            let (board, dialog) = presenter.parts_mut();
            draw(f, board, dialog);
        })?;

        if handle_event(presenter, event::read()?) == Flow::Quit {
            return Ok(());
        }
    }
}

/// Routes one terminal event to the board or, while it is open, the dialog.
pub fn handle_event(presenter: &mut TerminalPresenter, event: Event) -> Flow {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(presenter, key),
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            handle_click(presenter, mouse.column, mouse.row);
            Flow::Continue
        }
        _ => Flow::Continue,
    }
}

fn handle_key(presenter: &mut TerminalPresenter, key: KeyEvent) -> Flow {
    if presenter.dialog().is_open() {
        if let Some(event) = presenter.dialog_mut().handle_key(key) {
            dispatch(presenter, event);
        }
        return Flow::Continue;
    }

    let board = presenter.target_mut();
    match key.code {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Left => board.move_left(),
        KeyCode::Right => board.move_right(),
        KeyCode::Up => board.move_up(),
        KeyCode::Down => board.move_down(),
        KeyCode::Enter => {
            if let Some(id) = board.selected_card().map(|c| c.task_id) {
                presenter.on_card_click(id);
            }
        }
        _ => {}
    }
    Flow::Continue
}

fn handle_click(presenter: &mut TerminalPresenter, column: u16, row: u16) {
    if presenter.dialog().is_open() {
        if let Some(event) = presenter.dialog().handle_click(column, row) {
            dispatch(presenter, event);
        }
        return;
    }
    if let Some(id) = presenter.target().card_at(column, row) {
        presenter.target_mut().select_task(id);
        presenter.on_card_click(id);
    }
}

fn dispatch(presenter: &mut TerminalPresenter, event: DialogEvent) {
    match event {
        DialogEvent::Edited => presenter.on_field_edited(),
        DialogEvent::Submit(form) => {
            if let SubmitOutcome::Saved(id) = presenter.on_submit(&form) {
                presenter.target_mut().select_task(id);
            }
        }
        DialogEvent::Cancel => presenter.on_cancel(),
        DialogEvent::Dismiss(reason) => presenter.on_dismiss(reason),
    }
}

pub fn draw(frame: &mut Frame<'_>, board: &mut TerminalBoard, dialog: &mut FormDialog) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    draw_board(frame, chunks[0], board);

    let hints = if dialog.is_open() {
        DIALOG_HINTS
    } else {
        BOARD_HINTS
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );

    if dialog.is_open() {
        draw_dialog(frame, dialog);
    }
}

fn draw_board(frame: &mut Frame<'_>, area: Rect, board: &mut TerminalBoard) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    board.hit_areas.clear();
    for (i, status) in Status::ALL.iter().enumerate() {
        let cards = board.cards.get(*status);
        let items: Vec<ListItem> = cards
            .iter()
            .map(|c| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("[#{}] ", c.task_id)),
                    Span::styled(c.title.as_str(), Style::default().fg(Color::White)),
                ]))
            })
            .collect();

        let block = Block::default()
            .title(format!("{} ({})", status.label(), cards.len()))
            .borders(Borders::ALL)
            .border_style(if board.selected_status == i {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            });
        let inner = block.inner(chunks[i]);

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));

        let mut state = ListState::default();
        if board.selected_status == i && !cards.is_empty() {
            state.select(Some(board.selected_task));
        }
        frame.render_stateful_widget(list, chunks[i], &mut state);

        // One line per card, starting at the list's scroll offset.
        let offset = state.offset();
        for (row, card) in cards.iter().enumerate().skip(offset) {
            let y = inner.y + (row - offset) as u16;
            if y >= inner.bottom() {
                break;
            }
            board
                .hit_areas
                .push((Rect::new(inner.x, y, inner.width, 1), card.task_id));
        }
    }
}

fn draw_dialog(frame: &mut Frame<'_>, dialog: &mut FormDialog) {
    let area = centered_rect(60, 70, frame.area());
    dialog.area = Some(area);
    dialog.close_area = Some(Rect::new(area.right().saturating_sub(4), area.y, 3, 1));

    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(" Edit task ")
        .title_top(Line::from("[x]").right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let dialog = &*dialog;
    frame.render_widget(
        text_input("Title", &dialog.title, dialog.focus == Focus::Title),
        rows[0],
    );
    frame.render_widget(error_line(dialog.errors.message_for(Field::Title)), rows[1]);
    frame.render_widget(
        text_input(
            "Description",
            &dialog.description,
            dialog.focus == Focus::Description,
        ),
        rows[2],
    );
    frame.render_widget(
        error_line(dialog.errors.message_for(Field::Description)),
        rows[3],
    );

    let choices: Vec<Span> = Status::ALL
        .iter()
        .flat_map(|s| {
            let style = if *s == dialog.status {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            [Span::styled(format!(" {} ", s.as_str()), style), Span::raw(" ")]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(choices)).block(
            Block::default()
                .title("Status")
                .borders(Borders::ALL)
                .border_style(focus_style(dialog.focus == Focus::Status)),
        ),
        rows[4],
    );
    frame.render_widget(error_line(dialog.errors.message_for(Field::Status)), rows[5]);

    let button = |label: &'static str, focus: Focus| {
        let style = if dialog.focus == focus {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        Span::styled(label, style)
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            button("[ Save ]", Focus::Save),
            Span::raw("  "),
            button("[ Cancel ]", Focus::Cancel),
        ])),
        rows[6],
    );
}

fn text_input<'a>(label: &'a str, value: &str, focused: bool) -> Paragraph<'a> {
    let mut text = value.to_string();
    if focused {
        text.push('_');
    }
    Paragraph::new(text).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(focus_style(focused)),
    )
}

fn error_line(message: Option<&str>) -> Paragraph<'_> {
    Paragraph::new(message.unwrap_or_default()).style(Style::default().fg(Color::Red))
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
