use crate::task::{Status, Task, TaskId};

/// Tasks grouped by column, each keeping the store's relative order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Columns<'a> {
    pub todo: Vec<&'a Task>,
    pub doing: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
}

impl<'a> Columns<'a> {
    pub fn get(&self, status: Status) -> &[&'a Task] {
        match status {
            Status::Todo => &self.todo,
            Status::Doing => &self.doing,
            Status::Done => &self.done,
        }
    }

    pub fn len(&self) -> usize {
        self.todo.len() + self.doing.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn compute_columns<'a, I>(tasks: I) -> Columns<'a>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut columns = Columns::default();
    for task in tasks {
        match task.status {
            Status::Todo => columns.todo.push(task),
            Status::Doing => columns.doing.push(task),
            Status::Done => columns.done.push(task),
        }
    }
    columns
}

/// What the board shows for one task. Clicking it starts an edit of `task_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub task_id: TaskId,
    pub title: String,
}

pub fn render_card(task: &Task) -> Card {
    Card {
        task_id: task.id,
        title: task.title.clone(),
    }
}

/// Card lists for the three column containers.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ColumnCards {
    pub todo: Vec<Card>,
    pub doing: Vec<Card>,
    pub done: Vec<Card>,
}

impl ColumnCards {
    pub fn from_columns(columns: &Columns<'_>) -> Self {
        let cards =
            |tasks: &[&Task]| -> Vec<Card> { tasks.iter().map(|t| render_card(t)).collect() };
        Self {
            todo: cards(&columns.todo),
            doing: cards(&columns.doing),
            done: cards(&columns.done),
        }
    }

    pub fn get(&self, status: Status) -> &[Card] {
        match status {
            Status::Todo => &self.todo,
            Status::Doing => &self.doing,
            Status::Done => &self.done,
        }
    }
}

/// Somewhere the board can be drawn.
pub trait RenderTarget {
    /// Clears all three containers and fills them with `cards`.
    fn show_columns(&mut self, cards: ColumnCards);
}
