use std::collections::HashMap;
use std::fmt::Write as _;

use crate::models::{Task, TaskStatus};

use super::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Board,
    Table,
}

/// A status change applied locally before the server has confirmed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    pub task_id: u64,
    pub from: TaskStatus,
    pub to: TaskStatus,
}

/// Local copy of the task list plus the two projections rendered from it.
#[derive(Debug, Default)]
pub struct Dashboard {
    tasks: Vec<Task>,
    pending: HashMap<u64, TaskStatus>,
    pub view_mode: ViewMode,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Replaces the local list with a fresh fetch. Outstanding moves are dropped.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.pending.clear();
    }

    /// Inserts `task` at the end, or replaces the task with the same id in place.
    pub fn upsert(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
    }

    pub fn remove(&mut self, id: u64) {
        self.tasks.retain(|task| task.id != id);
        self.pending.remove(&id);
    }

    /// Board columns in fixed status order; each keeps list order.
    pub fn columns(&self) -> Vec<(TaskStatus, Vec<&Task>)> {
        TaskStatus::ALL
            .into_iter()
            .map(|status| {
                let cards = self.tasks.iter().filter(|t| t.status == status).collect();
                (status, cards)
            })
            .collect()
    }

    pub fn is_pending(&self, id: u64) -> bool {
        self.pending.contains_key(&id)
    }

    /// Moves a card to another column locally and records how to undo it.
    ///
    /// Returns `None` for an unknown task, a drop onto the same column, or a
    /// task that already has a move in flight.
    pub fn begin_move(&mut self, id: u64, to: TaskStatus) -> Option<PendingMove> {
        if self.pending.contains_key(&id) {
            return None;
        }
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        if task.status == to {
            return None;
        }
        let from = task.status;
        task.status = to;
        self.pending.insert(id, from);
        Some(PendingMove {
            task_id: id,
            from,
            to,
        })
    }

    /// Settles a move with the server's answer: keep the server copy on success,
    /// restore the previous status on failure.
    pub fn settle_move(
        &mut self,
        pending: PendingMove,
        outcome: Result<Task, ClientError>,
    ) -> Result<(), ClientError> {
        self.pending.remove(&pending.task_id);
        match outcome {
            Ok(task) => {
                self.upsert(task);
                Ok(())
            }
            Err(err) => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == pending.task_id) {
                    if task.status == pending.to {
                        task.status = pending.from;
                    }
                }
                log::warn!("move of task {} reverted: {}", pending.task_id, err);
                Err(err)
            }
        }
    }

    pub fn render(&self) -> String {
        match self.view_mode {
            ViewMode::Board => self.render_board(),
            ViewMode::Table => self.render_table(),
        }
    }

    pub fn render_board(&self) -> String {
        let mut out = String::new();
        for (status, cards) in self.columns() {
            let _ = writeln!(out, "== {} ({})", status, cards.len());
            for task in cards {
                let marker = if self.is_pending(task.id) { " *" } else { "" };
                let _ = writeln!(out, "  [#{}] {}{}", task.id, task.title, marker);
            }
        }
        out
    }

    pub fn render_table(&self) -> String {
        let width = self
            .tasks
            .iter()
            .map(|t| t.title.chars().count())
            .max()
            .unwrap_or(0)
            .max("Title".len());
        let mut out = String::new();
        let _ = writeln!(out, "{:>4}  {:<width$}  Status", "ID", "Title", width = width);
        for task in &self.tasks {
            let _ = writeln!(
                out,
                "{:>4}  {:<width$}  {}",
                task.id,
                task.title,
                task.status,
                width = width
            );
        }
        out
    }
}

/// Detail view of a single task.
pub fn render_detail(task: Option<&Task>) -> String {
    match task {
        Some(task) => format!(
            "Task Details\nID: {}\nTitle: {}\nStatus: {}\n",
            task.id, task.title, task.status
        ),
        None => "Task not found\n".to_string(),
    }
}
