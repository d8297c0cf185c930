use std::sync::Mutex;

use super::lock;
use crate::error::AppError;
use crate::models::{NewTask, Task, TaskPatch};

#[derive(Debug)]
struct TaskTable {
    next_id: u64,
    tasks: Vec<Task>,
}

/// The shared task collection.
///
/// Ids come from a counter that lives under the same lock as the tasks, so
/// they are unique and never handed out twice, even after a delete.
#[derive(Debug)]
pub struct TaskStore {
    inner: Mutex<TaskTable>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TaskTable {
                next_id: 1,
                tasks: Vec::new(),
            }),
        }
    }

    /// All tasks, in insertion order.
    pub fn list(&self) -> Result<Vec<Task>, AppError> {
        Ok(lock(&self.inner, "task")?.tasks.clone())
    }

    pub fn get(&self, id: u64) -> Result<Task, AppError> {
        lock(&self.inner, "task")?
            .tasks
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or_else(AppError::task_not_found)
    }

    pub fn create(&self, input: NewTask) -> Result<Task, AppError> {
        let mut table = lock(&self.inner, "task")?;
        let id = table.next_id;
        table.next_id += 1;

        let task = Task::new(id, input);
        table.tasks.push(task.clone());
        log::debug!("task {} created with status {:?}", task.id, task.status);
        Ok(task)
    }

    pub fn update(&self, id: u64, patch: TaskPatch) -> Result<Task, AppError> {
        let mut table = lock(&self.inner, "task")?;
        let task = table
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(AppError::task_not_found)?;

        task.apply(patch);
        log::debug!("task {} updated", id);
        Ok(task.clone())
    }

    pub fn delete(&self, id: u64) -> Result<(), AppError> {
        let mut table = lock(&self.inner, "task")?;
        let index = table
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(AppError::task_not_found)?;

        table.tasks.remove(index);
        log::debug!("task {} deleted", id);
        Ok(())
    }

    pub fn len(&self) -> Result<usize, AppError> {
        Ok(lock(&self.inner, "task")?.tasks.len())
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.len()? == 0)
    }
}
