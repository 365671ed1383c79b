//! The collection of tasks, persisted to a [`Storage`] on every change

use std::error::Error;

use crate::item::{ItemId, Priority, TaskFilter};
use crate::storage::{load_collection, save_collection, Storage};
use crate::task::Task;


/// Tasks, split by whether they have a due date
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskPartition<'a> {
    /// Tasks without a due date
    pub simple: Vec<&'a Task>,
    /// Tasks with a due date
    pub scheduled: Vec<&'a Task>,
}

/// Split tasks by presence of a due date
pub fn partition_by_scheduling<'a, I>(tasks: I) -> TaskPartition<'a>
where
    I: IntoIterator<Item = &'a Task>,
{
    let (scheduled, simple): (Vec<&Task>, Vec<&Task>) = tasks.into_iter().partition(|t| t.is_scheduled());
    TaskPartition { simple, scheduled }
}


/// The tasks of the dashboard
///
/// Every mutation is written to the backing storage right away
#[derive(Debug)]
pub struct TaskStore<S: Storage> {
    storage: S,
    storage_key: String,
    /// `false` when the stored data exists but could not be read. It is not overwritten then
    writable: bool,
    tasks: Vec<Task>,
}

impl<S: Storage> TaskStore<S> {
    /// Load the task collection from the storage, under the key configured in [`crate::config::TASKS_STORAGE_KEY`].
    ///
    /// Missing or invalid stored data is logged and results in an empty collection
    pub fn load(storage: S) -> Self {
        let key = crate::config::tasks_storage_key();
        Self::load_from_key(storage, &key)
    }

    /// Load the task collection from the storage, under a custom key
    pub fn load_from_key(storage: S, key: &str) -> Self {
        let (tasks, writable) = match load_collection(&storage, key) {
            Ok(tasks) => (tasks, true),
            Err(err) => {
                log::warn!("Unable to read stored tasks: {}. Changes to the tasks will not be saved", err);
                (Vec::new(), false)
            },
        };

        Self {
            storage,
            storage_key: key.to_string(),
            writable,
            tasks,
        }
    }

    /// Store the current tasks to the backing storage.
    ///
    /// This is best-effort: failures are only logged
    fn save(&mut self) {
        if !self.writable {
            log::debug!("Not saving tasks under {:?}, the stored data could not be read", self.storage_key);
            return;
        }
        save_collection(&mut self.storage, &self.storage_key, &self.tasks);
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Add a task
    pub fn create(&mut self, task: Task) -> Task {
        self.tasks.push(task.clone());
        self.save();
        task
    }

    /// Add a task that has a title only. It is not completed, and has a medium priority
    pub fn add_simple(&mut self, title: String) -> Task {
        self.create(Task::new(title, Priority::Medium))
    }

    /// Add several tasks at once. They are saved only once
    pub fn create_batch(&mut self, tasks: Vec<Task>) {
        if tasks.is_empty() {
            return;
        }
        self.tasks.extend(tasks);
        self.save();
    }

    /// Replace the stored task that has the same ID
    pub fn update(&mut self, task: Task) -> Result<(), Box<dyn Error>> {
        match self.tasks.iter_mut().find(|t| t.id() == task.id()) {
            None => return Err(format!("No task for id {}", task.id()).into()),
            Some(stored) => *stored = task,
        }
        self.save();
        Ok(())
    }

    /// Remove a task. Returns the removed task, or `None` if there was no such task
    pub fn delete(&mut self, id: &ItemId) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id() == id)?;
        let removed = self.tasks.remove(index);
        self.save();
        Some(removed)
    }

    pub fn get(&self, id: &ItemId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// Every task, in insertion order
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks that match this completion filter
    pub fn filter(&self, filter: TaskFilter) -> Vec<&Task> {
        self.tasks.iter()
            .filter(|t| filter.matches(t.completed()))
            .collect()
    }
}
