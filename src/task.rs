//! To-do tasks

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use crate::item::ItemId;
use crate::item::Priority;

/// A to-do task
///
/// Its serialized form is the one that is persisted, e.g.
/// `{"id":"t1","title":"Plan trip","completed":false,"priority":"low","dueDate":"2025-06-01"}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: ItemId,

    /// The display name of the task
    title: String,

    #[serde(default)]
    completed: bool,

    priority: Priority,

    /// Tasks that have a due date are "scheduled" tasks, the other ones are "simple" tasks.
    /// This is serialized as `yyyy-mm-dd`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,

    /// The calendar event this task is linked to.
    /// This is only a reference: the event may not exist (anymore)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    event_id: Option<ItemId>,
}


impl Task {
    /// Create a brand new, uncompleted task.
    /// This will pick a new (random) task ID.
    pub fn new(title: String, priority: Priority) -> Self {
        let new_item_id = ItemId::random_with_prefix("task-");
        Self::new_with_parameters(new_item_id, title, false, priority, None, None, None)
    }

    /// Create a new Task instance, with every field set
    pub fn new_with_parameters(id: ItemId, title: String, completed: bool, priority: Priority,
                               due_date: Option<NaiveDate>, notes: Option<String>, event_id: Option<ItemId>,
                            ) -> Self
    {
        Self {
            id,
            title,
            completed,
            priority,
            due_date,
            notes,
            event_id,
        }
    }

    pub fn id(&self) -> &ItemId                   { &self.id         }
    pub fn title(&self) -> &str                   { &self.title      }
    pub fn completed(&self) -> bool               { self.completed   }
    pub fn priority(&self) -> Priority            { self.priority    }
    pub fn due_date(&self) -> Option<NaiveDate>   { self.due_date    }
    pub fn notes(&self) -> Option<&str>           { self.notes.as_deref() }
    pub fn event_id(&self) -> Option<&ItemId>     { self.event_id.as_ref() }

    /// Whether this task references a calendar event (that may or may not exist)
    pub fn is_linked(&self) -> bool {
        self.event_id.is_some()
    }

    /// Whether this task has a due date
    pub fn is_scheduled(&self) -> bool {
        self.due_date.is_some()
    }

    pub fn set_title(&mut self, new_title: String) {
        self.title = new_title;
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.due_date = due_date;
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
    }

    /// Link this task to a calendar event (or unlink it, in case `event_id` is `None`)
    pub fn set_event_id(&mut self, event_id: Option<ItemId>) {
        self.event_id = event_id;
    }
}
