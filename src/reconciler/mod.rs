//! This module keeps calendar events and tasks consistent with each other
//!
//! Tasks and events are two independent collections. A task may be linked to an event (see [`Task::event_id`]).
//! The [`Reconciler`] owns both collections, and applies to one side the changes that are made on the other side:
//! * every event that no task references gets a mirror task
//! * editing a linked task edits its event
//! * deleting a linked task deletes its event (but deleting an event leaves its task alone)
//! * a scheduled task can be added to the calendar

use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::clock::Clock;
use crate::event::{Event, NewEvent};
use crate::event_store::EventStore;
use crate::item::{ItemId, Priority};
use crate::storage::Storage;
use crate::task::Task;
use crate::task_store::TaskStore;

pub mod notification;
use notification::{Notification, Notifier};


/// What happens to an event whose mirror task has gone
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MirrorPolicy {
    /// An event is considered mirrored as long as a task references it.
    /// Once no task references it anymore, the next mirroring pass creates a new task for it
    RecreateOnDeletion,
    /// Once an event has been mirrored (or linked to a task), it is never mirrored again by this reconciler
    RememberMirrored,
}

impl Default for MirrorPolicy {
    fn default() -> Self {
        MirrorPolicy::RecreateOnDeletion
    }
}


/// Why a task could not be added to the calendar
#[derive(Clone, Debug, PartialEq)]
pub enum LinkError {
    /// There is no task with this ID
    UnknownTask(ItemId),
    /// The task has no due date, so there is no day to put it on
    NoDueDate,
    /// The task is already linked to this event
    AlreadyLinked(ItemId),
    /// The due date of the task is too close to the end of the supported date range
    DateOutOfRange(NaiveDate),
}

impl Display for LinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkError::UnknownTask(id) => write!(f, "No task for id {}", id),
            LinkError::NoDueDate => write!(f, "This task doesn't have a due date."),
            LinkError::AlreadyLinked(_) => write!(f, "This task is already linked to a calendar event."),
            LinkError::DateOutOfRange(day) => write!(f, "No calendar event can be created on {}.", day),
        }
    }
}

impl Error for LinkError {}


/// Owns the events and the tasks, and keeps them in sync.
///
/// Operations that touch a single side can be made on [`Self::events_mut`] and [`Self::tasks_mut`],
/// but changes made there do not trigger any mirroring: call [`Self::mirror_events`] afterwards if needed.
#[derive(Debug)]
pub struct Reconciler<S, N, C>
where
    S: Storage,
    N: Notifier,
    C: Clock,
{
    events: EventStore,
    tasks: TaskStore<S>,
    notifier: N,
    clock: C,

    policy: MirrorPolicy,
    /// Events that have been mirrored already. Only used with [`MirrorPolicy::RememberMirrored`]
    mirrored: HashSet<ItemId>,
}

impl<S, N, C> Reconciler<S, N, C>
where
    S: Storage,
    N: Notifier,
    C: Clock,
{
    /// Create a reconciler.
    ///
    /// This does not run any mirroring by itself: call [`Self::mirror_events`] to mirror the initial events
    pub fn new(events: EventStore, tasks: TaskStore<S>, notifier: N, clock: C) -> Self {
        Self {
            events, tasks, notifier, clock,
            policy: MirrorPolicy::default(),
            mirrored: HashSet::new(),
        }
    }

    /// Change the mirroring policy
    pub fn with_policy(mut self, policy: MirrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> MirrorPolicy { self.policy }

    pub fn events(&self) -> &EventStore { &self.events }
    pub fn events_mut(&mut self) -> &mut EventStore { &mut self.events }
    pub fn tasks(&self) -> &TaskStore<S> { &self.tasks }
    pub fn tasks_mut(&mut self) -> &mut TaskStore<S> { &mut self.tasks }
    pub fn notifier(&self) -> &N { &self.notifier }
    pub fn notifier_mut(&mut self) -> &mut N { &mut self.notifier }
    pub fn clock(&self) -> &C { &self.clock }
    pub fn clock_mut(&mut self) -> &mut C { &mut self.clock }


    /// Create a task for every event that is not referenced by any task yet.
    ///
    /// Running it twice in a row creates nothing the second time.
    /// Returns the number of tasks that have been created.
    pub fn mirror_events(&mut self) -> usize {
        let mut referenced: HashSet<&ItemId> = self.tasks.list().iter()
            .filter_map(|t| t.event_id())
            .collect();
        let mut taken_task_ids: HashSet<ItemId> = self.tasks.list().iter()
            .map(|t| t.id().clone())
            .collect();

        let mut new_tasks = Vec::new();
        let mut newly_mirrored = Vec::new();
        for event in self.events.list() {
            if referenced.contains(event.id()) {
                if self.policy == MirrorPolicy::RememberMirrored {
                    newly_mirrored.push(event.id().clone());
                }
                continue;
            }
            if self.policy == MirrorPolicy::RememberMirrored && self.mirrored.contains(event.id()) {
                log::debug!("Event {} has been mirrored already, not mirroring it again", event.id());
                continue;
            }

            let task = mirror_task(event, &taken_task_ids);
            log::debug!("Mirroring event {} into task {}", event.id(), task.id());
            taken_task_ids.insert(task.id().clone());
            referenced.insert(event.id());
            newly_mirrored.push(event.id().clone());
            new_tasks.push(task);
        }

        if self.policy == MirrorPolicy::RememberMirrored {
            self.mirrored.extend(newly_mirrored);
        }

        let n_new = new_tasks.len();
        if n_new > 0 {
            self.tasks.create_batch(new_tasks);
            self.notifier.notify(Notification::new(
                "Calendar Sync",
                &format!("{} events added to tasks.", n_new),
            ));
        }
        n_new
    }


    /// Add a calendar event, then mirror it into a task
    pub fn add_event(&mut self, new_event: NewEvent) -> Event {
        let event = self.events.create(new_event);
        self.mirror_events();
        event
    }

    /// Replace an event. This does not change its linked task, if any
    pub fn edit_event(&mut self, event: Event) -> Result<(), Box<dyn Error>> {
        self.events.update(event)?;
        self.mirror_events();
        Ok(())
    }

    /// Delete an event. Its linked task, if any, is kept, and will point to a missing event
    pub fn remove_event(&mut self, id: &ItemId) -> Option<Event> {
        self.events.delete(id)
    }


    /// Add a simple task (without due date nor event)
    pub fn add_task(&mut self, title: String) -> Task {
        self.tasks.add_simple(title)
    }

    /// Flip the completion status of a task. Returns the new status, or `None` if there is no such task
    pub fn toggle_complete(&mut self, task_id: &ItemId) -> Option<bool> {
        let mut task = self.tasks.get(task_id)?.clone();
        let completed = !task.completed();
        task.set_completed(completed);
        if let Err(err) = self.tasks.update(task) {
            log::error!("Unable to update task {}: {}", task_id, err);
            return None;
        }
        Some(completed)
    }

    /// Move a task to its next priority (`high -> medium -> low -> high`).
    ///
    /// If the task is linked to an event that still exists, the category of that event is changed to match the new priority.
    /// Returns the new priority, or `None` if there is no such task
    pub fn toggle_priority(&mut self, task_id: &ItemId) -> Option<Priority> {
        let mut task = self.tasks.get(task_id)?.clone();
        let new_priority = task.priority().next();
        task.set_priority(new_priority);
        let event_id = task.event_id().cloned();

        if let Err(err) = self.tasks.update(task) {
            log::error!("Unable to update task {}: {}", task_id, err);
            return None;
        }

        if let Some(event_id) = event_id {
            match self.events.get(&event_id) {
                None => log::debug!("Task {} points to missing event {}. Not propagating its priority", task_id, event_id),
                Some(event) => {
                    let mut event = event.clone();
                    event.set_event_type(new_priority.to_event_type());
                    self.edit_linked_event(event);
                },
            }
        }

        Some(new_priority)
    }

    /// Replace a task. If it is linked to an event that still exists, that event is updated as well:
    /// its title, category and description follow the task, and it is moved to the due date of the task
    /// (or to now, in case the task has no due date).
    pub fn update_task(&mut self, task: Task) -> Result<(), Box<dyn Error>> {
        let task_id = task.id().clone();
        let linked = task.event_id()
            .and_then(|event_id| self.events.get(event_id))
            .cloned();
        if let (Some(event_id), None) = (task.event_id(), &linked) {
            log::debug!("Task {} points to missing event {}. Not propagating its changes", task_id, event_id);
        }

        let mut event_update = None;
        if let Some(mut event) = linked {
            let start = match task.due_date() {
                Some(due_date) => start_of_day(due_date),
                None => self.clock.now(),
            };
            match linked_event_end(start) {
                None => log::warn!("Event {} cannot be moved to {}. Not propagating the changes of task {}", event.id(), start, task_id),
                Some(end) => {
                    event.set_title(task.title().to_string());
                    event.set_event_type(task.priority().to_event_type());
                    event.set_description(task.notes().map(String::from));
                    event.set_times(start, end);
                    event_update = Some(event);
                },
            }
        }

        self.tasks.update(task)?;
        if let Some(event) = event_update {
            self.edit_linked_event(event);
        }

        self.notifier.notify(Notification::new("Task Updated", "Task has been updated successfully."));
        Ok(())
    }

    /// Delete a task. In case it is linked to an event, this event is deleted as well.
    ///
    /// Returns the deleted task, or `None` if there was no such task
    pub fn delete_task(&mut self, task_id: &ItemId) -> Option<Task> {
        let event_id = self.tasks.get(task_id)?.event_id().cloned();

        if let Some(event_id) = event_id {
            if self.events.delete(&event_id).is_none() {
                log::debug!("Event {} linked to task {} was already deleted", event_id, task_id);
            }
        }

        let removed = self.tasks.delete(task_id);
        self.notifier.notify(Notification::new("Task Deleted", "The task has been removed successfully."));
        removed
    }

    /// Create a calendar event for a task, on its due date, and link the task to it.
    ///
    /// The event starts at midnight (local time) of the due date and lasts one hour.
    /// Returns the ID of the new event.
    /// In case the task has no due date or is already linked, nothing is changed.
    pub fn add_to_calendar(&mut self, task_id: &ItemId) -> Result<ItemId, LinkError> {
        let task = match self.tasks.get(task_id) {
            Some(task) => task.clone(),
            None => {
                let err = LinkError::UnknownTask(task_id.clone());
                self.notifier.notify(Notification::destructive("Cannot Add to Calendar", &err.to_string()));
                return Err(err);
            },
        };

        let due_date = match task.due_date() {
            Some(d) => d,
            None => {
                let err = LinkError::NoDueDate;
                self.notifier.notify(Notification::destructive("Cannot Add to Calendar", &err.to_string()));
                return Err(err);
            },
        };

        if let Some(event_id) = task.event_id() {
            let err = LinkError::AlreadyLinked(event_id.clone());
            self.notifier.notify(Notification::new("Already in Calendar", &err.to_string()));
            return Err(err);
        }

        let start = start_of_day(due_date);
        let end = match linked_event_end(start) {
            Some(end) => end,
            None => {
                let err = LinkError::DateOutOfRange(due_date);
                self.notifier.notify(Notification::destructive("Cannot Add to Calendar", &err.to_string()));
                return Err(err);
            },
        };
        let mut new_event = NewEvent::new(task.title().to_string(), start, end, task.priority().to_event_type());
        new_event.description = task.notes().map(String::from);
        let created = self.events.create(new_event);

        let mut linked_task = task;
        linked_task.set_event_id(Some(created.id().clone()));
        if let Err(err) = self.tasks.update(linked_task) {
            log::error!("Unable to link task {} to its new event {}: {}", task_id, created.id(), err);
        }
        self.mirror_events();

        self.notifier.notify(Notification::new("Added to Calendar", "Task has been added to your calendar."));
        Ok(created.id().clone())
    }


    fn edit_linked_event(&mut self, event: Event) {
        let event_id = event.id().clone();
        if let Err(err) = self.events.update(event) {
            log::warn!("Unable to update linked event {}: {}", event_id, err);
            return;
        }
        self.mirror_events();
    }
}


/// Build the task that mirrors an event.
///
/// Its ID is derived from the event ID, unless this would clash with an existing task
fn mirror_task(event: &Event, taken_task_ids: &HashSet<ItemId>) -> Task {
    let mut id = ItemId::from(format!("task-{}", event.id()));
    if taken_task_ids.contains(&id) {
        id = ItemId::random_with_prefix("task-");
    }

    Task::new_with_parameters(
        id,
        event.title().to_string(),
        false,
        event.event_type().to_priority(),
        Some(event.start_date()),
        event.description().map(String::from),
        Some(event.id().clone()),
    )
}

fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

/// When an event created from a task, that starts at `start`, ends
fn linked_event_end(start: NaiveDateTime) -> Option<NaiveDateTime> {
    start.checked_add_signed(Duration::minutes(crate::config::LINKED_EVENT_DURATION_MINUTES))
}
