//! This crate provides the data layer of a personal dashboard: calendar events and to-do tasks.
//!
//! Events live in an [`EventStore`](event_store::EventStore), tasks in a [`TaskStore`](task_store::TaskStore),
//! which is persisted to a [`Storage`](storage::Storage) (e.g. local JSON files) on every change.
//!
//! A task may be linked to an event. A [`Reconciler`] owns both stores and keeps linked items consistent:
//! it mirrors new events into tasks, propagates task edits to their events, and deletes the events of deleted tasks. \
//! The [`views`] module derives what the dashboard displays (today's events, upcoming events, focus time...).
//!
//! The dashboard also has an [`expenses`] tracker, and a [`focus_session`] timer.

pub mod config;
pub mod clock;
pub mod storage;

mod item;
pub use item::{ItemId, Priority, EventType, TaskFilter};
mod task;
pub use task::Task;
mod event;
pub use event::{Event, NewEvent};

pub mod event_store;
pub mod task_store;
pub mod reconciler;
pub use reconciler::Reconciler;

pub mod views;
pub mod expenses;
pub mod focus_session;
pub mod samples;
pub mod utils;
