//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// The storage key the task collection is persisted under.
/// Feel free to override it when initing this library.
pub static TASKS_STORAGE_KEY: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("tasks".to_string())));

/// The storage key the expenses are persisted under.
/// Feel free to override it when initing this library.
pub static EXPENSES_STORAGE_KEY: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("expenses".to_string())));

/// How many hours of focus time per week are recommended.
/// Feel free to override it when initing this library.
pub static FOCUS_GOAL_HOURS: Lazy<Arc<Mutex<f64>>> = Lazy::new(|| Arc::new(Mutex::new(15.0)));

/// Events created from tasks last this long
pub const LINKED_EVENT_DURATION_MINUTES: i64 = 60;

/// How many days ahead "upcoming" events are looked for
pub const UPCOMING_DAYS: i64 = 7;
/// How many upcoming events are shown at most
pub const UPCOMING_LIMIT: usize = 5;

/// Lengths of the phases of a focus session cycle
pub const FOCUS_MINUTES: i64 = 25;
pub const SHORT_BREAK_MINUTES: i64 = 5;
pub const LONG_BREAK_MINUTES: i64 = 15;
/// Every that many completed focus phases, the break is a long one
pub const SESSIONS_BEFORE_LONG_BREAK: u32 = 4;

/// The expense categories, in display order
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Shopping",
    "Transportation",
    "Entertainment",
    "Housing",
    "Utilities",
    "Healthcare",
    "Personal",
    "Travel",
    "Education",
    "Income",
    "Other",
];


/// The current value of [`TASKS_STORAGE_KEY`]
pub fn tasks_storage_key() -> String {
    match TASKS_STORAGE_KEY.lock() {
        Ok(key) => key.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// The current value of [`EXPENSES_STORAGE_KEY`]
pub fn expenses_storage_key() -> String {
    match EXPENSES_STORAGE_KEY.lock() {
        Ok(key) => key.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// The current value of [`FOCUS_GOAL_HOURS`]
pub fn focus_goal_hours() -> f64 {
    match FOCUS_GOAL_HOURS.lock() {
        Ok(goal) => *goal,
        Err(poisoned) => *poisoned.into_inner(),
    }
}
