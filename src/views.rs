//! Derived views of the events and tasks, as shown on the dashboard
//!
//! Everything here is recomputed from the current collections on every call.

use chrono::{Duration, NaiveDate};

use crate::config::{UPCOMING_DAYS, UPCOMING_LIMIT};
use crate::event::Event;
use crate::event_store::week_bounds;
use crate::item::{EventType, TaskFilter};
use crate::task::Task;
use crate::task_store::{partition_by_scheduling, TaskPartition};
use crate::utils::comparison::compare_events_chrono;


/// Events that start today
pub fn today_events(events: &[Event], today: NaiveDate) -> Vec<&Event> {
    events.iter()
        .filter(|e| e.start_date() == today)
        .collect()
}

/// Events that start after today, and at most [`UPCOMING_DAYS`] days from now.
///
/// They are sorted by start time, and only the first [`UPCOMING_LIMIT`] are returned
pub fn upcoming_events(events: &[Event], today: NaiveDate) -> Vec<&Event> {
    let last_day = today.checked_add_signed(Duration::days(UPCOMING_DAYS)).unwrap_or(NaiveDate::MAX);
    let mut upcoming: Vec<&Event> = events.iter()
        .filter(|e| e.start_date() > today && e.start_date() <= last_day)
        .collect();
    upcoming.sort_by(compare_events_chrono);
    upcoming.truncate(UPCOMING_LIMIT);
    upcoming
}

/// Total duration, in hours, of the focus events that start during the week (Sunday to Saturday) that contains `today`
pub fn weekly_focus_hours(events: &[Event], today: NaiveDate) -> f64 {
    let (first, last) = match week_bounds(today) {
        Some(bounds) => bounds,
        None => return 0.0,
    };
    events.iter()
        .filter(|e| e.event_type() == EventType::Focus)
        .filter(|e| e.start_date() >= first && e.start_date() <= last)
        .map(|e| e.duration_hours())
        .sum()
}

/// How much of the weekly focus goal (see [`crate::config::FOCUS_GOAL_HOURS`]) is reached, between 0.0 and 1.0
pub fn focus_progress(events: &[Event], today: NaiveDate) -> f64 {
    let goal = crate::config::focus_goal_hours();
    if goal <= 0.0 {
        return 1.0;
    }
    let ratio = weekly_focus_hours(events, today) / goal;
    ratio.max(0.0).min(1.0)
}

/// Tasks that match the filter, split between simple and scheduled ones
pub fn task_partitions(tasks: &[Task], filter: TaskFilter) -> TaskPartition<'_> {
    partition_by_scheduling(
        tasks.iter().filter(|t| filter.matches(t.completed()))
    )
}
