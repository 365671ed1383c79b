//! Utilities to compare custom types
//!
//! These can be used to sort results, e.g. with `sort_by`

use crate::event::Event;
use crate::task::Task;

/// Compare tasks alphabetically
pub fn compare_tasks_alpha(left: &&Task, right: &&Task) -> std::cmp::Ordering {
    Ord::cmp(&left.title().to_lowercase(), &right.title().to_lowercase())
}

/// Compare events by start time, then by end time
pub fn compare_events_chrono(left: &&Event, right: &&Event) -> std::cmp::Ordering {
    Ord::cmp(&(left.start(), left.end()), &(right.start(), right.end()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemId, Priority};

    #[test]
    fn alphabetical_tasks() {
        let b = Task::new("banana".to_string(), Priority::Low);
        let a = Task::new_with_parameters(ItemId::from("x"), "Apple".to_string(), false, Priority::Low, None, None, None);
        let mut tasks = vec![&b, &a];
        tasks.sort_by(compare_tasks_alpha);
        assert_eq!(tasks[0].title(), "Apple");
    }
}
