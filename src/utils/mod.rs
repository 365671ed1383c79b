//! Some utility functions

use crate::event::Event;
use crate::task::Task;

pub mod comparison;

/// A debug utility that pretty-prints events
pub fn print_event_list<'a, I>(events: I)
where
    I: IntoIterator<Item = &'a Event>,
{
    for event in events {
        print_event(event);
    }
}

pub fn print_event(event: &Event) {
    let location = match event.location() {
        Some(l) => format!(" @ {}", l),
        None => String::new(),
    };
    println!("    {} {}-{} [{}] {}{}\t{}",
        event.start().format("%a %Y-%m-%d"),
        event.start().format("%H:%M"),
        event.end().format("%H:%M"),
        event.event_type(),
        event.title(),
        location,
        event.id());
}

/// A debug utility that pretty-prints tasks
pub fn print_task_list<'a, I>(tasks: I)
where
    I: IntoIterator<Item = &'a Task>,
{
    for task in tasks {
        print_task(task);
    }
}

pub fn print_task(task: &Task) {
    let completion = if task.completed() { "✓" } else { " " };
    let link = if task.is_linked() { "@" } else { "." };
    let due = match task.due_date() {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => "----------".to_string(),
    };
    println!("    {}{} {} {:<6} {}\t{}", completion, link, due, task.priority(), task.title(), task.id());
}
