//! A sample week of events, to populate a brand new dashboard

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::event::{Event, NewEvent};
use crate::event_store::{week_bounds, EventStore};
use crate::item::{EventType, ItemId};


/// One event per line: day offset from Sunday, start (h, m), end (h, m), type, title, location, description
type SampleEvent = (i64, (u32, u32), (u32, u32), EventType, &'static str, Option<&'static str>, Option<&'static str>);

const SAMPLE_WEEK: &[SampleEvent] = &[
    (1, (10, 0), (11, 0),  EventType::Work,     "Team Meeting",        Some("Conference Room A"), Some("Weekly team sync meeting")),
    (1, (14, 0), (15, 30), EventType::Work,     "Project Planning",    Some("Virtual"),           Some("Planning session for Q2 roadmap")),
    (2, (18, 0), (19, 30), EventType::Personal, "Gym Session",         Some("City Gym"),          None),
    (3, (9, 0),  (12, 0),  EventType::Focus,    "Deep Work: Report",   None,                      Some("Focus time for quarterly report")),
    (3, (12, 30), (13, 30), EventType::Personal, "Lunch with Sarah",   Some("Cafe Central"),      None),
    (4, (15, 0), (16, 0),  EventType::Work,     "Client Call",         Some("Virtual"),           Some("Review progress with client")),
    (4, (9, 0),  (11, 0),  EventType::Focus,    "Deep Work: Code",     None,                      Some("Focus time for feature implementation")),
    (5, (11, 0), (12, 0),  EventType::Personal, "Dentist Appointment", Some("Downtown Dental"),    Some("Regular checkup")),
];

/// The sample events of the week (Sunday to Saturday) that contains `base`.
///
/// This is empty for weeks that do not fit in the supported date range
pub fn sample_week(base: NaiveDate) -> Vec<NewEvent> {
    let sunday = match week_bounds(base) {
        Some((sunday, _)) => sunday,
        None => return Vec::new(),
    };

    SAMPLE_WEEK.iter()
        .filter_map(|(offset, (start_h, start_m), (end_h, end_m), event_type, title, location, description)| {
            let day = sunday.checked_add_signed(Duration::days(*offset))?;
            let start = day.and_time(NaiveTime::from_hms_opt(*start_h, *start_m, 0)?);
            let end = day.and_time(NaiveTime::from_hms_opt(*end_h, *end_m, 0)?);
            let mut event = NewEvent::new(title.to_string(), start, end, *event_type);
            event.location = location.map(String::from);
            event.description = description.map(String::from);
            Some(event)
        })
        .collect()
}

/// An event store that contains the sample week of `base`.
///
/// Sample events have stable IDs (`sample-1` to `sample-8`), so that tasks that have been mirrored from them in a previous run still reference them
pub fn sample_event_store(base: NaiveDate) -> EventStore {
    let events = sample_week(base).into_iter()
        .enumerate()
        .map(|(i, new_event)| Event::from_new(ItemId::from(format!("sample-{}", i + 1)), new_event))
        .collect();
    EventStore::with_events(events)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_week_is_within_the_week() {
        let base = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        let (first, last) = week_bounds(base).unwrap();
        let events = sample_week(base);
        assert_eq!(events.len(), 8);
        for e in &events {
            assert!(e.start.date() >= first && e.start.date() <= last);
            assert!(e.end > e.start);
        }

        let store = sample_event_store(base);
        assert_eq!(store.len(), 8);
        assert_eq!(store.query_by_week(base).len(), 8);
        assert!(store.contains(&ItemId::from("sample-1")));
        assert!(store.contains(&ItemId::from("sample-8")));
    }
}
