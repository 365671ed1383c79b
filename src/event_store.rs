//! The in-memory collection of calendar events

use std::error::Error;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::event::{Event, NewEvent};
use crate::item::ItemId;


/// The calendar events of the dashboard.
///
/// Events are kept in insertion order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already contains the given events.
    ///
    /// In case several events share the same ID, only the first one is kept
    pub fn with_events(events: Vec<Event>) -> Self {
        let mut store = Self::new();
        for event in events {
            if store.contains(event.id()) {
                log::warn!("Ignoring a duplicate event for id {}", event.id());
                continue;
            }
            store.events.push(event);
        }
        store
    }

    /// Add an event. This picks a new (random) ID for it
    pub fn create(&mut self, new_event: NewEvent) -> Event {
        let mut id = ItemId::random();
        while self.get(&id).is_some() {
            id = ItemId::random();
        }

        let event = Event::from_new(id, new_event);
        log::debug!("Creating event {} ({})", event.title(), event.id());
        self.events.push(event.clone());
        event
    }

    /// Replace the stored event that has the same ID
    pub fn update(&mut self, event: Event) -> Result<(), Box<dyn Error>> {
        match self.events.iter_mut().find(|e| e.id() == event.id()) {
            None => Err(format!("No event for id {}", event.id()).into()),
            Some(stored) => {
                *stored = event;
                Ok(())
            },
        }
    }

    /// Remove an event. Returns the removed event, or `None` if there was no such event
    pub fn delete(&mut self, id: &ItemId) -> Option<Event> {
        let index = self.events.iter().position(|e| e.id() == id)?;
        Some(self.events.remove(index))
    }

    pub fn get(&self, id: &ItemId) -> Option<&Event> {
        self.events.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Every event, in insertion order
    pub fn list(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events that start on this day
    pub fn query_by_day(&self, day: NaiveDate) -> Vec<&Event> {
        self.events.iter()
            .filter(|e| e.start_date() == day)
            .collect()
    }

    /// Events that start within `[start, end]` (bounds included)
    pub fn query_by_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<&Event> {
        self.events.iter()
            .filter(|e| e.start() >= start && e.start() <= end)
            .collect()
    }

    /// Events that start during the week (Sunday to Saturday) that contains this day
    pub fn query_by_week(&self, day: NaiveDate) -> Vec<&Event> {
        let (first, last) = match week_bounds(day) {
            Some(bounds) => bounds,
            None => return Vec::new(),
        };
        self.events.iter()
            .filter(|e| e.start_date() >= first && e.start_date() <= last)
            .collect()
    }
}

/// The first (Sunday) and last (Saturday) days of the week that contains `day`.
///
/// Returns `None` for the partial weeks at the edges of the supported date range
pub fn week_bounds(day: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let days_since_sunday = day.weekday().num_days_from_sunday() as i64;
    let first = day.checked_sub_signed(Duration::days(days_since_sunday))?;
    let last = first.checked_add_signed(Duration::days(6))?;
    Some((first, last))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::EventType;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    fn new_event(title: &str, start: NaiveDateTime) -> NewEvent {
        NewEvent::new(title.to_string(), start, start + Duration::hours(1), EventType::Work)
    }

    #[test]
    fn create_update_delete() {
        let mut store = EventStore::new();
        let created = store.create(new_event("Meeting", at(2025, 6, 2, 10, 0)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(created.id()), Some(&created));

        let mut edited = created.clone();
        edited.set_title("Meeting (moved)".to_string());
        store.update(edited).unwrap();
        assert_eq!(store.get(created.id()).unwrap().title(), "Meeting (moved)");

        let removed = store.delete(created.id()).unwrap();
        assert_eq!(removed.id(), created.id());
        assert!(store.is_empty());

        // Deleting twice is a no-op
        assert_eq!(store.delete(created.id()), None);
    }

    #[test]
    fn updating_an_unknown_event_fails() {
        let mut store = EventStore::new();
        let ghost = Event::from_new(ItemId::from("ghost"), new_event("Ghost", at(2025, 6, 2, 10, 0)));
        assert!(store.update(ghost).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let mut store = EventStore::new();
        let a = store.create(new_event("A", at(2025, 6, 2, 10, 0)));
        let b = store.create(new_event("B", at(2025, 6, 2, 10, 0)));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn queries() {
        let mut store = EventStore::new();
        store.create(new_event("Mon morning", at(2025, 6, 2, 9, 0)));
        store.create(new_event("Mon evening", at(2025, 6, 2, 23, 59)));
        store.create(new_event("Tue", at(2025, 6, 3, 0, 0)));
        store.create(new_event("Next Sunday", at(2025, 6, 8, 8, 0)));
        store.create(new_event("Previous Saturday", at(2025, 5, 31, 8, 0)));

        let monday = store.query_by_day(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        assert_eq!(monday.len(), 2);

        let range = store.query_by_range(at(2025, 6, 2, 9, 0), at(2025, 6, 3, 0, 0));
        let titles: Vec<&str> = range.iter().map(|e| e.title()).collect();
        assert_eq!(titles, vec!["Mon morning", "Mon evening", "Tue"]);

        // The week of 2025-06-02 goes from Sunday 2025-06-01 to Saturday 2025-06-07
        let week = store.query_by_week(NaiveDate::from_ymd_opt(2025, 6, 4).unwrap());
        assert_eq!(week.len(), 3);
    }

    #[test]
    fn weeks_start_on_sunday() {
        let sunday = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let saturday = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap();
        assert_eq!(week_bounds(sunday), Some((sunday, saturday)));
        assert_eq!(week_bounds(saturday), Some((sunday, saturday)));
        assert_eq!(week_bounds(NaiveDate::from_ymd_opt(2025, 6, 4).unwrap()), Some((sunday, saturday)));
    }

    #[test]
    fn weeks_at_the_edges_of_time() {
        // The week of the first supported day starts before it
        assert_eq!(week_bounds(NaiveDate::MIN), None);
        // Must not panic
        week_bounds(NaiveDate::MAX);

        let mut store = EventStore::new();
        store.create(new_event("Early", NaiveDate::MIN.and_hms_opt(9, 0, 0).unwrap()));
        assert!(store.query_by_week(NaiveDate::MIN).is_empty());
    }

    #[test]
    fn duplicate_ids_are_dropped() {
        let first = Event::from_new(ItemId::from("e1"), new_event("First", at(2025, 6, 2, 10, 0)));
        let second = Event::from_new(ItemId::from("e1"), new_event("Second", at(2025, 6, 3, 10, 0)));
        let store = EventStore::with_events(vec![first.clone(), second]);
        assert_eq!(store.list(), &[first][..]);
    }
}
