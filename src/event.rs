//! Calendar events

use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, NaiveDateTime};

use crate::item::ItemId;
use crate::item::EventType;

/// The content of an event, as filled in by the user, before the [`EventStore`](crate::event_store::EventStore) gives it an ID
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub start: NaiveDateTime,
    /// Expected to be after `start`. This is not enforced.
    pub end: NaiveDateTime,
    pub event_type: EventType,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl NewEvent {
    pub fn new(title: String, start: NaiveDateTime, end: NaiveDateTime, event_type: EventType) -> Self {
        Self { title, start, end, event_type, location: None, description: None }
    }

    pub fn with_location(mut self, location: String) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }
}


/// A calendar event
///
/// Times are local, wall-clock times
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    id: ItemId,
    title: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    #[serde(rename = "type")]
    event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Event {
    /// Give an ID to a brand new event
    pub fn from_new(id: ItemId, new_event: NewEvent) -> Self {
        Self {
            id,
            title: new_event.title,
            start: new_event.start,
            end: new_event.end,
            event_type: new_event.event_type,
            location: new_event.location,
            description: new_event.description,
        }
    }

    pub fn id(&self) -> &ItemId                   { &self.id }
    pub fn title(&self) -> &str                   { &self.title }
    pub fn start(&self) -> NaiveDateTime          { self.start }
    pub fn end(&self) -> NaiveDateTime            { self.end }
    pub fn event_type(&self) -> EventType         { self.event_type }
    pub fn location(&self) -> Option<&str>        { self.location.as_deref() }
    pub fn description(&self) -> Option<&str>     { self.description.as_deref() }

    /// The calendar day this event starts on
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// The duration of this event, in hours.
    ///
    /// This is negative for events that end before they start
    pub fn duration_hours(&self) -> f64 {
        let duration = self.end - self.start;
        duration.num_seconds() as f64 / 3600.0
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn set_event_type(&mut self, event_type: EventType) {
        self.event_type = event_type;
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Move this event
    pub fn set_times(&mut self, start: NaiveDateTime, end: NaiveDateTime) {
        self.start = start;
        self.end = end;
    }
}
