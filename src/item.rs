//! Identifiers and categories shared by tasks and calendar events

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};


/// An opaque identifier, used both for tasks and for calendar events
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId {
    content: String,
}
impl ItemId {
    /// Generate a random ItemId.
    pub fn random() -> Self {
        let random = uuid::Uuid::new_v4().to_simple().to_string();
        Self { content: random }
    }

    /// Generate a random ItemId, that starts with `prefix`
    pub fn random_with_prefix(prefix: &str) -> Self {
        let random = uuid::Uuid::new_v4().to_simple().to_string();
        Self { content: format!("{}{}", prefix, random) }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}
impl From<String> for ItemId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for ItemId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}
impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// Used to support serde
impl Serialize for ItemId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<ItemId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ItemId{ content: s })
    }
}



/// How urgent a task is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// The priority that comes after this one, when the user cycles through priorities.
    ///
    /// This goes `High -> Medium -> Low -> High`
    pub fn next(self) -> Self {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::High,
        }
    }

    /// The category a calendar event should have to reflect this priority
    pub fn to_event_type(self) -> EventType {
        match self {
            Priority::High => EventType::Work,
            Priority::Medium => EventType::Focus,
            Priority::Low => EventType::Personal,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}



/// The category of a calendar event. It drives its display color and its task priority
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Work,
    Personal,
    Focus,
    /// Also used for any category this crate does not know about
    #[serde(other)]
    Other,
}

impl EventType {
    /// The priority a task mirrored from an event of this category gets
    pub fn to_priority(self) -> Priority {
        match self {
            EventType::Work => Priority::High,
            EventType::Focus => Priority::Medium,
            EventType::Personal => Priority::Low,
            EventType::Other => Priority::Medium,
        }
    }

    /// The color events of this category are displayed with
    pub fn color(self) -> csscolorparser::Color {
        let css = match self {
            EventType::Work => "#3b82f6",
            EventType::Personal => "#22c55e",
            EventType::Focus => "#f59e0b",
            EventType::Other => "#9ca3af",
        };
        match csscolorparser::parse(css) {
            Ok(color) => color,
            Err(err) => {
                log::warn!("Invalid color {} for {}: {}", css, self, err);
                csscolorparser::Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
            }
        }
    }
}

impl Default for EventType {
    fn default() -> Self {
        EventType::Other
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::Work => write!(f, "work"),
            EventType::Personal => write!(f, "personal"),
            EventType::Focus => write!(f, "focus"),
            EventType::Other => write!(f, "other"),
        }
    }
}



/// Flags to tell which tasks should be retrieved
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskFilter {
    /// Return all tasks
    All,
    /// Return only tasks that are not completed yet
    Active,
    /// Return only completed tasks
    Completed,
}

impl Default for TaskFilter {
    fn default() -> Self {
        TaskFilter::All
    }
}

impl TaskFilter {
    pub fn matches(self, completed: bool) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Active => completed == false,
            TaskFilter::Completed => completed,
        }
    }
}
