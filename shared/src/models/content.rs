//! Content Models: articles, announcements and community events

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArticleKind {
    Article,
    Announcement,
}

/// Blog article or shop announcement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub kind: ArticleKind,
    pub title: String,
    pub body: String,
    pub author_id: i64,
    pub published: bool,
    pub published_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleCreate {
    pub kind: ArticleKind,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleUpdate {
    pub kind: Option<ArticleKind>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub published: Option<bool>,
}

/// Participant signed up for a community event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRegistration {
    pub name: String,
    pub email: String,
    pub registered_at: i64,
}

/// Community event (group ride, maintenance workshop, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    /// Start timestamp (millis)
    pub starts_at: i64,
    pub capacity: u32,
    #[serde(default)]
    pub registrations: Vec<EventRegistration>,
    pub published: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Event {
    pub fn spots_left(&self) -> u32 {
        self.capacity
            .saturating_sub(self.registrations.len() as u32)
    }
}

/// Public view of an event (registrant details withheld)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub starts_at: i64,
    pub capacity: u32,
    pub spots_left: u32,
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            starts_at: event.starts_at,
            capacity: event.capacity,
            spots_left: event.spots_left(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCreate {
    pub title: String,
    pub description: String,
    pub location: String,
    pub starts_at: i64,
    pub capacity: u32,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<i64>,
    pub capacity: Option<u32>,
    pub published: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRegister {
    pub name: String,
    pub email: String,
}
