use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Domain event pending on a [`super::Mention`] outbox.
///
/// Accumulated on the entity and drained by the persistence boundary via
/// [`super::Mention::take_events`] after a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MentionEvent {
    Created(MentionCreatedEvent),
}

/// Emitted once when a mention is newly minted (never on reconstruction of
/// an existing record).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionCreatedEvent {
    pub mention_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl MentionCreatedEvent {
    pub fn new(mention_id: Uuid) -> Self {
        Self {
            mention_id,
            timestamp: Utc::now(),
        }
    }
}
