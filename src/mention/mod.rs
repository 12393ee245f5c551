pub mod entity;
pub mod events;

pub use entity::{Mention, MentionData, SourceMetadata};
pub use events::{MentionCreatedEvent, MentionEvent};
