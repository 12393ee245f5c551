use super::events::{MentionCreatedEvent, MentionEvent};
use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;
use uuid::Uuid;

const METADATA_MAX_CHARS: usize = 2000;

/// Loosely-typed construction input for [`Mention`].
///
/// Shaped like the record an inbound webmention processor or a storage row
/// hands over: URLs and ids as strings, metadata as raw JSON values that may
/// or may not be strings. [`Mention::create`] owns all validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MentionData {
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    pub timestamp: Option<String>,
    pub payload: Option<Value>,
    pub resource_id: Option<String>,
    pub source_title: Option<Value>,
    pub source_site_title: Option<Value>,
    pub source_author: Option<Value>,
    pub source_excerpt: Option<Value>,
    pub source_favicon: Option<String>,
    pub source_featured_image: Option<String>,
}

/// Metadata group replaced atomically by [`Mention::set_source_metadata`].
#[derive(Debug, Clone, Default)]
pub struct SourceMetadata {
    pub source_title: Option<Value>,
    pub source_site_title: Option<Value>,
    pub source_author: Option<Value>,
    pub source_excerpt: Option<Value>,
    pub source_favicon: Option<String>,
    pub source_featured_image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Active,
    Deleted,
}

/// One source→target webmention relationship and its fetched source metadata.
///
/// Identity is `id`. `id`, `source`, `target`, `timestamp`, `payload` and
/// `resource_id` are fixed at construction; the source metadata group may be
/// replaced as a whole via [`Mention::set_source_metadata`]. Deletion is a
/// soft lifecycle transition, not destructive.
#[derive(Debug, Clone)]
pub struct Mention {
    id: Uuid,
    source: Url,
    target: Url,
    timestamp: DateTime<Utc>,
    payload: Option<Value>,
    resource_id: Option<Uuid>,
    source_title: String,
    source_site_title: Option<String>,
    source_author: Option<String>,
    source_excerpt: Option<String>,
    source_favicon: Option<Url>,
    source_featured_image: Option<Url>,
    lifecycle: Lifecycle,
    events: Vec<MentionEvent>,
}

impl Mention {
    /// Construct a fully-formed mention in one step.
    ///
    /// Fails on any invariant violation; no partially valid entity is ever
    /// returned. A creation event lands in the outbox only when no id was
    /// supplied (fresh mint), never on reconstruction of a stored record.
    pub fn create(data: MentionData) -> Result<Self, ValidationError> {
        let (id, is_new) = match data.id {
            None => (Uuid::new_v4(), true),
            Some(raw) => (
                Uuid::parse_str(&raw).map_err(|_| ValidationError::InvalidId(raw))?,
                false,
            ),
        };

        let source = parse_absolute_url("source", &data.source)?;
        let target = parse_absolute_url("target", &data.target)?;

        let timestamp = match data.timestamp {
            None => Utc::now(),
            Some(raw) => DateTime::parse_from_rfc3339(&raw)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|_| ValidationError::InvalidTimestamp(raw))?,
        };

        // Value's clone is a deep copy; the caller keeps no shared handle.
        let payload = data.payload.clone();

        let resource_id = match data.resource_id {
            None => None,
            Some(raw) => Some(
                Uuid::parse_str(&raw).map_err(|_| ValidationError::InvalidResourceId(raw))?,
            ),
        };

        let mut mention = Self {
            id,
            source,
            target,
            timestamp,
            payload,
            resource_id,
            source_title: String::new(),
            source_site_title: None,
            source_author: None,
            source_excerpt: None,
            source_favicon: None,
            source_featured_image: None,
            lifecycle: Lifecycle::Active,
            events: Vec::new(),
        };

        mention.set_source_metadata(SourceMetadata {
            source_title: data.source_title,
            source_site_title: data.source_site_title,
            source_author: data.source_author,
            source_excerpt: data.source_excerpt,
            source_favicon: data.source_favicon,
            source_featured_image: data.source_featured_image,
        })?;

        if is_new {
            mention
                .events
                .push(MentionEvent::Created(MentionCreatedEvent::new(mention.id)));
        }

        Ok(mention)
    }

    /// Replace the source metadata group.
    ///
    /// Every field is validated before any is committed, so a failure leaves
    /// the entity untouched. An absent or empty title falls back to the
    /// source URL's host.
    pub fn set_source_metadata(&mut self, metadata: SourceMetadata) -> Result<(), ValidationError> {
        let title = validate_string(metadata.source_title.as_ref(), "sourceTitle")?
            .unwrap_or_else(|| self.source.host_str().unwrap_or_default().to_string());
        let site_title = validate_string(metadata.source_site_title.as_ref(), "sourceSiteTitle")?;
        let author = validate_string(metadata.source_author.as_ref(), "sourceAuthor")?;
        let excerpt = validate_string(metadata.source_excerpt.as_ref(), "sourceExcerpt")?;

        let favicon = match metadata.source_favicon {
            None => None,
            Some(raw) => Some(parse_absolute_url("sourceFavicon", &raw)?),
        };
        let featured_image = match metadata.source_featured_image {
            None => None,
            Some(raw) => Some(parse_absolute_url("sourceFeaturedImage", &raw)?),
        };

        self.source_title = title;
        self.source_site_title = site_title;
        self.source_author = author;
        self.source_excerpt = excerpt;
        self.source_favicon = favicon;
        self.source_featured_image = featured_image;
        Ok(())
    }

    /// Soft-delete transition; all other fields survive.
    pub fn delete(&mut self) {
        self.lifecycle = Lifecycle::Deleted;
    }

    pub fn is_deleted(&self) -> bool {
        self.lifecycle == Lifecycle::Deleted
    }

    /// Pending domain events, in emission order.
    pub fn events(&self) -> &[MentionEvent] {
        &self.events
    }

    /// Drain the outbox. The persistence boundary publishes these after a
    /// successful write.
    pub fn take_events(&mut self) -> Vec<MentionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn source(&self) -> &Url {
        &self.source
    }

    pub fn target(&self) -> &Url {
        &self.target
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    pub fn resource_id(&self) -> Option<Uuid> {
        self.resource_id
    }

    pub fn source_title(&self) -> &str {
        &self.source_title
    }

    pub fn source_site_title(&self) -> Option<&str> {
        self.source_site_title.as_deref()
    }

    pub fn source_author(&self) -> Option<&str> {
        self.source_author.as_deref()
    }

    pub fn source_excerpt(&self) -> Option<&str> {
        self.source_excerpt.as_deref()
    }

    pub fn source_favicon(&self) -> Option<&Url> {
        self.source_favicon.as_ref()
    }

    pub fn source_featured_image(&self) -> Option<&Url> {
        self.source_featured_image.as_ref()
    }

    /// Persisted shape: camelCase keys, URL fields as absolute-URL strings.
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id.to_string(),
            "source": self.source.to_string(),
            "target": self.target.to_string(),
            "timestamp": self.timestamp.to_rfc3339(),
            "payload": self.payload.clone(),
            "resourceId": self.resource_id.map(|id| id.to_string()),
            "sourceTitle": self.source_title,
            "sourceSiteTitle": self.source_site_title,
            "sourceAuthor": self.source_author,
            "sourceExcerpt": self.source_excerpt,
            "sourceFavicon": self.source_favicon.as_ref().map(Url::to_string),
            "sourceFeaturedImage": self.source_featured_image.as_ref().map(Url::to_string),
        })
    }
}

fn parse_absolute_url(field: &'static str, value: &str) -> Result<Url, ValidationError> {
    Url::parse(value).map_err(|_| ValidationError::InvalidUrl {
        field,
        value: value.to_string(),
    })
}

/// Trim and truncate a loose JSON value to metadata-string shape.
///
/// Absent, null and empty-after-trim all collapse to `None`; anything that
/// is present but not a string fails the whole construction.
fn validate_string(
    value: Option<&Value>,
    field: &'static str,
) -> Result<Option<String>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.chars().take(METADATA_MAX_CHARS).collect()))
            }
        }
        Some(_) => Err(ValidationError::NotAString { field }),
    }
}
