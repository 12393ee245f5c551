//! Content-lifecycle event types and the bus contract the dispatcher
//! subscribes through. The bus itself lives in the host application.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The three lifecycle events that can trigger outbound webmentions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEventKind {
    Published,
    PublishedEdited,
    Unpublished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Draft,
    Scheduled,
    Published,
    /// Delivered by email only; there is no public URL to cite as source.
    EmailOnly,
}

/// Snapshot of the revision being replaced.
#[derive(Debug, Clone)]
pub struct PreviousRevision {
    pub status: ContentStatus,
    pub html: String,
}

/// The content resource as the lifecycle bus sees it.
#[derive(Debug, Clone)]
pub struct ContentResource {
    pub id: String,
    pub status: ContentStatus,
    pub html: String,
    pub previous: Option<PreviousRevision>,
}

/// Transient payload produced by the lifecycle bus on every trigger.
#[derive(Debug, Clone)]
pub struct ContentChangeEvent {
    pub resource: ContentResource,
    /// The triggering operation is a bulk import.
    pub importing: bool,
    /// The triggering operation runs in an internal/system context.
    pub internal: bool,
}

/// Receives content-change notifications. The bus has no isolation of its
/// own across listeners, so implementations must never panic or propagate
/// errors out of this call.
#[async_trait]
pub trait ContentChangeHandler: Send + Sync {
    async fn on_content_changed(&self, event: ContentChangeEvent);
}

/// Pub/sub bus contract: route events of `kind` to `handler`.
pub trait EventBus: Send + Sync {
    fn subscribe(&self, kind: LifecycleEventKind, handler: Arc<dyn ContentChangeHandler>);
}
