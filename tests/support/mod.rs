//! Shared fakes for the collaborator contracts consumed by the dispatcher.

use async_trait::async_trait;
use outmention::sending::{
    ContentChangeEvent, ContentChangeHandler, ContentResource, ContentStatus, EndpointDiscovery,
    EventBus, FeatureFlag, LifecycleEventKind, PreviousRevision, ResourceUrlResolver, UnitOfWork,
    UnitOfWorkExecutor,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

pub struct StubDiscovery {
    pub endpoint: Option<Url>,
}

#[async_trait]
impl EndpointDiscovery for StubDiscovery {
    async fn endpoint_for(&self, _target: &Url) -> anyhow::Result<Option<Url>> {
        Ok(self.endpoint.clone())
    }
}

pub struct FailingDiscovery;

#[async_trait]
impl EndpointDiscovery for FailingDiscovery {
    async fn endpoint_for(&self, _target: &Url) -> anyhow::Result<Option<Url>> {
        anyhow::bail!("discovery crawler unavailable")
    }
}

pub struct Flag(pub bool);

impl FeatureFlag for Flag {
    fn is_enabled(&self) -> bool {
        self.0
    }
}

pub struct FixedUrl(pub Url);

impl ResourceUrlResolver for FixedUrl {
    fn public_url(&self, _resource: &ContentResource) -> anyhow::Result<Url> {
        Ok(self.0.clone())
    }
}

/// Counts submissions and drops the work unexecuted, so gate tests never
/// touch the network.
#[derive(Default)]
pub struct CountingExecutor {
    pub submitted: AtomicUsize,
}

#[async_trait]
impl UnitOfWorkExecutor for CountingExecutor {
    async fn submit(&self, _name: &str, _work: UnitOfWork) -> anyhow::Result<()> {
        self.submitted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl CountingExecutor {
    pub fn count(&self) -> usize {
        self.submitted.load(Ordering::SeqCst)
    }
}

pub struct FailingExecutor;

#[async_trait]
impl UnitOfWorkExecutor for FailingExecutor {
    async fn submit(&self, _name: &str, _work: UnitOfWork) -> anyhow::Result<()> {
        anyhow::bail!("queue full")
    }
}

#[derive(Default)]
pub struct RecordingBus {
    pub subscriptions: Mutex<Vec<(LifecycleEventKind, Arc<dyn ContentChangeHandler>)>>,
}

impl EventBus for RecordingBus {
    fn subscribe(&self, kind: LifecycleEventKind, handler: Arc<dyn ContentChangeHandler>) {
        self.subscriptions.lock().unwrap().push((kind, handler));
    }
}

/// An eligible publish event: freshly published, previously a draft.
pub fn published_event(html: &str) -> ContentChangeEvent {
    ContentChangeEvent {
        resource: ContentResource {
            id: "resource-1".to_string(),
            status: ContentStatus::Published,
            html: html.to_string(),
            previous: Some(PreviousRevision {
                status: ContentStatus::Draft,
                html: String::new(),
            }),
        },
        importing: false,
        internal: false,
    }
}
