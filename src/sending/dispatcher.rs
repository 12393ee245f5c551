use super::lifecycle::{
    ContentChangeEvent, ContentChangeHandler, ContentStatus, EventBus, LifecycleEventKind,
};
use super::sender::{OutboundNotification, SafeHttpSender};
use super::traits::{EndpointDiscovery, FeatureFlag, ResourceUrlResolver, UnitOfWorkExecutor};
use crate::links;
use async_trait::async_trait;
use futures_util::FutureExt;
use std::sync::Arc;
use url::Url;

/// Everything `send_all` needs for one content change: the resource's public
/// URL (also the own-origin filter), its rendered body, and the previous
/// body when the previous revision was publicly visible.
#[derive(Debug, Clone)]
pub struct ResourceContent {
    pub url: Url,
    pub html: String,
    pub previous_html: Option<String>,
}

/// Subscribes to content-lifecycle events, gates eligibility, and fans out
/// one independent send per linked target.
pub struct MentionDispatcher {
    sender: Arc<SafeHttpSender>,
    discovery: Arc<dyn EndpointDiscovery>,
    feature: Arc<dyn FeatureFlag>,
    urls: Arc<dyn ResourceUrlResolver>,
    executor: Arc<dyn UnitOfWorkExecutor>,
}

impl MentionDispatcher {
    pub fn new(
        sender: Arc<SafeHttpSender>,
        discovery: Arc<dyn EndpointDiscovery>,
        feature: Arc<dyn FeatureFlag>,
        urls: Arc<dyn ResourceUrlResolver>,
        executor: Arc<dyn UnitOfWorkExecutor>,
    ) -> Self {
        Self {
            sender,
            discovery,
            feature,
            urls,
            executor,
        }
    }

    /// Register for all three lifecycle triggers. Publish, publish-with-edit
    /// and unpublish all route to the same handler.
    pub fn listen(self: Arc<Self>, bus: &dyn EventBus) {
        for kind in [
            LifecycleEventKind::Published,
            LifecycleEventKind::PublishedEdited,
            LifecycleEventKind::Unpublished,
        ] {
            bus.subscribe(kind, Arc::clone(&self) as Arc<dyn ContentChangeHandler>);
        }
    }

    async fn process(&self, event: &ContentChangeEvent) -> anyhow::Result<()> {
        if !self.feature.is_enabled() {
            return Ok(());
        }
        if event.importing || event.internal {
            return Ok(());
        }

        let resource = &event.resource;
        let previous_status = resource.previous.as_ref().map(|p| p.status);

        // Only relevant when the resource is or was publicly visible.
        if resource.status != ContentStatus::Published
            && previous_status != Some(ContentStatus::Published)
        {
            return Ok(());
        }
        if resource.status == ContentStatus::EmailOnly {
            return Ok(());
        }
        // Nothing to re-announce when neither status nor body moved.
        if let Some(previous) = &resource.previous
            && previous.status == resource.status
            && previous.html == resource.html
        {
            return Ok(());
        }

        let url = self.urls.public_url(resource)?;
        let previous_html = resource
            .previous
            .as_ref()
            .filter(|p| p.status == ContentStatus::Published)
            .map(|p| p.html.clone());

        self.send_all(ResourceContent {
            url,
            html: resource.html.clone(),
            previous_html,
        })
        .await
    }

    /// Fan out one notification per linked target.
    ///
    /// Targets come from the union of current and previous revisions, so an
    /// unpublished or edited-away link still gets a final notification and
    /// its receiver can recrawl. Each submitted send logs its own failure
    /// and never aborts or delays its siblings; discovery and submission
    /// errors propagate to the caller.
    pub async fn send_all(&self, content: ResourceContent) -> anyhow::Result<()> {
        let targets = links::resolve(
            &content.html,
            content.previous_html.as_deref(),
            Some(&content.url),
        );
        tracing::debug!(url = %content.url, count = targets.len(), "resolved webmention targets");

        for target in targets {
            let Some(endpoint) = self.discovery.endpoint_for(&target).await? else {
                tracing::debug!(target = %target, "no webmention endpoint advertised");
                continue;
            };

            let sender = Arc::clone(&self.sender);
            let notification = OutboundNotification {
                source: content.url.clone(),
                target,
                endpoint,
            };
            let work = async move {
                if let Err(e) = sender.send(&notification).await {
                    tracing::error!(
                        target = %notification.target,
                        endpoint = %notification.endpoint,
                        error = %e,
                        "webmention send failed"
                    );
                }
            }
            .boxed();
            self.executor.submit("mention-send", work).await?;
        }

        Ok(())
    }
}

#[async_trait]
impl ContentChangeHandler for MentionDispatcher {
    /// Event-handler boundary: the bus has no isolation of its own across
    /// listeners, so every pipeline failure is absorbed and logged here.
    async fn on_content_changed(&self, event: ContentChangeEvent) {
        if let Err(e) = self.process(&event).await {
            tracing::error!(resource = %event.resource.id, "webmention dispatch failed");
            tracing::error!(error = ?e, "webmention dispatch error detail");
        }
    }
}
