//! Capability interfaces for the collaborators the dispatcher consumes.
//!
//! Implemented elsewhere (discovery crawler, settings store, job queue);
//! this crate ships only the contracts plus two executor conveniences.

use super::lifecycle::ContentResource;
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use url::Url;

/// A submitted send, boxed so executors can queue or spawn it. The work
/// handles its own failures; executors never see a send error.
pub type UnitOfWork = BoxFuture<'static, ()>;

/// Locates a target page's webmention receiver URL via its link-relation
/// metadata. `None` means the target does not accept webmentions.
#[async_trait]
pub trait EndpointDiscovery: Send + Sync {
    async fn endpoint_for(&self, target: &Url) -> anyhow::Result<Option<Url>>;
}

/// Whether outbound webmentions are enabled for this installation.
pub trait FeatureFlag: Send + Sync {
    fn is_enabled(&self) -> bool;
}

/// Maps a content resource to its public permalink.
pub trait ResourceUrlResolver: Send + Sync {
    fn public_url(&self, resource: &ContentResource) -> anyhow::Result<Url>;
}

/// Queue/worker abstraction decoupling task submission from execution.
/// Submitted work may run immediately or deferred; delivery is best-effort.
#[async_trait]
pub trait UnitOfWorkExecutor: Send + Sync {
    async fn submit(&self, name: &str, work: UnitOfWork) -> anyhow::Result<()>;
}

/// Runs submitted work immediately on the caller's task. Useful in tests
/// and small deployments without a job queue.
pub struct InlineExecutor;

#[async_trait]
impl UnitOfWorkExecutor for InlineExecutor {
    async fn submit(&self, _name: &str, work: UnitOfWork) -> anyhow::Result<()> {
        work.await;
        Ok(())
    }
}

/// Detaches submitted work onto the tokio runtime so dispatch returns
/// without blocking on remote round-trips.
pub struct SpawnExecutor;

#[async_trait]
impl UnitOfWorkExecutor for SpawnExecutor {
    async fn submit(&self, name: &str, work: UnitOfWork) -> anyhow::Result<()> {
        tracing::debug!(job = name, "spawning unit of work");
        tokio::spawn(work);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn inline_executor_runs_work_before_returning() {
        let ran = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ran);
        InlineExecutor
            .submit(
                "test",
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
                .boxed(),
            )
            .await
            .unwrap();
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn spawn_executor_runs_work_eventually() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        SpawnExecutor
            .submit(
                "test",
                async move {
                    let _ = tx.send(());
                }
                .boxed(),
            )
            .await
            .unwrap();
        rx.await.unwrap();
    }
}
