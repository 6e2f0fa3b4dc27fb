//! # Interactor Contract
//!
//! The `Interactor` trait defines the single data operation a screen needs:
//! fetch the full entity list. It is the only role that talks to the
//! outside world, and it knows nothing about presentation. Implement it
//! over HTTP, a database, or a fixture; the rest of the screen is unchanged.
//!
//! # Architecture Note
//! Fetches are dispatched as detached tokio tasks ([`spawn_fetch`]). The
//! task reports back through a [`FetchListener`], which holds only a weak
//! reference to the presenter's inbox. If the screen was dismissed while
//! the fetch was in flight, delivery quietly fails and the result is
//! dropped. That is the whole teardown story: no cancellation tokens, no
//! task registry, no panic on a dead peer.

use crate::message::{FetchResult, PresenterRequest};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Data source for a screen: one async operation returning the full list.
///
/// # Contract
/// - One call produces exactly one [`FetchResult`].
/// - No retries, no caching, no partial results. Callers that want fresher
///   data fetch again.
/// - Implementations must be shareable (`Send + Sync`) because each fetch
///   runs on its own task while the owner keeps the instance alive.
#[async_trait]
pub trait Interactor: Send + Sync + 'static {
    /// The entity this interactor produces.
    type Entity: Send + 'static;

    /// Fetches the full entity list from the underlying source.
    async fn fetch_all(&self) -> FetchResult<Self::Entity>;
}

/// One-shot delivery path from a finished fetch back to its presenter.
///
/// A listener is minted per fetch and consumed by [`complete`], so a single
/// fetch can never report twice. The presenter side is held weakly: if the
/// presenter (and with it the screen) is gone by the time the fetch
/// finishes, `complete` reports `false` and the result evaporates.
///
/// [`complete`]: FetchListener::complete
#[derive(Debug)]
pub struct FetchListener<E> {
    target: mpsc::WeakSender<PresenterRequest<E>>,
}

impl<E: Send + 'static> FetchListener<E> {
    pub(crate) fn new(target: mpsc::WeakSender<PresenterRequest<E>>) -> Self {
        Self { target }
    }

    /// Delivers the fetch outcome to the presenter.
    ///
    /// Returns `true` if the presenter accepted the completion, `false` if
    /// it had already been torn down.
    pub async fn complete(self, result: FetchResult<E>) -> bool {
        match self.target.upgrade() {
            Some(inbox) => inbox
                .send(PresenterRequest::FetchCompleted(result))
                .await
                .is_ok(),
            None => false,
        }
    }
}

/// Dispatches one fetch on a fresh task and wires its completion to the
/// listener.
///
/// The task holds its own `Arc` to the interactor, so an in-flight fetch
/// keeps the data source alive even if the screen is dismissed underneath
/// it. The returned handle is purely informational; nothing joins it.
pub fn spawn_fetch<I: Interactor>(
    interactor: Arc<I>,
    listener: FetchListener<I::Entity>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!("Fetch task started");
        let result = interactor.fetch_all().await;
        if !listener.complete(result).await {
            debug!("Presenter detached, fetch result dropped");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    struct StaticSource;

    #[async_trait]
    impl Interactor for StaticSource {
        type Entity = u32;

        async fn fetch_all(&self) -> FetchResult<u32> {
            Ok(vec![1, 2, 3])
        }
    }

    struct FailingSource;

    #[async_trait]
    impl Interactor for FailingSource {
        type Entity = u32;

        async fn fetch_all(&self) -> FetchResult<u32> {
            Err(FetchError::transport("wire cut"))
        }
    }

    #[tokio::test]
    async fn test_spawned_fetch_delivers_completion() {
        let (tx, mut rx) = mpsc::channel(8);
        let listener = FetchListener::new(tx.downgrade());

        spawn_fetch(Arc::new(StaticSource), listener)
            .await
            .unwrap();

        match rx.recv().await {
            Some(PresenterRequest::FetchCompleted(Ok(items))) => {
                assert_eq!(items, vec![1, 2, 3]);
            }
            other => panic!("expected a successful completion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_spawned_fetch_delivers_failure() {
        let (tx, mut rx) = mpsc::channel(8);
        let listener = FetchListener::new(tx.downgrade());

        spawn_fetch(Arc::new(FailingSource), listener)
            .await
            .unwrap();

        match rx.recv().await {
            Some(PresenterRequest::FetchCompleted(Err(err))) => {
                assert_eq!(err, FetchError::transport("wire cut"));
            }
            other => panic!("expected a failed completion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_completion_without_presenter_is_dropped() {
        let (tx, rx) = mpsc::channel::<PresenterRequest<u32>>(8);
        let listener = FetchListener::new(tx.downgrade());

        // Tear the presenter side down before the fetch reports.
        drop(tx);
        drop(rx);

        assert!(!listener.complete(Ok(vec![7])).await);
    }
}
