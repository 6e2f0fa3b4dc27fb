//! # Presenter
//!
//! The presenter is the mediation point of a screen: it reacts to view
//! intents by starting fetches, and to fetch completions by commanding the
//! view. It owns no data source and no surface; it holds weak references
//! to both, plus a liveness handle to the router that assembled it.
//!
//! # Architecture Note
//! The presenter runs as a single tokio task draining one inbox. Every
//! state transition it makes happens inside that run loop, so there is no
//! lock and no re-entrancy: a completion can never interleave with a
//! refresh half-way through. This is the message-loop translation of
//! "confine the component to one thread".

use crate::interactor::{spawn_fetch, FetchListener, Interactor};
use crate::message::{entity_label, FetchResult, PresenterRequest};
use crate::screen::RouterHandle;
use crate::view::ViewHandle;
use std::sync::Weak;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Mediator between one view, one interactor, and the router that owns
/// them.
///
/// Built fully wired by the router; by the time `run` is entered, all
/// three back-references are in place and no request has been processed.
pub struct Presenter<I: Interactor> {
    requests: mpsc::Receiver<PresenterRequest<I::Entity>>,
    /// Weak clone of the inbox above, used to mint a listener per fetch.
    inbox: mpsc::WeakSender<PresenterRequest<I::Entity>>,
    router: RouterHandle,
    view: ViewHandle<I::Entity>,
    interactor: Weak<I>,
}

impl<I: Interactor> Presenter<I> {
    pub(crate) fn new(
        requests: mpsc::Receiver<PresenterRequest<I::Entity>>,
        inbox: mpsc::WeakSender<PresenterRequest<I::Entity>>,
        router: RouterHandle,
        view: ViewHandle<I::Entity>,
        interactor: Weak<I>,
    ) -> Self {
        Self {
            requests,
            inbox,
            router,
            view,
            interactor,
        }
    }

    /// Drains the inbox until every sender is gone, then exits.
    ///
    /// The router holds the only strong sender, so dismissing the screen is
    /// what ends this loop. Requests already queued at dismissal are still
    /// drained, but completions among them are dropped because the router
    /// is no longer attached.
    pub async fn run(mut self) {
        let entity = entity_label::<I::Entity>();
        info!(entity, "Presenter started");

        while let Some(request) = self.requests.recv().await {
            match request {
                PresenterRequest::ViewReady => {
                    debug!(entity, "View ready");
                    self.start_fetch();
                }
                PresenterRequest::RefreshRequested => {
                    debug!(entity, "Refresh requested");
                    self.start_fetch();
                }
                PresenterRequest::FetchCompleted(result) => {
                    self.interactor_did_fetch(result).await;
                }
            }
        }

        info!(entity, "Presenter stopped");
    }

    /// Dispatches one background fetch reporting back to this inbox.
    fn start_fetch(&self) {
        let Some(interactor) = self.interactor.upgrade() else {
            debug!("Interactor gone, fetch skipped");
            return;
        };
        // Fetch tasks are detached. Their completion, if any, arrives
        // through the listener.
        let _ = spawn_fetch(interactor, FetchListener::new(self.inbox.clone()));
    }

    /// Translates one fetch outcome into exactly one view command.
    async fn interactor_did_fetch(&mut self, result: FetchResult<I::Entity>) {
        if !self.router.is_attached() {
            debug!("Screen dismissed, completion dropped");
            return;
        }

        match result {
            Ok(items) => {
                info!(count = items.len(), "Fetch succeeded");
                if !self.view.update_list(items).await {
                    debug!("View gone, list update dropped");
                }
            }
            Err(error) => {
                warn!(error = %error, "Fetch failed");
                if !self.view.update_error(error.to_string()).await {
                    debug!("View gone, error update dropped");
                }
            }
        }
    }
}

/// Weak facade the render surface uses to talk to its presenter.
///
/// Posting is non-blocking: view intents come from a rendering thread that
/// must never wait on a channel. Each method reports whether the intent
/// actually reached a live presenter.
#[derive(Debug)]
pub struct PresenterHandle<E> {
    requests: mpsc::WeakSender<PresenterRequest<E>>,
}

impl<E> Clone for PresenterHandle<E> {
    fn clone(&self) -> Self {
        Self {
            requests: self.requests.clone(),
        }
    }
}

impl<E: Send + 'static> PresenterHandle<E> {
    pub(crate) fn new(requests: mpsc::WeakSender<PresenterRequest<E>>) -> Self {
        Self { requests }
    }

    /// The surface is up; triggers the first fetch.
    pub fn view_ready(&self) -> bool {
        self.post(PresenterRequest::ViewReady)
    }

    /// The user asked for fresh data; triggers another fetch.
    pub fn request_refresh(&self) -> bool {
        self.post(PresenterRequest::RefreshRequested)
    }

    /// Whether the presenter task is still reachable.
    pub fn is_attached(&self) -> bool {
        self.requests.upgrade().is_some()
    }

    /// Mints a completion listener targeting this presenter. Useful for
    /// driving the completion path from an alternative fetch mechanism,
    /// or from tests.
    pub fn fetch_listener(&self) -> FetchListener<E> {
        FetchListener::new(self.requests.clone())
    }

    fn post(&self, request: PresenterRequest<E>) -> bool {
        match self.requests.upgrade() {
            Some(tx) => tx.try_send(request).is_ok(),
            None => false,
        }
    }
}
