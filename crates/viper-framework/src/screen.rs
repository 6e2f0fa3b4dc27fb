//! # Screen Assembly
//!
//! The router side of the pattern. [`Screen::start`] is the composition
//! root: it creates the channels, wires every back-reference, and spawns
//! the presenter task, all before returning. [`Screen`] itself is the only
//! strong owner of the parts; everything handed out is weak.
//!
//! # Architecture Note
//! Ownership is deliberately a tree, not a web. The screen holds the
//! strong channel ends, the interactor `Arc`, and the presenter's join
//! handle. The presenter holds weak references back to the view, the
//! interactor, and the router. The view holds a weak handle to the
//! presenter. Because no component strongly references a component that
//! references it back, [`Screen::dismiss`] is sufficient to tear the whole
//! structure down: the presenter loop drains and exits, late fetch
//! completions find no inbox, and nothing leaks.

use crate::interactor::Interactor;
use crate::message::{entity_label, PresenterRequest, ViewCommand};
use crate::presenter::{Presenter, PresenterHandle};
use crate::view::{ListView, ViewHandle};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::info;

/// Inbox depth for both screen channels. A screen exchanges a handful of
/// messages per user action, so backpressure here would indicate a bug,
/// not load.
const CHANNEL_CAPACITY: usize = 32;

/// Weak liveness handle onto the router that assembled a screen.
///
/// The screen keeps the sending half of a watch channel; this receiver can
/// tell whether that half still exists without keeping it alive.
#[derive(Debug, Clone)]
pub struct RouterHandle {
    scope: watch::Receiver<()>,
}

impl RouterHandle {
    pub(crate) fn new(scope: watch::Receiver<()>) -> Self {
        Self { scope }
    }

    /// Whether the owning screen has not been dismissed yet.
    pub fn is_attached(&self) -> bool {
        self.scope.has_changed().is_ok()
    }
}

/// The host-facing half of a started screen: the stream of view commands
/// plus the handle for posting view intents.
///
/// This is what the original pattern calls the entry point: one value that
/// any render surface can be attached to. Drive it with [`run_on`] for a
/// simple surface, or take the parts apart with [`into_parts`] to embed
/// them in an event loop that also handles input.
///
/// [`run_on`]: EntryPoint::run_on
/// [`into_parts`]: EntryPoint::into_parts
#[derive(Debug)]
pub struct EntryPoint<E> {
    commands: mpsc::Receiver<ViewCommand<E>>,
    presenter: PresenterHandle<E>,
}

impl<E: Send + 'static> EntryPoint<E> {
    /// The presenter handle for this screen.
    pub fn presenter(&self) -> &PresenterHandle<E> {
        &self.presenter
    }

    /// Splits into the raw command stream and the presenter handle.
    pub fn into_parts(self) -> (mpsc::Receiver<ViewCommand<E>>, PresenterHandle<E>) {
        (self.commands, self.presenter)
    }

    /// Feeds every command to `surface` until the screen is dismissed,
    /// then returns the surface in its final state.
    ///
    /// Note this does not post `view_ready`; the caller decides when the
    /// surface counts as ready.
    pub async fn run_on<V>(self, mut surface: V) -> V
    where
        V: ListView<Entity = E>,
    {
        let (mut commands, _presenter) = self.into_parts();
        while let Some(command) = commands.recv().await {
            match command {
                ViewCommand::UpdateList(items) => surface.update_list(items),
                ViewCommand::UpdateError(message) => surface.update_error(message),
            }
        }
        surface
    }
}

/// One assembled, running screen. Owns every part; dropping or dismissing
/// it tears the whole screen down.
pub struct Screen<I: Interactor> {
    interactor: Arc<I>,
    view_tx: mpsc::Sender<ViewCommand<I::Entity>>,
    presenter_tx: mpsc::Sender<PresenterRequest<I::Entity>>,
    scope_tx: watch::Sender<()>,
    presenter_task: JoinHandle<()>,
}

impl<I: Interactor> Screen<I> {
    /// Assembles and starts a screen around the given data source.
    ///
    /// Wiring order matters only in that it all happens here: the
    /// presenter is constructed with its view, router, and interactor
    /// references already in place, and is only spawned afterwards, so no
    /// partially wired presenter can ever observe a request.
    pub fn start(interactor: I) -> (Self, EntryPoint<I::Entity>) {
        let (view_tx, view_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (presenter_tx, presenter_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (scope_tx, scope_rx) = watch::channel(());
        let interactor = Arc::new(interactor);

        let presenter = Presenter::new(
            presenter_rx,
            presenter_tx.downgrade(),
            RouterHandle::new(scope_rx),
            ViewHandle::new(view_tx.downgrade()),
            Arc::downgrade(&interactor),
        );
        let presenter_task = tokio::spawn(presenter.run());

        info!(entity = entity_label::<I::Entity>(), "Screen started");

        let entry = EntryPoint {
            commands: view_rx,
            presenter: PresenterHandle::new(presenter_tx.downgrade()),
        };
        let screen = Self {
            interactor,
            view_tx,
            presenter_tx,
            scope_tx,
            presenter_task,
        };
        (screen, entry)
    }

    /// Tears the screen down and waits for the presenter task to exit.
    ///
    /// Returns an error only if the presenter task panicked.
    pub async fn dismiss(self) -> Result<(), String> {
        let Self {
            interactor,
            view_tx,
            presenter_tx,
            scope_tx,
            presenter_task,
        } = self;
        info!("Dismissing screen");

        // Detach the router first so completions already queued behind this
        // point are dropped rather than delivered, then close the channels
        // so the presenter drains and exits and any surface loop ends.
        drop(scope_tx);
        drop(presenter_tx);
        drop(view_tx);
        drop(interactor);

        presenter_task
            .await
            .map_err(|e| format!("Presenter task panicked: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::message::FetchResult;
    use crate::mock::{MockInteractor, RecordingView};
    use async_trait::async_trait;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct Name(&'static str);

    struct EmptySource;

    #[async_trait]
    impl Interactor for EmptySource {
        type Entity = u8;

        async fn fetch_all(&self) -> FetchResult<u8> {
            Ok(Vec::new())
        }
    }

    async fn settled(probe: &RecordingView<Name>, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), probe.wait_for(count))
            .await
            .expect("timed out waiting for view updates");
    }

    #[tokio::test]
    async fn test_start_then_dismiss_detaches_handles() {
        let (screen, entry) = Screen::start(EmptySource);
        let presenter = entry.presenter().clone();
        assert!(presenter.is_attached());

        screen.dismiss().await.unwrap();
        assert!(!presenter.is_attached());
        assert!(!presenter.view_ready());
    }

    #[tokio::test]
    async fn test_ready_fetch_render_flow() {
        let mut mock = MockInteractor::new();
        mock.expect_fetch()
            .return_ok(vec![Name("ada"), Name("grace")]);

        let (screen, entry) = Screen::start(mock.clone());
        let probe = RecordingView::new();
        let presenter = entry.presenter().clone();
        let surface = tokio::spawn(entry.run_on(probe.clone()));

        assert!(presenter.view_ready());
        settled(&probe, 1).await;
        assert_eq!(
            probe.recorded(),
            vec![ViewCommand::UpdateList(vec![Name("ada"), Name("grace")])]
        );

        screen.dismiss().await.unwrap();
        surface.await.unwrap();
        mock.verify();
    }

    #[tokio::test]
    async fn test_each_trigger_yields_exactly_one_update() {
        let mut mock = MockInteractor::new();
        mock.expect_fetch().return_ok(vec![Name("ada")]);
        mock.expect_fetch()
            .return_err(FetchError::transport("refused"));

        let (screen, entry) = Screen::start(mock.clone());
        let probe = RecordingView::new();
        let presenter = entry.presenter().clone();
        let surface = tokio::spawn(entry.run_on(probe.clone()));

        presenter.view_ready();
        settled(&probe, 1).await;
        presenter.request_refresh();
        settled(&probe, 2).await;

        screen.dismiss().await.unwrap();
        surface.await.unwrap();

        let recorded = probe.recorded();
        assert_eq!(recorded.len(), 2);
        assert_eq!(
            recorded[0],
            ViewCommand::UpdateList(vec![Name("ada")])
        );
        match &recorded[1] {
            ViewCommand::UpdateError(message) => {
                assert!(message.contains("Transport"));
            }
            other => panic!("expected an error update, got {other:?}"),
        }
        mock.verify();
    }

    #[tokio::test]
    async fn test_completions_apply_in_arrival_order() {
        let (screen, entry) = Screen::start(MockInteractor::<Name>::new());
        let probe = RecordingView::new();
        let presenter = entry.presenter().clone();
        let surface = tokio::spawn(entry.run_on(probe.clone()));

        // Two fetches in flight; the one dispatched first finishes last.
        let first = presenter.fetch_listener();
        let second = presenter.fetch_listener();
        assert!(second.complete(Ok(vec![Name("newer")])).await);
        settled(&probe, 1).await;
        assert!(first.complete(Ok(vec![Name("older")])).await);
        settled(&probe, 2).await;

        assert_eq!(
            probe.recorded(),
            vec![
                ViewCommand::UpdateList(vec![Name("newer")]),
                ViewCommand::UpdateList(vec![Name("older")]),
            ]
        );

        screen.dismiss().await.unwrap();
        surface.await.unwrap();
    }

    #[tokio::test]
    async fn test_late_completion_after_dismiss_is_dropped() {
        let (screen, entry) = Screen::start(MockInteractor::<Name>::new());
        let listener = entry.presenter().fetch_listener();

        screen.dismiss().await.unwrap();

        assert!(!listener.complete(Ok(vec![Name("ghost")])).await);
    }

    #[tokio::test]
    async fn test_dismiss_with_fetch_in_flight_delivers_nothing() {
        let mut mock = MockInteractor::new();
        let gate = mock.expect_fetch().return_ok_gated(vec![Name("late")]);

        let (screen, entry) = Screen::start(mock.clone());
        let probe = RecordingView::new();
        let presenter = entry.presenter().clone();
        let surface = tokio::spawn(entry.run_on(probe.clone()));

        presenter.view_ready();
        screen.dismiss().await.unwrap();
        surface.await.unwrap();

        // The fetch finishes only now, against a dismissed screen.
        gate.release();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(probe.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_closed_surface_does_not_fail_presenter() {
        let (screen, entry) = Screen::start(MockInteractor::<Name>::new());
        let listener = entry.presenter().fetch_listener();
        drop(entry);

        // The presenter accepts the completion but finds no surface.
        assert!(listener.complete(Ok(vec![Name("unseen")])).await);

        // A panic inside the presenter task would surface here as Err.
        screen.dismiss().await.unwrap();
    }
}
