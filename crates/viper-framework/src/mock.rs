//! # Mock Toolkit & Testing Guide
//!
//! The `MockInteractor<E>` type implements the same [`Interactor`] contract
//! as a production data source but operates entirely in-memory. It lets you
//! script fetch outcomes for unit tests, enabling fast, deterministic
//! testing of presenter and screen logic without any network.
//!
//! ## When to use mocks vs a real source
//!
//! | Feature | MockInteractor | Real source |
//! |---------|----------------|-------------|
//! | **Speed** | Instant (in-memory) | Network round trip |
//! | **Determinism** | 100% deterministic | Subject to the wire |
//! | **Error injection** | Easy (`return_err`) | Hard (needs a broken server) |
//! | **Timing control** | Gates hold a fetch in flight | None |
//! | **Use case** | Screen and presenter logic | The source itself |
//!
//! ## Scripting outcomes
//!
//! Outcomes are consumed in the order they were scripted, one per fetch.
//! A fetch with nothing scripted panics, and [`MockInteractor::verify`]
//! panics if scripted outcomes were left unconsumed, so tests fail loudly
//! on both kinds of drift.
//!
//! ## Holding a fetch in flight
//!
//! `return_ok_gated` parks the fetch on a [`FetchGate`] until the test
//! releases it. That is how "the screen was dismissed while a request was
//! in flight" becomes a deterministic scenario instead of a sleep race.
//!
//! ## Full flow example
//!
//! ```rust
//! use viper_framework::mock::{MockInteractor, RecordingView};
//! use viper_framework::{Screen, ViewCommand};
//!
//! #[tokio::main]
//! async fn main() {
//!     // 1. Script the data source
//!     let mut mock = MockInteractor::new();
//!     mock.expect_fetch().return_ok(vec!["ada", "grace"]);
//!
//!     // 2. Start the screen and attach a recording surface
//!     let (screen, entry) = Screen::start(mock.clone());
//!     let view = RecordingView::new();
//!     let probe = view.clone();
//!     let presenter = entry.presenter().clone();
//!     let surface = tokio::spawn(entry.run_on(view));
//!
//!     // 3. Drive it like a host would
//!     presenter.view_ready();
//!     probe.wait_for(1).await;
//!     assert_eq!(
//!         probe.recorded(),
//!         vec![ViewCommand::UpdateList(vec!["ada", "grace"])]
//!     );
//!
//!     // 4. Tear down and verify the script was consumed
//!     screen.dismiss().await.unwrap();
//!     surface.await.unwrap();
//!     mock.verify();
//! }
//! ```

use crate::error::FetchError;
use crate::interactor::Interactor;
use crate::message::{FetchResult, ViewCommand};
use crate::view::ListView;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{oneshot, Notify};

// =============================================================================
// SCRIPTED INTERACTOR
// =============================================================================

/// One scripted fetch outcome, optionally parked behind a gate.
struct Scripted<E> {
    result: FetchResult<E>,
    gate: Option<oneshot::Receiver<()>>,
}

/// A scriptable [`Interactor`] with expectation tracking.
///
/// Clones share the same script, so a clone can be handed to
/// [`Screen::start`](crate::Screen::start) while the original keeps
/// scripting outcomes and verifying.
///
/// # Example
/// ```ignore
/// let mut mock = MockInteractor::new();
/// mock.expect_fetch().return_ok(vec![user]);
/// mock.expect_fetch().return_err(FetchError::transport("boom"));
///
/// let (screen, entry) = Screen::start(mock.clone());
/// // Drive the screen...
/// mock.verify(); // Ensures the whole script was consumed
/// ```
pub struct MockInteractor<E> {
    script: Arc<Mutex<VecDeque<Scripted<E>>>>,
}

impl<E> Clone for MockInteractor<E> {
    fn clone(&self) -> Self {
        Self {
            script: self.script.clone(),
        }
    }
}

impl<E> Default for MockInteractor<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> MockInteractor<E> {
    /// Creates a mock with an empty script.
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Scripts the outcome of the next unscripted fetch.
    pub fn expect_fetch(&mut self) -> FetchExpectationBuilder<E> {
        FetchExpectationBuilder {
            script: self.script.clone(),
        }
    }

    /// Panics if scripted outcomes were left unconsumed.
    pub fn verify(&self) {
        let script = self.script.lock().unwrap();
        if !script.is_empty() {
            panic!(
                "Not all scripted fetches were consumed. {} remaining",
                script.len()
            );
        }
    }
}

#[async_trait]
impl<E: Send + 'static> Interactor for MockInteractor<E> {
    type Entity = E;

    async fn fetch_all(&self) -> FetchResult<E> {
        let next = self.script.lock().unwrap().pop_front();
        let Some(Scripted { result, gate }) = next else {
            panic!("MockInteractor received a fetch with nothing scripted");
        };
        if let Some(gate) = gate {
            // Park until the test releases (or drops) the gate.
            let _ = gate.await;
        }
        result
    }
}

/// Builder for one scripted fetch outcome.
pub struct FetchExpectationBuilder<E> {
    script: Arc<Mutex<VecDeque<Scripted<E>>>>,
}

impl<E> FetchExpectationBuilder<E> {
    /// The fetch succeeds with this list.
    pub fn return_ok(self, items: Vec<E>) {
        self.push(Ok(items), None);
    }

    /// The fetch fails with this error.
    pub fn return_err(self, error: FetchError) {
        self.push(Err(error), None);
    }

    /// The fetch succeeds with this list, but only after the returned gate
    /// is released. Until then the fetch stays in flight.
    pub fn return_ok_gated(self, items: Vec<E>) -> FetchGate {
        let (release, gate) = oneshot::channel();
        self.push(Ok(items), Some(gate));
        FetchGate { release }
    }

    fn push(self, result: FetchResult<E>, gate: Option<oneshot::Receiver<()>>) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted { result, gate });
    }
}

/// Releases one gated fetch. Dropping the gate releases it too, so a
/// forgotten gate cannot hang a test run.
pub struct FetchGate {
    release: oneshot::Sender<()>,
}

impl FetchGate {
    /// Lets the parked fetch complete.
    pub fn release(self) {
        let _ = self.release.send(());
    }
}

// =============================================================================
// RECORDING VIEW
// =============================================================================

/// A [`ListView`] that records every command it receives.
///
/// Clones share the same recording, so keep a clone as a probe while the
/// original is consumed by
/// [`EntryPoint::run_on`](crate::EntryPoint::run_on). `wait_for` lets a
/// test block until the presenter has actually delivered, instead of
/// sleeping and hoping.
pub struct RecordingView<E> {
    commands: Arc<Mutex<Vec<ViewCommand<E>>>>,
    notify: Arc<Notify>,
}

impl<E> Clone for RecordingView<E> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
            notify: self.notify.clone(),
        }
    }
}

impl<E> Default for RecordingView<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> RecordingView<E> {
    pub fn new() -> Self {
        Self {
            commands: Arc::new(Mutex::new(Vec::new())),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Snapshot of everything recorded so far, in delivery order.
    pub fn recorded(&self) -> Vec<ViewCommand<E>>
    where
        E: Clone,
    {
        self.commands.lock().unwrap().clone()
    }

    /// Waits until at least `count` commands have been recorded.
    pub async fn wait_for(&self, count: usize) {
        loop {
            // Register interest before checking, so a delivery between the
            // check and the await cannot be missed.
            let notified = self.notify.notified();
            if self.commands.lock().unwrap().len() >= count {
                return;
            }
            notified.await;
        }
    }

    fn record(&self, command: ViewCommand<E>) {
        self.commands.lock().unwrap().push(command);
        self.notify.notify_waiters();
    }
}

impl<E> ListView for RecordingView<E> {
    type Entity = E;

    fn update_list(&mut self, items: Vec<E>) {
        self.record(ViewCommand::UpdateList(items));
    }

    fn update_error(&mut self, message: String) {
        self.record(ViewCommand::UpdateError(message));
    }
}
