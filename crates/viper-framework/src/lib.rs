//! # VIPER Screen Framework
//!
//! This crate provides the foundational building blocks for assembling a
//! **VIPER** screen in Rust: one View, one Interactor, one Presenter, the
//! Entities flowing between them, and a Router that owns the lot. The
//! pattern's original home is iOS codebases; this crate re-expresses its
//! wiring discipline on top of tokio tasks and channels.
//!
//! ## Why VIPER on an async runtime?
//!
//! VIPER's whole value is the discipline of its arrows: data flows one way,
//! back-references are non-owning, and exactly one place assembles and owns
//! a screen. Those rules translate cleanly into ownership:
//!
//! ### The roles
//!
//! - **Entity**: plain data structs, no behavior beyond decoding
//! - **Interactor**: the only role that touches the outside world
//! - **Presenter**: pure mediation, one inbox, one task
//! - **View**: presentation state only, driven by commands
//! - **Router**: the composition root and sole strong owner
//!
//! ### The arrows
//!
//! - Strong references all live in the [`Screen`] (the router's scope)
//! - Presenter to View, View to Presenter, and fetch completions all travel
//!   over weak channel handles that upgrade-or-drop
//! - Presenter to Interactor is a `std::sync::Weak`
//! - Nothing holds a strong reference to anything that references it back,
//!   so dismissal is a plain drop cascade with no leak and no cycle
//!
//! The net effect is the same guarantee the pattern gives a UIKit app: you
//! can always answer "who owns this screen" with one word, and tearing the
//! screen down cannot strand a background fetch or deliver into freed
//! state.
//!
//! **Further Reading**:
//! - [Architecting iOS Apps with VIPER (objc.io)](https://www.objc.io/issues/13-architecture/viper/) - The canonical description of the pattern
//! - [The Clean Architecture](https://blog.cleancoder.com/uncle-bob/2012/08/13/the-clean-architecture.html) - The dependency-rule family VIPER belongs to
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - The message-loop style the presenter task uses
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Contract Layer** ([`Interactor`], [`ListView`]) - Your data source and render surface
//! 2. **Mediation Layer** ([`Presenter`](presenter::Presenter)) - One task translating intents into fetches and completions into commands
//! 3. **Assembly Layer** ([`Screen`], [`EntryPoint`]) - Wiring, ownership, and teardown
//!
//! You implement the two contracts; the framework owns every channel,
//! every weak reference, and the whole lifecycle.
//!
//! ## Quick Start
//!
//! ```rust
//! use viper_framework::{FetchResult, Interactor, Screen};
//! use viper_framework::mock::RecordingView;
//! use async_trait::async_trait;
//!
//! // 1. An entity and a data source
//! #[derive(Debug, Clone, PartialEq)]
//! struct Contact {
//!     name: String,
//! }
//!
//! struct StaticDirectory;
//!
//! #[async_trait]
//! impl Interactor for StaticDirectory {
//!     type Entity = Contact;
//!
//!     async fn fetch_all(&self) -> FetchResult<Contact> {
//!         Ok(vec![Contact { name: "Ada".to_string() }])
//!     }
//! }
//!
//! // 2. Assemble, drive, dismiss
//! #[tokio::main]
//! async fn main() {
//!     let (screen, entry) = Screen::start(StaticDirectory);
//!
//!     let view = RecordingView::new();
//!     let probe = view.clone();
//!     let presenter = entry.presenter().clone();
//!     let surface = tokio::spawn(entry.run_on(view));
//!
//!     presenter.view_ready();
//!     probe.wait_for(1).await;
//!
//!     screen.dismiss().await.unwrap();
//!     surface.await.unwrap();
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - The presenter runs in its own tokio task and processes its inbox
//!   **sequentially**, so mediation logic needs no locks
//! - Each fetch runs in its own detached task; completions come back as
//!   inbox messages, never as reentrant calls
//! - The view mutates only on its own rendering thread of execution;
//!   commands are marshalled to it over a channel
//! - A completion that arrives after teardown upgrades nothing and is
//!   silently dropped
//!
//! ## Testing
//!
//! The [`mock`] module provides a scriptable **MockInteractor** (with gates
//! for holding a fetch in flight) and a **RecordingView** that captures
//! every command a presenter delivers. Together they make every lifecycle
//! edge of a screen, including dismissal races, a deterministic unit test.

pub mod error;
pub mod interactor;
pub mod message;
pub mod mock;
pub mod presenter;
pub mod screen;
pub mod tracing;
pub mod view;

// Re-export core types for convenience
pub use error::FetchError;
pub use interactor::{spawn_fetch, FetchListener, Interactor};
pub use message::{FetchResult, PresenterRequest, ViewCommand};
pub use presenter::PresenterHandle;
pub use screen::{EntryPoint, RouterHandle, Screen};
pub use view::{ListView, ViewHandle};
