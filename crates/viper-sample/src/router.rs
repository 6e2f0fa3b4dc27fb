//! # Users Screen Router
//!
//! The router is the composition root for the user-list screen. It owns
//! the [`Screen`] and is the only place in the sample that knows how the
//! interactor, presenter, and view are wired together.
//!
//! Everything else holds handles:
//! - The caller receives an [`EntryPoint`] to drive a view with.
//! - The presenter reaches back through weak references the screen set up.
//!
//! When the router is dismissed the screen tears down, and any fetch still
//! in flight completes into a void.

use url::Url;

use viper_framework::{EntryPoint, Screen};

use crate::interactor::UsersInteractor;
use crate::model::User;

/// The endpoint the sample talks to when none is given.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

/// Owner of the user-list screen.
///
/// # Architecture Note
///
/// `UsersRouter` pins the generic [`Screen`] to this app's concrete
/// interactor. The framework does not know about HTTP or `User`; the
/// router is where those choices are made, once.
pub struct UsersRouter {
    screen: Screen<UsersInteractor>,
}

impl UsersRouter {
    /// Assembles the screen against [`DEFAULT_ENDPOINT`].
    ///
    /// Fails only if the built-in endpoint no longer parses, which would
    /// be a programming error caught on the first run.
    pub fn start() -> Result<(Self, EntryPoint<User>), url::ParseError> {
        let endpoint = Url::parse(DEFAULT_ENDPOINT)?;
        Ok(Self::start_at(endpoint))
    }

    /// Assembles the screen against a caller-chosen endpoint.
    ///
    /// Tests point this at a local mock server instead of the real API.
    pub fn start_at(endpoint: Url) -> (Self, EntryPoint<User>) {
        let interactor = UsersInteractor::new(endpoint);
        let (screen, entry) = Screen::start(interactor);
        (Self { screen }, entry)
    }

    /// Tears the screen down and waits for the presenter to finish.
    pub async fn dismiss(self) -> Result<(), String> {
        self.screen.dismiss().await
    }
}
