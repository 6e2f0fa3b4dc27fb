//! # View Contract
//!
//! A render surface implements [`ListView`] and is driven by the commands
//! the presenter emits. The surface owns presentation state only (what is
//! on screen, what is selected); it never derives data and never talks to
//! the interactor.
//!
//! The presenter's side of the relationship is [`ViewHandle`]: a weak,
//! send-only facade over the view's command channel. Commands posted to a
//! surface that has been torn down are silently dropped, which is exactly
//! what a completion arriving mid-dismissal should do.

use crate::message::ViewCommand;
use tokio::sync::mpsc;

/// A surface that can display an entity list or a failure message.
///
/// Implementations receive each command on their own rendering thread of
/// execution; the framework never mutates a view from anywhere else.
pub trait ListView {
    /// The entity this surface renders.
    type Entity;

    /// Replace the displayed list. An empty list is a valid, renderable
    /// state, not an error.
    fn update_list(&mut self, items: Vec<Self::Entity>);

    /// Replace the content area with a failure message.
    fn update_error(&mut self, message: String);
}

/// Weak, send-only path from the presenter to the render surface.
#[derive(Debug)]
pub struct ViewHandle<E> {
    commands: mpsc::WeakSender<ViewCommand<E>>,
}

impl<E: Send + 'static> ViewHandle<E> {
    pub(crate) fn new(commands: mpsc::WeakSender<ViewCommand<E>>) -> Self {
        Self { commands }
    }

    /// Posts a replacement list. Returns `false` if the surface is gone.
    pub async fn update_list(&self, items: Vec<E>) -> bool {
        self.post(ViewCommand::UpdateList(items)).await
    }

    /// Posts a failure message. Returns `false` if the surface is gone.
    pub async fn update_error(&self, message: String) -> bool {
        self.post(ViewCommand::UpdateError(message)).await
    }

    async fn post(&self, command: ViewCommand<E>) -> bool {
        match self.commands.upgrade() {
            Some(tx) => tx.send(command).await.is_ok(),
            None => false,
        }
    }
}
