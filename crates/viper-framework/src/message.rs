//! # Screen Messages
//!
//! This module defines the message types that flow between the roles of a
//! screen. All cross-role communication is these two enums on two
//! channels; no role ever calls another role's methods directly.
//!
//! # Unidirectional Flow
//! Requests travel one way and commands travel the other:
//!
//! - [`PresenterRequest`] flows *into* the presenter task: view intents
//!   (ready, refresh) and fetch completions.
//! - [`ViewCommand`] flows *out* to the render surface: the new list, or a
//!   displayable error.
//!
//! Because the presenter only reacts to its inbox and the view only reacts
//! to its command stream, each role mutates its state from exactly one
//! thread of execution.

use crate::error::FetchError;

/// The outcome of one fetch: the full entity list, or a classified failure.
pub type FetchResult<E> = Result<Vec<E>, FetchError>;

/// Requests handled by the presenter task.
#[derive(Debug)]
pub enum PresenterRequest<E> {
    /// The render surface is up and ready for content. Starts the first
    /// fetch.
    ViewReady,
    /// The user asked for fresh data. Starts another fetch; overlapping
    /// fetches are legal and resolve by arrival order.
    RefreshRequested,
    /// A fetch finished. Produced exactly once per dispatched fetch.
    FetchCompleted(FetchResult<E>),
}

/// Commands the presenter issues to the render surface.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand<E> {
    /// Replace the displayed list with this one, in this order.
    UpdateList(Vec<E>),
    /// Show this failure message instead of content.
    UpdateError(String),
}

/// Short entity name for log fields, e.g. `my_app::model::User` -> `User`.
pub(crate) fn entity_label<E>() -> &'static str {
    std::any::type_name::<E>().rsplit("::").next().unwrap_or("entity")
}
