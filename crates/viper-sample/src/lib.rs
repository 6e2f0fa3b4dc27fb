//! # User List Sample Library
//!
//! This library exposes the core modules of the application for integration testing.

pub mod interactor;
pub mod model;
pub mod router;
pub mod tui;
