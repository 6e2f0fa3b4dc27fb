//! Domain entities for the users screen.

pub mod user;

pub use user::User;
