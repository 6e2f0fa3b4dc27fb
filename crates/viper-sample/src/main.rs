//! # VIPER Recipe App
//!
//! A terminal sample app built on the `viper-framework` screen pattern.
//!
//! ## 🚀 Core Components
//!
//! - **[`viper_framework`]**: The generic screen assembly. Contains [`Screen`](viper_framework::Screen) and the [`Interactor`](viper_framework::Interactor) trait.
//! - **model**: Pure data structures ([`User`](viper_sample::model::User)) decoded from the remote API.
//! - **interactor**: The HTTP data source ([`UsersInteractor`](viper_sample::interactor::UsersInteractor)).
//! - **router**: Composition root ([`UsersRouter`](viper_sample::router::UsersRouter)) that assembles and later dismisses the screen.
//! - **tui**: The terminal render surface ([`UserListTui`](viper_sample::tui::UserListTui)).
//!
//! ## 📚 Quick Start
//!
//! The application entry point is in [`main`], which demonstrates:
//! 1.  Starting the screen through [`UsersRouter`](viper_sample::router::UsersRouter).
//! 2.  Handing the entry point to the terminal view.
//! 3.  Dismissing the screen once the user quits.
//!
//! ## 🧪 Testing
//!
//! See [`viper_framework::mock`] for utilities to test presenters without a terminal.

use anyhow::Result;
use tracing::info;
use viper_framework::tracing::setup_tracing;
use viper_sample::router::UsersRouter;
use viper_sample::tui::UserListTui;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup tracing once for the entire application. Output is gated on
    // RUST_LOG, so the terminal view stays clean unless asked otherwise.
    setup_tracing();

    info!("Starting user list screen");

    let (router, entry) = UsersRouter::start()?;

    // The view owns the terminal until the user quits.
    UserListTui::present(entry).await?;

    // Tear the screen down gracefully
    router.dismiss().await.map_err(anyhow::Error::msg)?;

    info!("Application completed successfully");
    Ok(())
}
