//! # Terminal View
//!
//! The real render surface for the users screen: a full-screen terminal
//! list with keyboard navigation.
//!
//! ## Design:
//! - The view owns UI state only (list contents on screen, selection,
//!   quit flag); data arrives as [`ViewCommand`]s over the screen's
//!   channel
//! - The event loop runs on a dedicated blocking thread; every mutation
//!   of view state happens there and nowhere else
//! - User intents (ready, refresh) go back through the weak
//!   [`PresenterHandle`], so a dismissed screen turns key presses into
//!   no-ops instead of errors

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use viper_framework::{EntryPoint, ListView, PresenterHandle, ViewCommand};

use crate::model::User;

/// What the content area currently shows.
#[derive(Debug)]
enum Content {
    /// No data yet; the first fetch is in flight.
    Loading,
    /// The fetched user list (possibly empty).
    Users,
    /// The last fetch failed with this message.
    Failed(String),
}

/// Terminal list screen for [`User`] entities.
pub struct UserListTui {
    users: Vec<User>,
    content: Content,
    list_state: ListState,
    should_quit: bool,
    presenter: PresenterHandle<User>,
}

impl UserListTui {
    fn new(presenter: PresenterHandle<User>) -> Self {
        Self {
            users: Vec::new(),
            content: Content::Loading,
            list_state: ListState::default(),
            should_quit: false,
            presenter,
        }
    }

    /// Attaches a terminal surface to a started screen and runs it until
    /// the user quits (or the screen is dismissed underneath it).
    pub async fn present(entry: EntryPoint<User>) -> Result<()> {
        let (commands, presenter) = entry.into_parts();
        let view = Self::new(presenter);
        tokio::task::spawn_blocking(move || view.run(commands)).await?
    }

    /// Takes over the terminal, runs the event loop, restores the
    /// terminal.
    fn run(mut self, mut commands: mpsc::Receiver<ViewCommand<User>>) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // The surface exists now; this is what starts the first fetch.
        self.presenter.view_ready();

        let result = self.event_loop(&mut terminal, &mut commands);

        // Cleanup terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        commands: &mut mpsc::Receiver<ViewCommand<User>>,
    ) -> Result<()> {
        loop {
            // Draw current state
            terminal.draw(|f| self.render(f))?;

            // Handle input with a timeout so presenter updates still land
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key_event(key);
                }
            }

            // Apply whatever the presenter delivered since the last pass
            loop {
                match commands.try_recv() {
                    Ok(ViewCommand::UpdateList(users)) => self.update_list(users),
                    Ok(ViewCommand::UpdateError(message)) => self.update_error(message),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        // The screen is gone; a surface without a screen
                        // has nothing left to show.
                        self.should_quit = true;
                        break;
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle keyboard input
    fn handle_key_event(&mut self, key: KeyEvent) {
        // Only handle key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('r') => {
                self.presenter.request_refresh();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
            }
            KeyCode::Home => {
                if !self.users.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            _ => {}
        }
    }

    fn select_previous(&mut self) {
        if self.users.is_empty() {
            return;
        }
        let selected = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(selected.saturating_sub(1)));
    }

    fn select_next(&mut self) {
        if self.users.is_empty() {
            return;
        }
        let last = self.users.len() - 1;
        let selected = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some((selected + 1).min(last)));
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(f.area());

        match &self.content {
            Content::Loading => {
                let loading = Paragraph::new("Fetching users...")
                    .block(Block::default().title("Users").borders(Borders::ALL));
                f.render_widget(loading, chunks[0]);
            }
            Content::Failed(message) => {
                let error = Paragraph::new(message.as_str())
                    .style(Style::default().fg(Color::Red))
                    .block(Block::default().title("Error").borders(Borders::ALL));
                f.render_widget(error, chunks[0]);
            }
            Content::Users => {
                let items: Vec<ListItem> = self
                    .users
                    .iter()
                    .map(|user| ListItem::new(user.display_label()))
                    .collect();
                let list = List::new(items)
                    .block(
                        Block::default()
                            .title(format!("Users ({})", self.users.len()))
                            .borders(Borders::ALL),
                    )
                    .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                    .highlight_symbol("> ");
                f.render_stateful_widget(list, chunks[0], &mut self.list_state);
            }
        }

        let hints = Paragraph::new("[q] quit  [r] refresh  [up/down] select")
            .style(Style::default().add_modifier(Modifier::DIM));
        f.render_widget(hints, chunks[1]);
    }
}

impl ListView for UserListTui {
    type Entity = User;

    fn update_list(&mut self, items: Vec<User>) {
        self.users = items;
        self.content = Content::Users;
        // Keep the selection, clamped to the new list.
        match self.users.len() {
            0 => self.list_state.select(None),
            len => {
                let selected = self.list_state.selected().unwrap_or(0).min(len - 1);
                self.list_state.select(Some(selected));
            }
        }
    }

    fn update_error(&mut self, message: String) {
        self.content = Content::Failed(message);
    }
}
