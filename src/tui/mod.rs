//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, draws the
//! [`SplitPane`], and translates crossterm events into core `Action` values.
//!
//! This is the only module that knows about the terminal. Headless output
//! and tests drive the same [`Navigator`] without it.
//!
//! ## Event Loop
//!
//! ```text
//!   crossterm events ──► map_event ──► Navigator::handle ──► Notification ──► observer
//!   data source ──mpsc──► ItemUpdate ──► Navigator::apply
//!                                   │
//!                                   ▼
//!                           redraw if anything changed
//! ```
//!
//! Input and data updates are serialized onto this one loop, so the navigator
//! needs no locking. The loop only redraws when an event or update arrived.

mod component;
mod event;
mod split_pane;

pub use component::Component;
pub use event::{map_event, poll_action};
pub use split_pane::SplitPane;

use log::{debug, info, warn};
use std::io::{self, stdout};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::action::{Action, Notification};
use crate::core::navigator::Navigator;
use crate::core::reconcile::ItemUpdate;

/// How long to block waiting for input before checking for data updates.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse capture)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Run the navigator interactively until the user quits or backs out of the
/// root level.
///
/// `updates` carries refreshes from the caller's data source; a disconnected
/// channel just means no more refreshes. Every notification is passed to
/// `observer` before the loop acts on it.
pub fn run(
    navigator: &mut Navigator,
    updates: Receiver<ItemUpdate>,
    mut observer: impl FnMut(&Notification),
) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let result = {
        let _terminal_mode_guard = TerminalModeGuard::new()
            .inspect_err(|e| warn!("Failed to enable terminal modes: {}", e))
            .ok();
        event_loop(&mut terminal, navigator, &updates, &mut observer)
    };
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    navigator: &mut Navigator,
    updates: &Receiver<ItemUpdate>,
    observer: &mut impl FnMut(&Notification),
) -> io::Result<()> {
    let size = terminal.size()?;
    navigator.handle(Action::Resize {
        width: size.width,
        height: size.height,
    });

    let mut updates_open = true;
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            terminal.draw(|f| SplitPane::new(&*navigator).render(f, f.area()))?;
            needs_redraw = false;
        }

        // Process first event + drain all pending events before next draw
        let mut actions = Vec::new();
        if let Some(action) = poll_action(POLL_TIMEOUT)? {
            actions.push(action);
            while let Some(action) = poll_action(Duration::ZERO)? {
                actions.push(action);
            }
        }

        for action in actions {
            needs_redraw = true;
            let Some(notification) = navigator.handle(action) else {
                continue;
            };
            debug!("Notification: {:?}", notification);
            observer(&notification);
            if matches!(notification, Notification::Quit | Notification::BackAtRoot) {
                info!("Exiting on {:?}", notification);
                return Ok(());
            }
        }

        // Apply data source refreshes
        while updates_open {
            match updates.try_recv() {
                Ok(update) => {
                    navigator.apply(update);
                    needs_redraw = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("Update channel closed");
                    updates_open = false;
                }
            }
        }
    }
}
