//! # Actions
//!
//! Every input the navigator understands becomes an [`Action`].
//! User presses `j`? That's `Action::MoveDown`.
//! Terminal resized? That's `Action::Resize { width, height }`.
//!
//! [`Navigator::handle`] applies one action to the state and returns at most
//! one [`Notification`] for the caller. No I/O happens here.
//!
//! ```text
//! Navigator + Action  →  handle()  →  Navigator' + Option<Notification>
//! ```
//!
//! Refreshes from the data source don't go through here; they use the
//! reconciliation methods on [`Navigator`] directly.

use std::fmt;

use log::debug;

use crate::core::item::ItemRef;
use crate::core::navigator::Navigator;
use crate::core::viewport::Viewport;

/// Lines scrolled per mouse wheel notch.
pub const WHEEL_SCROLL_LINES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    Home,
    End,
    PageUp,
    PageDown,
    TogglePane,
    /// Expand/collapse or drill into the selected item.
    Activate,
    Back,
    Quit,
    Resize { width: u16, height: u16 },
    WheelUp,
    WheelDown,
}

/// What happened, for the caller to act on (e.g. fetch children lazily on drill-down).
#[derive(Clone)]
pub enum Notification {
    SelectionChanged(ItemRef),
    Expanded { item: ItemRef, expanded: bool },
    DrilledDown(ItemRef),
    /// A drill-down frame was popped.
    NavigatedBack { parent_id: String },
    /// Back was pressed with nothing left to pop.
    BackAtRoot,
    Quit,
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::SelectionChanged(item) => {
                f.debug_tuple("SelectionChanged").field(&item.id()).finish()
            }
            Notification::Expanded { item, expanded } => f
                .debug_struct("Expanded")
                .field("item", &item.id())
                .field("expanded", expanded)
                .finish(),
            Notification::DrilledDown(item) => {
                f.debug_tuple("DrilledDown").field(&item.id()).finish()
            }
            Notification::NavigatedBack { parent_id } => f
                .debug_struct("NavigatedBack")
                .field("parent_id", parent_id)
                .finish(),
            Notification::BackAtRoot => f.write_str("BackAtRoot"),
            Notification::Quit => f.write_str("Quit"),
        }
    }
}

/// Which pane receives directional input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pane {
    #[default]
    List,
    Detail,
}

impl Pane {
    pub fn toggle(self) -> Self {
        match self {
            Pane::List => Pane::Detail,
            Pane::Detail => Pane::List,
        }
    }
}

impl Navigator {
    /// Apply one input event.
    pub fn handle(&mut self, action: Action) -> Option<Notification> {
        match action {
            Action::MoveUp => self.handle_move(-1),
            Action::MoveDown => self.handle_move(1),
            Action::Home => self.handle_home(),
            Action::End => self.handle_end(),
            Action::PageUp => {
                self.right.half_page_up();
                None
            }
            Action::PageDown => {
                self.right.half_page_down();
                None
            }
            Action::TogglePane => {
                self.focus = self.focus.toggle();
                debug!("Focus moved to {:?}", self.focus);
                None
            }
            Action::Activate => self.handle_activate(),
            Action::Back => self.handle_back(),
            Action::Quit => Some(Notification::Quit),
            Action::Resize { width, height } => {
                self.resize(width, height);
                None
            }
            Action::WheelUp => {
                self.focused_viewport().scroll_up(WHEEL_SCROLL_LINES);
                None
            }
            Action::WheelDown => {
                self.focused_viewport().scroll_down(WHEEL_SCROLL_LINES);
                None
            }
        }
    }

    fn focused_viewport(&mut self) -> &mut Viewport {
        match self.focus {
            Pane::List => &mut self.left,
            Pane::Detail => &mut self.right,
        }
    }

    fn handle_move(&mut self, delta: isize) -> Option<Notification> {
        if self.focus == Pane::Detail {
            if delta < 0 {
                self.right.scroll_up(1);
            } else {
                self.right.scroll_down(1);
            }
            return None;
        }

        self.state.selected_id()?;
        let len = self.state.visible_items().len();
        let current = self.state.selected_index();
        let target = current.saturating_add_signed(delta).min(len.saturating_sub(1));
        if target == current {
            return None;
        }
        self.select(target)
    }

    fn handle_home(&mut self) -> Option<Notification> {
        if self.focus == Pane::Detail {
            self.right.goto_top();
            return None;
        }
        if self.state.selected_id().is_none() || self.state.selected_index() == 0 {
            return None;
        }
        self.select(0)
    }

    fn handle_end(&mut self) -> Option<Notification> {
        if self.focus == Pane::Detail {
            self.right.goto_bottom();
            return None;
        }
        self.state.selected_id()?;
        let last = self.state.visible_items().len().checked_sub(1)?;
        if self.state.selected_index() == last {
            return None;
        }
        self.select(last)
    }

    fn select(&mut self, index: usize) -> Option<Notification> {
        if !self.state.select_index(index) {
            return None;
        }
        self.sync_and_reset_detail();
        self.state.selected_item().map(Notification::SelectionChanged)
    }

    fn handle_activate(&mut self) -> Option<Notification> {
        if self.focus != Pane::List {
            return None;
        }
        let item = self.state.selected_item()?;

        if self.state.can_expand(&item) {
            let expanded = self.state.toggle_expanded(item.id());
            debug!("{} {}", if expanded { "Expanded" } else { "Collapsed" }, item.id());
            self.sync_and_reset_detail();
            return Some(Notification::Expanded { item, expanded });
        }

        if item.can_drill_down() {
            self.state.drill_into(&item);
            self.sync_and_reset_detail();
            return Some(Notification::DrilledDown(item));
        }

        None
    }

    fn handle_back(&mut self) -> Option<Notification> {
        match self.state.pop_frame() {
            Some(frame) => {
                self.sync_and_reset_detail();
                Some(Notification::NavigatedBack {
                    parent_id: frame.parent_id,
                })
            }
            None => Some(Notification::BackAtRoot),
        }
    }
}
