//! # Navigator
//!
//! Ties the pieces together: one [`NavState`], the caller's render strategies,
//! and a scroll [`Viewport`] per pane.
//!
//! ```text
//!  Action ──► Navigator::handle ──► NavState ──► render_view ──► PaneView
//!                    │                                             │
//!                    └────────── Option<Notification> ◄────────────┘
//!                                  (to the caller)
//!
//!  ItemUpdate ──► Navigator::apply ──► NavState (reconcile) ──► PaneView
//! ```
//!
//! The rendered [`PaneView`] is cached and rebuilt after every mutation, so a
//! draw always reflects a fully applied change and viewport content heights
//! always match what is on screen. The input handlers live in `action.rs`.

use log::debug;

use crate::core::action::Pane;
use crate::core::item::{ItemRef, SectionGrouper};
use crate::core::reconcile::ItemUpdate;
use crate::core::state::{DEFAULT_MAX_EXPAND_DEPTH, NavState};
use crate::core::viewport::Viewport;
use crate::render::theme::Theme;
use crate::render::{
    DetailRenderer, FooterRenderer, HeaderRenderer, PaneView, RenderContext, render_view,
};

pub const DEFAULT_LEFT_PANE_RATIO: f64 = 0.4;

/// Borders (2) and horizontal padding (2) on each of the two panes.
pub const HORIZONTAL_OVERHEAD: u16 = 8;

/// Top and bottom borders plus room reserved for the footer.
pub const VERTICAL_OVERHEAD: u16 = 10;

#[derive(Debug, Clone)]
pub struct NavigatorConfig {
    /// Shown in the list pane header at the root level.
    pub title: Option<String>,
    /// Share of the available width given to the list pane, in (0, 1).
    pub left_pane_ratio: f64,
    /// Items at this effective depth or deeper drill down instead of expanding.
    pub max_expand_depth: usize,
    pub theme: Theme,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            title: None,
            left_pane_ratio: DEFAULT_LEFT_PANE_RATIO,
            max_expand_depth: DEFAULT_MAX_EXPAND_DEPTH,
            theme: Theme::default(),
        }
    }
}

impl NavigatorConfig {
    /// Replace out-of-range values with defaults.
    pub fn normalized(mut self) -> Self {
        if !(self.left_pane_ratio > 0.0 && self.left_pane_ratio < 1.0) {
            self.left_pane_ratio = DEFAULT_LEFT_PANE_RATIO;
        }
        if self.max_expand_depth == 0 {
            self.max_expand_depth = DEFAULT_MAX_EXPAND_DEPTH;
        }
        self
    }
}

/// Two-pane hierarchical navigator.
pub struct Navigator {
    pub(crate) state: NavState,
    pub(crate) config: NavigatorConfig,
    details: Box<dyn DetailRenderer>,
    header: Option<Box<dyn HeaderRenderer>>,
    footer: Option<Box<dyn FooterRenderer>>,
    pub(crate) left: Viewport,
    pub(crate) right: Viewport,
    pub(crate) focus: Pane,
    width: u16,
    height: u16,
    initialized: bool,
    rendered: PaneView,
}

impl Navigator {
    pub fn new(config: NavigatorConfig, details: impl DetailRenderer + 'static) -> Self {
        let config = config.normalized();
        let mut nav = Self {
            state: NavState::new(config.max_expand_depth),
            config,
            details: Box::new(details),
            header: None,
            footer: None,
            left: Viewport::default(),
            right: Viewport::default(),
            focus: Pane::List,
            width: 0,
            height: 0,
            initialized: false,
            rendered: PaneView::default(),
        };
        nav.sync_viewports();
        nav
    }

    pub fn with_grouper(mut self, grouper: impl SectionGrouper + 'static) -> Self {
        self.state.set_grouper(Box::new(grouper));
        self.sync_viewports();
        self
    }

    pub fn with_header(mut self, header: impl HeaderRenderer + 'static) -> Self {
        self.header = Some(Box::new(header));
        self.sync_viewports();
        self
    }

    pub fn with_footer(mut self, footer: impl FooterRenderer + 'static) -> Self {
        self.footer = Some(Box::new(footer));
        self.sync_viewports();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self.sync_viewports();
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }

    pub fn focus(&self) -> Pane {
        self.focus
    }

    /// False until the first `Resize`.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Last terminal size seen, as (width, height).
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn left_viewport(&self) -> &Viewport {
        &self.left
    }

    pub fn right_viewport(&self) -> &Viewport {
        &self.right
    }

    pub fn selected_item(&self) -> Option<ItemRef> {
        self.state.selected_item()
    }

    /// The most recently rendered frame.
    pub fn view(&self) -> &PaneView {
        &self.rendered
    }

    // ========================================================================
    // Data updates
    // ========================================================================

    pub fn set_items(&mut self, items: Vec<ItemRef>) {
        self.state.set_items(items);
        self.left.goto_top();
        self.right.goto_top();
        self.sync_and_follow_selection();
    }

    pub fn update_items(&mut self, items: Vec<ItemRef>) {
        self.state.update_items(items);
        self.sync_and_follow_selection();
    }

    pub fn add_item(&mut self, item: ItemRef) {
        self.state.add_item(item);
        self.sync_and_follow_selection();
    }

    pub fn update_item_by_id(&mut self, id: &str, item: ItemRef) -> bool {
        let found = self.state.update_item_by_id(id, item);
        self.sync_and_follow_selection();
        found
    }

    pub fn remove_item_by_id(&mut self, id: &str) -> bool {
        let found = self.state.remove_item_by_id(id);
        self.sync_and_follow_selection();
        found
    }

    pub fn apply(&mut self, update: ItemUpdate) {
        self.state.apply(update);
        self.sync_and_follow_selection();
    }

    // ========================================================================
    // Layout and viewports
    // ========================================================================

    pub(crate) fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;

        let available = width.saturating_sub(HORIZONTAL_OVERHEAD);
        let left_width = (f64::from(available) * self.config.left_pane_ratio).floor() as u16;
        let right_width = available - left_width.min(available);
        let pane_height = height.saturating_sub(VERTICAL_OVERHEAD);

        self.left.resize(left_width, pane_height);
        self.right.resize(right_width, pane_height);
        if !self.initialized {
            debug!(
                "Navigator initialised at {width}x{height} (list {left_width}, detail {right_width})"
            );
            self.initialized = true;
        }
        self.sync_and_follow_selection();
    }

    /// Re-render and record content heights.
    pub(crate) fn sync_viewports(&mut self) {
        let ctx = RenderContext {
            state: &self.state,
            theme: &self.config.theme,
            title: self.config.title.as_deref(),
            left_width: self.left.width,
            right_width: self.right.width,
        };
        let view = render_view(
            &ctx,
            self.details.as_ref(),
            self.header.as_deref(),
            self.footer.as_deref(),
        );
        self.left.set_content_height(view.list.lines.len());
        self.right.set_content_height(view.detail.lines.len());
        self.rendered = view;
    }

    /// After a selection change: re-render, show the new item's details from
    /// the top, and keep the selected line on screen.
    pub(crate) fn sync_and_reset_detail(&mut self) {
        self.sync_viewports();
        self.right.goto_top();
        self.scroll_list_to_selection();
    }

    /// After a data update or resize: re-render and keep the selected line
    /// on screen without touching the detail pane's scroll.
    pub(crate) fn sync_and_follow_selection(&mut self) {
        self.sync_viewports();
        self.scroll_list_to_selection();
    }

    pub(crate) fn scroll_list_to_selection(&mut self) {
        if self.state.selected_id().is_none() {
            return;
        }
        if self.state.selected_index() == 0 {
            self.left.goto_top();
            return;
        }
        if let Some(line) = self.rendered.selected_line {
            self.left.ensure_visible(line);
        }
    }
}
