//! # SplitPane Component
//!
//! Draws a [`Navigator`]'s rendered view: list pane and detail pane side by
//! side in rounded borders, footer underneath.
//!
//! ```text
//! ╭──────────────╮╭─────────────────────╮
//! │ list (left)  ││ detail (right)      │
//! ╰──────────────╯╰─────────────────────╯
//!   footer
//! ```
//!
//! ## Sizing
//!
//! Pane widths come from the navigator's viewports, which already subtract
//! the border and padding overhead. Each pane's outer width is therefore its
//! viewport width plus 4 (two border columns, two padding columns). Content
//! is windowed by each viewport's `y_offset`, so scrolling is entirely owned
//! by the navigator and this component stays stateless.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Text;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::action::Pane;
use crate::core::navigator::Navigator;
use crate::core::viewport::Viewport;
use crate::render::theme::Theme;
use crate::tui::component::Component;

pub struct SplitPane<'a> {
    pub navigator: &'a Navigator,
}

impl<'a> SplitPane<'a> {
    pub fn new(navigator: &'a Navigator) -> Self {
        Self { navigator }
    }
}

fn pane<'t>(text: &Text<'t>, viewport: &Viewport, focused: bool, theme: &Theme) -> Paragraph<'t> {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(theme.border(focused))
        .padding(Padding::horizontal(1));
    let offset = u16::try_from(viewport.y_offset()).unwrap_or(u16::MAX);
    Paragraph::new(text.clone()).block(block).scroll((offset, 0))
}

impl Component for SplitPane<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let nav = self.navigator;
        if !nav.is_initialized() {
            return;
        }
        let view = nav.view();
        let theme = nav.theme();
        let (left, right) = (nav.left_viewport(), nav.right_viewport());

        let [panes_area, footer_area] = Layout::vertical([
            Constraint::Length(left.height.saturating_add(2)),
            Constraint::Min(0),
        ])
        .areas(area);

        let [left_area, right_area, _] = Layout::horizontal([
            Constraint::Length(left.width.saturating_add(4)),
            Constraint::Length(right.width.saturating_add(4)),
            Constraint::Min(0),
        ])
        .areas(panes_area);

        let focus = nav.focus();
        frame.render_widget(pane(&view.list, left, focus == Pane::List, theme), left_area);
        frame.render_widget(pane(&view.detail, right, focus == Pane::Detail, theme), right_area);
        frame.render_widget(Paragraph::new(view.footer.clone()), footer_area);
    }
}
