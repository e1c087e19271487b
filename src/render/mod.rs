//! # Renderer
//!
//! Pure functions from navigation state to styled text. Nothing here mutates
//! state or touches the terminal; the TUI adapter and headless mode both
//! display what these functions return.
//!
//! ```text
//! ┌──────────────────────┐┌──────────────────────────┐
//! │ header               ││ detail pane              │
//! │ Section              ││ (DetailRenderer)         │
//! │ ──────────           ││                          │
//! │   ▶ ● item    CREATE ││                          │
//! │     └ [CH] ● child   ││                          │
//! └──────────────────────┘└──────────────────────────┘
//!  footer (breadcrumb + key hints)
//! ```
//!
//! Callers customise the output through three strategies: a required
//! [`DetailRenderer`] and optional [`HeaderRenderer`] / [`FooterRenderer`].

pub mod text;
pub mod theme;

use ratatui::text::{Line, Span, Text};

use crate::core::item::{Item, ItemRef, Section};
use crate::core::state::NavState;
use crate::render::text::{display_width, safe_width, truncate_str, type_tag};
use crate::render::theme::Theme;

/// Produces the right pane for the selected item.
pub trait DetailRenderer {
    fn render_details(&self, item: &dyn Item, width: u16, theme: &Theme) -> Text<'static>;
}

/// Replaces the default list-pane header.
pub trait HeaderRenderer {
    fn render_header(&self, ctx: &RenderContext) -> Text<'static>;
}

/// Replaces the default footer.
pub trait FooterRenderer {
    fn render_footer(&self, ctx: &RenderContext) -> Text<'static>;
}

/// Everything a render strategy may read.
pub struct RenderContext<'a> {
    pub state: &'a NavState,
    pub theme: &'a Theme,
    pub title: Option<&'a str>,
    /// Content width of the list pane, 0 before the first resize.
    pub left_width: u16,
    /// Content width of the detail pane, 0 before the first resize.
    pub right_width: u16,
}

/// Rendered list pane plus the line the selected item landed on.
pub struct ListPane {
    pub text: Text<'static>,
    pub selected_line: Option<usize>,
}

/// One complete frame of output.
#[derive(Default)]
pub struct PaneView {
    pub list: Text<'static>,
    pub detail: Text<'static>,
    pub footer: Text<'static>,
    pub selected_line: Option<usize>,
}

/// Render the full view with the given strategies.
pub fn render_view(
    ctx: &RenderContext,
    details: &dyn DetailRenderer,
    header: Option<&dyn HeaderRenderer>,
    footer: Option<&dyn FooterRenderer>,
) -> PaneView {
    let list = render_list_pane(ctx, header);
    PaneView {
        list: list.text,
        detail: render_detail_pane(ctx, details),
        footer: match footer {
            Some(f) => f.render_footer(ctx),
            None => default_footer(ctx),
        },
        selected_line: list.selected_line,
    }
}

// ============================================================================
// List pane
// ============================================================================

/// Header, then items (grouped into sections when a grouper is configured).
pub fn render_list_pane(ctx: &RenderContext, header: Option<&dyn HeaderRenderer>) -> ListPane {
    let header_text = match header {
        Some(h) => h.render_header(ctx),
        None => default_header(ctx),
    };
    let mut lines: Vec<Line<'static>> = header_text.lines;
    let mut selected_line = None;
    let selected_index = ctx.state.selected_id().map(|_| ctx.state.selected_index());
    let mut item_index = 0;

    let mut push_item = |lines: &mut Vec<Line<'static>>, item: &ItemRef| {
        let selected = selected_index == Some(item_index);
        if selected {
            selected_line = Some(lines.len());
        }
        lines.push(render_item_line(ctx, item, selected));
        item_index += 1;
    };

    match ctx.state.sections() {
        Some(sections) => {
            let sections: Vec<Section> = sections
                .into_iter()
                .filter(|s| !s.items.is_empty())
                .collect();
            let separator = "─".repeat(safe_width(ctx.left_width as i32 - 4));
            for (i, section) in sections.iter().enumerate() {
                lines.push(Line::styled(section.name.clone(), ctx.theme.category));
                lines.push(Line::styled(separator.clone(), ctx.theme.muted));
                for item in &section.items {
                    push_item(&mut lines, item);
                }
                if i + 1 < sections.len() {
                    lines.push(Line::default());
                }
            }
        }
        None => {
            for item in ctx.state.visible_items() {
                push_item(&mut lines, &item);
            }
        }
    }

    ListPane {
        text: Text::from(lines),
        selected_line,
    }
}

/// One list entry: indent, expand glyph, type tag, icon, name, right-aligned action.
pub fn render_item_line(ctx: &RenderContext, item: &ItemRef, selected: bool) -> Line<'static> {
    let depth = item.depth();
    let indent = if depth > 0 {
        format!("{}└ ", "  ".repeat(depth + 1))
    } else {
        "  ".to_string()
    };

    let tag = match item.item_type() {
        Some(t) if !t.is_empty() && (depth > 0 || item.parent_id().is_some()) => type_tag(t),
        _ => String::new(),
    };

    let glyph = if ctx.state.can_expand(item) {
        if ctx.state.is_expanded(item.id()) {
            "▼ "
        } else {
            "▶ "
        }
    } else {
        ""
    };

    let width = ctx.left_width as i32;
    let overhead = (display_width(&indent) + display_width(&tag) + display_width(glyph)) as i32;
    let name_budget = (width - 20 - overhead).max(10) as usize;
    let name = truncate_str(item.name(), name_budget);

    let icon = item.icon(selected);
    let prefix = format!("{indent}{glyph}{tag}");
    let body = format!(" {name}");
    let action = item.action();

    let used = display_width(&prefix) + display_width(&icon.content) + display_width(&body);
    let padding = width - 4 - used as i32 - display_width(action) as i32;

    let mut spans = vec![Span::raw(prefix), icon, Span::raw(body)];
    if padding > 0 {
        spans.push(Span::raw(" ".repeat(padding as usize)));
    }
    spans.push(Span::raw(action.to_string()));

    let line = Line::from(spans);
    if selected {
        line.style(ctx.theme.selected_item)
    } else {
        line
    }
}

/// Title (or "Details" and a breadcrumb while drilled down), then a blank line.
pub fn default_header(ctx: &RenderContext) -> Text<'static> {
    let mut lines = Vec::new();
    let path = ctx.state.navigation_path();

    if !path.is_empty() {
        lines.push(Line::styled("Details", ctx.theme.header));
        lines.push(Line::styled(format!("← {}", path.join(" > ")), ctx.theme.muted));
    } else if let Some(title) = ctx.title.filter(|t| !t.is_empty()) {
        lines.push(Line::styled(title.to_string(), ctx.theme.header));
    }
    lines.push(Line::default());

    Text::from(lines)
}

/// Breadcrumb (while drilled down) and key hints.
pub fn default_footer(ctx: &RenderContext) -> Text<'static> {
    let theme = ctx.theme;
    let mut lines = vec![Line::default()];
    let path = ctx.state.navigation_path();

    let hints: &[(&str, &str)] = if path.is_empty() {
        &[
            ("↑/↓", " navigate  "),
            ("enter", " expand/collapse  "),
            ("tab", " switch pane  "),
            ("q", " quit"),
        ]
    } else {
        let mut crumbs = vec![Span::styled("  Viewing: ", theme.muted)];
        for (i, name) in path.iter().enumerate() {
            if i > 0 {
                crumbs.push(Span::styled(" > ", theme.muted));
            }
            crumbs.push(Span::styled(name.clone(), theme.selected));
        }
        lines.push(Line::from(crumbs));
        lines.push(Line::default());
        &[
            ("esc", " back  "),
            ("↑/↓", " navigate  "),
            ("enter", " expand/inspect  "),
            ("tab", " switch pane  "),
            ("q", " quit"),
        ]
    };

    let mut spans = vec![Span::styled("  ", theme.muted)];
    for (key, label) in hints {
        spans.push(Span::styled(key.to_string(), theme.key));
        spans.push(Span::styled(label.to_string(), theme.muted));
    }
    lines.push(Line::from(spans));

    Text::from(lines)
}

// ============================================================================
// Detail pane
// ============================================================================

pub fn render_detail_pane(ctx: &RenderContext, details: &dyn DetailRenderer) -> Text<'static> {
    match ctx.state.selected_item() {
        Some(item) => details.render_details(item.as_ref(), ctx.right_width, ctx.theme),
        None => Text::from(Line::styled("No item selected", ctx.theme.muted)),
    }
}

/// Stock detail view: name, separator, action, then description and fields
/// when the item provides them.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicDetails;

impl DetailRenderer for BasicDetails {
    fn render_details(&self, item: &dyn Item, width: u16, theme: &Theme) -> Text<'static> {
        let mut lines = vec![
            Line::styled(item.name().to_string(), theme.header),
            Line::styled("─".repeat(safe_width(width as i32 - 4)), theme.muted),
            Line::default(),
            Line::from(vec![
                Span::styled("Action: ", theme.muted),
                Span::raw(item.action().to_string()),
            ]),
        ];

        for (label, value) in item.fields() {
            lines.push(Line::from(vec![
                Span::styled(format!("{label}: "), theme.muted),
                Span::raw(value),
            ]));
        }

        if let Some(description) = item.description() {
            lines.push(Line::default());
            lines.extend(description.lines().map(|l| Line::raw(l.to_string())));
        }

        Text::from(lines)
    }
}

/// Flatten styled text into plain lines.
pub fn plain_text(text: &Text) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
