//! # Headless Mode
//!
//! When stdout is not a terminal (CI logs, pipes, tests) the navigator is
//! printed once as plain text instead of running the interactive loop.
//!
//! Whether to run headless is decided by the caller and passed in
//! explicitly. Detection only fills in when nothing was configured.

use std::io::{self, Write};

use crossterm::tty::IsTty;

use crate::core::action::Action;
use crate::core::navigator::Navigator;
use crate::render::plain_text;
use crate::render::text::FALLBACK_WIDTH;

/// Virtual terminal width used to lay out a snapshot.
pub const SNAPSHOT_WIDTH: u16 = 120;

/// Resolve the headless flag, detecting from stdout when unset.
pub fn is_headless(configured: Option<bool>) -> bool {
    configured.unwrap_or_else(|| !io::stdout().is_tty())
}

/// Lay the navigator out at `width` columns and return header+list,
/// a separator, the detail pane and the footer as plain text.
pub fn render_snapshot(navigator: &mut Navigator, width: u16) -> String {
    let (_, height) = navigator.size();
    navigator.handle(Action::Resize { width, height });

    let view = navigator.view();
    let mut out = String::new();
    out.push_str(plain_text(&view.list).trim_end());
    out.push('\n');
    out.push_str(&"─".repeat(FALLBACK_WIDTH));
    out.push('\n');
    out.push_str(plain_text(&view.detail).trim_end());
    out.push('\n');
    out.push_str(plain_text(&view.footer).trim_end());
    out.push('\n');
    out
}

/// Write a snapshot to `writer`.
pub fn print_snapshot(navigator: &mut Navigator, writer: &mut impl Write) -> io::Result<()> {
    let snapshot = render_snapshot(navigator, SNAPSHOT_WIDTH);
    writer.write_all(snapshot.as_bytes())?;
    writer.flush()
}
