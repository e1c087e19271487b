//! # Theme
//!
//! Colours and text styles shared by every rendered element. A [`Theme`] is
//! built from a [`Palette`], which only decides the two brand colours; the
//! status colours are common to every palette.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

pub const ERROR: Color = Color::Rgb(0xdc, 0x26, 0x26);
pub const WARNING: Color = Color::Rgb(0xf9, 0x73, 0x16);
pub const INFO: Color = Color::Rgb(0x25, 0x63, 0xeb);
pub const SUCCESS: Color = Color::Rgb(0x16, 0xa3, 0x4a);
pub const MUTED: Color = Color::Rgb(0x88, 0x88, 0x88);
pub const TEXT: Color = Color::Rgb(0xff, 0xff, 0xff);

/// Named brand colour scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    #[default]
    Bluelink,
    Celerity,
}

impl Palette {
    pub fn name(&self) -> &'static str {
        match self {
            Palette::Bluelink => "bluelink",
            Palette::Celerity => "celerity",
        }
    }

    pub fn primary(&self) -> Color {
        match self {
            Palette::Bluelink => Color::Rgb(0x58, 0x82, 0xe2),
            Palette::Celerity => Color::Rgb(0x81, 0x8c, 0xf8),
        }
    }

    pub fn secondary(&self) -> Color {
        match self {
            Palette::Bluelink => Color::Rgb(0x2b, 0x63, 0xe3),
            Palette::Celerity => Color::Rgb(0x63, 0x66, 0xf1),
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bluelink" => Ok(Palette::Bluelink),
            "celerity" => Ok(Palette::Celerity),
            other => Err(format!("unknown palette '{other}' (expected bluelink or celerity)")),
        }
    }
}

/// Resolved styles for one palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub palette: Palette,
    /// Pane heading ("Details", the title, item names in the detail pane).
    pub header: Style,
    /// Section headers in the list pane.
    pub category: Style,
    pub muted: Style,
    /// Emphasised text, e.g. breadcrumb names in the footer.
    pub selected: Style,
    /// Full-line treatment for the highlighted list item.
    pub selected_item: Style,
    /// Key names in footer hints.
    pub key: Style,
    pub error: Style,
    pub warning: Style,
    pub info: Style,
    pub success: Style,
}

impl Theme {
    pub fn new(palette: Palette) -> Self {
        let primary = palette.primary();
        Self {
            palette,
            header: Style::new().fg(primary).add_modifier(Modifier::BOLD),
            category: Style::new().fg(primary),
            muted: Style::new().fg(MUTED),
            selected: Style::new().fg(primary).add_modifier(Modifier::BOLD),
            selected_item: Style::new()
                .fg(TEXT)
                .bg(palette.secondary())
                .add_modifier(Modifier::BOLD),
            key: Style::new().fg(palette.secondary()).add_modifier(Modifier::BOLD),
            error: Style::new().fg(ERROR),
            warning: Style::new().fg(WARNING),
            info: Style::new().fg(INFO),
            success: Style::new().fg(SUCCESS),
        }
    }

    /// Border style for a pane; the focused pane uses the primary colour.
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::new().fg(self.palette.primary())
        } else {
            Style::new().fg(MUTED)
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}
