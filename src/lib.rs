//! Panenav library exports for the binary and integration tests

pub mod core;
pub mod demo;
pub mod headless;
pub mod render;
pub mod tui;

#[cfg(test)]
pub mod test_support;

pub use crate::core::{Action, Item, ItemRef, ItemUpdate, Navigator, NavigatorConfig, Notification};
pub use crate::render::DetailRenderer;
