//! # Core Navigation Logic
//!
//! This module contains the navigator's state machine.
//! It knows nothing about terminals or event sources.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • NavState (data)      │
//!                    │  • Action (input)       │
//!                    │  • ItemUpdate (refresh) │
//!                    │                         │
//!                    │  No I/O. No threads.    │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Headless  │      │    Data    │
//!     │  Adapter   │      │  snapshot  │      │   source   │
//!     │ (ratatui)  │      │  (stdout)  │      │  (caller)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`item`]: the `Item` trait and section grouping
//! - [`state`]: `NavState`, selection repair and level transitions
//! - [`reconcile`]: applying external snapshots and deltas
//! - [`viewport`]: per-pane scroll window
//! - [`action`]: the `Action` enum and the input dispatcher
//! - [`navigator`]: `Navigator`, which owns state, layout and render strategies
//! - [`config`]: config file and override resolution

pub mod action;
pub mod config;
pub mod item;
pub mod navigator;
pub mod reconcile;
pub mod state;
pub mod viewport;

pub use action::{Action, Notification, Pane};
pub use item::{Item, ItemRef, Section, SectionGrouper, TypeSectionGrouper};
pub use navigator::{Navigator, NavigatorConfig};
pub use reconcile::ItemUpdate;
pub use state::{NavState, NavigationFrame};
