//! # Reconciliation
//!
//! Applies snapshots and incremental changes from an external data source to
//! [`NavState`] while keeping what the user sees stable:
//!
//! - selection survives as long as the selected id is still visible
//! - expansion survives for ids that still exist
//! - drill-down frames survive as long as their ancestors do; the stack is
//!   truncated at the first ancestor that disappeared
//!
//! None of this is an error path. A vanished selection or ancestor is repaired
//! silently to the nearest valid state.

use std::collections::HashSet;

use log::{debug, warn};

use crate::core::item::ItemRef;
use crate::core::state::{NavState, NavigationFrame};

/// An external change to the dataset, as produced by a polling or streaming
/// data source.
pub enum ItemUpdate {
    /// Full replacement that preserves user state (`update_items`).
    Snapshot(Vec<ItemRef>),
    /// Full replacement that resets user state (`set_items`).
    Reset(Vec<ItemRef>),
    Add(ItemRef),
    Replace { id: String, item: ItemRef },
    Remove(String),
}

impl NavState {
    /// Apply a single external change.
    pub fn apply(&mut self, update: ItemUpdate) {
        match update {
            ItemUpdate::Snapshot(items) => self.update_items(items),
            ItemUpdate::Reset(items) => self.set_items(items),
            ItemUpdate::Add(item) => self.add_item(item),
            ItemUpdate::Replace { id, item } => {
                if !self.update_item_by_id(&id, item) {
                    debug!("Replace for unknown item {id} ignored");
                }
            }
            ItemUpdate::Remove(id) => {
                if !self.remove_item_by_id(&id) {
                    debug!("Remove for unknown item {id} ignored");
                }
            }
        }
    }

    /// Replace the dataset while preserving selection, expansion and, where
    /// possible, drill-down position.
    pub fn update_items(&mut self, items: Vec<ItemRef>) {
        self.root_items = items;

        if self.navigation_stack.is_empty() {
            let root = self.root_items.clone();
            self.update_items_at_current_level(root);
        } else {
            self.validate_navigation_stack();
        }
    }

    /// Append to the root level. While drilled down the new item only shows
    /// up once the user backs out to the root.
    pub fn add_item(&mut self, item: ItemRef) {
        if self.navigation_stack.is_empty() {
            self.items.push(item.clone());
        }
        self.root_items.push(item);
        self.resolve_selected_index();
    }

    /// Replace a root-level item by id. Returns whether it was found.
    pub fn update_item_by_id(&mut self, id: &str, new_item: ItemRef) -> bool {
        let found = match self.root_items.iter().position(|item| item.id() == id) {
            Some(pos) => {
                self.root_items[pos] = new_item.clone();
                true
            }
            None => false,
        };

        if self.navigation_stack.is_empty() {
            if let Some(pos) = self.items.iter().position(|item| item.id() == id) {
                self.items[pos] = new_item;
            }
            self.resolve_selected_index();
        } else {
            // The replaced item may be any ancestor of the current view.
            self.validate_navigation_stack();
        }

        found
    }

    /// Remove a root-level item by id. Returns whether it was found.
    pub fn remove_item_by_id(&mut self, id: &str) -> bool {
        let Some(pos) = self.root_items.iter().position(|item| item.id() == id) else {
            return false;
        };
        self.root_items.remove(pos);
        self.expanded_items.remove(id);

        if self.navigation_stack.is_empty() {
            self.items.retain(|item| item.id() != id);
            self.resolve_selected_index();
        } else {
            // The removed item may have been an ancestor of the current view.
            self.validate_navigation_stack();
        }
        true
    }

    /// Swap in a new current-level list, keeping expansion for surviving ids.
    fn update_items_at_current_level(&mut self, items: Vec<ItemRef>) {
        let surviving: HashSet<String> = self
            .expanded_items
            .iter()
            .filter(|id| find_item_by_id(&items, id).is_some())
            .cloned()
            .collect();

        self.items = items;
        self.expanded_items = surviving;
        self.resolve_selected_index();
    }

    /// Walk the stack root-most first, keeping frames whose parent is still
    /// reachable from the level below and dropping everything from the first
    /// miss up. Parents are searched recursively since a drill-down can start
    /// from an inline-expanded child.
    fn validate_navigation_stack(&mut self) {
        let mut valid_frames: Vec<NavigationFrame> =
            Vec::with_capacity(self.navigation_stack.len());
        let mut current_items = self.root_items.clone();

        for frame in &self.navigation_stack {
            let Some(parent) = find_item_by_id(&current_items, &frame.parent_id) else {
                warn!(
                    "Ancestor {} no longer exists, truncating navigation stack at depth {}",
                    frame.parent_id,
                    valid_frames.len()
                );
                break;
            };
            let children = parent.children().to_vec();
            valid_frames.push(NavigationFrame {
                parent_id: frame.parent_id.clone(),
                parent_name: parent.name().to_string(),
                selected_id: frame.selected_id.clone(),
                items: current_items,
            });
            current_items = children;
        }

        let truncated = valid_frames.len() < self.navigation_stack.len();
        self.navigation_stack = valid_frames;

        if self.navigation_stack.is_empty() {
            let root = self.root_items.clone();
            if truncated {
                self.expanded_items.clear();
            }
            self.update_items_at_current_level(root);
        } else {
            if truncated {
                self.expanded_items.clear();
            }
            self.items = current_items;
            self.resolve_selected_index();
        }
    }
}

/// Depth-first search for an item by id.
pub fn find_item_by_id(items: &[ItemRef], id: &str) -> Option<ItemRef> {
    for item in items {
        if item.id() == id {
            return Some(item.clone());
        }
        if let Some(found) = find_item_by_id(item.children(), id) {
            return Some(found);
        }
    }
    None
}
