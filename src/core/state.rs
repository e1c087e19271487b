//! # Navigation State
//!
//! The navigator's only mutable entity: what is visible, what is selected,
//! what is expanded, and the drill-down history.
//!
//! ```text
//! NavState
//! ├── root_items: Vec<ItemRef>          // full dataset as last supplied
//! ├── items: Vec<ItemRef>               // current navigation level
//! ├── selected_id: Option<String>       // canonical selection (identity)
//! ├── selected_index: usize             // cache into the flattened visible list
//! ├── expanded_items: HashSet<String>   // in-place expansion, per level
//! └── navigation_stack: Vec<NavigationFrame>
//! ```
//!
//! Selection is tracked by id. `selected_index` is only a cache and is
//! recomputed by [`NavState::resolve_selected_index`] after every structural
//! change. Reconciliation with external refreshes lives in `reconcile.rs`.

use std::collections::HashSet;
use std::sync::Arc;

use log::debug;

use crate::core::item::{ItemRef, Section, SectionGrouper, push_with_expanded};

/// Default maximum depth at which items may still be expanded in place.
pub const DEFAULT_MAX_EXPAND_DEPTH: usize = 2;

/// Snapshot taken when drilling into an item.
#[derive(Clone)]
pub struct NavigationFrame {
    /// Id of the item drilled into.
    pub parent_id: String,
    /// Display name for the breadcrumb.
    pub parent_name: String,
    /// Selection before drilling in, restored on back.
    pub selected_id: Option<String>,
    /// Items at the level the parent lives in.
    pub items: Vec<ItemRef>,
}

pub struct NavState {
    pub(crate) root_items: Vec<ItemRef>,
    pub(crate) items: Vec<ItemRef>,
    pub(crate) selected_id: Option<String>,
    pub(crate) selected_index: usize,
    pub(crate) expanded_items: HashSet<String>,
    pub(crate) navigation_stack: Vec<NavigationFrame>,
    max_expand_depth: usize,
    grouper: Option<Box<dyn SectionGrouper>>,
}

impl NavState {
    pub fn new(max_expand_depth: usize) -> Self {
        Self {
            root_items: Vec::new(),
            items: Vec::new(),
            selected_id: None,
            selected_index: 0,
            expanded_items: HashSet::new(),
            navigation_stack: Vec::new(),
            max_expand_depth: if max_expand_depth == 0 {
                DEFAULT_MAX_EXPAND_DEPTH
            } else {
                max_expand_depth
            },
            grouper: None,
        }
    }

    pub fn set_grouper(&mut self, grouper: Box<dyn SectionGrouper>) {
        self.grouper = Some(grouper);
        self.resolve_selected_index();
    }

    /// Replace the dataset, resetting selection, expansion and drill-down.
    ///
    /// Use `update_items` to keep user state across a refresh.
    pub fn set_items(&mut self, items: Vec<ItemRef>) {
        self.root_items = items.clone();
        self.items = items;
        self.expanded_items.clear();
        self.navigation_stack.clear();
        self.selected_id = None;
        self.resolve_selected_index();
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn root_items(&self) -> &[ItemRef] {
        &self.root_items
    }

    /// Items at the current navigation level.
    pub fn items(&self) -> &[ItemRef] {
        &self.items
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded_items.contains(id)
    }

    pub fn navigation_stack(&self) -> &[NavigationFrame] {
        &self.navigation_stack
    }

    /// Breadcrumb names, root-most first.
    pub fn navigation_path(&self) -> Vec<String> {
        self.navigation_stack
            .iter()
            .map(|frame| frame.parent_name.clone())
            .collect()
    }

    pub fn is_in_drill_down(&self) -> bool {
        !self.navigation_stack.is_empty()
    }

    pub fn max_expand_depth(&self) -> usize {
        self.max_expand_depth
    }

    pub fn has_grouper(&self) -> bool {
        self.grouper.is_some()
    }

    /// Item depth plus the number of active drill-down levels.
    pub fn effective_depth(&self, item: &ItemRef) -> usize {
        item.depth() + self.navigation_stack.len()
    }

    /// Whether Enter expands this item in place rather than drilling into it.
    pub fn can_expand(&self, item: &ItemRef) -> bool {
        item.is_expandable() && self.effective_depth(item) < self.max_expand_depth
    }

    // ========================================================================
    // Visible list
    // ========================================================================

    /// Sections for the current level, or `None` when no grouper is configured.
    pub fn sections(&self) -> Option<Vec<Section>> {
        let grouper = self.grouper.as_ref()?;
        let is_expanded = |id: &str| self.expanded_items.contains(id);
        Some(grouper.group_items(&self.items, &is_expanded))
    }

    /// The flattened, expansion-aware list of rendered items.
    pub fn visible_items(&self) -> Vec<ItemRef> {
        if let Some(sections) = self.sections() {
            return sections.into_iter().flat_map(|s| s.items).collect();
        }
        let is_expanded = |id: &str| self.expanded_items.contains(id);
        let mut out = Vec::with_capacity(self.items.len());
        for item in &self.items {
            push_with_expanded(&mut out, item, &is_expanded);
        }
        out
    }

    /// The selected item, looked up by identity.
    pub fn selected_item(&self) -> Option<ItemRef> {
        let selected_id = self.selected_id.as_deref()?;
        let items = self.visible_items();
        if let Some(item) = items.iter().find(|item| item.id() == selected_id) {
            return Some(Arc::clone(item));
        }
        // Only reachable if a caller mutated items without resolving.
        items.get(self.selected_index).cloned()
    }

    /// Recompute `selected_index` from `selected_id`, falling back to the
    /// first visible item (or no selection) when the id is gone.
    pub fn resolve_selected_index(&mut self) {
        let items = self.visible_items();
        if let Some(id) = self.selected_id.as_deref()
            && let Some(pos) = items.iter().position(|item| item.id() == id)
        {
            self.selected_index = pos;
            return;
        }
        self.selected_id = items.first().map(|item| item.id().to_string());
        self.selected_index = 0;
    }

    /// Select the visible item at `index`, returning false if out of range.
    pub(crate) fn select_index(&mut self, index: usize) -> bool {
        match self.visible_items().get(index) {
            Some(item) => {
                self.selected_id = Some(item.id().to_string());
                self.selected_index = index;
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Level transitions
    // ========================================================================

    /// Toggle in-place expansion, returning the new state.
    pub(crate) fn toggle_expanded(&mut self, id: &str) -> bool {
        let expanded = if self.expanded_items.remove(id) {
            false
        } else {
            self.expanded_items.insert(id.to_string());
            true
        };
        self.resolve_selected_index();
        expanded
    }

    /// Push a frame and make `item`'s children the current level.
    pub(crate) fn drill_into(&mut self, item: &ItemRef) {
        debug!(
            "Drilling into {} (stack depth {})",
            item.id(),
            self.navigation_stack.len() + 1
        );
        let items = std::mem::replace(&mut self.items, item.children().to_vec());
        self.navigation_stack.push(NavigationFrame {
            parent_id: item.id().to_string(),
            parent_name: item.name().to_string(),
            selected_id: self.selected_id.take(),
            items,
        });
        self.expanded_items.clear();
        self.resolve_selected_index();
    }

    /// Pop one drill-down level, restoring the saved selection.
    ///
    /// Returning to the root reads `root_items` rather than the frame snapshot,
    /// so items added while drilled down appear once the user backs out.
    pub(crate) fn pop_frame(&mut self) -> Option<NavigationFrame> {
        let frame = self.navigation_stack.pop()?;
        self.items = if self.navigation_stack.is_empty() {
            self.root_items.clone()
        } else {
            frame.items.clone()
        };
        self.expanded_items.clear();
        if let Some(id) = &frame.selected_id {
            self.selected_id = Some(id.clone());
        }
        self.resolve_selected_index();
        debug!(
            "Popped frame for {} (stack depth {})",
            frame.parent_id,
            self.navigation_stack.len()
        );
        Some(frame)
    }
}
