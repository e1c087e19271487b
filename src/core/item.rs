//! # Items
//!
//! The contract every displayable entity satisfies. The navigator never owns a
//! concrete item type: callers implement [`Item`] for their own domain (a
//! deployment resource, a file, a child blueprint) and hand the navigator
//! snapshots of `Arc<dyn Item>`.
//!
//! ```text
//! ItemRef (Arc<dyn Item>)
//! ├── id / name / action / icon     what the list pane draws
//! ├── depth / parent_id / item_type nesting and grouping hints
//! ├── is_expandable / can_drill_down what Enter does
//! └── children                       owned subtree, traversed top-down only
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use ratatui::text::Span;

/// Shared handle to a caller-supplied item.
///
/// Snapshots are cloned into navigation frames on every drill-down, so the
/// handle has to be cheap to clone. `Send + Sync` lets a background fetcher
/// build the tree and pass it to the event loop over a channel.
pub type ItemRef = Arc<dyn Item>;

/// A selectable entry in the left pane.
pub trait Item: Send + Sync {
    /// Stable identity, used for selection and expansion tracking across refreshes.
    fn id(&self) -> &str;

    /// Human-readable label.
    fn name(&self) -> &str;

    /// Status icon. Styled when `selected` is false; plain when selected so the
    /// selection style applies to the whole line.
    fn icon(&self, _selected: bool) -> Span<'static> {
        Span::raw("•")
    }

    /// Action badge text (e.g. "CREATE", "UPDATE").
    fn action(&self) -> &str {
        ""
    }

    /// Nesting depth within the item's own subtree, used for indentation.
    fn depth(&self) -> usize {
        0
    }

    /// Parent item id, `None` for top-level items.
    fn parent_id(&self) -> Option<&str> {
        None
    }

    /// Grouping key (e.g. "resource", "child").
    fn item_type(&self) -> Option<&str> {
        None
    }

    /// Whether the item can be expanded in place.
    fn is_expandable(&self) -> bool {
        false
    }

    /// Whether the item can be drilled into for a dedicated view.
    fn can_drill_down(&self) -> bool {
        false
    }

    /// Ordered children, empty for leaves or items not loaded yet.
    fn children(&self) -> &[ItemRef] {
        &[]
    }

    /// Free-form text shown by [`BasicDetails`](crate::render::BasicDetails).
    fn description(&self) -> Option<&str> {
        None
    }

    /// Labelled values shown by [`BasicDetails`](crate::render::BasicDetails).
    fn fields(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// A named group of items rendered under a header.
#[derive(Clone)]
pub struct Section {
    pub name: String,
    pub items: Vec<ItemRef>,
}

impl Section {
    pub fn new(name: impl Into<String>, items: Vec<ItemRef>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }
}

/// Organizes the current level's items into sections.
///
/// The flattened concatenation of the returned sections is the visible list:
/// a grouper is responsible for inlining the children of expanded items.
pub trait SectionGrouper {
    fn group_items(&self, items: &[ItemRef], is_expanded: &dyn Fn(&str) -> bool) -> Vec<Section>;
}

/// Groups items by [`Item::item_type`], in first-seen order.
///
/// Children of expanded items are placed directly after their parent, inside
/// the parent's section. Items without a type land in an "Other" section.
#[derive(Debug, Clone, Default)]
pub struct TypeSectionGrouper {
    names: HashMap<String, String>,
}

impl TypeSectionGrouper {
    /// `names` maps an item type to its section header, e.g. `resource -> Resources`.
    pub fn new(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    fn section_name(&self, item_type: Option<&str>) -> String {
        match item_type {
            Some(t) => self.names.get(t).cloned().unwrap_or_else(|| title_case(t)),
            None => "Other".to_string(),
        }
    }
}

impl SectionGrouper for TypeSectionGrouper {
    fn group_items(&self, items: &[ItemRef], is_expanded: &dyn Fn(&str) -> bool) -> Vec<Section> {
        let mut sections: Vec<Section> = Vec::new();
        let mut index_by_type: HashMap<Option<String>, usize> = HashMap::new();

        for item in items {
            let key = item.item_type().map(str::to_string);
            let idx = *index_by_type.entry(key).or_insert_with(|| {
                sections.push(Section::new(self.section_name(item.item_type()), Vec::new()));
                sections.len() - 1
            });
            push_with_expanded(&mut sections[idx].items, item, is_expanded);
        }

        sections
    }
}

/// Depth-first flattening: an item followed by its children when expanded.
pub(crate) fn push_with_expanded(
    out: &mut Vec<ItemRef>,
    item: &ItemRef,
    is_expanded: &dyn Fn(&str) -> bool,
) {
    out.push(Arc::clone(item));
    if is_expanded(item.id()) {
        for child in item.children() {
            push_with_expanded(out, child, is_expanded);
        }
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
