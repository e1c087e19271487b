//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use ratatui::text::{Span, Text};

use crate::core::item::{Item, ItemRef};
use crate::core::navigator::{Navigator, NavigatorConfig};
use crate::core::state::NavState;
use crate::render::theme::Theme;
use crate::render::DetailRenderer;

/// Configurable item for tests.
#[derive(Clone, Default)]
pub struct TestItem {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub action: String,
    pub depth: usize,
    pub parent_id: Option<String>,
    pub item_type: Option<String>,
    pub expandable: bool,
    pub drillable: bool,
    pub children: Vec<ItemRef>,
}

impl TestItem {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: "●".to_string(),
            ..Default::default()
        }
    }

    pub fn with_action(mut self, action: &str) -> Self {
        self.action = action.to_string();
        self
    }

    pub fn with_type(mut self, item_type: &str) -> Self {
        self.item_type = Some(item_type.to_string());
        self
    }

    pub fn child_of(mut self, parent_id: &str, depth: usize) -> Self {
        self.parent_id = Some(parent_id.to_string());
        self.depth = depth;
        self
    }

    pub fn expandable(mut self) -> Self {
        self.expandable = true;
        self
    }

    pub fn drillable(mut self) -> Self {
        self.drillable = true;
        self
    }

    pub fn with_children(mut self, children: Vec<ItemRef>) -> Self {
        self.children = children;
        self
    }

    pub fn into_ref(self) -> ItemRef {
        Arc::new(self)
    }
}

impl Item for TestItem {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn icon(&self, _selected: bool) -> Span<'static> {
        Span::raw(self.icon.clone())
    }
    fn action(&self) -> &str {
        &self.action
    }
    fn depth(&self) -> usize {
        self.depth
    }
    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }
    fn item_type(&self) -> Option<&str> {
        self.item_type.as_deref()
    }
    fn is_expandable(&self) -> bool {
        self.expandable
    }
    fn can_drill_down(&self) -> bool {
        self.drillable
    }
    fn children(&self) -> &[ItemRef] {
        &self.children
    }
}

/// Detail renderer that echoes the item name.
pub struct EchoDetails;

impl DetailRenderer for EchoDetails {
    fn render_details(&self, item: &dyn Item, _width: u16, _theme: &Theme) -> Text<'static> {
        Text::raw(format!("Details for: {}", item.name()))
    }
}

/// Items "1", "2", "3" with CREATE/UPDATE/DELETE actions.
pub fn flat_items() -> Vec<ItemRef> {
    vec![
        TestItem::new("1", "Item 1").with_action("CREATE").into_ref(),
        TestItem::new("2", "Item 2").with_action("UPDATE").into_ref(),
        TestItem::new("3", "Item 3").with_action("DELETE").into_ref(),
    ]
}

/// An expandable "parent1" with two depth-1 children, followed by "2".
pub fn expandable_items() -> Vec<ItemRef> {
    vec![
        TestItem::new("parent1", "Parent 1")
            .with_action("CREATE")
            .expandable()
            .with_children(vec![
                TestItem::new("child1", "Child 1").child_of("parent1", 1).into_ref(),
                TestItem::new("child2", "Child 2").child_of("parent1", 1).into_ref(),
            ])
            .into_ref(),
        TestItem::new("2", "Item 2").with_action("UPDATE").into_ref(),
    ]
}

/// A drillable "drillable1" with children "detail1"/"detail2", followed by "2".
pub fn drillable_items() -> Vec<ItemRef> {
    vec![
        TestItem::new("drillable1", "Drillable 1")
            .with_action("VIEW")
            .drillable()
            .with_children(vec![
                TestItem::new("detail1", "Detail 1").into_ref(),
                TestItem::new("detail2", "Detail 2").into_ref(),
            ])
            .into_ref(),
        TestItem::new("2", "Item 2").into_ref(),
    ]
}

/// Three drillable levels: level1 > level2 > level3.
pub fn nested_items() -> Vec<ItemRef> {
    vec![
        TestItem::new("level1", "Level 1")
            .drillable()
            .with_children(vec![
                TestItem::new("level2", "Level 2")
                    .drillable()
                    .with_children(vec![TestItem::new("level3", "Level 3").into_ref()])
                    .into_ref(),
            ])
            .into_ref(),
    ]
}

pub fn test_state(items: Vec<ItemRef>) -> NavState {
    let mut state = NavState::new(2);
    state.set_items(items);
    state
}

/// A navigator sized as a 120x40 terminal.
pub fn test_navigator(items: Vec<ItemRef>) -> Navigator {
    let mut nav = Navigator::new(NavigatorConfig::default(), EchoDetails);
    nav.set_items(items);
    nav.handle(crate::core::action::Action::Resize {
        width: 120,
        height: 40,
    });
    nav
}
