use std::sync::Arc;

use panenav::core::reconcile::find_item_by_id;
use panenav::core::{Action, Item, ItemRef, ItemUpdate, Navigator, NavigatorConfig, Notification};
use panenav::render::{BasicDetails, plain_text};
use proptest::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

/// Minimal item used to drive the public API.
struct Node {
    id: String,
    name: String,
    depth: usize,
    parent_id: Option<String>,
    expandable: bool,
    drillable: bool,
    children: Vec<ItemRef>,
}

impl Node {
    fn leaf(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: format!("Node {id}"),
            depth: 0,
            parent_id: None,
            expandable: false,
            drillable: false,
            children: Vec::new(),
        }
    }

    fn under(mut self, parent: &str, depth: usize) -> Self {
        self.parent_id = Some(parent.to_string());
        self.depth = depth;
        self
    }

    fn expandable(mut self) -> Self {
        self.expandable = true;
        self
    }

    fn drillable(mut self) -> Self {
        self.drillable = true;
        self
    }

    fn with_children(mut self, children: Vec<ItemRef>) -> Self {
        self.children = children;
        self
    }

    fn into_ref(self) -> ItemRef {
        Arc::new(self)
    }
}

impl Item for Node {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn depth(&self) -> usize {
        self.depth
    }
    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
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

fn navigator(items: Vec<ItemRef>) -> Navigator {
    let mut nav = Navigator::new(NavigatorConfig::default(), BasicDetails);
    nav.handle(Action::Resize {
        width: 120,
        height: 40,
    });
    nav.set_items(items);
    nav
}

fn leaves(ids: &[&str]) -> Vec<ItemRef> {
    ids.iter().map(|id| Node::leaf(id).into_ref()).collect()
}

fn ids(items: &[ItemRef]) -> Vec<String> {
    items.iter().map(|i| i.id().to_string()).collect()
}

fn selected(nav: &Navigator) -> Option<String> {
    nav.state().selected_id().map(str::to_string)
}

/// Deployment-shaped tree. `keep` masks the four root items; `keep_a1`
/// controls the nested drillable under "a".
fn tree(keep: [bool; 4], keep_a1: bool) -> Vec<ItemRef> {
    let mut a_children = Vec::new();
    if keep_a1 {
        a_children.push(
            Node::leaf("a1")
                .under("a", 1)
                .drillable()
                .with_children(vec![
                    Node::leaf("a1x").under("a1", 2).into_ref(),
                    Node::leaf("a1y").under("a1", 2).into_ref(),
                ])
                .into_ref(),
        );
    }
    a_children.push(Node::leaf("a2").under("a", 1).into_ref());

    let roots = [
        Node::leaf("a")
            .expandable()
            .drillable()
            .with_children(a_children)
            .into_ref(),
        Node::leaf("b").into_ref(),
        Node::leaf("c")
            .drillable()
            .with_children(vec![
                Node::leaf("c1").under("c", 1).into_ref(),
                Node::leaf("c2").under("c", 1).into_ref(),
            ])
            .into_ref(),
        Node::leaf("d")
            .expandable()
            .with_children(vec![Node::leaf("d1").under("d", 1).into_ref()])
            .into_ref(),
    ];

    roots
        .into_iter()
        .zip(keep)
        .filter_map(|(item, kept)| kept.then_some(item))
        .collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_move_down_clamps_at_last_item() {
    let mut nav = navigator(leaves(&["1", "2", "3"]));
    assert_eq!(selected(&nav).as_deref(), Some("1"));

    nav.handle(Action::MoveDown);
    nav.handle(Action::MoveDown);
    assert_eq!(selected(&nav).as_deref(), Some("3"));

    let notification = nav.handle(Action::MoveDown);
    assert!(notification.is_none());
    assert_eq!(selected(&nav).as_deref(), Some("3"));
}

#[test]
fn test_activate_toggles_expansion() {
    let parent = Node::leaf("p1")
        .expandable()
        .with_children(vec![
            Node::leaf("c1").under("p1", 1).into_ref(),
            Node::leaf("c2").under("p1", 1).into_ref(),
        ])
        .into_ref();
    let mut nav = navigator(vec![parent]);

    match nav.handle(Action::Activate) {
        Some(Notification::Expanded { item, expanded }) => {
            assert_eq!(item.id(), "p1");
            assert!(expanded);
        }
        other => panic!("unexpected notification: {other:?}"),
    }
    assert!(nav.state().is_expanded("p1"));
    assert_eq!(ids(&nav.state().visible_items()), vec!["p1", "c1", "c2"]);

    nav.handle(Action::Activate);
    assert!(!nav.state().is_expanded("p1"));
    assert_eq!(nav.state().visible_items().len(), 1);
}

#[test]
fn test_drill_down_and_back_restores_selection() {
    let d1 = Node::leaf("d1")
        .drillable()
        .with_children(vec![
            Node::leaf("c1").under("d1", 1).into_ref(),
            Node::leaf("c2").under("d1", 1).into_ref(),
        ])
        .into_ref();
    let mut nav = navigator(vec![Node::leaf("x").into_ref(), d1]);
    nav.handle(Action::MoveDown);

    assert!(matches!(
        nav.handle(Action::Activate),
        Some(Notification::DrilledDown(item)) if item.id() == "d1"
    ));
    assert_eq!(nav.state().navigation_stack().len(), 1);
    assert_eq!(ids(nav.state().items()), vec!["c1", "c2"]);
    assert_eq!(selected(&nav).as_deref(), Some("c1"));

    assert!(matches!(
        nav.handle(Action::Back),
        Some(Notification::NavigatedBack { parent_id }) if parent_id == "d1"
    ));
    assert!(!nav.state().is_in_drill_down());
    assert_eq!(ids(nav.state().items()), vec!["x", "d1"]);
    assert_eq!(selected(&nav).as_deref(), Some("d1"));

    assert!(matches!(
        nav.handle(Action::Back),
        Some(Notification::BackAtRoot)
    ));
}

#[test]
fn test_removing_selected_item_selects_first() {
    let mut nav = navigator(leaves(&["1", "2", "3"]));
    nav.handle(Action::MoveDown);
    assert_eq!(selected(&nav).as_deref(), Some("2"));

    assert!(nav.remove_item_by_id("2"));
    assert_eq!(selected(&nav).as_deref(), Some("1"));
    assert_eq!(nav.state().root_items().len(), 2);
    assert!(!nav.remove_item_by_id("2"));
}

#[test]
fn test_update_items_without_ancestor_returns_to_root() {
    let mut nav = navigator(tree([true; 4], true));
    nav.handle(Action::End);
    nav.handle(Action::MoveUp);
    assert_eq!(selected(&nav).as_deref(), Some("c"));
    nav.handle(Action::Activate);
    assert!(nav.state().is_in_drill_down());

    nav.update_items(tree([true, true, false, true], true));

    assert!(!nav.state().is_in_drill_down());
    assert_eq!(ids(nav.state().items()), vec!["a", "b", "d"]);
    assert_eq!(selected(&nav).as_deref(), Some("a"));
}

#[test]
fn test_update_items_truncates_to_nearest_valid_ancestor() {
    let chain = |keep_inner: bool| {
        let mut inner_children = vec![Node::leaf("sibling").under("outer", 1).into_ref()];
        if keep_inner {
            inner_children.insert(
                0,
                Node::leaf("inner")
                    .under("outer", 1)
                    .drillable()
                    .with_children(vec![Node::leaf("leaf").under("inner", 2).into_ref()])
                    .into_ref(),
            );
        }
        vec![
            Node::leaf("outer")
                .drillable()
                .with_children(inner_children)
                .into_ref(),
        ]
    };

    let mut nav = navigator(chain(true));
    nav.handle(Action::Activate);
    nav.handle(Action::Activate);
    assert_eq!(
        nav.state().navigation_path(),
        vec!["Node outer".to_string(), "Node inner".to_string()]
    );

    nav.update_items(chain(false));

    assert_eq!(nav.state().navigation_stack().len(), 1);
    assert_eq!(nav.state().navigation_stack()[0].parent_id, "outer");
    assert_eq!(ids(nav.state().items()), vec!["sibling"]);
    assert_eq!(selected(&nav).as_deref(), Some("sibling"));
}

#[test]
fn test_removing_inline_drilled_ancestor_returns_to_root() {
    let mut nav = navigator(tree([true; 4], true));
    // "a" is within the depth bound, so Enter expands it in place
    nav.handle(Action::Activate);
    nav.handle(Action::MoveDown);
    assert_eq!(selected(&nav).as_deref(), Some("a1"));
    nav.handle(Action::Activate);
    assert_eq!(ids(nav.state().items()), vec!["a1x", "a1y"]);

    nav.update_items(tree([true; 4], false));

    assert!(!nav.state().is_in_drill_down());
    assert!(!nav.state().is_expanded("a"));
    assert_eq!(selected(&nav).as_deref(), Some("a"));
}

#[test]
fn test_inline_child_drill_survives_refresh() {
    let mut nav = navigator(tree([true; 4], true));
    nav.handle(Action::Activate);
    nav.handle(Action::MoveDown);
    nav.handle(Action::Activate);
    assert_eq!(ids(nav.state().items()), vec!["a1x", "a1y"]);
    nav.handle(Action::MoveDown);

    nav.update_items(tree([true; 4], true));
    assert_eq!(nav.state().navigation_stack().len(), 1);
    assert_eq!(selected(&nav).as_deref(), Some("a1y"));
}

#[test]
fn test_replacing_ancestor_while_drilled_revalidates_stack() {
    let mut nav = navigator(tree([true; 4], true));
    nav.handle(Action::Activate);
    nav.handle(Action::MoveDown);
    nav.handle(Action::Activate);
    assert_eq!(ids(nav.state().items()), vec!["a1x", "a1y"]);

    assert!(nav.update_item_by_id("a", replacement(0, false, false)));
    assert!(!nav.state().is_in_drill_down());
    assert_eq!(selected(&nav).as_deref(), Some("a"));

    nav.handle(Action::MoveDown);
    nav.handle(Action::MoveDown);
    nav.handle(Action::Activate);
    assert_eq!(ids(nav.state().items()), vec!["c1", "c2"]);

    assert!(nav.update_item_by_id("c", replacement(2, true, true)));
    assert!(!nav.state().is_in_drill_down());
    assert_eq!(ids(nav.state().items()), vec!["a", "b", "c-renamed", "d"]);
}

#[test]
fn test_add_while_drilled_appears_after_back() {
    let mut nav = navigator(tree([true; 4], true));
    nav.handle(Action::MoveDown);
    nav.handle(Action::MoveDown);
    assert_eq!(selected(&nav).as_deref(), Some("c"));
    nav.handle(Action::Activate);

    nav.apply(ItemUpdate::Add(Node::leaf("e").into_ref()));
    assert_eq!(ids(nav.state().items()), vec!["c1", "c2"]);

    nav.handle(Action::Back);
    assert_eq!(ids(nav.state().items()), vec!["a", "b", "c", "d", "e"]);
    assert_eq!(selected(&nav).as_deref(), Some("c"));
}

#[test]
fn test_selection_follows_identity_across_reorder() {
    let mut nav = navigator(leaves(&["1", "2", "3"]));
    nav.handle(Action::End);
    nav.update_items(leaves(&["3", "1", "2"]));
    assert_eq!(selected(&nav).as_deref(), Some("3"));
    assert_eq!(nav.state().selected_index(), 0);
}

#[test]
fn test_empty_dataset_has_no_selection() {
    let mut nav = navigator(leaves(&["1"]));
    nav.update_items(Vec::new());
    assert!(selected(&nav).is_none());
    assert!(nav.handle(Action::MoveDown).is_none());
    assert!(nav.handle(Action::Activate).is_none());
    assert!(plain_text(&nav.view().detail).contains("No item selected"));
}

// ============================================================================
// Properties
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Up,
    Down,
    Home,
    End,
    Activate,
    Back,
    Toggle,
    Remove(usize),
    Refresh([bool; 4], bool),
    Replace(usize, bool, bool),
    Add(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Up),
        3 => Just(Op::Down),
        1 => Just(Op::Home),
        1 => Just(Op::End),
        4 => Just(Op::Activate),
        2 => Just(Op::Back),
        1 => Just(Op::Toggle),
        1 => (0usize..4).prop_map(Op::Remove),
        2 => (any::<[bool; 4]>(), any::<bool>()).prop_map(|(keep, a1)| Op::Refresh(keep, a1)),
        2 => (0usize..4, any::<bool>(), any::<bool>())
            .prop_map(|(i, a1, new_id)| Op::Replace(i, a1, new_id)),
        1 => any::<u8>().prop_map(Op::Add),
    ]
}

fn run(nav: &mut Navigator, op: &Op) {
    let action = match op {
        Op::Up => Action::MoveUp,
        Op::Down => Action::MoveDown,
        Op::Home => Action::Home,
        Op::End => Action::End,
        Op::Activate => Action::Activate,
        Op::Back => Action::Back,
        Op::Toggle => Action::TogglePane,
        Op::Remove(i) => {
            nav.remove_item_by_id(["a", "b", "c", "d"][*i]);
            return;
        }
        Op::Refresh(keep, a1) => {
            nav.update_items(tree(*keep, *a1));
            return;
        }
        Op::Replace(i, a1, new_id) => {
            nav.update_item_by_id(["a", "b", "c", "d"][*i], replacement(*i, *a1, *new_id));
            return;
        }
        Op::Add(n) => {
            nav.add_item(Node::leaf(&format!("new{n}")).into_ref());
            return;
        }
    };
    nav.handle(action);
}

/// Root item `i` rebuilt with or without the nested drillable under "a",
/// optionally under a fresh id.
fn replacement(i: usize, keep_a1: bool, new_id: bool) -> ItemRef {
    let fresh = tree([true; 4], keep_a1).swap_remove(i);
    if !new_id {
        return fresh;
    }
    Node::leaf(&format!("{}-renamed", fresh.id()))
        .drillable()
        .with_children(fresh.children().to_vec())
        .into_ref()
}

fn check_selection(nav: &Navigator) -> Result<(), TestCaseError> {
    let state = nav.state();
    let visible = state.visible_items();
    match state.selected_id() {
        Some(id) => {
            let pos = visible.iter().position(|item| item.id() == id);
            prop_assert!(pos.is_some(), "selected {id} not visible");
            prop_assert_eq!(pos, Some(state.selected_index()));
        }
        None => prop_assert!(visible.is_empty(), "visible items but no selection"),
    }
    Ok(())
}

fn check_stack(nav: &Navigator) -> Result<(), TestCaseError> {
    let state = nav.state();
    let mut level: Vec<ItemRef> = state.root_items().to_vec();
    for frame in state.navigation_stack() {
        let parent = find_item_by_id(&level, &frame.parent_id);
        prop_assert!(parent.is_some(), "dangling frame {}", frame.parent_id);
        level = parent.map(|p| p.children().to_vec()).unwrap_or_default();
    }
    if state.is_in_drill_down() {
        prop_assert_eq!(ids(state.items()), ids(&level));
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_selection_always_visible(ops in prop::collection::vec(op(), 0..60)) {
        let mut nav = navigator(tree([true; 4], true));
        for op in &ops {
            run(&mut nav, op);
            check_selection(&nav)?;
        }
    }

    #[test]
    fn prop_stack_frames_resolve_from_root(ops in prop::collection::vec(op(), 0..60)) {
        let mut nav = navigator(tree([true; 4], true));
        for op in &ops {
            run(&mut nav, op);
            check_stack(&nav)?;
        }
    }
}

