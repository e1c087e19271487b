//! # Demo Deployment Tree
//!
//! A concrete item type for the binary: a deployment made of resources,
//! links and nested child blueprints, each with a rollout status.
//!
//! ```text
//! TreeNode (serde, JSON)  ──build_items──►  DemoItem (impl Item)
//!        ▲                                        │
//!        │ DeploymentFeed::advance()              ▼
//!        └── statuses move on each tick ──► ItemUpdate::Snapshot ──mpsc──► event loop
//! ```
//!
//! Nodes with children are both expandable and drillable, so the navigator
//! expands them in place until the depth bound and drills down past it.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info};
use ratatui::text::{Line, Span, Text};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::item::{Item, ItemRef};
use crate::core::reconcile::ItemUpdate;
use crate::render::DetailRenderer;
use crate::render::text::safe_width;
use crate::render::theme::Theme;

// ============================================================================
// Tree description
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Pending,
    InProgress,
    Complete,
    Failed,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In progress",
            Status::Complete => "Complete",
            Status::Failed => "Failed",
        }
    }

    fn glyph(&self) -> &'static str {
        match self {
            Status::Pending => "○",
            Status::InProgress => "◐",
            Status::Complete => "✓",
            Status::Failed => "✗",
        }
    }

    fn style(&self, theme: &Theme) -> ratatui::style::Style {
        match self {
            Status::Pending => theme.muted,
            Status::InProgress => theme.info,
            Status::Complete => theme.success,
            Status::Failed => theme.error,
        }
    }
}

/// One node of a deployment tree as written in a `--tree` JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    pub name: String,
    /// Section key: "resource", "child", "link".
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub description: Option<String>,
    /// The simulated rollout fails this node instead of completing it.
    #[serde(default)]
    pub fails: bool,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn new(id: &str, name: &str, kind: &str, action: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: Some(kind.to_string()),
            status: Status::Pending,
            action: action.to_string(),
            description: None,
            fails: false,
            children: Vec::new(),
        }
    }

    fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    fn failing(mut self) -> Self {
        self.fails = true;
        self
    }
}

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("failed to read tree file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tree file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate item id '{0}'")]
    DuplicateId(String),
}

/// Load a JSON array of [`TreeNode`] from `path`.
pub fn load_tree(path: &Path) -> Result<Vec<TreeNode>, TreeError> {
    let contents = fs::read_to_string(path).map_err(|source| TreeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let nodes = parse_tree(&contents).map_err(|e| match e {
        TreeError::Parse { source, .. } => TreeError::Parse {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    info!("Loaded {} top-level nodes from {}", nodes.len(), path.display());
    Ok(nodes)
}

/// Parse and validate a JSON tree. Ids must be unique across the whole tree.
pub fn parse_tree(json: &str) -> Result<Vec<TreeNode>, TreeError> {
    let nodes: Vec<TreeNode> = serde_json::from_str(json).map_err(|source| TreeError::Parse {
        path: PathBuf::new(),
        source,
    })?;
    check_unique(&nodes, &mut HashSet::new())?;
    Ok(nodes)
}

fn check_unique<'a>(nodes: &'a [TreeNode], seen: &mut HashSet<&'a str>) -> Result<(), TreeError> {
    for node in nodes {
        if !seen.insert(node.id.as_str()) {
            return Err(TreeError::DuplicateId(node.id.clone()));
        }
        check_unique(&node.children, seen)?;
    }
    Ok(())
}

/// Built-in tree used when no `--tree` file is given.
pub fn sample_deployment() -> Vec<TreeNode> {
    vec![
        TreeNode::new("ordersTable", "ordersTable", "resource", "CREATE")
            .describe(
                "DynamoDB table holding one item per order, keyed by order id with a GSI on customer id.",
            ),
        TreeNode::new("ordersQueue", "ordersQueue", "resource", "CREATE")
            .describe("SQS queue buffering new orders between the API and the processing function.")
            .failing(),
        TreeNode::new("processOrder", "processOrderFunction", "resource", "UPDATE")
            .describe("Lambda function consuming the orders queue.")
            .with_children(vec![
                TreeNode::new("processOrder.role", "executionRole", "resource", "UPDATE"),
                TreeNode::new("processOrder.logs", "logGroup", "resource", "CREATE"),
            ]),
        TreeNode::new("coreInfra", "coreInfra", "child", "UPDATE")
            .describe("Shared networking blueprint included by every service.")
            .with_children(vec![
                TreeNode::new("coreInfra.vpc", "vpc", "resource", "UPDATE"),
                TreeNode::new("coreInfra.subnets", "subnets", "child", "CREATE").with_children(vec![
                    TreeNode::new("coreInfra.subnets.a", "subnetA", "resource", "CREATE"),
                    TreeNode::new("coreInfra.subnets.b", "subnetB", "resource", "CREATE"),
                    TreeNode::new("coreInfra.subnets.routes", "routing", "child", "CREATE")
                        .with_children(vec![TreeNode::new(
                            "coreInfra.subnets.routes.table",
                            "routeTable",
                            "resource",
                            "CREATE",
                        )]),
                ]),
            ]),
        TreeNode::new("ordersTable::ordersQueue", "ordersTable::ordersQueue", "link", "CREATE")
            .describe("Stream from the orders table into the queue."),
    ]
}

// ============================================================================
// Item implementation
// ============================================================================

pub struct DemoItem {
    id: String,
    name: String,
    kind: Option<String>,
    status: Status,
    action: String,
    description: Option<String>,
    depth: usize,
    parent_id: Option<String>,
    children: Vec<ItemRef>,
    theme: Theme,
}

impl DemoItem {
    pub fn from_node(node: &TreeNode, depth: usize, parent_id: Option<&str>, theme: Theme) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: node.kind.clone(),
            status: node.status,
            action: node.action.clone(),
            description: node.description.clone(),
            depth,
            parent_id: parent_id.map(str::to_string),
            children: node
                .children
                .iter()
                .map(|child| {
                    let item = DemoItem::from_node(child, depth + 1, Some(node.id.as_str()), theme);
                    Arc::new(item) as ItemRef
                })
                .collect(),
            theme,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }
}

/// Build top-level items from a tree description.
pub fn build_items(nodes: &[TreeNode], theme: Theme) -> Vec<ItemRef> {
    nodes
        .iter()
        .map(|node| Arc::new(DemoItem::from_node(node, 0, None, theme)) as ItemRef)
        .collect()
}

impl Item for DemoItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn icon(&self, selected: bool) -> Span<'static> {
        if selected {
            Span::raw(self.status.glyph())
        } else {
            Span::styled(self.status.glyph(), self.status.style(&self.theme))
        }
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
        self.kind.as_deref()
    }

    fn is_expandable(&self) -> bool {
        !self.children.is_empty()
    }

    fn can_drill_down(&self) -> bool {
        !self.children.is_empty()
    }

    fn children(&self) -> &[ItemRef] {
        &self.children
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("Status", self.status.label().to_string())];
        if let Some(kind) = &self.kind {
            fields.insert(0, ("Type", kind.clone()));
        }
        if !self.children.is_empty() {
            fields.push(("Children", self.children.len().to_string()));
        }
        fields
    }
}

// ============================================================================
// Detail pane
// ============================================================================

/// Detail view for deployment nodes with word-wrapped descriptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeploymentDetails;

impl DetailRenderer for DeploymentDetails {
    fn render_details(&self, item: &dyn Item, width: u16, theme: &Theme) -> Text<'static> {
        let content_width = safe_width(width as i32 - 4);
        let mut lines = vec![
            Line::styled(item.name().to_string(), theme.header),
            Line::styled("─".repeat(content_width), theme.muted),
            Line::default(),
        ];

        for (label, value) in item.fields() {
            lines.push(Line::from(vec![
                Span::styled(format!("{label:<10}"), theme.muted),
                Span::raw(value),
            ]));
        }
        if !item.action().is_empty() {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<10}", "Action"), theme.muted),
                Span::styled(item.action().to_string(), theme.selected),
            ]));
        }

        if let Some(description) = item.description() {
            lines.push(Line::default());
            let options = textwrap::Options::new(content_width)
                .break_words(true)
                .word_separator(textwrap::WordSeparator::AsciiSpace);
            lines.extend(
                textwrap::wrap(description, options)
                    .into_iter()
                    .map(|l| Line::raw(l.into_owned())),
            );
        }

        if !item.children().is_empty() {
            lines.push(Line::default());
            lines.push(Line::styled("Contains", theme.category));
            for child in item.children() {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    child.icon(false),
                    Span::raw(format!(" {}", child.name())),
                ]));
            }
        }

        Text::from(lines)
    }
}

// ============================================================================
// Simulated live feed
// ============================================================================

/// Simulated rollout: on each tick every in-progress node settles and the
/// next pending nodes (depth-first) start.
pub struct DeploymentFeed {
    nodes: Vec<TreeNode>,
    theme: Theme,
    per_tick: usize,
}

impl DeploymentFeed {
    pub fn new(nodes: Vec<TreeNode>, theme: Theme) -> Self {
        Self {
            nodes,
            theme,
            per_tick: 2,
        }
    }

    pub fn items(&self) -> Vec<ItemRef> {
        build_items(&self.nodes, self.theme)
    }

    /// True once no node is pending or in progress.
    pub fn is_finished(&self) -> bool {
        fn active(nodes: &[TreeNode]) -> bool {
            nodes.iter().any(|s| {
                matches!(s.status, Status::Pending | Status::InProgress) || active(&s.children)
            })
        }
        !active(&self.nodes)
    }

    /// Advance one tick and return the resulting snapshot.
    pub fn advance(&mut self) -> ItemUpdate {
        fn settle(nodes: &mut [TreeNode]) {
            for node in nodes {
                if node.status == Status::InProgress {
                    node.status = if node.fails {
                        Status::Failed
                    } else {
                        Status::Complete
                    };
                }
                settle(&mut node.children);
            }
        }
        fn start(nodes: &mut [TreeNode], budget: &mut usize) {
            for node in nodes {
                if *budget == 0 {
                    return;
                }
                if node.status == Status::Pending {
                    node.status = Status::InProgress;
                    *budget -= 1;
                }
                start(&mut node.children, budget);
            }
        }

        settle(&mut self.nodes);
        let mut budget = self.per_tick;
        start(&mut self.nodes, &mut budget);
        ItemUpdate::Snapshot(self.items())
    }

    /// Push a snapshot every `interval` until the rollout finishes or the
    /// receiver goes away.
    pub fn spawn(mut self, interval: Duration, tx: Sender<ItemUpdate>) -> JoinHandle<()> {
        thread::spawn(move || {
            while !self.is_finished() {
                thread::sleep(interval);
                if tx.send(self.advance()).is_err() {
                    debug!("Feed receiver dropped, stopping");
                    return;
                }
            }
            info!("Simulated rollout finished");
        })
    }
}
