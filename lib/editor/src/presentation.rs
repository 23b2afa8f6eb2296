//! How nodes look on the canvas.

use flowdeck_workflow::{GraphNode, HandleLayout, NodeCategory};
use serde::Serialize;

/// Icon drawn in a node's header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Mail,
    Chat,
    Clock,
    Webhook,
    Bell,
    CheckSquare,
    Branch,
    Timer,
    Repeat,
    Search,
    Sparkles,
    Zap,
    Play,
    Brain,
    Plug,
    Shield,
}

/// Keyword matches, checked in order against the type slug.
const KEYWORD_ICONS: &[(&str, Icon)] = &[
    ("email", Icon::Mail),
    ("slack", Icon::Chat),
    ("chat", Icon::Chat),
    ("schedule", Icon::Clock),
    ("webhook", Icon::Webhook),
    ("event", Icon::Bell),
    ("task", Icon::CheckSquare),
    ("condition", Icon::Branch),
    ("delay", Icon::Timer),
    ("loop", Icon::Repeat),
    ("analyze", Icon::Search),
    ("generate", Icon::Sparkles),
];

impl Icon {
    /// Picks an icon from the type slug, falling back to the category's.
    #[must_use]
    pub fn for_node(node_type: &str, category: NodeCategory) -> Self {
        let slug = node_type.to_lowercase();
        KEYWORD_ICONS
            .iter()
            .find(|(keyword, _)| slug.contains(keyword))
            .map_or_else(|| Self::for_category(category), |(_, icon)| *icon)
    }

    #[must_use]
    pub fn for_category(category: NodeCategory) -> Self {
        match category {
            NodeCategory::Trigger => Self::Zap,
            NodeCategory::Action => Self::Play,
            NodeCategory::Logic => Self::Branch,
            NodeCategory::Ai => Self::Brain,
            NodeCategory::Integration => Self::Plug,
            NodeCategory::ErpAudit => Self::Shield,
        }
    }
}

/// Accent colour for a category, as a CSS hex string.
#[must_use]
pub fn accent(category: NodeCategory) -> &'static str {
    match category {
        NodeCategory::Trigger => "#22c55e",
        NodeCategory::Action => "#3b82f6",
        NodeCategory::Logic => "#f59e0b",
        NodeCategory::Ai => "#a855f7",
        NodeCategory::Integration => "#06b6d4",
        NodeCategory::ErpAudit => "#ef4444",
    }
}

/// Everything needed to draw one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeStyle {
    pub icon: Icon,
    pub accent: &'static str,
    /// Shown as a dot once the node has any configuration.
    pub configured: bool,
    pub selected: bool,
    #[serde(skip)]
    pub handles: HandleLayout,
}

impl NodeStyle {
    #[must_use]
    pub fn for_node(node: &GraphNode, selected: bool) -> Self {
        Self {
            icon: Icon::for_node(&node.node_type, node.category),
            accent: accent(node.category),
            configured: node.is_configured(),
            selected,
            handles: node.handles(),
        }
    }
}
