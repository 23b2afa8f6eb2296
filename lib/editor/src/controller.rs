//! The editor controller.
//!
//! Owns the graph, the palette, the selection with its configuration panel,
//! and the viewport. Every change goes through [`EditorController::handle`],
//! which returns the effects the host must carry out: notifications, the
//! save callback, and the close callback.

use crate::error::EditorError;
use crate::notification::Notification;
use crate::palette::Palette;
use crate::panel::{ConfigPanel, PanelCommand, PanelEvent};
use crate::presentation::NodeStyle;
use crate::settings::EditorSettings;
use crate::viewport::{Bounds, Minimap, Viewport};
use flowdeck_core::{EdgeId, IdGenerator, NodeId, WorkflowId};
use flowdeck_workflow::{
    BranchHandle, Catalog, EditorGraph, GraphEdge, GraphNode, NodeCategory, PersistedEdge,
    PersistedNode, Position, SavedWorkflow, SchemaRegistry, stacked_position,
};
use serde::Deserialize;
use std::collections::HashSet;

/// Offset applied to both axes when duplicating a node.
pub const DUPLICATE_OFFSET: f64 = 50.0;

/// Screen-space margin kept around the nodes by [`EditorCommand::FitView`].
pub const FIT_PADDING: f64 = 40.0;

pub const EMPTY_NAME_MESSAGE: &str = "Please enter a workflow name";
pub const EMPTY_GRAPH_MESSAGE: &str = "Please add at least one node to the workflow";

/// What the editor is opened with.
#[derive(Debug, Clone, Default)]
pub struct EditorInput {
    /// Opaque to the editor; handed back on save.
    pub workflow_id: Option<WorkflowId>,
    pub name: String,
    pub nodes: Vec<PersistedNode>,
    pub edges: Vec<PersistedEdge>,
    pub catalog: Catalog,
}

impl EditorInput {
    /// Opens a previously saved workflow.
    #[must_use]
    pub fn from_saved(saved: SavedWorkflow, catalog: Catalog) -> Self {
        Self {
            workflow_id: saved.workflow_id,
            name: saved.name,
            nodes: saved.nodes,
            edges: saved.edges,
            catalog,
        }
    }
}

/// Everything a user can do in the editor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditorCommand {
    /// A palette entry released over the canvas at a screen-space point.
    DropPaletteEntry { slug: String, point: Position },
    /// Place a node without dragging. Without a position the node goes to
    /// the next slot of the default stack.
    AddNode {
        slug: String,
        #[serde(default)]
        position: Option<Position>,
    },
    SelectNode { node_id: NodeId },
    /// A click on empty canvas.
    ClearSelection,
    MoveNode { node_id: NodeId, position: Position },
    DuplicateSelected,
    DeleteSelected,
    Connect {
        source: NodeId,
        #[serde(default)]
        source_handle: Option<BranchHandle>,
        target: NodeId,
    },
    RemoveEdge { edge_id: EdgeId },
    Rename { name: String },
    TogglePaletteGroup { category: NodeCategory },
    Pan { dx: f64, dy: f64 },
    Zoom { factor: f64, anchor: Position },
    FitView { width: f64, height: f64 },
    Panel(PanelCommand),
    Save,
    Cancel,
}

/// Something the host has to do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEffect {
    Notify(Notification),
    /// Persist this workflow. The editor does not wait for the outcome.
    Save(SavedWorkflow),
    Close,
}

/// The caller's collaborators.
pub trait EditorHost {
    fn on_save(&mut self, workflow: SavedWorkflow);

    fn on_close(&mut self);

    fn notify(&mut self, notification: Notification) {
        tracing::debug!(message = %notification.message, "Notification dropped");
    }
}

pub struct EditorController {
    workflow_id: Option<WorkflowId>,
    name: String,
    graph: EditorGraph,
    catalog: Catalog,
    palette: Palette,
    registry: SchemaRegistry,
    selected: Option<NodeId>,
    panel: Option<ConfigPanel>,
    viewport: Viewport,
    settings: EditorSettings,
    ids: Box<dyn IdGenerator>,
}

impl std::fmt::Debug for EditorController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorController")
            .field("workflow_id", &self.workflow_id)
            .field("name", &self.name)
            .field("nodes", &self.graph.node_count())
            .field("edges", &self.graph.edge_count())
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl EditorController {
    /// Builds the live canvas from the persisted shape.
    ///
    /// Nodes without a position are stacked by load order. Nodes with an id
    /// already seen, and edges that do not resolve, are dropped with a
    /// warning.
    #[must_use]
    pub fn load(
        input: EditorInput,
        settings: EditorSettings,
        mut ids: Box<dyn IdGenerator>,
    ) -> Self {
        let mut graph = EditorGraph::new();
        for (index, persisted) in input.nodes.into_iter().enumerate() {
            let mut node = GraphNode::from_persisted(persisted, index);
            node.description = input
                .catalog
                .find_by_slug(&node.node_type)
                .and_then(|def| def.description.clone());
            if let Err(err) = graph.add_node(node) {
                tracing::warn!(error = %err, "Skipping node on load");
            }
        }

        // Stored edge ids are claimed before any missing one is generated.
        let reserved: HashSet<EdgeId> = input
            .edges
            .iter()
            .filter_map(|edge| edge.id.clone())
            .collect();
        for persisted in input.edges {
            let id = match persisted.id {
                Some(id) => id,
                None => loop {
                    let candidate = ids.next_edge_id();
                    if !reserved.contains(&candidate) && graph.edge(&candidate).is_none() {
                        break candidate;
                    }
                },
            };
            let edge = GraphEdge::new(id, persisted.source, persisted.target)
                .with_source_handle(persisted.source_handle);
            if let Err(err) = graph.add_edge(edge) {
                tracing::warn!(error = %err, "Skipping edge on load");
            }
        }

        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            catalog = input.catalog.len(),
            "Workflow loaded"
        );

        Self {
            workflow_id: input.workflow_id,
            name: input.name,
            graph,
            palette: Palette::from_catalog(&input.catalog),
            catalog: input.catalog,
            registry: SchemaRegistry::with_defaults(),
            selected: None,
            panel: None,
            viewport: Viewport::new(&settings),
            settings,
            ids,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn graph(&self) -> &EditorGraph {
        &self.graph
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    /// The configuration panel, open while a node is selected.
    #[must_use]
    pub fn panel(&self) -> Option<&ConfigPanel> {
        self.panel.as_ref()
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Styles for every node, in canvas order.
    #[must_use]
    pub fn node_styles(&self) -> Vec<(NodeId, NodeStyle)> {
        self.graph
            .nodes()
            .map(|node| {
                let selected = self.selected.as_ref() == Some(&node.id);
                (node.id.clone(), NodeStyle::for_node(node, selected))
            })
            .collect()
    }

    #[must_use]
    pub fn minimap(&self, width: f64, height: f64) -> Minimap {
        Minimap::build(
            self.graph.nodes(),
            &self.viewport,
            width,
            height,
            &self.settings,
        )
    }

    /// The current graph in persisted form.
    #[must_use]
    pub fn to_saved(&self) -> SavedWorkflow {
        SavedWorkflow {
            workflow_id: self.workflow_id.clone(),
            name: self.name.clone(),
            nodes: self.graph.nodes().map(GraphNode::to_persisted).collect(),
            edges: self.graph.edges().map(PersistedEdge::from).collect(),
        }
    }

    /// Applies one command.
    ///
    /// # Errors
    ///
    /// Returns an error when the command refers to something that does not
    /// exist, or a panel edit does not fit its field. State is unchanged on
    /// error.
    pub fn handle(&mut self, command: EditorCommand) -> Result<Vec<EditorEffect>, EditorError> {
        match command {
            EditorCommand::DropPaletteEntry { slug, point } => {
                let flow = self.viewport.screen_to_flow(point);
                let position = flow.offset(
                    -self.settings.node_width / 2.0,
                    -self.settings.node_height / 2.0,
                );
                self.place_node(&slug, position)
            }
            EditorCommand::AddNode { slug, position } => {
                let position =
                    position.unwrap_or_else(|| stacked_position(self.graph.node_count()));
                self.place_node(&slug, position)
            }
            EditorCommand::SelectNode { node_id } => {
                self.select(node_id)?;
                Ok(Vec::new())
            }
            EditorCommand::ClearSelection => {
                self.clear_selection();
                Ok(Vec::new())
            }
            EditorCommand::MoveNode { node_id, position } => {
                self.graph.move_node(&node_id, position)?;
                Ok(Vec::new())
            }
            EditorCommand::DuplicateSelected => {
                self.duplicate_selected()?;
                Ok(Vec::new())
            }
            EditorCommand::DeleteSelected => {
                if let Some(node_id) = self.selected.clone() {
                    self.graph.remove_node(&node_id)?;
                    self.clear_selection();
                }
                Ok(Vec::new())
            }
            EditorCommand::Connect {
                source,
                source_handle,
                target,
            } => {
                let id = self.fresh_edge_id();
                let edge = GraphEdge::new(id, source, target).with_source_handle(source_handle);
                self.graph.add_edge(edge)?;
                Ok(Vec::new())
            }
            EditorCommand::RemoveEdge { edge_id } => {
                self.graph.remove_edge(&edge_id)?;
                Ok(Vec::new())
            }
            EditorCommand::Rename { name } => {
                self.name = name;
                Ok(Vec::new())
            }
            EditorCommand::TogglePaletteGroup { category } => {
                if self.palette.toggle(category).is_none() {
                    tracing::debug!(%category, "No palette group to toggle");
                }
                Ok(Vec::new())
            }
            EditorCommand::Pan { dx, dy } => {
                self.viewport.pan_by(dx, dy);
                Ok(Vec::new())
            }
            EditorCommand::Zoom { factor, anchor } => {
                self.viewport.zoom_at(factor, anchor);
                Ok(Vec::new())
            }
            EditorCommand::FitView { width, height } => {
                let bounds = Bounds::of_nodes(self.graph.nodes(), &self.settings);
                self.viewport.fit(bounds, width, height, FIT_PADDING);
                Ok(Vec::new())
            }
            EditorCommand::Panel(command) => self.handle_panel(command),
            EditorCommand::Save => Ok(vec![self.save()]),
            EditorCommand::Cancel => Ok(vec![EditorEffect::Close]),
        }
    }

    /// Applies a command and hands its effects to the host.
    ///
    /// # Errors
    ///
    /// Returns the command's error; the host sees nothing in that case.
    pub fn dispatch(
        &mut self,
        command: EditorCommand,
        host: &mut dyn EditorHost,
    ) -> Result<(), EditorError> {
        for effect in self.handle(command)? {
            match effect {
                EditorEffect::Notify(notification) => host.notify(notification),
                EditorEffect::Save(workflow) => host.on_save(workflow),
                EditorEffect::Close => host.on_close(),
            }
        }
        Ok(())
    }

    fn place_node(
        &mut self,
        slug: &str,
        position: Position,
    ) -> Result<Vec<EditorEffect>, EditorError> {
        let definition =
            self.catalog
                .find_by_slug(slug)
                .ok_or_else(|| EditorError::UnknownNodeType {
                    slug: slug.to_string(),
                })?;
        let node_id = loop {
            let candidate = self.ids.next_node_id();
            if !self.graph.contains_node(&candidate) {
                break candidate;
            }
        };
        let node = GraphNode::from_definition(node_id, definition, position);
        let message = format!("Added {}", node.label);
        self.graph.add_node(node)?;
        Ok(vec![EditorEffect::Notify(Notification::success(message))])
    }

    fn fresh_edge_id(&mut self) -> EdgeId {
        loop {
            let candidate = self.ids.next_edge_id();
            if self.graph.edge(&candidate).is_none() {
                return candidate;
            }
        }
    }

    /// Selects a node and opens its panel. Reselecting the node that is
    /// already selected keeps the panel, and any unsaved edits, as they are.
    fn select(&mut self, node_id: NodeId) -> Result<(), EditorError> {
        if self.selected.as_ref() == Some(&node_id) && self.panel.is_some() {
            return Ok(());
        }
        let node = self
            .graph
            .node(&node_id)
            .ok_or_else(|| flowdeck_workflow::GraphError::NodeNotFound {
                node_id: node_id.clone(),
            })?;

        if let Some(previous) = self.panel.as_ref().filter(|panel| panel.has_changes()) {
            tracing::debug!(node_id = %previous.node_id(), "Discarding unsaved configuration");
        }
        let resolved = self.registry.resolve(node, &self.catalog);
        self.panel = Some(ConfigPanel::open(node, resolved));
        self.selected = Some(node_id);
        Ok(())
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.panel = None;
    }

    fn duplicate_selected(&mut self) -> Result<(), EditorError> {
        let Some(original) = self.selected.as_ref().and_then(|id| self.graph.node(id)) else {
            return Ok(());
        };
        let original = original.clone();
        let node_id = loop {
            let candidate = self.ids.next_node_id();
            if !self.graph.contains_node(&candidate) {
                break candidate;
            }
        };
        let copy = original.duplicate(node_id, DUPLICATE_OFFSET, DUPLICATE_OFFSET);
        self.graph.add_node(copy)?;
        Ok(())
    }

    fn handle_panel(&mut self, command: PanelCommand) -> Result<Vec<EditorEffect>, EditorError> {
        if command == PanelCommand::Close {
            self.clear_selection();
            return Ok(Vec::new());
        }
        let panel = self.panel.as_mut().ok_or(EditorError::PanelNotOpen)?;
        match command {
            PanelCommand::SetField { key, input } => panel.set_field(&key, input)?,
            PanelCommand::Save => {
                let event = panel.commit();
                self.apply(event)?;
            }
            PanelCommand::Discard => panel.discard(),
            PanelCommand::Close => {}
        }
        Ok(Vec::new())
    }

    fn apply(&mut self, event: PanelEvent) -> Result<(), EditorError> {
        match event {
            PanelEvent::ConfigCommitted { node_id, config } => {
                self.graph.set_config(&node_id, config)?;
                tracing::debug!(node_id = %node_id, "Configuration committed");
            }
        }
        Ok(())
    }

    fn save(&self) -> EditorEffect {
        if self.name.trim().is_empty() {
            return EditorEffect::Notify(Notification::error(EMPTY_NAME_MESSAGE));
        }
        if self.graph.is_empty() {
            return EditorEffect::Notify(Notification::error(EMPTY_GRAPH_MESSAGE));
        }
        let saved = self.to_saved();
        tracing::info!(
            name = %saved.name,
            nodes = saved.nodes.len(),
            edges = saved.edges.len(),
            "Saving workflow"
        );
        EditorEffect::Save(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{Control, PanelState};
    use flowdeck_core::SequentialIdGenerator;
    use flowdeck_workflow::{ConfigMap, FieldInput, NodeTypeDefinition, SchemaSource};
    use serde_json::json;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            NodeTypeDefinition::new("t1", "trigger_schedule", "Schedule", NodeCategory::Trigger),
            NodeTypeDefinition::new("a1", "action_email", "Send Email", NodeCategory::Action),
            NodeTypeDefinition::new("l1", "logic_condition", "Condition", NodeCategory::Logic),
        ])
    }

    fn persisted(id: &str, node_type: &str, category: NodeCategory) -> PersistedNode {
        PersistedNode {
            id: NodeId::from(id),
            node_type: node_type.to_string(),
            name: node_type.to_string(),
            category,
            config: ConfigMap::new(),
            position: None,
        }
    }

    fn editor(input: EditorInput) -> EditorController {
        EditorController::load(
            input,
            EditorSettings::default(),
            Box::new(SequentialIdGenerator::new()),
        )
    }

    fn empty_editor() -> EditorController {
        editor(EditorInput {
            name: "My workflow".into(),
            catalog: catalog(),
            ..EditorInput::default()
        })
    }

    fn saved(effects: &[EditorEffect]) -> Option<&SavedWorkflow> {
        effects.iter().find_map(|effect| match effect {
            EditorEffect::Save(workflow) => Some(workflow),
            _ => None,
        })
    }

    #[derive(Default)]
    struct RecordingHost {
        saves: Vec<SavedWorkflow>,
        closed: usize,
        notifications: Vec<Notification>,
    }

    impl EditorHost for RecordingHost {
        fn on_save(&mut self, workflow: SavedWorkflow) {
            self.saves.push(workflow);
        }

        fn on_close(&mut self) {
            self.closed += 1;
        }

        fn notify(&mut self, notification: Notification) {
            self.notifications.push(notification);
        }
    }

    #[test]
    fn load_then_save_keeps_node_fields() {
        let mut with_config = persisted("n2", "action_email", NodeCategory::Action);
        with_config.config.insert("to".into(), json!("a@b.c"));
        with_config.position = Some(Position::new(10.0, 20.0));
        let nodes = vec![
            persisted("n1", "trigger_schedule", NodeCategory::Trigger),
            with_config,
            persisted("n3", "erp_audit_ledger", NodeCategory::ErpAudit),
        ];
        let mut editor = editor(EditorInput {
            name: "Round trip".into(),
            nodes: nodes.clone(),
            catalog: catalog(),
            ..EditorInput::default()
        });

        let effects = editor.handle(EditorCommand::Save).unwrap();
        let saved = saved(&effects).expect("saved");
        assert_eq!(saved.nodes.len(), nodes.len());
        for (out, input) in saved.nodes.iter().zip(&nodes) {
            assert_eq!(out.id, input.id);
            assert_eq!(out.node_type, input.node_type);
            assert_eq!(out.category, input.category);
            assert_eq!(out.config, input.config);
        }
        assert_eq!(saved.nodes[1].position, Some(Position::new(10.0, 20.0)));
    }

    #[test]
    fn nodes_without_position_are_stacked_by_index() {
        let editor = editor(EditorInput {
            name: "Stack".into(),
            nodes: vec![
                persisted("n1", "trigger_schedule", NodeCategory::Trigger),
                persisted("n2", "action_email", NodeCategory::Action),
                persisted("n3", "logic_delay", NodeCategory::Logic),
            ],
            catalog: catalog(),
            ..EditorInput::default()
        });
        let positions: Vec<_> = editor.graph().nodes().map(|n| n.position).collect();
        assert_eq!(
            positions,
            [
                Position::new(250.0, 50.0),
                Position::new(250.0, 170.0),
                Position::new(250.0, 290.0)
            ]
        );
    }

    #[test]
    fn persisted_edges_are_restored_and_dangling_ones_dropped() {
        let editor = editor(EditorInput {
            name: "Edges".into(),
            nodes: vec![
                persisted("n1", "trigger_schedule", NodeCategory::Trigger),
                persisted("n2", "action_email", NodeCategory::Action),
            ],
            edges: vec![
                PersistedEdge {
                    id: Some(EdgeId::from("e1")),
                    source: NodeId::from("n1"),
                    target: NodeId::from("n2"),
                    source_handle: None,
                },
                PersistedEdge {
                    id: None,
                    source: NodeId::from("n1"),
                    target: NodeId::from("gone"),
                    source_handle: None,
                },
            ],
            catalog: catalog(),
            ..EditorInput::default()
        });
        assert_eq!(editor.graph().edge_count(), 1);
        assert!(editor.graph().edge(&EdgeId::from("e1")).is_some());
    }

    #[test]
    fn generated_edge_ids_do_not_take_stored_ones() {
        let editor = editor(EditorInput {
            name: "Reserved".into(),
            nodes: vec![
                persisted("a", "trigger_schedule", NodeCategory::Trigger),
                persisted("b", "logic_condition", NodeCategory::Logic),
                persisted("c", "action_email", NodeCategory::Action),
            ],
            edges: vec![
                PersistedEdge {
                    id: None,
                    source: NodeId::from("a"),
                    target: NodeId::from("b"),
                    source_handle: None,
                },
                PersistedEdge {
                    id: Some(EdgeId::from("edge_1")),
                    source: NodeId::from("b"),
                    target: NodeId::from("c"),
                    source_handle: Some(BranchHandle::Yes),
                },
            ],
            catalog: catalog(),
            ..EditorInput::default()
        });

        assert_eq!(editor.graph().edge_count(), 2);
        let stored = editor.graph().edge(&EdgeId::from("edge_1")).expect("stored edge");
        assert_eq!(stored.source, NodeId::from("b"));
        let generated = editor.graph().edge(&EdgeId::from("edge_2")).expect("generated edge");
        assert_eq!(generated.source, NodeId::from("a"));
        let order: Vec<_> = editor.graph().edges().map(|e| e.id.to_string()).collect();
        assert_eq!(order, ["edge_2", "edge_1"]);
    }

    #[test]
    fn loaded_nodes_take_description_from_catalog() {
        let catalog = Catalog::new(vec![
            NodeTypeDefinition::new("a1", "action_email", "Send Email", NodeCategory::Action)
                .with_description("Send an email message"),
        ]);
        let mut editor = editor(EditorInput {
            name: "Described".into(),
            nodes: vec![
                persisted("n1", "action_email", NodeCategory::Action),
                persisted("n2", "action_unknown", NodeCategory::Action),
            ],
            catalog,
            ..EditorInput::default()
        });
        let n1 = NodeId::from("n1");
        assert_eq!(
            editor.graph().node(&n1).unwrap().description.as_deref(),
            Some("Send an email message")
        );
        assert!(editor.graph().node(&NodeId::from("n2")).unwrap().description.is_none());

        editor.handle(EditorCommand::SelectNode { node_id: n1 }).unwrap();
        assert_eq!(
            editor.panel().unwrap().description(),
            Some("Send an email message")
        );
    }

    #[test]
    fn node_without_schema_opens_empty_panel() {
        let mut editor = editor(EditorInput {
            name: "Audit".into(),
            nodes: vec![persisted("n1", "erp_audit_ledger", NodeCategory::ErpAudit)],
            catalog: catalog(),
            ..EditorInput::default()
        });
        editor
            .handle(EditorCommand::SelectNode {
                node_id: NodeId::from("n1"),
            })
            .unwrap();
        let panel = editor.panel().expect("panel");
        assert!(panel.is_empty_schema());
        assert_eq!(panel.schema_source(), SchemaSource::None);
        assert!(panel.fields().is_empty());
    }

    #[test]
    fn add_then_delete_restores_count_and_removes_edges() {
        let mut editor = editor(EditorInput {
            name: "Count".into(),
            nodes: vec![persisted("n1", "trigger_schedule", NodeCategory::Trigger)],
            catalog: catalog(),
            ..EditorInput::default()
        });
        let before = editor.graph().node_count();

        editor
            .handle(EditorCommand::DropPaletteEntry {
                slug: "action_email".into(),
                point: Position::new(300.0, 300.0),
            })
            .unwrap();
        let added = NodeId::from("node_1");
        editor
            .handle(EditorCommand::Connect {
                source: NodeId::from("n1"),
                source_handle: None,
                target: added.clone(),
            })
            .unwrap();
        editor
            .handle(EditorCommand::Connect {
                source: added.clone(),
                source_handle: None,
                target: added.clone(),
            })
            .unwrap();
        assert_eq!(editor.graph().edge_count(), 2);

        editor
            .handle(EditorCommand::SelectNode { node_id: added })
            .unwrap();
        editor.handle(EditorCommand::DeleteSelected).unwrap();
        assert_eq!(editor.graph().node_count(), before);
        assert_eq!(editor.graph().edge_count(), 0);
        assert!(editor.selected().is_none());
        assert!(editor.panel().is_none());
    }

    #[test]
    fn duplicate_offsets_position_and_skips_edges() {
        let mut configured = persisted("n1", "action_email", NodeCategory::Action);
        configured.config.insert("subject".into(), json!("Hi"));
        configured.position = Some(Position::new(100.0, 40.0));
        let mut editor = editor(EditorInput {
            name: "Dup".into(),
            nodes: vec![
                configured,
                persisted("n2", "logic_condition", NodeCategory::Logic),
            ],
            edges: vec![PersistedEdge {
                id: None,
                source: NodeId::from("n1"),
                target: NodeId::from("n2"),
                source_handle: None,
            }],
            catalog: catalog(),
            ..EditorInput::default()
        });

        editor
            .handle(EditorCommand::SelectNode {
                node_id: NodeId::from("n1"),
            })
            .unwrap();
        editor.handle(EditorCommand::DuplicateSelected).unwrap();

        let copy = editor.graph().node(&NodeId::from("node_1")).expect("copy");
        let original = editor.graph().node(&NodeId::from("n1")).unwrap();
        assert_eq!(copy.position, Position::new(150.0, 90.0));
        assert_eq!(copy.category, original.category);
        assert_eq!(copy.node_type, original.node_type);
        assert_eq!(copy.config(), original.config());
        assert_eq!(editor.graph().edge_count(), 1);
        assert_eq!(editor.selected(), Some(&NodeId::from("n1")));
    }

    #[test]
    fn duplicate_and_delete_without_selection_do_nothing() {
        let mut editor = editor(EditorInput {
            name: "Idle".into(),
            nodes: vec![persisted("n1", "action_email", NodeCategory::Action)],
            catalog: catalog(),
            ..EditorInput::default()
        });
        editor.handle(EditorCommand::DuplicateSelected).unwrap();
        editor.handle(EditorCommand::DeleteSelected).unwrap();
        assert_eq!(editor.graph().node_count(), 1);
    }

    #[test]
    fn save_is_blocked_on_blank_name() {
        for name in ["", "   "] {
            let mut editor = editor(EditorInput {
                name: name.into(),
                nodes: vec![persisted("n1", "action_email", NodeCategory::Action)],
                catalog: catalog(),
                ..EditorInput::default()
            });
            let mut host = RecordingHost::default();
            editor.dispatch(EditorCommand::Save, &mut host).unwrap();
            assert!(host.saves.is_empty());
            assert_eq!(host.notifications, [Notification::error(EMPTY_NAME_MESSAGE)]);
        }
    }

    #[test]
    fn save_is_blocked_on_empty_graph() {
        let mut editor = empty_editor();
        let mut host = RecordingHost::default();
        editor.dispatch(EditorCommand::Save, &mut host).unwrap();
        assert!(host.saves.is_empty());
        assert_eq!(host.notifications, [Notification::error(EMPTY_GRAPH_MESSAGE)]);
    }

    #[test]
    fn save_passes_name_untrimmed_and_is_not_guarded() {
        let mut editor = editor(EditorInput {
            workflow_id: Some(WorkflowId::from("wf-1")),
            name: "  Padded ".into(),
            nodes: vec![persisted("n1", "action_email", NodeCategory::Action)],
            catalog: catalog(),
            ..EditorInput::default()
        });
        let mut host = RecordingHost::default();
        editor.dispatch(EditorCommand::Save, &mut host).unwrap();
        editor.dispatch(EditorCommand::Save, &mut host).unwrap();
        assert_eq!(host.saves.len(), 2);
        assert_eq!(host.saves[0].name, "  Padded ");
        assert_eq!(host.saves[0].workflow_id, Some(WorkflowId::from("wf-1")));
    }

    #[test]
    fn cancel_only_closes() {
        let mut editor = empty_editor();
        let mut host = RecordingHost::default();
        editor.dispatch(EditorCommand::Cancel, &mut host).unwrap();
        assert_eq!(host.closed, 1);
        assert!(host.saves.is_empty());
        assert_eq!(editor.name(), "My workflow");
    }

    #[test]
    fn switching_selection_discards_uncommitted_edits() {
        let mut editor = editor(EditorInput {
            name: "Scoped".into(),
            nodes: vec![
                persisted("a", "action_email", NodeCategory::Action),
                persisted("b", "action_email", NodeCategory::Action),
            ],
            catalog: catalog(),
            ..EditorInput::default()
        });
        editor
            .handle(EditorCommand::SelectNode {
                node_id: NodeId::from("a"),
            })
            .unwrap();
        editor
            .handle(EditorCommand::Panel(PanelCommand::SetField {
                key: "subject".into(),
                input: FieldInput::Text("Hello".into()),
            }))
            .unwrap();
        assert_eq!(editor.panel().unwrap().state(), PanelState::Dirty);

        editor
            .handle(EditorCommand::SelectNode {
                node_id: NodeId::from("b"),
            })
            .unwrap();
        let a = editor.graph().node(&NodeId::from("a")).unwrap();
        assert!(a.config().is_empty());
        assert_eq!(editor.panel().unwrap().node_id(), &NodeId::from("b"));
        assert_eq!(editor.panel().unwrap().state(), PanelState::Clean);
    }

    #[test]
    fn reselecting_same_node_keeps_panel_edits() {
        let mut editor = editor(EditorInput {
            name: "Same".into(),
            nodes: vec![persisted("a", "action_email", NodeCategory::Action)],
            catalog: catalog(),
            ..EditorInput::default()
        });
        let select = EditorCommand::SelectNode {
            node_id: NodeId::from("a"),
        };
        editor.handle(select.clone()).unwrap();
        editor
            .handle(EditorCommand::Panel(PanelCommand::SetField {
                key: "to".into(),
                input: FieldInput::Text("x@y.z".into()),
            }))
            .unwrap();
        editor.handle(select).unwrap();
        assert!(editor.panel().unwrap().has_changes());
    }

    #[test]
    fn configured_flag_follows_committed_config() {
        let mut editor = editor(EditorInput {
            name: "Flag".into(),
            nodes: vec![persisted("a", "logic_delay", NodeCategory::Logic)],
            catalog: catalog(),
            ..EditorInput::default()
        });
        let node_id = NodeId::from("a");
        editor
            .handle(EditorCommand::SelectNode {
                node_id: node_id.clone(),
            })
            .unwrap();
        editor
            .handle(EditorCommand::Panel(PanelCommand::SetField {
                key: "seconds".into(),
                input: FieldInput::Text("30".into()),
            }))
            .unwrap();
        editor.handle(EditorCommand::Panel(PanelCommand::Save)).unwrap();
        assert!(editor.graph().node(&node_id).unwrap().is_configured());

        editor
            .handle(EditorCommand::Panel(PanelCommand::SetField {
                key: "seconds".into(),
                input: FieldInput::Clear,
            }))
            .unwrap();
        editor.handle(EditorCommand::Panel(PanelCommand::Save)).unwrap();
        assert!(!editor.graph().node(&node_id).unwrap().is_configured());
    }

    #[test]
    fn drop_schedule_trigger_and_configure_it() {
        let mut editor = editor(EditorInput {
            name: "Scenario".into(),
            catalog: Catalog::new(vec![NodeTypeDefinition::new(
                "t1",
                "trigger_schedule",
                "Schedule",
                NodeCategory::Trigger,
            )]),
            ..EditorInput::default()
        });

        let effects = editor
            .handle(EditorCommand::DropPaletteEntry {
                slug: "trigger_schedule".into(),
                point: Position::new(100.0, 100.0),
            })
            .unwrap();
        assert_eq!(
            effects,
            [EditorEffect::Notify(Notification::success("Added Schedule"))]
        );

        let node = editor.graph().nodes().next().expect("node");
        let node_id = node.id.clone();
        assert_eq!(editor.graph().node_count(), 1);
        assert_eq!(node.category, NodeCategory::Trigger);
        assert_eq!(node.node_type, "trigger_schedule");
        assert!(node.config().is_empty());
        assert!(!node.is_configured());
        assert_eq!(node.position, Position::new(20.0, 70.0));

        editor
            .handle(EditorCommand::SelectNode {
                node_id: node_id.clone(),
            })
            .unwrap();
        let panel = editor.panel().expect("panel");
        assert_eq!(panel.schema_source(), SchemaSource::Builtin);
        let keys: Vec<_> = panel.fields().into_iter().map(|f| f.key).collect();
        assert_eq!(keys, ["cron_expression", "timezone"]);

        editor
            .handle(EditorCommand::Panel(PanelCommand::SetField {
                key: "cron_expression".into(),
                input: FieldInput::Text("0 9 * * 1-5".into()),
            }))
            .unwrap();
        editor.handle(EditorCommand::Panel(PanelCommand::Save)).unwrap();

        let node = editor.graph().node(&node_id).unwrap();
        assert!(node.is_configured());
        assert_eq!(node.config().get("cron_expression"), Some(&json!("0 9 * * 1-5")));
        let timezone = editor
            .panel()
            .unwrap()
            .fields()
            .into_iter()
            .find(|f| f.key == "timezone")
            .unwrap();
        assert_eq!(timezone.control, Control::TextInput { value: "UTC".into() });
    }

    #[test]
    fn drop_accounts_for_viewport() {
        let mut editor = empty_editor();
        editor.handle(EditorCommand::Pan { dx: 100.0, dy: 50.0 }).unwrap();
        editor
            .handle(EditorCommand::DropPaletteEntry {
                slug: "action_email".into(),
                point: Position::new(300.0, 250.0),
            })
            .unwrap();
        let node = editor.graph().nodes().next().unwrap();
        assert_eq!(node.position, Position::new(120.0, 170.0));
    }

    #[test]
    fn unknown_slug_is_rejected() {
        let mut editor = empty_editor();
        let err = editor
            .handle(EditorCommand::AddNode {
                slug: "nope".into(),
                position: None,
            })
            .unwrap_err();
        assert_eq!(err, EditorError::UnknownNodeType { slug: "nope".into() });
        assert!(editor.graph().is_empty());
    }

    #[test]
    fn generated_ids_skip_loaded_ones() {
        let mut editor = editor(EditorInput {
            name: "Ids".into(),
            nodes: vec![persisted("node_1", "action_email", NodeCategory::Action)],
            catalog: catalog(),
            ..EditorInput::default()
        });
        editor
            .handle(EditorCommand::AddNode {
                slug: "action_email".into(),
                position: None,
            })
            .unwrap();
        let ids: Vec<_> = editor.graph().nodes().map(|n| n.id.to_string()).collect();
        assert_eq!(ids, ["node_1", "node_2"]);
        assert_eq!(
            editor.graph().node(&NodeId::from("node_2")).unwrap().position,
            stacked_position(1)
        );
    }

    #[test]
    fn branch_handles_are_kept_on_save() {
        let mut editor = editor(EditorInput {
            name: "Branches".into(),
            nodes: vec![
                persisted("c", "logic_condition", NodeCategory::Logic),
                persisted("e", "action_email", NodeCategory::Action),
            ],
            catalog: catalog(),
            ..EditorInput::default()
        });
        editor
            .handle(EditorCommand::Connect {
                source: NodeId::from("c"),
                source_handle: Some(BranchHandle::No),
                target: NodeId::from("e"),
            })
            .unwrap();
        let effects = editor.handle(EditorCommand::Save).unwrap();
        let saved = saved(&effects).unwrap();
        assert_eq!(saved.edges.len(), 1);
        assert_eq!(saved.edges[0].source_handle, Some(BranchHandle::No));
        assert_eq!(saved.edges[0].id, Some(EdgeId::from("edge_1")));
    }

    #[test]
    fn panel_commands_need_a_selection() {
        let mut editor = empty_editor();
        assert_eq!(
            editor.handle(EditorCommand::Panel(PanelCommand::Save)),
            Err(EditorError::PanelNotOpen)
        );
        editor
            .handle(EditorCommand::Panel(PanelCommand::Close))
            .unwrap();
    }

    #[test]
    fn commands_deserialize_from_script_json() {
        let commands: Vec<EditorCommand> = serde_json::from_value(json!([
            { "op": "drop_palette_entry", "slug": "trigger_schedule", "point": { "x": 1.0, "y": 2.0 } },
            { "op": "select_node", "node_id": "node_1" },
            { "op": "panel", "action": "set_field", "key": "timezone",
              "input": { "input": "text", "value": "UTC" } },
            { "op": "panel", "action": "save" },
            { "op": "toggle_palette_group", "category": "erp_audit" },
            { "op": "save" }
        ]))
        .expect("commands");
        assert_eq!(commands.len(), 6);
        assert_eq!(
            commands[2],
            EditorCommand::Panel(PanelCommand::SetField {
                key: "timezone".into(),
                input: FieldInput::Text("UTC".into()),
            })
        );
    }

    #[test]
    fn palette_toggle_goes_through_reducer() {
        let mut editor = empty_editor();
        assert!(!editor.palette().is_expanded(NodeCategory::Logic));
        editor
            .handle(EditorCommand::TogglePaletteGroup {
                category: NodeCategory::Logic,
            })
            .unwrap();
        assert!(editor.palette().is_expanded(NodeCategory::Logic));
    }

    #[test]
    fn node_styles_mark_selection() {
        let mut editor = editor(EditorInput {
            name: "Styles".into(),
            nodes: vec![
                persisted("a", "action_email", NodeCategory::Action),
                persisted("b", "trigger_schedule", NodeCategory::Trigger),
            ],
            catalog: catalog(),
            ..EditorInput::default()
        });
        editor
            .handle(EditorCommand::SelectNode {
                node_id: NodeId::from("b"),
            })
            .unwrap();
        let selected: Vec<_> = editor
            .node_styles()
            .into_iter()
            .map(|(_, style)| style.selected)
            .collect();
        assert_eq!(selected, [false, true]);
    }
}
