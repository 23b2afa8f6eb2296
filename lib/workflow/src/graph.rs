//! The editor's node/edge graph, backed by petgraph.
//!
//! Cycles, self-loops and parallel edges are accepted. The one invariant is
//! that every edge references nodes that are present, so removing a node
//! removes every edge touching it.
//!
//! Nodes and edges are listed in insertion order, which is the order the
//! save callback receives them in.

use crate::edge::GraphEdge;
use crate::error::GraphError;
use crate::node::{GraphNode, Position};
use crate::schema::ConfigMap;
use flowdeck_core::{EdgeId, NodeId};
use petgraph::Direction;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// A node removed from the graph together with the edges that went with it.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedNode {
    pub node: GraphNode,
    pub edges: Vec<GraphEdge>,
}

/// The live node/edge graph of one editor session.
#[derive(Debug, Clone, Default)]
pub struct EditorGraph {
    graph: StableDiGraph<GraphNode, GraphEdge>,
    node_indices: HashMap<NodeId, NodeIndex>,
    edge_indices: HashMap<EdgeId, EdgeIndex>,
    node_order: Vec<NodeId>,
    edge_order: Vec<EdgeId>,
}

impl EditorGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to the end of the node list.
    ///
    /// # Errors
    ///
    /// Returns an error if a node with the same id is already present.
    pub fn add_node(&mut self, node: GraphNode) -> Result<NodeId, GraphError> {
        if self.node_indices.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode { node_id: node.id });
        }
        let node_id = node.id.clone();
        let index = self.graph.add_node(node);
        self.node_indices.insert(node_id.clone(), index);
        self.node_order.push(node_id.clone());
        tracing::debug!(node_id = %node_id, "Node added");
        Ok(node_id)
    }

    /// Removes a node and every edge whose source or target is that node.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not present.
    pub fn remove_node(&mut self, node_id: &NodeId) -> Result<RemovedNode, GraphError> {
        let index = *self
            .node_indices
            .get(node_id)
            .ok_or_else(|| GraphError::NodeNotFound {
                node_id: node_id.clone(),
            })?;

        let edge_ids: Vec<EdgeId> = self
            .edges_touching(node_id)
            .into_iter()
            .map(|edge| edge.id.clone())
            .collect();
        let mut edges = Vec::with_capacity(edge_ids.len());
        for edge_id in &edge_ids {
            edges.push(self.remove_edge(edge_id)?);
        }

        self.node_indices.remove(node_id);
        self.node_order.retain(|id| id != node_id);
        let node = self
            .graph
            .remove_node(index)
            .ok_or_else(|| GraphError::NodeNotFound {
                node_id: node_id.clone(),
            })?;

        tracing::debug!(node_id = %node_id, removed_edges = edges.len(), "Node removed");
        Ok(RemovedNode { node, edges })
    }

    /// Returns a node by its id.
    #[must_use]
    pub fn node(&self, node_id: &NodeId) -> Option<&GraphNode> {
        let index = self.node_indices.get(node_id)?;
        self.graph.node_weight(*index)
    }

    /// Returns a mutable node by its id.
    pub fn node_mut(&mut self, node_id: &NodeId) -> Option<&mut GraphNode> {
        let index = self.node_indices.get(node_id)?;
        self.graph.node_weight_mut(*index)
    }

    #[must_use]
    pub fn contains_node(&self, node_id: &NodeId) -> bool {
        self.node_indices.contains_key(node_id)
    }

    /// Replaces a node's committed configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not present.
    pub fn set_config(&mut self, node_id: &NodeId, config: ConfigMap) -> Result<(), GraphError> {
        let node = self.node_mut(node_id).ok_or_else(|| GraphError::NodeNotFound {
            node_id: node_id.clone(),
        })?;
        node.set_config(config);
        Ok(())
    }

    /// Moves a node.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not present.
    pub fn move_node(&mut self, node_id: &NodeId, position: Position) -> Result<(), GraphError> {
        let node = self.node_mut(node_id).ok_or_else(|| GraphError::NodeNotFound {
            node_id: node_id.clone(),
        })?;
        node.position = position;
        Ok(())
    }

    /// Adds an edge.
    ///
    /// Only the endpoints are checked. Cycles, self-loops and repeated
    /// connections between the same pair are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint is missing or the edge id is taken.
    pub fn add_edge(&mut self, edge: GraphEdge) -> Result<EdgeId, GraphError> {
        if self.edge_indices.contains_key(&edge.id) {
            return Err(GraphError::DuplicateEdge { edge_id: edge.id });
        }
        let source = *self
            .node_indices
            .get(&edge.source)
            .ok_or_else(|| GraphError::NodeNotFound {
                node_id: edge.source.clone(),
            })?;
        let target = *self
            .node_indices
            .get(&edge.target)
            .ok_or_else(|| GraphError::NodeNotFound {
                node_id: edge.target.clone(),
            })?;

        let edge_id = edge.id.clone();
        tracing::debug!(
            edge_id = %edge_id,
            source = %edge.source,
            target = %edge.target,
            "Edge added"
        );
        let index = self.graph.add_edge(source, target, edge);
        self.edge_indices.insert(edge_id.clone(), index);
        self.edge_order.push(edge_id.clone());
        Ok(edge_id)
    }

    /// Removes an edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not present.
    pub fn remove_edge(&mut self, edge_id: &EdgeId) -> Result<GraphEdge, GraphError> {
        let not_found = || GraphError::EdgeNotFound {
            edge_id: edge_id.clone(),
        };
        let index = self.edge_indices.remove(edge_id).ok_or_else(not_found)?;
        self.edge_order.retain(|id| id != edge_id);
        self.graph.remove_edge(index).ok_or_else(not_found)
    }

    /// Returns an edge by its id.
    #[must_use]
    pub fn edge(&self, edge_id: &EdgeId) -> Option<&GraphEdge> {
        let index = self.edge_indices.get(edge_id)?;
        self.graph.edge_weight(*index)
    }

    /// Returns every edge whose source or target is the given node, in
    /// insertion order. A self-loop is listed once.
    #[must_use]
    pub fn edges_touching(&self, node_id: &NodeId) -> Vec<&GraphEdge> {
        let Some(&index) = self.node_indices.get(node_id) else {
            return Vec::new();
        };

        let mut touching: Vec<EdgeIndex> = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .chain(self.graph.edges_directed(index, Direction::Incoming))
            .map(|edge| edge.id())
            .collect();
        touching.sort_unstable();
        touching.dedup();

        let mut edges: Vec<&GraphEdge> = touching
            .into_iter()
            .filter_map(|index| self.graph.edge_weight(index))
            .collect();
        edges.sort_by_key(|edge| self.edge_position(&edge.id));
        edges
    }

    /// Iterates nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.node_order.iter().filter_map(|id| self.node(id))
    }

    /// Iterates edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edge_order.iter().filter_map(|id| self.edge(id))
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    fn edge_position(&self, edge_id: &EdgeId) -> usize {
        self.edge_order
            .iter()
            .position(|id| id == edge_id)
            .unwrap_or(usize::MAX)
    }
}
