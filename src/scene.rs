//! Stage of visual nodes
//!
//! The renderer-facing half of the simulation: a flat scene graph of
//! positioned, rotated nodes. The simulation only sets transforms and adds
//! or removes handles; drawing them is the host's business.

use serde::{Deserialize, Serialize};

/// Handle to a node on a stage. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

/// What a node depicts. Fixed at creation; the simulation moves nodes but
/// never repaints them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Ship,
    Enemy,
    Star { radius: f32, alpha: f32 },
    Wall { width: f32, height: f32 },
}

/// A positioned, rotated visual node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
        }
    }

    pub fn at(kind: NodeKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            x,
            y,
            rotation: 0.0,
        }
    }
}

/// Flat scene graph with stable handles, kept in draw (insertion) order
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Stage {
    next_id: u64,
    nodes: Vec<(NodeId, Node)>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push((id, node));
        id
    }

    /// Detach a node. Stale handles are a silent no-op.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let index = self.nodes.iter().position(|(node_id, _)| *node_id == id)?;
        Some(self.nodes.remove(index).1)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|(node_id, _)| *node_id == id)
            .map(|(_, node)| node)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .iter_mut()
            .find(|(node_id, _)| *node_id == id)
            .map(|(_, node)| node)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|(node_id, _)| *node_id == id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in draw order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }
}
