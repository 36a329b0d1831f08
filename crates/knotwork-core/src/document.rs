//! The owned node/edge/group aggregate.
//!
//! Reads are public. Writes are crate-private: only the [`Store`](crate::Store) mutation API and
//! the restore handlers change a document, which keeps the history log the single author of every
//! state change.

use knotwork_graph::{Edge, Node, NodeGroup};
use serde::{Deserialize, Serialize};

/// An element together with the array slot it occupied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indexed<T> {
    pub index: usize,
    pub item: T,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    groups: Vec<NodeGroup>,
}

impl Document {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes,
            edges,
            groups: Vec::new(),
        }
    }

    pub fn with_groups(mut self, groups: Vec<NodeGroup>) -> Self {
        self.groups = groups;
        self
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn groups(&self) -> &[NodeGroup] {
        &self.groups
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&NodeGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index(id).is_some()
    }

    pub fn has_edge(&self, id: &str) -> bool {
        self.edge_index(id).is_some()
    }

    /// Nodes whose membership points at group `id`, in document order.
    pub fn group_members(&self, id: &str) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|n| n.group.as_deref() == Some(id))
            .collect()
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn edge_index(&self, id: &str) -> Option<usize> {
        self.edges.iter().position(|e| e.id == id)
    }

    pub(crate) fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub(crate) fn edge_mut(&mut self, id: &str) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|e| e.id == id)
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    pub(crate) fn push_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub(crate) fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub(crate) fn push_group(&mut self, group: NodeGroup) {
        self.groups.push(group);
    }

    pub(crate) fn remove_node(&mut self, id: &str) -> Option<Indexed<Node>> {
        let index = self.node_index(id)?;
        Some(Indexed {
            index,
            item: self.nodes.remove(index),
        })
    }

    pub(crate) fn remove_edge(&mut self, id: &str) -> Option<Indexed<Edge>> {
        let index = self.edge_index(id)?;
        Some(Indexed {
            index,
            item: self.edges.remove(index),
        })
    }

    pub(crate) fn remove_group(&mut self, id: &str) -> Option<NodeGroup> {
        let index = self.groups.iter().position(|g| g.id == id)?;
        Some(self.groups.remove(index))
    }

    /// Removes every node matching `pred`. The result lists them by their original slots,
    /// ascending, which is the order [`Document::insert_nodes`] expects.
    pub(crate) fn drain_nodes(&mut self, pred: impl Fn(&Node) -> bool) -> Vec<Indexed<Node>> {
        drain_indexed(&mut self.nodes, pred)
    }

    pub(crate) fn drain_edges(&mut self, pred: impl Fn(&Edge) -> bool) -> Vec<Indexed<Edge>> {
        drain_indexed(&mut self.edges, pred)
    }

    /// Puts previously removed nodes back. `items` must be sorted by ascending index.
    pub(crate) fn insert_nodes(&mut self, items: impl IntoIterator<Item = Indexed<Node>>) {
        insert_indexed(&mut self.nodes, items);
    }

    pub(crate) fn insert_edges(&mut self, items: impl IntoIterator<Item = Indexed<Edge>>) {
        insert_indexed(&mut self.edges, items);
    }

    pub(crate) fn set_layout(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) {
        self.nodes = nodes;
        self.edges = edges;
    }

    pub(crate) fn replace(&mut self, snapshot: Document) {
        *self = snapshot;
    }
}

fn drain_indexed<T>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> Vec<Indexed<T>> {
    let mut kept = Vec::with_capacity(items.len());
    let mut removed = Vec::new();
    for (index, item) in std::mem::take(items).into_iter().enumerate() {
        if pred(&item) {
            removed.push(Indexed { index, item });
        } else {
            kept.push(item);
        }
    }
    *items = kept;
    removed
}

fn insert_indexed<T>(items: &mut Vec<T>, restored: impl IntoIterator<Item = Indexed<T>>) {
    for Indexed { index, item } in restored {
        let at = index.min(items.len());
        items.insert(at, item);
    }
}
