//! The mutation surface of a diagram.
//!
//! Every structural change goes through a [`Store`] method, and every method that changes the
//! document appends exactly one [`Restore`] to the history. Lookup misses and no-op requests leave
//! both the document and the log untouched. Selection is view state and is never logged.

use crate::document::Document;
use crate::history::HistoryManager;
use crate::restore::{
    BackupRestore, EdgeAddRestore, EdgeDataRestore, EdgeRemoveRestore, EdgesMassRemoveRestore,
    GroupAddRestore, Membership, NodeAddRestore, NodeDataRestore, NodePosition, NodeRemoveRestore,
    NodeShiftRestore, NodeSizeRestore, NodesMassMoveRestore, NodesMassRemoveRestore, PasteRestore,
    Restore,
};
use crate::settings::Settings;
use crate::{Error, Result};
use knotwork_graph::{Edge, EdgeData, Node, NodeData, NodeGroup, Point, Size};
use knotwork_layout::DrawerRegistry;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::{FxHashMap, FxHashSet};

/// Partial edge data update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeUpdate {
    pub color: Option<String>,
    pub weight: Option<f64>,
}

/// Detached copy of a selection, ready to be pasted any number of times.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clipboard {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Clipboard {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

pub struct Store {
    document: Document,
    history: HistoryManager,
    settings: Settings,
    registry: DrawerRegistry,
    rng: StdRng,
    group_color_cursor: usize,
}

impl Store {
    pub fn new(settings: Settings) -> Self {
        Self::with_document(settings, Document::default())
    }

    pub fn with_document(settings: Settings, document: Document) -> Self {
        let rng = match settings.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            document,
            history: HistoryManager::new(),
            settings,
            registry: DrawerRegistry::default(),
            rng,
            group_color_cursor: 0,
        }
    }

    /// Replaces the drawers used by [`Store::normalize`].
    pub fn with_drawer_registry(mut self, registry: DrawerRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn nodes(&self) -> &[Node] {
        self.document.nodes()
    }

    pub fn edges(&self) -> &[Edge] {
        self.document.edges()
    }

    pub fn groups(&self) -> &[NodeGroup] {
        self.document.groups()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.document.node(id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.document.edge(id)
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn add_node(&mut self, position: Option<Point>) -> String {
        let position = position.unwrap_or_else(|| self.random_point());
        let id = self.next_node_id();
        let label = self.next_label();
        let node = Node::new(id.clone(), position).with_data(NodeData::labeled(label));
        self.document.push_node(node);
        self.history
            .push(Restore::NodeAdd(NodeAddRestore { id: id.clone() }));
        id
    }

    /// Removes a node together with every edge that touches it.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let Some(node) = self.document.remove_node(id) else {
            return false;
        };
        let edges = self.document.drain_edges(|e| e.touches(id));
        self.history
            .push(Restore::NodeRemove(NodeRemoveRestore { node, edges }));
        true
    }

    /// Connects two existing nodes. Returns `Ok(None)` when an endpoint does not exist.
    pub fn add_edge(&mut self, source: &str, target: &str) -> Result<Option<String>> {
        if !self.document.has_node(source) || !self.document.has_node(target) {
            return Ok(None);
        }
        if source == target {
            return Err(Error::SelfLoop {
                node_id: source.to_string(),
            });
        }
        let id = self.next_edge_id(source, target);
        let mut edge = Edge::new(id.clone(), source, target);
        edge.data = self.default_edge_data();
        self.document.push_edge(edge);
        self.history
            .push(Restore::EdgeAdd(EdgeAddRestore { id: id.clone() }));
        Ok(Some(id))
    }

    pub fn remove_edge(&mut self, id: &str) -> bool {
        let Some(edge) = self.document.remove_edge(id) else {
            return false;
        };
        self.history
            .push(Restore::EdgeRemove(EdgeRemoveRestore { edge }));
        true
    }

    /// Applies `update` to an edge's data. Returns `false` when the edge is missing or the update
    /// would not change anything.
    pub fn update_edge(&mut self, id: &str, update: EdgeUpdate) -> bool {
        let Some(edge) = self.document.edge_mut(id) else {
            return false;
        };
        let previous = edge.data.clone();
        if let Some(color) = update.color {
            edge.data.color = Some(color);
        }
        if let Some(weight) = update.weight {
            edge.data.weight = Some(weight);
        }
        if edge.data == previous {
            return false;
        }
        self.history.push(Restore::EdgeData(EdgeDataRestore {
            id: id.to_string(),
            data: previous,
        }));
        true
    }

    pub fn move_node(&mut self, id: &str, position: Point) -> bool {
        let Some(node) = self.document.node_mut(id) else {
            return false;
        };
        let previous = std::mem::replace(&mut node.position, position);
        self.history.push(Restore::NodeShift(NodeShiftRestore {
            id: id.to_string(),
            position: previous,
        }));
        true
    }

    /// Moves several nodes as one undoable step. Unknown ids are skipped.
    pub fn move_nodes(&mut self, moves: &[(String, Point)]) -> bool {
        let mut positions = Vec::with_capacity(moves.len());
        for (id, position) in moves {
            if let Some(node) = self.document.node_mut(id) {
                let previous = std::mem::replace(&mut node.position, *position);
                positions.push(NodePosition {
                    id: id.clone(),
                    position: previous,
                });
            }
        }
        if positions.is_empty() {
            return false;
        }
        // Undo walks forward, so a node moved twice must end on its first captured position.
        positions.reverse();
        self.history
            .push(Restore::NodesMassMove(NodesMassMoveRestore { positions }));
        true
    }

    pub fn grow_node(&mut self, id: &str) -> bool {
        let step = self.settings.resize_step;
        self.resize_node(id, step)
    }

    /// Shrinks by one step without going below the minimum size. Returns `false` when the node
    /// is already at the minimum.
    pub fn shrink_node(&mut self, id: &str) -> bool {
        let step = self.settings.resize_step;
        self.resize_node(id, -step)
    }

    fn resize_node(&mut self, id: &str, delta: f64) -> bool {
        let default_side = self.settings.layout.default_node_size;
        let floor = self.settings.min_node_size;
        let Some(node) = self.document.node_mut(id) else {
            return false;
        };
        let current = node.extent(default_side);
        let next = Size::new(
            (current.width + delta).max(floor.min(current.width)),
            (current.height + delta).max(floor.min(current.height)),
        );
        if next == current {
            return false;
        }
        let previous = node.data.size.replace(next);
        self.history.push(Restore::NodeSize(NodeSizeRestore {
            id: id.to_string(),
            size: previous,
        }));
        true
    }

    pub fn set_node_data(&mut self, id: &str, data: NodeData) -> bool {
        let Some(node) = self.document.node_mut(id) else {
            return false;
        };
        let previous = std::mem::replace(&mut node.data, data);
        self.history.push(Restore::NodeData(NodeDataRestore {
            id: id.to_string(),
            data: previous,
        }));
        true
    }

    /// Deletes several nodes and their incident edges as one undoable step.
    pub fn remove_nodes(&mut self, ids: &[String]) -> bool {
        let doomed: FxHashSet<&str> = ids.iter().map(String::as_str).collect();
        let nodes = self.document.drain_nodes(|n| doomed.contains(n.id.as_str()));
        if nodes.is_empty() {
            return false;
        }
        let edges = self.document.drain_edges(|e| {
            doomed.contains(e.source.as_str()) || doomed.contains(e.target.as_str())
        });
        self.history
            .push(Restore::NodesMassRemove(NodesMassRemoveRestore { nodes, edges }));
        true
    }

    pub fn remove_edges(&mut self, ids: &[String]) -> bool {
        let doomed: FxHashSet<&str> = ids.iter().map(String::as_str).collect();
        let edges = self.document.drain_edges(|e| doomed.contains(e.id.as_str()));
        if edges.is_empty() {
            return false;
        }
        self.history
            .push(Restore::EdgesMassRemove(EdgesMassRemoveRestore { edges }));
        true
    }

    pub fn set_selected(&mut self, id: &str, selected: bool) -> bool {
        match self.document.node_mut(id) {
            Some(node) => {
                node.selected = selected;
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        for node in self.document.nodes_mut() {
            node.selected = false;
        }
    }

    pub fn selected_ids(&self) -> Vec<&str> {
        self.document
            .nodes()
            .iter()
            .filter(|n| n.selected)
            .map(|n| n.id.as_str())
            .collect()
    }

    /// Copies the selected nodes and the edges running between them.
    pub fn copy_selected(&self) -> Clipboard {
        let nodes: Vec<Node> = self
            .document
            .nodes()
            .iter()
            .filter(|n| n.selected)
            .cloned()
            .collect();
        let ids: FxHashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        let edges = self
            .document
            .edges()
            .iter()
            .filter(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
            .cloned()
            .collect();
        Clipboard { nodes, edges }
    }

    /// Inserts a copy of `clipboard` under fresh ids, shifted by the paste offset. Returns the ids
    /// of the new nodes.
    pub fn paste(&mut self, clipboard: &Clipboard) -> Vec<String> {
        if clipboard.is_empty() {
            return Vec::new();
        }
        let offset = self.settings.paste_offset;
        let mut remap: FxHashMap<&str, String> = FxHashMap::default();
        let mut node_ids = Vec::with_capacity(clipboard.nodes.len());
        for source in &clipboard.nodes {
            let id = self.next_node_id();
            let mut node = source.clone();
            node.id = id.clone();
            node.position = source.position.translate(offset, offset);
            node.selected = false;
            node.group = None;
            self.document.push_node(node);
            remap.insert(source.id.as_str(), id.clone());
            node_ids.push(id);
        }

        let mut edge_ids = Vec::with_capacity(clipboard.edges.len());
        for source in &clipboard.edges {
            let (Some(from), Some(to)) = (
                remap.get(source.source.as_str()),
                remap.get(source.target.as_str()),
            ) else {
                continue;
            };
            let id = self.next_edge_id(from, to);
            let mut edge = source.clone();
            edge.id = id.clone();
            edge.source = from.clone();
            edge.target = to.clone();
            self.document.push_edge(edge);
            edge_ids.push(id);
        }

        self.history.push(Restore::Paste(PasteRestore {
            node_ids: node_ids.clone(),
            edge_ids,
        }));
        node_ids
    }

    /// Puts every selected node into a new colored group. Needs at least two selected nodes.
    pub fn group_selected(&mut self) -> Option<String> {
        let members: Vec<String> = self
            .document
            .nodes()
            .iter()
            .filter(|n| n.selected)
            .map(|n| n.id.clone())
            .collect();
        if members.len() < 2 {
            return None;
        }

        let group_id = self.next_group_id();
        let color = self.next_group_color();
        let mut previous = Vec::with_capacity(members.len());
        for node in self.document.nodes_mut().filter(|n| n.selected) {
            previous.push(Membership {
                node_id: node.id.clone(),
                group: node.group.replace(group_id.clone()),
            });
        }
        self.document.push_group(NodeGroup {
            id: group_id.clone(),
            color,
            label: None,
        });
        self.history.push(Restore::GroupAdd(GroupAddRestore {
            group_id: group_id.clone(),
            previous,
        }));
        Some(group_id)
    }

    /// Re-lays the whole diagram. Undo brings back the exact pre-layout document.
    pub fn normalize(&mut self) -> Result<()> {
        let packed = knotwork_layout::normalize_with(
            &self.registry,
            self.document.nodes(),
            self.document.edges(),
            &self.settings.layout,
        )?;
        tracing::debug!(
            shapes = ?packed.shapes,
            width = packed.width,
            height = packed.height,
            "store: normalized"
        );
        self.backup();
        self.document.set_layout(packed.nodes, packed.edges);
        Ok(())
    }

    /// Records a full snapshot of the current document as a recovery point.
    pub fn backup(&mut self) {
        self.history.push(Restore::Backup(BackupRestore {
            snapshot: self.document.clone(),
        }));
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.document)
    }

    fn random_point(&mut self) -> Point {
        let canvas = self.settings.canvas;
        let x = if canvas.width > 0.0 {
            self.rng.random_range(0.0..canvas.width)
        } else {
            0.0
        };
        let y = if canvas.height > 0.0 {
            self.rng.random_range(0.0..canvas.height)
        } else {
            0.0
        };
        Point::new(x, y)
    }

    /// Smallest positive integer not yet used as a numeric node label.
    fn next_label(&self) -> String {
        let used: FxHashSet<u64> = self
            .document
            .nodes()
            .iter()
            .filter_map(|n| n.data.label.as_deref()?.parse().ok())
            .collect();
        let mut label = 1u64;
        while used.contains(&label) {
            label += 1;
        }
        label.to_string()
    }

    fn next_node_id(&self) -> String {
        let base = chrono::Utc::now().timestamp_millis().to_string();
        unique_id(base, |id| self.document.has_node(id))
    }

    fn next_edge_id(&self, source: &str, target: &str) -> String {
        unique_id(format!("e{source}-{target}"), |id| self.document.has_edge(id))
    }

    fn next_group_id(&self) -> String {
        let base = format!("group-{}", chrono::Utc::now().timestamp_millis());
        unique_id(base, |id| self.document.group(id).is_some())
    }

    fn next_group_color(&mut self) -> String {
        let palette = &self.settings.group_colors;
        if palette.is_empty() {
            return self.settings.default_edge_color.clone();
        }
        let color = palette[self.group_color_cursor % palette.len()].clone();
        self.group_color_cursor += 1;
        color
    }

    fn default_edge_data(&self) -> EdgeData {
        EdgeData {
            color: Some(self.settings.default_edge_color.clone()),
            weight: Some(self.settings.default_edge_weight),
        }
    }
}

fn unique_id(base: String, taken: impl Fn(&str) -> bool) -> String {
    if !taken(&base) {
        return base;
    }
    let mut n = 1usize;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_id_appends_the_first_free_suffix() {
        let taken = ["x", "x-1", "x-2"];
        assert_eq!(unique_id("x".to_string(), |id| taken.contains(&id)), "x-3");
        assert_eq!(unique_id("y".to_string(), |id| taken.contains(&id)), "y");
    }

    #[test]
    fn labels_fill_the_lowest_gap() {
        let doc = Document::new(
            vec![
                Node::new("a", Point::default()).with_data(NodeData::labeled("1")),
                Node::new("b", Point::default()).with_data(NodeData::labeled("3")),
                Node::new("c", Point::default()).with_data(NodeData::labeled("hub")),
            ],
            Vec::new(),
        );
        let store = Store::with_document(Settings::default(), doc);
        assert_eq!(store.next_label(), "2");
    }
}
