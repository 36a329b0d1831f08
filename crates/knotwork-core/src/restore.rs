//! Restore records and the handlers that invert them.
//!
//! A [`Restore`] is the typed form of one log entry: a closed set of variants, each carrying only
//! the prior state its inversion needs. [`RestoreRecord`] is the untyped `{type, properties}` wire
//! shape; [`RestoreObjectFactory`] turns wire records back into handlers and refuses tags it does
//! not know.
//!
//! Inversions read nothing but their own captured properties.

use crate::document::{Document, Indexed};
use crate::{Error, Result};
use knotwork_graph::{Edge, EdgeData, Node, NodeData, Point, Size};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The single inversion operation every handler exposes.
pub trait RestoreObject {
    fn restore(&self, doc: &mut Document);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeAddRestore {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRemoveRestore {
    pub node: Indexed<Node>,
    /// Edges that were incident to the node, by ascending original slot.
    pub edges: Vec<Indexed<Edge>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSizeRestore {
    pub id: String,
    pub size: Option<Size>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeShiftRestore {
    pub id: String,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDataRestore {
    pub id: String,
    pub data: NodeData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeAddRestore {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRemoveRestore {
    pub edge: Indexed<Edge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDataRestore {
    pub id: String,
    pub data: EdgeData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    pub id: String,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodesMassMoveRestore {
    pub positions: Vec<NodePosition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodesMassRemoveRestore {
    pub nodes: Vec<Indexed<Node>>,
    pub edges: Vec<Indexed<Edge>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgesMassRemoveRestore {
    pub edges: Vec<Indexed<Edge>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasteRestore {
    pub node_ids: Vec<String>,
    pub edge_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub node_id: String,
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAddRestore {
    pub group_id: String,
    pub previous: Vec<Membership>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupRestore {
    pub snapshot: Document,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "properties")]
pub enum Restore {
    #[serde(rename = "node:add")]
    NodeAdd(NodeAddRestore),
    #[serde(rename = "node:remove")]
    NodeRemove(NodeRemoveRestore),
    #[serde(rename = "node:change_size")]
    NodeSize(NodeSizeRestore),
    #[serde(rename = "node:change_shift")]
    NodeShift(NodeShiftRestore),
    #[serde(rename = "node:change_data")]
    NodeData(NodeDataRestore),
    #[serde(rename = "edge:add")]
    EdgeAdd(EdgeAddRestore),
    #[serde(rename = "edge:remove")]
    EdgeRemove(EdgeRemoveRestore),
    #[serde(rename = "edge:change_data")]
    EdgeData(EdgeDataRestore),
    #[serde(rename = "nodes:mass_move")]
    NodesMassMove(NodesMassMoveRestore),
    #[serde(rename = "nodes:mass_remove")]
    NodesMassRemove(NodesMassRemoveRestore),
    #[serde(rename = "edges:mass_remove")]
    EdgesMassRemove(EdgesMassRemoveRestore),
    #[serde(rename = "paste")]
    Paste(PasteRestore),
    #[serde(rename = "group:add")]
    GroupAdd(GroupAddRestore),
    #[serde(rename = "backup")]
    Backup(BackupRestore),
}

impl Restore {
    pub fn tag(&self) -> &'static str {
        match self {
            Restore::NodeAdd(_) => "node:add",
            Restore::NodeRemove(_) => "node:remove",
            Restore::NodeSize(_) => "node:change_size",
            Restore::NodeShift(_) => "node:change_shift",
            Restore::NodeData(_) => "node:change_data",
            Restore::EdgeAdd(_) => "edge:add",
            Restore::EdgeRemove(_) => "edge:remove",
            Restore::EdgeData(_) => "edge:change_data",
            Restore::NodesMassMove(_) => "nodes:mass_move",
            Restore::NodesMassRemove(_) => "nodes:mass_remove",
            Restore::EdgesMassRemove(_) => "edges:mass_remove",
            Restore::Paste(_) => "paste",
            Restore::GroupAdd(_) => "group:add",
            Restore::Backup(_) => "backup",
        }
    }

    pub fn as_object(&self) -> &dyn RestoreObject {
        match self {
            Restore::NodeAdd(r) => r,
            Restore::NodeRemove(r) => r,
            Restore::NodeSize(r) => r,
            Restore::NodeShift(r) => r,
            Restore::NodeData(r) => r,
            Restore::EdgeAdd(r) => r,
            Restore::EdgeRemove(r) => r,
            Restore::EdgeData(r) => r,
            Restore::NodesMassMove(r) => r,
            Restore::NodesMassRemove(r) => r,
            Restore::EdgesMassRemove(r) => r,
            Restore::Paste(r) => r,
            Restore::GroupAdd(r) => r,
            Restore::Backup(r) => r,
        }
    }

    pub fn into_object(self) -> Box<dyn RestoreObject> {
        match self {
            Restore::NodeAdd(r) => Box::new(r),
            Restore::NodeRemove(r) => Box::new(r),
            Restore::NodeSize(r) => Box::new(r),
            Restore::NodeShift(r) => Box::new(r),
            Restore::NodeData(r) => Box::new(r),
            Restore::EdgeAdd(r) => Box::new(r),
            Restore::EdgeRemove(r) => Box::new(r),
            Restore::EdgeData(r) => Box::new(r),
            Restore::NodesMassMove(r) => Box::new(r),
            Restore::NodesMassRemove(r) => Box::new(r),
            Restore::EdgesMassRemove(r) => Box::new(r),
            Restore::Paste(r) => Box::new(r),
            Restore::GroupAdd(r) => Box::new(r),
            Restore::Backup(r) => Box::new(r),
        }
    }

    pub fn to_record(&self) -> Result<RestoreRecord> {
        let value = serde_json::to_value(self).map_err(|e| Error::MalformedRestore {
            restore_type: self.tag().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_value(value).map_err(|e| Error::MalformedRestore {
            restore_type: self.tag().to_string(),
            message: e.to_string(),
        })
    }
}

/// Untyped `{type, properties}` form of a restore entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestoreRecord {
    #[serde(rename = "type")]
    pub restore_type: String,
    #[serde(default)]
    pub properties: Value,
}

impl RestoreRecord {
    pub fn new(restore_type: impl Into<String>, properties: Value) -> Self {
        Self {
            restore_type: restore_type.into(),
            properties,
        }
    }
}

pub type RestoreConstructor = fn(properties: Value) -> serde_json::Result<Restore>;

/// Type tag → constructor table for wire records.
#[derive(Debug, Clone)]
pub struct RestoreObjectFactory {
    constructors: FxHashMap<&'static str, RestoreConstructor>,
}

impl Default for RestoreObjectFactory {
    fn default() -> Self {
        let mut reg = Self::empty();

        reg.insert("node:add", |v| serde_json::from_value(v).map(Restore::NodeAdd));
        reg.insert("node:remove", |v| {
            serde_json::from_value(v).map(Restore::NodeRemove)
        });
        reg.insert("node:change_size", |v| {
            serde_json::from_value(v).map(Restore::NodeSize)
        });
        reg.insert("node:change_shift", |v| {
            serde_json::from_value(v).map(Restore::NodeShift)
        });
        reg.insert("node:change_data", |v| {
            serde_json::from_value(v).map(Restore::NodeData)
        });

        reg.insert("edge:add", |v| serde_json::from_value(v).map(Restore::EdgeAdd));
        reg.insert("edge:remove", |v| {
            serde_json::from_value(v).map(Restore::EdgeRemove)
        });
        reg.insert("edge:change_data", |v| {
            serde_json::from_value(v).map(Restore::EdgeData)
        });

        reg.insert("nodes:mass_move", |v| {
            serde_json::from_value(v).map(Restore::NodesMassMove)
        });
        reg.insert("nodes:mass_remove", |v| {
            serde_json::from_value(v).map(Restore::NodesMassRemove)
        });
        reg.insert("edges:mass_remove", |v| {
            serde_json::from_value(v).map(Restore::EdgesMassRemove)
        });

        reg.insert("paste", |v| serde_json::from_value(v).map(Restore::Paste));
        reg.insert("group:add", |v| serde_json::from_value(v).map(Restore::GroupAdd));
        reg.insert("backup", |v| serde_json::from_value(v).map(Restore::Backup));

        reg
    }
}

impl RestoreObjectFactory {
    pub fn empty() -> Self {
        Self {
            constructors: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, restore_type: &'static str, constructor: RestoreConstructor) {
        self.constructors.insert(restore_type, constructor);
    }

    pub fn contains(&self, restore_type: &str) -> bool {
        self.constructors.contains_key(restore_type)
    }

    /// Decodes a wire record into its typed form.
    pub fn decode(&self, record: &RestoreRecord) -> Result<Restore> {
        let Some(constructor) = self.constructors.get(record.restore_type.as_str()) else {
            return Err(Error::UnknownRestoreType {
                restore_type: record.restore_type.clone(),
            });
        };
        constructor(record.properties.clone()).map_err(|e| Error::MalformedRestore {
            restore_type: record.restore_type.clone(),
            message: e.to_string(),
        })
    }

    pub fn create(&self, record: &RestoreRecord) -> Result<Box<dyn RestoreObject>> {
        self.decode(record).map(Restore::into_object)
    }
}

impl RestoreObject for NodeAddRestore {
    fn restore(&self, doc: &mut Document) {
        doc.remove_node(&self.id);
    }
}

impl RestoreObject for NodeRemoveRestore {
    fn restore(&self, doc: &mut Document) {
        doc.insert_nodes([self.node.clone()]);
        doc.insert_edges(self.edges.iter().cloned());
    }
}

impl RestoreObject for NodeSizeRestore {
    fn restore(&self, doc: &mut Document) {
        if let Some(node) = doc.node_mut(&self.id) {
            node.data.size = self.size;
        }
    }
}

impl RestoreObject for NodeShiftRestore {
    fn restore(&self, doc: &mut Document) {
        if let Some(node) = doc.node_mut(&self.id) {
            node.position = self.position;
        }
    }
}

impl RestoreObject for NodeDataRestore {
    fn restore(&self, doc: &mut Document) {
        if let Some(node) = doc.node_mut(&self.id) {
            node.data = self.data.clone();
        }
    }
}

impl RestoreObject for EdgeAddRestore {
    fn restore(&self, doc: &mut Document) {
        doc.remove_edge(&self.id);
    }
}

impl RestoreObject for EdgeRemoveRestore {
    fn restore(&self, doc: &mut Document) {
        doc.insert_edges([self.edge.clone()]);
    }
}

impl RestoreObject for EdgeDataRestore {
    fn restore(&self, doc: &mut Document) {
        if let Some(edge) = doc.edge_mut(&self.id) {
            edge.data = self.data.clone();
        }
    }
}

impl RestoreObject for NodesMassMoveRestore {
    fn restore(&self, doc: &mut Document) {
        for p in &self.positions {
            if let Some(node) = doc.node_mut(&p.id) {
                node.position = p.position;
            }
        }
    }
}

impl RestoreObject for NodesMassRemoveRestore {
    fn restore(&self, doc: &mut Document) {
        doc.insert_nodes(self.nodes.iter().cloned());
        doc.insert_edges(self.edges.iter().cloned());
    }
}

impl RestoreObject for EdgesMassRemoveRestore {
    fn restore(&self, doc: &mut Document) {
        doc.insert_edges(self.edges.iter().cloned());
    }
}

impl RestoreObject for PasteRestore {
    fn restore(&self, doc: &mut Document) {
        doc.drain_edges(|e| self.edge_ids.contains(&e.id));
        doc.drain_nodes(|n| self.node_ids.contains(&n.id));
    }
}

impl RestoreObject for GroupAddRestore {
    fn restore(&self, doc: &mut Document) {
        doc.remove_group(&self.group_id);
        for m in &self.previous {
            if let Some(node) = doc.node_mut(&m.node_id) {
                node.group = m.group.clone();
            }
        }
    }
}

impl RestoreObject for BackupRestore {
    fn restore(&self, doc: &mut Document) {
        doc.replace(self.snapshot.clone());
    }
}
