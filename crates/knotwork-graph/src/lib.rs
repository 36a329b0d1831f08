#![forbid(unsafe_code)]

//! Node/edge diagram model shared by the knotwork crates.
//!
//! The types here mirror the JSON shape a canvas front-end reads (`id`, `position`, `data`,
//! `sourceHandle`/`targetHandle`), plus an undirected [`Adjacency`] view used by the layout
//! passes for degree counts, traversal and two-coloring.

pub mod adjacency;
pub mod model;

pub use adjacency::Adjacency;
pub use model::{Edge, EdgeData, Node, NodeData, NodeGroup, Point, Side, Size};
