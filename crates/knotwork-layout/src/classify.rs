//! Component shape classification.
//!
//! Predicates run in a fixed order and the first match wins, so a simple path is a chain even
//! though it is also a tree, and a hub-and-spoke tree is a star. Every predicate answers `false`
//! for empty and single-node components, leaving them to the generic layout.

use crate::components::ConnectedComponent;
use crate::options::LayoutOptions;
use knotwork_graph::Adjacency;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Chain,
    Tree,
    Cycle,
    Bipartite,
    NearlyFull,
    Star,
    Generic,
}

impl Shape {
    pub const ALL: [Shape; 7] = [
        Shape::Chain,
        Shape::Tree,
        Shape::Cycle,
        Shape::Bipartite,
        Shape::NearlyFull,
        Shape::Star,
        Shape::Generic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Chain => "chain",
            Shape::Tree => "tree",
            Shape::Cycle => "cycle",
            Shape::Bipartite => "bipartite",
            Shape::NearlyFull => "nearly_full",
            Shape::Star => "star",
            Shape::Generic => "generic",
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify(component: &ConnectedComponent, opts: &LayoutOptions) -> Shape {
    classify_adjacency(&component.adjacency(), opts.nearly_full_density)
}

pub fn classify_adjacency(adj: &Adjacency, nearly_full_density: f64) -> Shape {
    if is_chain(adj) {
        Shape::Chain
    } else if is_star(adj) {
        Shape::Star
    } else if is_tree(adj) {
        Shape::Tree
    } else if is_cycle(adj) {
        Shape::Cycle
    } else if is_bipartite(adj) {
        Shape::Bipartite
    } else if is_nearly_full(adj, nearly_full_density) {
        Shape::NearlyFull
    } else {
        Shape::Generic
    }
}

fn is_degenerate(adj: &Adjacency) -> bool {
    adj.len() < 2
}

/// A simple path: two endpoints of degree 1, every other node of degree 2.
pub fn is_chain(adj: &Adjacency) -> bool {
    if is_degenerate(adj) || adj.has_self_loops() || adj.edge_count() != adj.len() - 1 {
        return false;
    }
    let mut ends = 0;
    for d in adj.degrees() {
        match d {
            1 => ends += 1,
            2 => {}
            _ => return false,
        }
    }
    ends == 2 && adj.is_connected()
}

pub fn is_tree(adj: &Adjacency) -> bool {
    !is_degenerate(adj)
        && !adj.has_self_loops()
        && adj.edge_count() == adj.len() - 1
        && adj.is_connected()
}

pub fn is_cycle(adj: &Adjacency) -> bool {
    adj.len() >= 3
        && !adj.has_self_loops()
        && adj.edge_count() == adj.len()
        && adj.degrees().all(|d| d == 2)
        && adj.is_connected()
}

pub fn is_bipartite(adj: &Adjacency) -> bool {
    !is_degenerate(adj) && adj.two_color().is_some()
}

/// At least `density` of the complete-graph edge count. Parallel edges count once.
pub fn is_nearly_full(adj: &Adjacency, density: f64) -> bool {
    let n = adj.len();
    if n < 3 || adj.has_self_loops() {
        return false;
    }
    let max_edges = (n * (n - 1) / 2) as f64;
    adj.simple_edge_count() as f64 >= density * max_edges
}

/// One hub adjacent to every other node, which are all leaves.
pub fn is_star(adj: &Adjacency) -> bool {
    let n = adj.len();
    if n < 4 || adj.has_self_loops() || adj.edge_count() != n - 1 {
        return false;
    }
    let mut hubs = 0;
    for d in adj.degrees() {
        if d == n - 1 {
            hubs += 1;
        } else if d != 1 {
            return false;
        }
    }
    hubs == 1
}
