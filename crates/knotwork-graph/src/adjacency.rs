//! Undirected adjacency over a node/edge slice.
//!
//! Node indices follow the order of the `nodes` slice the view was built from, so callers can map
//! results straight back onto their own arrays.

use crate::model::{Edge, Node};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    index: FxHashMap<String, usize>,
    neighbors: Vec<Vec<usize>>,
    edge_count: usize,
    self_loops: usize,
}

impl Adjacency {
    /// Builds the view. Edges whose endpoints are not in `nodes` are ignored.
    pub fn new(nodes: &[Node], edges: &[Edge]) -> Self {
        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        index.reserve(nodes.len());
        for (i, n) in nodes.iter().enumerate() {
            index.entry(n.id.clone()).or_insert(i);
        }

        let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        let mut edge_count = 0;
        let mut self_loops = 0;
        for e in edges {
            let (Some(&a), Some(&b)) = (index.get(&e.source), index.get(&e.target)) else {
                continue;
            };
            edge_count += 1;
            if a == b {
                self_loops += 1;
                // A loop contributes two to the degree of its node.
                neighbors[a].push(a);
                neighbors[a].push(a);
                continue;
            }
            neighbors[a].push(b);
            neighbors[b].push(a);
        }

        Self {
            index,
            neighbors,
            edge_count,
            self_loops,
        }
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of distinct unordered node pairs joined by at least one edge (loops excluded).
    pub fn simple_edge_count(&self) -> usize {
        let mut pairs: FxHashSet<(usize, usize)> = FxHashSet::default();
        for (v, ns) in self.neighbors.iter().enumerate() {
            pairs.extend(ns.iter().filter(|&&w| w > v).map(|&w| (v, w)));
        }
        pairs.len()
    }

    pub fn has_self_loops(&self) -> bool {
        self.self_loops > 0
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn degree(&self, v: usize) -> usize {
        self.neighbors[v].len()
    }

    pub fn degrees(&self) -> impl Iterator<Item = usize> + '_ {
        self.neighbors.iter().map(Vec::len)
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.neighbors[v]
    }

    /// Breadth-first visit order starting at `start`, restricted to its component.
    pub fn bfs_order(&self, start: usize) -> Vec<usize> {
        let mut seen = vec![false; self.len()];
        let mut out = Vec::new();
        let mut q: VecDeque<usize> = VecDeque::new();
        seen[start] = true;
        q.push_back(start);
        while let Some(v) = q.pop_front() {
            out.push(v);
            for &w in &self.neighbors[v] {
                if !seen[w] {
                    seen[w] = true;
                    q.push_back(w);
                }
            }
        }
        out
    }

    pub fn is_connected(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.bfs_order(0).len() == self.len()
    }

    /// Two-colors every node by BFS, seeding each uncolored node (in index order) with `false`.
    ///
    /// Returns `None` when an odd cycle (or a self-loop) makes the graph non-bipartite.
    pub fn two_color(&self) -> Option<Vec<bool>> {
        let mut color: Vec<Option<bool>> = vec![None; self.len()];
        let mut q: VecDeque<usize> = VecDeque::new();
        for start in 0..self.len() {
            if color[start].is_some() {
                continue;
            }
            color[start] = Some(false);
            q.push_back(start);
            while let Some(v) = q.pop_front() {
                let cv = color[v]?;
                for &w in &self.neighbors[v] {
                    match color[w] {
                        None => {
                            color[w] = Some(!cv);
                            q.push_back(w);
                        }
                        Some(cw) if cw == cv => return None,
                        Some(_) => {}
                    }
                }
            }
        }
        color.into_iter().collect()
    }
}
