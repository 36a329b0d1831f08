//! Connected-component decomposition.

use indexmap::IndexMap;
use knotwork_graph::{Adjacency, Edge, Node};
use rustc_hash::FxHashMap;

/// A maximal connected slice of the diagram, ignoring edge direction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConnectedComponent {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl ConnectedComponent {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn adjacency(&self) -> Adjacency {
        Adjacency::new(&self.nodes, &self.edges)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut v: usize) -> usize {
        let mut root = v;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[v] != root {
            let next = self.parent[v];
            self.parent[v] = root;
            v = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
    }
}

/// Partitions `nodes` into connected components.
///
/// Components come out in order of their first node in `nodes`; inside a component, nodes and
/// edges keep their input order. Edges with an endpoint outside `nodes` belong to no component and
/// are dropped.
pub fn decompose(nodes: &[Node], edges: &[Edge]) -> Vec<ConnectedComponent> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    for (i, n) in nodes.iter().enumerate() {
        index.entry(n.id.as_str()).or_insert(i);
    }

    let mut sets = DisjointSet::new(nodes.len());
    let mut endpoints: Vec<Option<usize>> = Vec::with_capacity(edges.len());
    for e in edges {
        match (index.get(e.source.as_str()), index.get(e.target.as_str())) {
            (Some(&a), Some(&b)) => {
                sets.union(a, b);
                endpoints.push(Some(a));
            }
            _ => {
                tracing::warn!(edge = %e.id, source = %e.source, target = %e.target, "dropping edge with a dangling endpoint");
                endpoints.push(None);
            }
        }
    }

    let mut by_root: IndexMap<usize, ConnectedComponent> = IndexMap::new();
    for (i, n) in nodes.iter().enumerate() {
        let root = sets.find(i);
        by_root.entry(root).or_default().nodes.push(n.clone());
    }
    for (e, endpoint) in edges.iter().zip(endpoints) {
        let Some(a) = endpoint else {
            continue;
        };
        let root = sets.find(a);
        if let Some(component) = by_root.get_mut(&root) {
            component.edges.push(e.clone());
        }
    }

    by_root.into_values().collect()
}
