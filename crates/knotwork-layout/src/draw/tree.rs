//! Layered tree layout.
//!
//! The root sits on top; each level is stacked below the previous one and every parent is centered
//! over the block occupied by its subtrees.

use super::DrawerResult;
use crate::classify::Shape;
use crate::components::ConnectedComponent;
use crate::options::LayoutOptions;
use knotwork_graph::{Adjacency, Node, Point};

pub fn draw(component: ConnectedComponent, opts: &LayoutOptions) -> DrawerResult {
    let ConnectedComponent { mut nodes, edges } = component;
    if nodes.is_empty() {
        return DrawerResult::new(Shape::Tree, nodes, edges, 0.0, 0.0);
    }

    let adj = Adjacency::new(&nodes, &edges);
    let root = pick_root(&nodes, &adj, opts);
    let size = opts.default_node_size;

    // BFS spanning tree: parent links, children in edge order, depth per node.
    let order = adj.bfs_order(root);
    let mut depth = vec![0usize; nodes.len()];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut placed = vec![false; nodes.len()];
    placed[root] = true;
    for &v in &order {
        for &w in adj.neighbors(v) {
            if !placed[w] {
                placed[w] = true;
                depth[w] = depth[v] + 1;
                children[v].push(w);
            }
        }
    }

    let mut subtree_width = vec![0.0f64; nodes.len()];
    for &v in order.iter().rev() {
        let own = nodes[v].width(size);
        let kids = &children[v];
        if kids.is_empty() {
            subtree_width[v] = own;
            continue;
        }
        let block: f64 = kids.iter().map(|&c| subtree_width[c]).sum::<f64>()
            + opts.node_spacing_x * (kids.len() - 1) as f64;
        subtree_width[v] = own.max(block);
    }

    let levels = order.iter().map(|&v| depth[v]).max().unwrap_or(0) + 1;
    let mut level_height = vec![0.0f64; levels];
    for &v in &order {
        level_height[depth[v]] = level_height[depth[v]].max(nodes[v].height(size));
    }
    let mut level_y = vec![0.0f64; levels];
    for d in 1..levels {
        level_y[d] = level_y[d - 1] + level_height[d - 1] + opts.node_spacing_y;
    }

    let mut left = vec![0.0f64; nodes.len()];
    for &v in &order {
        let own = nodes[v].width(size);
        nodes[v].position = Point::new(
            left[v] + (subtree_width[v] - own) / 2.0,
            level_y[depth[v]],
        );

        let kids = &children[v];
        if kids.is_empty() {
            continue;
        }
        let block: f64 = kids.iter().map(|&c| subtree_width[c]).sum::<f64>()
            + opts.node_spacing_x * (kids.len() - 1) as f64;
        let mut x = left[v] + (subtree_width[v] - block) / 2.0;
        for &c in kids {
            left[c] = x;
            x += subtree_width[c] + opts.node_spacing_x;
        }
    }

    let height = level_y[levels - 1] + level_height[levels - 1];
    DrawerResult::new(Shape::Tree, nodes, edges, subtree_width[root], height)
}

/// First configured root present in the component, otherwise the lowest-degree node (ties go to
/// the earliest node).
fn pick_root(nodes: &[Node], adj: &Adjacency, opts: &LayoutOptions) -> usize {
    if let Some(i) = opts.tree_roots.iter().find_map(|id| adj.index_of(id)) {
        return i;
    }
    (0..nodes.len())
        .min_by_key(|&v| adj.degree(v))
        .unwrap_or(0)
}
