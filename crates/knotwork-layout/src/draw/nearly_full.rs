//! Circular layout for dense components.
//!
//! Nodes keep their input order around the circle. Afterwards every edge is re-oriented to run
//! forward along the shorter arc, so its direction follows the picture instead of insertion order.

use super::{CircleParams, DrawerResult, index_by_id};
use crate::classify::Shape;
use crate::components::ConnectedComponent;
use crate::options::LayoutOptions;
use knotwork_graph::{Edge, Node, Point};

pub fn draw(component: ConnectedComponent, opts: &LayoutOptions) -> DrawerResult {
    draw_with_padding(component, None, opts)
}

/// Like [`draw`], with `padding` overriding [`LayoutOptions::circle_padding`].
pub fn draw_with_padding(
    component: ConnectedComponent,
    padding: Option<f64>,
    opts: &LayoutOptions,
) -> DrawerResult {
    let ConnectedComponent { mut nodes, edges } = component;
    let params = CircleParams::for_nodes(
        &nodes,
        padding.unwrap_or(opts.circle_padding),
        opts.default_node_size,
    );
    let center = Point::new(params.radius, params.radius);

    for (i, node) in nodes.iter_mut().enumerate() {
        node.position = params.point(center, i);
    }

    let edges = orient_along_shorter_arc(&nodes, edges);
    let side = params.radius * 2.0;
    DrawerResult::new(Shape::NearlyFull, nodes, edges, side, side)
}

/// For an edge between circle slots `i -> j`, keeps it when `j` is at most half a turn ahead of
/// `i` and reverses it otherwise. Exact half turns point from the lower slot to the higher one.
pub fn orient_along_shorter_arc(nodes: &[Node], mut edges: Vec<Edge>) -> Vec<Edge> {
    let n = nodes.len();
    let index = index_by_id(nodes);
    for e in &mut edges {
        let (Some(&i), Some(&j)) = (index.get(e.source.as_str()), index.get(e.target.as_str()))
        else {
            continue;
        };
        if i == j {
            continue;
        }
        let ahead = (j + n - i) % n;
        if 2 * ahead > n || (2 * ahead == n && i > j) {
            e.reverse();
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(ids: &[&str]) -> Vec<Node> {
        ids.iter().map(|id| Node::new(*id, Point::default())).collect()
    }

    #[test]
    fn edges_point_forward_along_the_shorter_arc() {
        let nodes = ring(&["a", "b", "c", "d", "e"]);
        let edges = vec![
            Edge::new("ab", "a", "b"),
            Edge::new("ea", "e", "a"),
            Edge::new("ae", "a", "e"),
            Edge::new("db", "d", "b"),
        ];
        let out = orient_along_shorter_arc(&nodes, edges);
        let pairs = out
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(pairs, vec![("a", "b"), ("e", "a"), ("e", "a"), ("b", "d")]);
    }

    #[test]
    fn half_turn_edges_run_from_lower_to_higher_slot() {
        let nodes = ring(&["a", "b", "c", "d"]);
        let edges = vec![Edge::new("ca", "c", "a"), Edge::new("bd", "b", "d")];
        let out = orient_along_shorter_arc(&nodes, edges);
        assert_eq!((out[0].source.as_str(), out[0].target.as_str()), ("a", "c"));
        assert_eq!((out[1].source.as_str(), out[1].target.as_str()), ("b", "d"));
    }
}
