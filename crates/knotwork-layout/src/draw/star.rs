use super::{CircleParams, DrawerResult};
use crate::classify::Shape;
use crate::components::ConnectedComponent;
use crate::options::LayoutOptions;
use knotwork_graph::{Adjacency, Point};

/// Hub in the middle, leaves evenly spaced around it.
///
/// The ring radius follows [`CircleParams`] for the leaves but never drops below the hub's larger
/// side plus the circle padding, so small stars do not collapse onto their hub.
pub fn draw(component: ConnectedComponent, opts: &LayoutOptions) -> DrawerResult {
    let ConnectedComponent { mut nodes, edges } = component;
    if nodes.is_empty() {
        return DrawerResult::new(Shape::Star, nodes, edges, 0.0, 0.0);
    }

    let adj = Adjacency::new(&nodes, &edges);
    let hub = (0..nodes.len())
        .max_by_key(|&v| (adj.degree(v), std::cmp::Reverse(v)))
        .unwrap_or(0);

    let leaves = nodes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != hub)
        .map(|(_, n)| n.clone())
        .collect::<Vec<_>>();
    let mut params = CircleParams::for_nodes(&leaves, opts.circle_padding, opts.default_node_size);
    let hub_side = nodes[hub].extent(opts.default_node_size).max_side();
    params.radius = params.radius.max(hub_side + opts.circle_padding);

    let center = Point::new(params.radius, params.radius);
    nodes[hub].position = center;
    let mut slot = 0;
    for (i, node) in nodes.iter_mut().enumerate() {
        if i == hub {
            continue;
        }
        node.position = params.point(center, slot);
        slot += 1;
    }

    let side = params.radius * 2.0;
    DrawerResult::new(Shape::Star, nodes, edges, side, side)
}
