use super::{CircleParams, DrawerResult};
use crate::classify::Shape;
use crate::components::ConnectedComponent;
use crate::options::LayoutOptions;
use knotwork_graph::{Adjacency, Point};

/// Places a ring on a circle in ring order, so neighbors stay neighbors. Edge directions are left
/// untouched.
pub fn draw(component: ConnectedComponent, opts: &LayoutOptions) -> DrawerResult {
    let ConnectedComponent { mut nodes, edges } = component;
    let params = CircleParams::for_nodes(&nodes, opts.circle_padding, opts.default_node_size);
    let center = Point::new(params.radius, params.radius);

    let order = ring_order(&Adjacency::new(&nodes, &edges));
    for (slot, &i) in order.iter().enumerate() {
        nodes[i].position = params.point(center, slot);
    }

    let side = params.radius * 2.0;
    DrawerResult::new(Shape::Cycle, nodes, edges, side, side)
}

fn ring_order(adj: &Adjacency) -> Vec<usize> {
    let n = adj.len();
    if n == 0 {
        return Vec::new();
    }
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut cur = Some(0);
    while let Some(v) = cur {
        visited[v] = true;
        order.push(v);
        cur = adj.neighbors(v).iter().copied().find(|&w| !visited[w]);
    }
    order.extend((0..n).filter(|&v| !visited[v]));
    order
}
