use super::DrawerResult;
use crate::classify::Shape;
use crate::components::ConnectedComponent;
use crate::options::LayoutOptions;
use knotwork_graph::{Adjacency, Point};

/// Lays a simple path out left to right in path order, vertically centered on the tallest node.
pub fn draw(component: ConnectedComponent, opts: &LayoutOptions) -> DrawerResult {
    let ConnectedComponent { mut nodes, edges } = component;
    if nodes.is_empty() {
        return DrawerResult::new(Shape::Chain, nodes, edges, 0.0, 0.0);
    }

    let order = path_order(&Adjacency::new(&nodes, &edges));
    let size = opts.default_node_size;
    let height = order
        .iter()
        .map(|&i| nodes[i].height(size))
        .fold(0.0, f64::max);

    let mut x = 0.0;
    for (k, &i) in order.iter().enumerate() {
        if k > 0 {
            x += opts.node_spacing_x;
        }
        let extent = nodes[i].extent(size);
        nodes[i].position = Point::new(x, (height - extent.height) / 2.0);
        x += extent.width;
    }

    DrawerResult::new(Shape::Chain, nodes, edges, x, height)
}

/// Walks the path from its first endpoint in input order. Nodes the walk cannot reach (the input
/// was not a path) are appended in input order.
fn path_order(adj: &Adjacency) -> Vec<usize> {
    let n = adj.len();
    let start = (0..n).find(|&v| adj.degree(v) == 1).unwrap_or(0);

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut cur = Some(start);
    while let Some(v) = cur {
        visited[v] = true;
        order.push(v);
        cur = adj.neighbors(v).iter().copied().find(|&w| !visited[w]);
    }
    order.extend((0..n).filter(|&v| !visited[v]));
    order
}
