//! Two-column layout for bipartite components.
//!
//! The component is two-colored; the color of its first node forms the left column. Both columns
//! are stretched to the same total height: the height every node would need if stacked in one
//! column with the default vertical spacing. Each column spreads its own slack evenly between its
//! nodes, and connectors leave through the facing sides of the two columns.

use super::{DrawerResult, index_by_id};
use crate::classify::Shape;
use crate::components::ConnectedComponent;
use crate::options::LayoutOptions;
use knotwork_graph::{Adjacency, Edge, Node, Point, Side};

pub fn draw(component: ConnectedComponent, opts: &LayoutOptions) -> DrawerResult {
    let ConnectedComponent { nodes, mut edges } = component;
    let size = opts.default_node_size;

    let colors = Adjacency::new(&nodes, &edges)
        .two_color()
        .unwrap_or_else(|| vec![false; nodes.len()]);
    let (mut first, mut second): (Vec<Node>, Vec<Node>) = (Vec::new(), Vec::new());
    for (node, is_second) in nodes.into_iter().zip(colors) {
        if is_second {
            second.push(node);
        } else {
            first.push(node);
        }
    }

    let min_height = stacked_height(
        first.iter().chain(second.iter()),
        opts.node_spacing_y,
        size,
    );
    let first_spacing = vertical_spacing(&first, min_height, size);
    let second_spacing = vertical_spacing(&second, min_height, size);

    let first_ids = index_by_id(&first);
    let second_ids = index_by_id(&second);
    for edge in &mut edges {
        let forward = first_ids.contains_key(edge.source.as_str())
            && second_ids.contains_key(edge.target.as_str());
        set_handles(edge, forward);
    }

    stack_column(&mut first, 0.0, first_spacing, size);
    let second_x = first.first().map_or(size, |n| n.width(size)) + opts.bipartite_column_gap;
    stack_column(&mut second, second_x, second_spacing, size);

    let height = stacked_height(first.iter(), first_spacing, size).max(stacked_height(
        second.iter(),
        second_spacing,
        size,
    ));
    let width = second_x + second.first().map_or(size, |n| n.width(size));

    let mut nodes = first;
    nodes.extend(second);
    DrawerResult::new(Shape::Bipartite, nodes, edges, width, height)
}

/// Height of `nodes` stacked in one column with `spacing` after each node.
fn stacked_height<'a>(nodes: impl Iterator<Item = &'a Node>, spacing: f64, size: f64) -> f64 {
    nodes.map(|n| n.height(size) + spacing).sum()
}

/// Per-node spacing that makes `column` fill exactly `min_height`.
fn vertical_spacing(column: &[Node], min_height: f64, size: f64) -> f64 {
    if column.is_empty() {
        return 0.0;
    }
    let used: f64 = column.iter().map(|n| n.height(size)).sum();
    (min_height - used) / column.len() as f64
}

fn stack_column(column: &mut [Node], x: f64, spacing: f64, size: f64) {
    let mut y = 0.0;
    for node in column {
        node.position = Point::new(x, y + spacing / 2.0);
        y += node.height(size) + spacing;
    }
}

fn set_handles(edge: &mut Edge, first_to_second: bool) {
    if first_to_second {
        edge.source_handle = Some(Side::Right);
        edge.target_handle = Some(Side::Left);
    } else {
        edge.source_handle = Some(Side::Left);
        edge.target_handle = Some(Side::Right);
    }
}
