//! Row packing of per-component layouts onto one canvas.
//!
//! Trees always get a row to themselves. Other components share rows, at most
//! [`LayoutOptions::max_components_per_row`] per row and never beyond
//! [`LayoutOptions::max_row_width`]. Rows stack top to bottom; every component is shifted on top of
//! the positions its drawer assigned.

use crate::classify::Shape;
use crate::draw::DrawerResult;
use crate::options::LayoutOptions;
use knotwork_graph::{Edge, Node};

/// Canvas-ready output of a normalize pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PackedLayout {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Shape of each packed component, in packing order.
    pub shapes: Vec<Shape>,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Default)]
struct Row {
    items: Vec<DrawerResult>,
    width: f64,
    height: f64,
    exclusive: bool,
}

impl Row {
    fn push(&mut self, item: DrawerResult, gutter: f64) {
        if !self.items.is_empty() {
            self.width += gutter;
        }
        self.width += item.width;
        self.height = self.height.max(item.height);
        self.items.push(item);
    }
}

fn build_rows(results: Vec<DrawerResult>, opts: &LayoutOptions) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();
    for result in results {
        let is_tree = result.shape == Shape::Tree;
        let start_new = match rows.last() {
            None => true,
            Some(row) => {
                is_tree
                    || row.exclusive
                    || row.items.len() >= opts.max_components_per_row
                    || row.width + opts.component_gutter_x + result.width > opts.max_row_width
            }
        };
        if start_new {
            rows.push(Row {
                exclusive: is_tree,
                ..Default::default()
            });
        }
        if let Some(row) = rows.last_mut() {
            row.push(result, opts.component_gutter_x);
        }
    }
    rows
}

pub fn pack(results: Vec<DrawerResult>, opts: &LayoutOptions) -> PackedLayout {
    let rows = build_rows(results, opts);
    tracing::debug!(rows = rows.len(), "packing components");

    let mut out = PackedLayout::default();
    let mut offset_y = 0.0;
    for (r, row) in rows.into_iter().enumerate() {
        tracing::trace!(
            row = r,
            components = row.items.len(),
            width = row.width,
            height = row.height,
            offset_y,
            "packed row"
        );
        out.width = out.width.max(row.width);

        let mut x = 0.0;
        for mut item in row.items {
            item.translate(x, offset_y);
            x += item.width + opts.component_gutter_x;
            out.shapes.push(item.shape);
            out.nodes.extend(item.nodes);
            out.edges.extend(item.edges);
        }

        out.height = offset_y + row.height;
        offset_y += row.height + opts.row_gutter_y;
    }
    out
}
