//! Per-shape drawers.
//!
//! Every drawer shares the [`DrawFn`] contract: it receives one component and returns the same
//! nodes and edges with positions inside a local bounding box anchored at the origin. Drawers never
//! add, drop or rename nodes and edges; the bipartite and nearly-full drawers additionally rewrite
//! connector sides and edge orientation.

pub mod bipartite;
pub mod chain;
pub mod cycle;
pub mod generic;
pub mod nearly_full;
pub mod star;
pub mod tree;

use crate::classify::Shape;
use crate::components::ConnectedComponent;
use crate::options::LayoutOptions;
use knotwork_graph::{Edge, Node, Point};
use rustc_hash::FxHashMap;

/// A positioned component plus the size of its bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawerResult {
    pub shape: Shape,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub width: f64,
    pub height: f64,
}

impl DrawerResult {
    pub fn new(shape: Shape, nodes: Vec<Node>, edges: Vec<Edge>, width: f64, height: f64) -> Self {
        Self {
            shape,
            nodes,
            edges,
            width,
            height,
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for n in &mut self.nodes {
            n.position = n.position.translate(dx, dy);
        }
    }
}

pub type DrawFn = fn(component: ConnectedComponent, opts: &LayoutOptions) -> DrawerResult;

/// Shape → drawer table consulted by the normalize pass.
#[derive(Debug, Clone)]
pub struct DrawerRegistry {
    drawers: FxHashMap<Shape, DrawFn>,
}

impl Default for DrawerRegistry {
    fn default() -> Self {
        let mut reg = Self::empty();
        for shape in Shape::ALL {
            reg.insert(shape, default_drawer(shape));
        }
        reg
    }
}

/// The built-in drawer for each shape. Exhaustive, so a new shape cannot ship without one.
pub fn default_drawer(shape: Shape) -> DrawFn {
    match shape {
        Shape::Chain => chain::draw,
        Shape::Tree => tree::draw,
        Shape::Cycle => cycle::draw,
        Shape::Bipartite => bipartite::draw,
        Shape::NearlyFull => nearly_full::draw,
        Shape::Star => star::draw,
        Shape::Generic => generic::draw,
    }
}

impl DrawerRegistry {
    pub fn empty() -> Self {
        Self {
            drawers: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, shape: Shape, drawer: DrawFn) {
        self.drawers.insert(shape, drawer);
    }

    pub fn remove(&mut self, shape: Shape) -> Option<DrawFn> {
        self.drawers.remove(&shape)
    }

    pub fn get(&self, shape: Shape) -> Option<DrawFn> {
        self.drawers.get(&shape).copied()
    }

    /// Draws `component` with the drawer registered for `shape`, or the generic drawer when the
    /// registry has none. The result is labeled with `shape` either way.
    pub fn draw(
        &self,
        shape: Shape,
        component: ConnectedComponent,
        opts: &LayoutOptions,
    ) -> DrawerResult {
        let drawer = self.get(shape).unwrap_or(generic::draw as DrawFn);
        tracing::trace!(
            shape = shape.as_str(),
            nodes = component.nodes.len(),
            "drawing component"
        );
        let mut result = drawer(component, opts);
        result.shape = shape;
        result
    }
}

/// Radius and angular step for placing `nodes` evenly on one circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleParams {
    pub radius: f64,
    pub step_degrees: f64,
}

impl CircleParams {
    /// The circumference reserves each node's larger side plus `padding`.
    pub fn for_nodes(nodes: &[Node], padding: f64, default_node_size: f64) -> Self {
        if nodes.is_empty() {
            return Self {
                radius: 0.0,
                step_degrees: 0.0,
            };
        }
        let circumference: f64 = nodes
            .iter()
            .map(|n| n.extent(default_node_size).max_side() + padding)
            .sum();
        Self {
            radius: circumference / std::f64::consts::TAU,
            step_degrees: 360.0 / nodes.len() as f64,
        }
    }

    /// Position of slot `i` around `center`.
    pub fn point(&self, center: Point, i: usize) -> Point {
        let angle = (self.step_degrees * i as f64).to_radians();
        Point::new(
            center.x + angle.cos() * self.radius,
            center.y + angle.sin() * self.radius,
        )
    }
}

pub(crate) fn index_by_id(nodes: &[Node]) -> FxHashMap<&str, usize> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    for (i, n) in nodes.iter().enumerate() {
        index.entry(n.id.as_str()).or_insert(i);
    }
    index
}
