#![forbid(unsafe_code)]

//! Headless, shape-aware layout for node/edge diagrams.
//!
//! A layout pass ("normalize") runs four stages:
//! - [`components::decompose`] splits the diagram into connected components;
//! - [`classify::classify`] labels each component's [`Shape`];
//! - the [`DrawerRegistry`] picks the drawer for that shape, which positions the component inside
//!   its own bounding box;
//! - [`pack::pack`] arranges the boxes in rows on one canvas.

pub mod classify;
pub mod components;
pub mod draw;
pub mod error;
pub mod options;
pub mod pack;

pub use classify::{Shape, classify};
pub use components::{ConnectedComponent, decompose};
pub use draw::{DrawFn, DrawerRegistry, DrawerResult};
pub use error::{Error, Result};
pub use options::LayoutOptions;
pub use pack::{PackedLayout, pack};

use knotwork_graph::{Edge, Node};
use rustc_hash::FxHashSet;

/// Rejects inputs the layout cannot place: duplicate node ids and edges with a missing endpoint.
pub fn validate(nodes: &[Node], edges: &[Edge]) -> Result<()> {
    let mut ids: FxHashSet<&str> = FxHashSet::default();
    for n in nodes {
        if !ids.insert(n.id.as_str()) {
            return Err(Error::DuplicateNode {
                node_id: n.id.clone(),
            });
        }
    }
    for e in edges {
        if !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()) {
            return Err(Error::MissingEndpoint {
                edge_id: e.id.clone(),
            });
        }
    }
    Ok(())
}

/// Headless layout entry point, using the default drawer for every shape.
pub fn normalize(nodes: &[Node], edges: &[Edge], opts: &LayoutOptions) -> Result<PackedLayout> {
    normalize_with(&DrawerRegistry::default(), nodes, edges, opts)
}

pub fn normalize_with(
    registry: &DrawerRegistry,
    nodes: &[Node],
    edges: &[Edge],
    opts: &LayoutOptions,
) -> Result<PackedLayout> {
    validate(nodes, edges)?;

    let components = decompose(nodes, edges);
    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        components = components.len(),
        "normalize: decomposed"
    );

    let results = components
        .into_iter()
        .map(|component| {
            let shape = classify(&component, opts);
            tracing::debug!(
                shape = shape.as_str(),
                nodes = component.nodes.len(),
                edges = component.edges.len(),
                "normalize: classified component"
            );
            registry.draw(shape, component, opts)
        })
        .collect::<Vec<_>>();

    Ok(pack(results, opts))
}
