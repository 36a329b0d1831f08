#![forbid(unsafe_code)]

//! `knotwork` is a headless node/edge diagram core.
//!
//! It bundles three layers:
//! - [`graph`]: the node/edge data model and adjacency helpers;
//! - [`layout`]: component decomposition, shape classification, per-shape drawers and row packing;
//! - the undoable [`Store`] and its restore log (re-exported at the crate root).

pub use knotwork_core::*;

pub mod graph {
    pub use knotwork_graph::*;
}

pub mod layout {
    pub use knotwork_layout::*;
}

#[derive(Debug, thiserror::Error)]
pub enum HeadlessError {
    #[error(transparent)]
    Store(#[from] knotwork_core::Error),
    #[error(transparent)]
    Layout(#[from] knotwork_layout::Error),
}

/// Parses a `{nodes, edges, groups}` JSON document.
pub fn document_from_json(text: &str) -> serde_json::Result<Document> {
    serde_json::from_str(text)
}

/// Lays out a whole document without going through a [`Store`] (no history is recorded).
pub fn layout_document(
    doc: &Document,
    opts: &layout::LayoutOptions,
) -> std::result::Result<Document, HeadlessError> {
    let packed = knotwork_layout::normalize(doc.nodes(), doc.edges(), opts)?;
    Ok(Document::new(packed.nodes, packed.edges).with_groups(doc.groups().to_vec()))
}
