use serde::{Deserialize, Serialize};

/// Geometry knobs shared by the drawers and the packer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Side of the square assumed for nodes without an explicit size.
    pub default_node_size: f64,
    pub node_spacing_x: f64,
    pub node_spacing_y: f64,
    /// Extra arc length reserved per node by the circular drawers.
    pub circle_padding: f64,
    /// Horizontal gap between the two columns of a bipartite layout.
    pub bipartite_column_gap: f64,
    /// Row width cap used by the packer.
    pub max_row_width: f64,
    pub max_components_per_row: usize,
    pub component_gutter_x: f64,
    pub row_gutter_y: f64,
    /// Fraction of the complete-graph edge count at which a component counts as nearly full.
    pub nearly_full_density: f64,
    /// Preferred tree roots; the first id found in a tree component becomes its root.
    pub tree_roots: Vec<String>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            default_node_size: 50.0,
            node_spacing_x: 50.0,
            node_spacing_y: 50.0,
            circle_padding: 20.0,
            bipartite_column_gap: 200.0,
            max_row_width: 1500.0,
            max_components_per_row: 2,
            component_gutter_x: 150.0,
            row_gutter_y: 100.0,
            nearly_full_density: 0.8,
            tree_roots: Vec::new(),
        }
    }
}
