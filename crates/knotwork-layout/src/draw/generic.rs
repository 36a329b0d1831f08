use super::DrawerResult;
use crate::classify::Shape;
use crate::components::ConnectedComponent;
use crate::options::LayoutOptions;

/// Fallback for unclassified components: positions are kept as-is and the box is empty.
pub fn draw(component: ConnectedComponent, _opts: &LayoutOptions) -> DrawerResult {
    DrawerResult::new(Shape::Generic, component.nodes, component.edges, 0.0, 0.0)
}
