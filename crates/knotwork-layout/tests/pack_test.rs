use knotwork_graph::{Node, Point};
use knotwork_layout::{DrawerResult, LayoutOptions, Shape, pack};

fn block(id: &str, shape: Shape, width: f64, height: f64) -> DrawerResult {
    DrawerResult::new(
        shape,
        vec![Node::new(id, Point::new(10.0, 5.0))],
        Vec::new(),
        width,
        height,
    )
}

fn position(nodes: &[Node], id: &str) -> Point {
    nodes
        .iter()
        .find(|n| n.id == id)
        .map(|n| n.position)
        .expect("node present")
}

#[test]
fn trees_get_their_own_row_and_rows_hold_at_most_two() {
    let results = vec![
        block("a", Shape::Cycle, 600.0, 200.0),
        block("b", Shape::Bipartite, 600.0, 250.0),
        block("c", Shape::NearlyFull, 600.0, 200.0),
        block("t", Shape::Tree, 400.0, 300.0),
    ];
    let out = pack(results, &LayoutOptions::default());

    // Row 0: a, b (600 + 150 + 600 = 1350 <= 1500). Height 250.
    assert_eq!(position(&out.nodes, "a"), Point::new(10.0, 5.0));
    assert_eq!(position(&out.nodes, "b"), Point::new(760.0, 5.0));
    // Row 1: c alone, the per-row cap is two.
    assert_eq!(position(&out.nodes, "c"), Point::new(10.0, 355.0));
    // Row 2: the tree, exclusive.
    assert_eq!(position(&out.nodes, "t"), Point::new(10.0, 655.0));

    assert_eq!(out.width, 1350.0);
    assert_eq!(out.height, 950.0);
    assert_eq!(
        out.shapes,
        vec![Shape::Cycle, Shape::Bipartite, Shape::NearlyFull, Shape::Tree]
    );
}

#[test]
fn component_after_a_tree_starts_a_new_row() {
    let results = vec![
        block("t", Shape::Tree, 100.0, 100.0),
        block("a", Shape::Chain, 100.0, 50.0),
        block("b", Shape::Chain, 100.0, 50.0),
    ];
    let out = pack(results, &LayoutOptions::default());

    assert_eq!(position(&out.nodes, "t"), Point::new(10.0, 5.0));
    assert_eq!(position(&out.nodes, "a"), Point::new(10.0, 205.0));
    assert_eq!(position(&out.nodes, "b"), Point::new(260.0, 205.0));
}

#[test]
fn row_width_cap_forces_a_new_row() {
    let results = vec![
        block("wide", Shape::Cycle, 1000.0, 100.0),
        block("next", Shape::Cycle, 400.0, 100.0),
        block("huge", Shape::Cycle, 2000.0, 100.0),
    ];
    let out = pack(results, &LayoutOptions::default());

    // 1000 + 150 + 400 = 1550 > 1500.
    assert_eq!(position(&out.nodes, "next"), Point::new(10.0, 205.0));
    // Oversized components still get placed, alone.
    assert_eq!(position(&out.nodes, "huge"), Point::new(10.0, 405.0));
    assert_eq!(out.width, 2000.0);
}

#[test]
fn per_row_cap_is_configurable() {
    let opts = LayoutOptions {
        max_components_per_row: 3,
        ..Default::default()
    };
    let results = vec![
        block("a", Shape::Chain, 100.0, 50.0),
        block("b", Shape::Chain, 100.0, 50.0),
        block("c", Shape::Chain, 100.0, 50.0),
    ];
    let out = pack(results, &opts);
    assert_eq!(position(&out.nodes, "c"), Point::new(510.0, 5.0));
}

#[test]
fn empty_input_packs_to_empty_canvas() {
    let out = pack(Vec::new(), &LayoutOptions::default());
    assert!(out.nodes.is_empty());
    assert_eq!((out.width, out.height), (0.0, 0.0));
}

#[test]
fn stars_share_rows_like_other_non_tree_shapes() {
    let results = vec![
        block("s", Shape::Star, 300.0, 300.0),
        block("a", Shape::Chain, 100.0, 50.0),
        block("t", Shape::Tree, 100.0, 100.0),
    ];
    let out = pack(results, &LayoutOptions::default());

    assert_eq!(position(&out.nodes, "s"), Point::new(10.0, 5.0));
    assert_eq!(position(&out.nodes, "a"), Point::new(460.0, 5.0));
    assert_eq!(position(&out.nodes, "t"), Point::new(10.0, 405.0));
    assert_eq!(out.width, 550.0);
}
