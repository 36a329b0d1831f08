use knotwork_core::{EdgeUpdate, Error, Settings, Store};
use knotwork_graph::{Edge, Node, NodeData, Point, Size};
use knotwork_layout::Shape;

fn seeded() -> Store {
    Store::new(Settings {
        random_seed: Some(42),
        ..Default::default()
    })
}

/// a - b - c with an extra isolated d.
fn abc_store() -> (Store, Vec<String>) {
    let mut s = seeded();
    let a = s.add_node(Some(Point::new(0.0, 0.0)));
    let b = s.add_node(Some(Point::new(100.0, 0.0)));
    let c = s.add_node(Some(Point::new(200.0, 0.0)));
    let d = s.add_node(Some(Point::new(300.0, 0.0)));
    s.add_edge(&a, &b).unwrap().unwrap();
    s.add_edge(&b, &c).unwrap().unwrap();
    (s, vec![a, b, c, d])
}

fn snapshot(s: &Store) -> (Vec<Node>, Vec<Edge>) {
    (s.nodes().to_vec(), s.edges().to_vec())
}

#[test]
fn add_node_then_undo_restores_the_array() {
    let mut s = seeded();
    s.add_node(Some(Point::new(5.0, 5.0)));
    let before = snapshot(&s);

    let id = s.add_node(None);
    assert_eq!(s.nodes().len(), 2);
    let node = s.node(&id).unwrap();
    assert!((0.0..400.0).contains(&node.position.x));
    assert!((0.0..400.0).contains(&node.position.y));

    assert!(s.undo());
    assert_eq!(snapshot(&s), before);
}

#[test]
fn new_nodes_get_distinct_ids_and_lowest_free_labels() {
    let mut s = seeded();
    let a = s.add_node(None);
    let b = s.add_node(None);
    let c = s.add_node(None);
    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);
    assert_eq!(s.node(&a).unwrap().data.label.as_deref(), Some("1"));
    assert_eq!(s.node(&c).unwrap().data.label.as_deref(), Some("3"));

    assert!(s.remove_node(&b));
    let d = s.add_node(None);
    assert_eq!(s.node(&d).unwrap().data.label.as_deref(), Some("2"));
}

#[test]
fn random_placement_is_reproducible_with_a_seed() {
    let mut first = seeded();
    let mut second = seeded();
    let a = first.add_node(None);
    let b = second.add_node(None);
    assert_eq!(
        first.node(&a).unwrap().position,
        second.node(&b).unwrap().position
    );
}

#[test]
fn remove_node_undo_reinstates_incident_edges_in_place() {
    let (mut s, ids) = abc_store();
    let before = snapshot(&s);

    assert!(s.remove_node(&ids[1]));
    assert_eq!(s.nodes().len(), 3);
    assert!(s.edges().is_empty());

    assert!(s.undo());
    assert_eq!(snapshot(&s), before);
}

#[test]
fn add_edge_uses_settings_defaults_and_unique_ids() {
    let (mut s, ids) = abc_store();
    let first = s.edges()[0].clone();
    assert_eq!(first.id, format!("e{}-{}", ids[0], ids[1]));
    assert_eq!(first.data.color.as_deref(), Some("#b1b1b7"));
    assert_eq!(first.data.weight, Some(1.0));

    let dup = s.add_edge(&ids[0], &ids[1]).unwrap().unwrap();
    assert_eq!(dup, format!("e{}-{}-1", ids[0], ids[1]));
}

#[test]
fn add_edge_with_unknown_endpoint_is_silent() {
    let (mut s, ids) = abc_store();
    let len = s.history().len();
    assert_eq!(s.add_edge(&ids[0], "nope").unwrap(), None);
    assert_eq!(s.history().len(), len);
}

#[test]
fn self_loops_are_rejected() {
    let (mut s, ids) = abc_store();
    let len = s.history().len();
    let err = s.add_edge(&ids[0], &ids[0]).unwrap_err();
    assert!(matches!(err, Error::SelfLoop { .. }));
    assert_eq!(s.history().len(), len);
    assert_eq!(s.edges().len(), 2);
}

#[test]
fn remove_and_update_edge_round_trip_through_undo() {
    let (mut s, _) = abc_store();
    let before = snapshot(&s);
    let edge_id = s.edges()[0].id.clone();

    assert!(s.update_edge(
        &edge_id,
        EdgeUpdate {
            color: Some("#ff0000".to_string()),
            weight: None,
        }
    ));
    assert_eq!(s.edge(&edge_id).unwrap().data.color.as_deref(), Some("#ff0000"));
    assert_eq!(s.edge(&edge_id).unwrap().data.weight, Some(1.0));

    assert!(s.remove_edge(&edge_id));
    assert!(s.edge(&edge_id).is_none());

    assert!(s.undo());
    assert_eq!(s.edge(&edge_id).unwrap().data.color.as_deref(), Some("#ff0000"));
    assert_eq!(s.edges()[0].id, edge_id);
    assert!(s.undo());
    assert_eq!(snapshot(&s), before);
}

#[test]
fn edge_update_that_changes_nothing_is_not_logged() {
    let (mut s, _) = abc_store();
    let edge_id = s.edges()[0].id.clone();
    let len = s.history().len();

    assert!(!s.update_edge(&edge_id, EdgeUpdate::default()));
    assert!(!s.update_edge(
        &edge_id,
        EdgeUpdate {
            color: Some("#b1b1b7".to_string()),
            weight: Some(1.0),
        }
    ));
    assert_eq!(s.history().len(), len);
}

#[test]
fn moves_are_undoable() {
    let (mut s, ids) = abc_store();
    let before = snapshot(&s);

    assert!(s.move_node(&ids[0], Point::new(-10.0, 7.0)));
    assert!(s.move_nodes(&[
        (ids[1].clone(), Point::new(1.0, 1.0)),
        ("ghost".to_string(), Point::new(9.0, 9.0)),
        (ids[1].clone(), Point::new(2.0, 2.0)),
        (ids[2].clone(), Point::new(3.0, 3.0)),
    ]));
    assert_eq!(s.node(&ids[1]).unwrap().position, Point::new(2.0, 2.0));

    assert!(s.undo());
    assert_eq!(s.node(&ids[1]).unwrap().position, Point::new(100.0, 0.0));
    assert_eq!(s.node(&ids[0]).unwrap().position, Point::new(-10.0, 7.0));
    assert!(s.undo());
    assert_eq!(snapshot(&s), before);
}

#[test]
fn lookup_misses_append_nothing() {
    let (mut s, _) = abc_store();
    let len = s.history().len();

    assert!(!s.remove_node("ghost"));
    assert!(!s.remove_edge("ghost"));
    assert!(!s.update_edge("ghost", EdgeUpdate::default()));
    assert!(!s.move_node("ghost", Point::default()));
    assert!(!s.move_nodes(&[("ghost".to_string(), Point::default())]));
    assert!(!s.grow_node("ghost"));
    assert!(!s.shrink_node("ghost"));
    assert!(!s.set_node_data("ghost", NodeData::default()));
    assert!(!s.remove_nodes(&["ghost".to_string()]));
    assert!(!s.remove_edges(&["ghost".to_string()]));

    assert_eq!(s.history().len(), len);
}

#[test]
fn resize_respects_the_floor() {
    let mut s = Store::new(Settings {
        random_seed: Some(1),
        min_node_size: 35.0,
        ..Default::default()
    });
    let id = s.add_node(Some(Point::default()));

    assert!(s.grow_node(&id));
    assert_eq!(s.node(&id).unwrap().data.size, Some(Size::square(60.0)));

    assert!(s.shrink_node(&id));
    assert!(s.shrink_node(&id));
    assert!(s.shrink_node(&id));
    assert_eq!(s.node(&id).unwrap().data.size, Some(Size::square(35.0)));

    let len = s.history().len();
    assert!(!s.shrink_node(&id));
    assert_eq!(s.history().len(), len);

    for _ in 0..4 {
        assert!(s.undo());
    }
    assert_eq!(s.node(&id).unwrap().data.size, None);
}

#[test]
fn node_data_change_is_undoable() {
    let (mut s, ids) = abc_store();
    let before = s.node(&ids[0]).unwrap().data.clone();
    let mut data = NodeData::labeled("start");
    data.color = Some("#00ff00".to_string());

    assert!(s.set_node_data(&ids[0], data.clone()));
    assert_eq!(s.node(&ids[0]).unwrap().data, data);
    assert!(s.undo());
    assert_eq!(s.node(&ids[0]).unwrap().data, before);
}

#[test]
fn mass_removal_undo_restores_both_arrays() {
    let (mut s, ids) = abc_store();
    let before = snapshot(&s);

    assert!(s.remove_nodes(&[ids[0].clone(), ids[2].clone(), "ghost".to_string()]));
    assert_eq!(s.nodes().len(), 2);
    assert!(s.edges().is_empty());
    assert!(s.undo());
    assert_eq!(snapshot(&s), before);

    let edge_ids: Vec<String> = s.edges().iter().map(|e| e.id.clone()).collect();
    assert!(s.remove_edges(&edge_ids));
    assert!(s.edges().is_empty());
    assert!(s.undo());
    assert_eq!(snapshot(&s), before);
}

#[test]
fn selection_is_not_logged() {
    let (mut s, ids) = abc_store();
    let len = s.history().len();
    assert!(s.set_selected(&ids[0], true));
    assert!(!s.set_selected("ghost", true));
    assert_eq!(s.selected_ids(), vec![ids[0].as_str()]);
    s.clear_selection();
    assert!(s.selected_ids().is_empty());
    assert_eq!(s.history().len(), len);
}

#[test]
fn paste_copies_the_induced_subgraph_and_undoes_in_one_step() {
    let (mut s, ids) = abc_store();
    s.set_selected(&ids[0], true);
    s.set_selected(&ids[1], true);
    let before = snapshot(&s);

    let clip = s.copy_selected();
    assert_eq!(clip.nodes.len(), 2);
    assert_eq!(clip.edges.len(), 1);

    let pasted = s.paste(&clip);
    assert_eq!(pasted.len(), 2);
    assert_eq!(s.nodes().len(), 6);
    assert_eq!(s.edges().len(), 3);
    for (id, original) in pasted.iter().zip(&clip.nodes) {
        assert!(!ids.contains(id));
        let node = s.node(id).unwrap();
        assert_eq!(node.position, original.position.translate(20.0, 20.0));
        assert!(!node.selected);
    }
    let new_edge = &s.edges()[2];
    assert_eq!(new_edge.source, pasted[0]);
    assert_eq!(new_edge.target, pasted[1]);

    assert!(s.undo());
    assert_eq!(snapshot(&s), before);
}

#[test]
fn empty_paste_is_a_no_op() {
    let (mut s, _) = abc_store();
    let len = s.history().len();
    let clip = s.copy_selected();
    assert!(s.paste(&clip).is_empty());
    assert_eq!(s.history().len(), len);
}

#[test]
fn grouping_needs_two_selected_nodes() {
    let (mut s, ids) = abc_store();
    let len = s.history().len();
    s.set_selected(&ids[0], true);
    assert_eq!(s.group_selected(), None);
    assert_eq!(s.history().len(), len);

    s.set_selected(&ids[1], true);
    let group = s.group_selected().unwrap();
    assert_eq!(s.groups().len(), 1);
    assert_eq!(s.groups()[0].color, "#f5d0a9");
    assert_eq!(s.node(&ids[0]).unwrap().group.as_deref(), Some(group.as_str()));
    assert_eq!(s.document().group_members(&group).len(), 2);

    assert!(s.undo());
    assert!(s.groups().is_empty());
    assert!(s.nodes().iter().all(|n| n.group.is_none()));
}

#[test]
fn group_colors_rotate() {
    let (mut s, ids) = abc_store();
    s.set_selected(&ids[0], true);
    s.set_selected(&ids[1], true);
    s.group_selected().unwrap();
    s.group_selected().unwrap();
    assert_eq!(s.groups()[1].color, "#a9d0f5");
}

#[test]
fn normalize_lays_out_and_undoes_to_the_exact_document() {
    let (mut s, ids) = abc_store();
    let before = snapshot(&s);

    s.normalize().unwrap();
    assert_eq!(s.nodes().len(), 4);
    assert_eq!(s.edges().len(), 2);
    assert_eq!(s.node(&ids[0]).unwrap().position, Point::new(0.0, 0.0));
    assert_eq!(s.node(&ids[1]).unwrap().position, Point::new(100.0, 0.0));
    assert_eq!(s.history().last().map(|r| r.tag()), Some("backup"));

    assert!(s.undo());
    assert_eq!(snapshot(&s), before);
}

#[test]
fn normalize_classifies_through_the_layout_pipeline() {
    let mut s = seeded();
    let ids: Vec<String> = (0..3).map(|_| s.add_node(None)).collect();
    s.add_edge(&ids[0], &ids[1]).unwrap();
    s.add_edge(&ids[1], &ids[2]).unwrap();
    s.add_edge(&ids[2], &ids[0]).unwrap();

    let packed = knotwork_layout::normalize(s.nodes(), s.edges(), &s.settings().layout).unwrap();
    assert_eq!(packed.shapes, vec![Shape::Cycle]);
    s.normalize().unwrap();
    for id in &ids {
        assert_eq!(
            s.node(id).unwrap().position,
            packed.nodes.iter().find(|n| &n.id == id).unwrap().position
        );
    }
}

#[test]
fn undo_on_fresh_store_returns_false() {
    let mut s = seeded();
    assert!(!s.undo());
}

#[test]
fn group_membership_is_carried_by_nodes_on_the_wire() {
    let (mut s, ids) = abc_store();
    s.set_selected(&ids[0], true);
    s.set_selected(&ids[2], true);
    let group = s.group_selected().unwrap();

    let v = serde_json::to_value(s.document()).unwrap();
    let g = &v["groups"][0];
    assert_eq!(g["id"], group.as_str());
    assert!(g.get("nodeIds").is_none());
    let members: Vec<&str> = v["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|n| n["parentNode"] == group.as_str())
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(members, vec![ids[0].as_str(), ids[2].as_str()]);
}
