use knotwork_graph::{Edge, Node, Point};
use knotwork_layout::decompose;
use std::collections::BTreeSet;

fn nodes(ids: &[&str]) -> Vec<Node> {
    ids.iter().map(|id| Node::new(*id, Point::default())).collect()
}

fn edges(pairs: &[(&str, &str)]) -> Vec<Edge> {
    pairs
        .iter()
        .map(|(s, t)| Edge::new(format!("{s}-{t}"), *s, *t))
        .collect()
}

fn ids(nodes: &[Node]) -> Vec<&str> {
    nodes.iter().map(|n| n.id.as_str()).collect()
}

#[test]
fn components_partition_nodes_exactly() {
    let ns = nodes(&["a", "b", "c", "d", "e", "f", "g"]);
    let es = edges(&[("a", "b"), ("d", "c"), ("e", "c"), ("b", "f")]);
    let comps = decompose(&ns, &es);

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut total = 0;
    for c in &comps {
        for n in &c.nodes {
            assert!(seen.insert(n.id.as_str()), "node {} appears twice", n.id);
            total += 1;
        }
    }
    assert_eq!(total, ns.len());

    for c in &comps {
        let members: BTreeSet<&str> = c.nodes.iter().map(|n| n.id.as_str()).collect();
        for e in &c.edges {
            assert!(members.contains(e.source.as_str()));
            assert!(members.contains(e.target.as_str()));
        }
    }
    let edge_total: usize = comps.iter().map(|c| c.edges.len()).sum();
    assert_eq!(edge_total, es.len());
}

#[test]
fn components_follow_first_appearance_and_keep_input_order() {
    let ns = nodes(&["a", "b", "c", "d", "e", "f", "g"]);
    let es = edges(&[("a", "b"), ("d", "c"), ("e", "c"), ("b", "f")]);
    let comps = decompose(&ns, &es);

    let got = comps.iter().map(|c| ids(&c.nodes)).collect::<Vec<_>>();
    assert_eq!(
        got,
        vec![vec!["a", "b", "f"], vec!["c", "d", "e"], vec!["g"]]
    );
    assert_eq!(comps[1].edges[0].id, "d-c");
    assert_eq!(comps[1].edges[1].id, "e-c");
}

#[test]
fn isolated_nodes_form_singletons() {
    let ns = nodes(&["x", "y"]);
    let comps = decompose(&ns, &[]);
    assert_eq!(comps.len(), 2);
    assert!(comps.iter().all(|c| c.nodes.len() == 1 && c.edges.is_empty()));
}

#[test]
fn dangling_edges_are_dropped() {
    let ns = nodes(&["a", "b"]);
    let es = edges(&[("a", "b"), ("b", "ghost")]);
    let comps = decompose(&ns, &es);
    assert_eq!(comps.len(), 1);
    assert_eq!(comps[0].edges.len(), 1);
}

#[test]
fn empty_input_has_no_components() {
    assert!(decompose(&[], &[]).is_empty());
}
