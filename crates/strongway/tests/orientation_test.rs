use strongway::graphlib::ArcKey;
use strongway::orientation::{self, CommittedArc, Decision, FlexibleEdge};
use strongway::{ArcAttrs, ArcProvenance, EdgeOrder, MixedGraph, RoadNetwork};

fn edge(u: &str, v: &str) -> FlexibleEdge {
    FlexibleEdge {
        u: u.to_string(),
        v: v.to_string(),
    }
}

fn arc(from: &str, to: &str, provenance: ArcProvenance) -> CommittedArc {
    CommittedArc {
        from: from.to_string(),
        to: to.to_string(),
        provenance,
    }
}

fn square() -> MixedGraph {
    RoadNetwork::default()
        .with_nodes(["A", "B", "C", "D"])
        .with_two_way("A", "B")
        .with_two_way("B", "C")
        .with_two_way("C", "D")
        .with_two_way("D", "A")
        .to_mixed_graph()
        .unwrap()
}

#[test]
fn flexible_pairs_collapse_to_one_edge_in_first_seen_order() {
    let g = RoadNetwork::default()
        .with_nodes(["a", "b", "c"])
        .with_two_way("c", "b")
        .with_one_way("a", "b")
        .with_two_way("a", "c")
        .to_mixed_graph()
        .unwrap();

    let p = orientation::partition(&g, EdgeOrder::Input);
    assert_eq!(p.fixed, vec![ArcKey::new("a", "b")]);
    assert_eq!(p.flexible, vec![edge("c", "b"), edge("a", "c")]);
}

#[test]
fn lexicographic_order_sorts_edges_and_tries_min_to_max() {
    let g = RoadNetwork::default()
        .with_nodes(["a", "b", "c"])
        .with_two_way("c", "b")
        .with_two_way("b", "a")
        .with_two_way("c", "a")
        .to_mixed_graph()
        .unwrap();

    assert_eq!(
        orientation::flexible_edges(&g, EdgeOrder::Lexicographic),
        vec![edge("a", "b"), edge("a", "c"), edge("b", "c")]
    );
}

#[test]
fn single_flexible_arc_still_counts_as_an_edge() {
    let mut g = RoadNetwork::default()
        .with_nodes(["a", "b"])
        .to_mixed_graph()
        .unwrap();
    g.set_arc("b", "a", ArcAttrs::flexible()).unwrap();
    assert_eq!(
        orientation::flexible_edges(&g, EdgeOrder::Input),
        vec![edge("b", "a")]
    );
}

#[test]
fn square_of_two_way_roads_becomes_one_consistent_cycle() {
    let out = orientation::solve(&square(), EdgeOrder::Input);

    assert_eq!(out.decisions, vec![Decision::Forward; 4]);
    assert_eq!((out.forward, out.reversed), (4, 0));
    assert_eq!(
        out.committed,
        vec![
            arc("A", "B", ArcProvenance::Resolved),
            arc("B", "C", ArcProvenance::Resolved),
            arc("C", "D", ArcProvenance::Resolved),
            arc("D", "A", ArcProvenance::Resolved),
        ]
    );
}

#[test]
fn infeasible_forward_direction_is_reversed() {
    // a -> b -> c is one-way, so the two-way road a - c must carry traffic c -> a.
    let g = RoadNetwork::default()
        .with_nodes(["a", "b", "c"])
        .with_one_way("a", "b")
        .with_one_way("b", "c")
        .with_two_way("a", "c")
        .to_mixed_graph()
        .unwrap();

    let out = orientation::solve(&g, EdgeOrder::Input);
    assert_eq!(out.edges, vec![edge("a", "c")]);
    assert_eq!(out.decisions, vec![Decision::Reversed]);
    assert_eq!((out.forward, out.reversed), (0, 1));
    assert_eq!(
        out.committed,
        vec![
            arc("a", "b", ArcProvenance::Fixed),
            arc("b", "c", ArcProvenance::Fixed),
            arc("c", "a", ArcProvenance::Resolved),
        ]
    );
}

#[test]
fn later_edges_are_treated_as_still_open() {
    // Deciding a - b first: with b - c and c - a still open both ways, a -> b is feasible.
    let g = RoadNetwork::default()
        .with_nodes(["a", "b", "c"])
        .with_two_way("a", "b")
        .with_two_way("c", "b")
        .with_two_way("c", "a")
        .to_mixed_graph()
        .unwrap();

    let out = orientation::solve(&g, EdgeOrder::Input);
    // a -> b, then c -> b would leave b a dead end, so b -> c; then c -> a closes the cycle.
    assert_eq!(
        out.decisions,
        vec![Decision::Forward, Decision::Reversed, Decision::Forward]
    );
    let arcs: Vec<(&str, &str)> = out
        .committed
        .iter()
        .map(|a| (a.from.as_str(), a.to.as_str()))
        .collect();
    assert_eq!(arcs, vec![("a", "b"), ("b", "c"), ("c", "a")]);
}

#[test]
fn fixed_arcs_are_committed_unchanged() {
    let g = RoadNetwork::default()
        .with_nodes(["a", "b", "c", "d"])
        .with_one_way("a", "b")
        .with_two_way("b", "c")
        .with_one_way("c", "d")
        .with_two_way("d", "a")
        .with_two_way("a", "c")
        .to_mixed_graph()
        .unwrap();

    let out = orientation::solve(&g, EdgeOrder::Input);
    assert_eq!(
        out.committed[..2].to_vec(),
        vec![
            arc("a", "b", ArcProvenance::Fixed),
            arc("c", "d", ArcProvenance::Fixed),
        ]
    );
    assert_eq!(out.committed.len(), 2 + out.edges.len());
}

#[test]
fn empty_graph_commits_nothing() {
    let out = orientation::solve(&MixedGraph::new(), EdgeOrder::Input);
    assert!(out.committed.is_empty());
    assert!(out.decisions.is_empty());
}
