use strongway::model::ArcProvenance;
use strongway::oracle;
use strongway::pipeline::build_oriented_graph;
use strongway::{ArcAttrs, CommittedArc, MixedGraph, RoadNetwork};

#[test]
fn strong_connectivity_over_id_lists() {
    let nodes = ["a", "b", "c"];
    assert!(oracle::is_strongly_connected(
        nodes,
        [("a", "b"), ("b", "c"), ("c", "a")]
    ));
    assert!(!oracle::is_strongly_connected(
        nodes,
        [("a", "b"), ("b", "c"), ("a", "c")]
    ));
    // Arcs to unknown ids are ignored.
    assert!(!oracle::is_strongly_connected(
        ["a", "b"],
        [("a", "b"), ("b", "zz"), ("zz", "a")]
    ));
    let no_arcs: Vec<(&str, &str)> = Vec::new();
    assert!(oracle::is_strongly_connected(["solo"], no_arcs.clone()));
    assert!(oracle::is_strongly_connected(Vec::<&str>::new(), no_arcs));
}

#[test]
fn indexed_check_skips_out_of_range_arcs() {
    assert!(oracle::is_strongly_connected_indexed(2, [(0, 1), (1, 0), (1, 7)]));
    assert!(!oracle::is_strongly_connected_indexed(3, [(0, 1), (1, 0)]));
}

#[test]
fn largest_strong_component_keeps_attributes() {
    let g = RoadNetwork::default()
        .with_nodes(["p", "a", "b", "c"])
        .with_one_way("p", "a")
        .with_one_way("a", "b")
        .with_one_way("b", "c")
        .with_two_way("c", "a")
        .to_mixed_graph()
        .unwrap();

    let scc = oracle::largest_strongly_connected_component(&g);
    assert_eq!(scc.node_ids(), vec!["a", "b", "c"]);
    assert_eq!(scc.arc_count(), 4);
    assert_eq!(scc.arc("a", "b"), Some(&ArcAttrs::fixed()));
    assert_eq!(scc.arc("a", "c"), Some(&ArcAttrs::flexible()));

    assert!(oracle::largest_strongly_connected_component(&MixedGraph::new()).is_empty());
}

#[test]
fn resolved_arc_on_top_of_a_fixed_arc_keeps_fixed_attributes() {
    let g = RoadNetwork::default()
        .with_nodes(["a", "b"])
        .with_one_way("a", "b")
        .to_mixed_graph()
        .unwrap();
    let committed = [
        CommittedArc {
            from: "a".to_string(),
            to: "b".to_string(),
            provenance: ArcProvenance::Fixed,
        },
        CommittedArc {
            from: "a".to_string(),
            to: "b".to_string(),
            provenance: ArcProvenance::Resolved,
        },
        CommittedArc {
            from: "b".to_string(),
            to: "a".to_string(),
            provenance: ArcProvenance::Resolved,
        },
    ];

    let out = build_oriented_graph(&g, &committed);
    assert_eq!(out.arc_count(), 2);
    assert_eq!(out.arc("a", "b"), Some(&ArcAttrs::fixed()));
    assert_eq!(out.arc("b", "a"), Some(&ArcAttrs::resolved()));
}
