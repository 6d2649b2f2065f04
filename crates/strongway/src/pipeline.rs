//! The full orientation pipeline: bridges, cut nodes, greedy orientation, verification.
//!
//! Each stage reads one graph value and produces a new one; the input graph is never
//! modified.

use crate::bridge_filter;
use crate::cut_nodes;
use crate::graphlib::alg;
use crate::model::{ArcAttrs, ArcProvenance, MixedGraph};
use crate::options::OrientationOptions;
use crate::oracle;
use crate::orientation::{self, CommittedArc};
use crate::report::{OrientationReport, PipelineStatus};

#[derive(Debug, Clone)]
pub struct Orientation {
    /// The strongly connected result handed to consumers.
    pub graph: MixedGraph,
    /// The graph after bridge and cut-node filtering, before orientation.
    pub filtered: MixedGraph,
    pub committed: Vec<CommittedArc>,
    pub report: OrientationReport,
}

impl Orientation {
    pub fn status(&self) -> PipelineStatus {
        self.report.status
    }
}

/// Builds the directed graph of `committed` over the nodes of `filtered`.
///
/// Fixed arcs keep their attributes from `filtered`. A resolved arc that duplicates a fixed
/// arc of the same direction is dropped so the fixed provenance survives.
pub fn build_oriented_graph(filtered: &MixedGraph, committed: &[CommittedArc]) -> MixedGraph {
    let mut g = MixedGraph::new();
    filtered.for_each_node(|id, attrs| {
        g.set_node(id, attrs.clone());
    });

    for arc in committed {
        let attrs = match arc.provenance {
            ArcProvenance::Resolved => {
                if g.has_arc(&arc.from, &arc.to) {
                    continue;
                }
                ArcAttrs::resolved()
            }
            ArcProvenance::Fixed | ArcProvenance::Flexible => filtered
                .arc(&arc.from, &arc.to)
                .copied()
                .unwrap_or_else(ArcAttrs::fixed),
        };
        if let Err(err) = g.set_arc(arc.from.as_str(), arc.to.as_str(), attrs) {
            tracing::warn!(%err, "dropping committed arc outside the filtered graph");
        }
    }
    g
}

pub fn orient(input: &MixedGraph, options: &OrientationOptions) -> Orientation {
    let mut report = OrientationReport {
        input_nodes: input.node_count(),
        input_arcs: input.arc_count(),
        ..Default::default()
    };

    let bridged = bridge_filter::run(input);
    report.bridge_component_nodes = bridged.graph.node_count();
    report.bridge_arcs_removed = bridged.arcs_removed;
    report.bridges_removed = bridged.bridges;

    let cut = cut_nodes::run(&bridged.graph, options.cut_node_mode);
    report.cut_nodes_removed = cut.removed;
    report.cut_node_rounds = cut.rounds;

    let filtered = cut.graph;
    report.filtered_nodes = filtered.node_count();
    report.filtered_arcs = filtered.arc_count();

    let solved = orientation::solve(&filtered, options.edge_order);
    report.fixed_arcs = solved.committed.len() - solved.edges.len();
    report.flexible_edges = solved.edges.len();
    report.resolved_forward = solved.forward;
    report.resolved_reversed = solved.reversed;

    let oriented = build_oriented_graph(&filtered, &solved.committed);
    let graph = if alg::is_strongly_connected(&oriented) {
        tracing::info!(nodes = oriented.node_count(), "orientation verified");
        oriented
    } else {
        report.status = PipelineStatus::Degraded;
        let fallback = oracle::largest_strongly_connected_component(&oriented);
        tracing::warn!(
            nodes = oriented.node_count(),
            kept = fallback.node_count(),
            "orientation not strongly connected; keeping largest strongly connected component"
        );
        fallback
    };
    report.final_nodes = graph.node_count();
    report.final_arcs = graph.arc_count();

    Orientation {
        graph,
        filtered,
        committed: solved.committed,
        report,
    }
}
