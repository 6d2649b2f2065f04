//! Bridge removal.
//!
//! A bridge of the undirected topology can never lie on a directed cycle, whichever way it is
//! driven, so every bridge is cut outright (both arcs, fixed or flexible) and only the largest
//! remaining connected piece is kept.
//!
//! This approximates 2-edge-connectivity; later stages may remove nodes and expose new bridges.

use crate::graphlib::alg;
use crate::model::MixedGraph;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone)]
pub struct BridgeFilterOutcome {
    pub graph: MixedGraph,
    /// Bridges as found, `(parent, child)` in the order the DFS retreats over them.
    pub bridges: Vec<(String, String)>,
    pub arcs_removed: usize,
}

pub fn run(g: &MixedGraph) -> BridgeFilterOutcome {
    if g.is_empty() {
        return BridgeFilterOutcome {
            graph: MixedGraph::new(),
            bridges: Vec::new(),
            arcs_removed: 0,
        };
    }

    let bridges = alg::bridges(g);
    let mut work = g.clone();
    let arcs_removed = {
        let cut: FxHashSet<(&str, &str)> = bridges
            .iter()
            .flat_map(|(u, v)| [(u.as_str(), v.as_str()), (v.as_str(), u.as_str())])
            .collect();
        work.retain_arcs(|key, _| !cut.contains(&(key.v.as_str(), key.w.as_str())))
    };

    let keep = alg::largest_component(&work);
    let graph = work.induced_subgraph(keep.iter().map(String::as_str));

    tracing::info!(
        bridges = bridges.len(),
        arcs_removed,
        kept_nodes = graph.node_count(),
        dropped_nodes = g.node_count() - graph.node_count(),
        "bridge filter"
    );

    BridgeFilterOutcome {
        graph,
        bridges,
        arcs_removed,
    }
}
