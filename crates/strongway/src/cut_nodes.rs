//! One-way cut node removal.
//!
//! A node whose fixed arcs all point in (or all point out), and which has no neighbor it is
//! joined to in both directions, has no way back out (or in) among its known connections. It
//! cannot sit on a directed cycle, so it cannot be part of any strong orientation.
//!
//! Classification looks at each node's incident arcs only. In [`CutNodeMode::SinglePass`]
//! the batch found in one scan is removed and detection stops, even if the removal turned a
//! neighbor into a new cut node; [`CutNodeMode::Fixpoint`] keeps scanning until none is left.
//! Either way the largest strongly connected component is extracted afterwards, with flexible
//! pairs still present in both directions.

use crate::model::MixedGraph;
use crate::options::CutNodeMode;
use crate::oracle;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CutDirection {
    AllIn,
    AllOut,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CutNode {
    pub node: String,
    pub direction: CutDirection,
    /// Detection pass that found the node, starting at 1.
    pub round: usize,
}

#[derive(Debug, Clone)]
pub struct CutNodeOutcome {
    pub graph: MixedGraph,
    pub removed: Vec<CutNode>,
    /// Detection passes that removed at least one node.
    pub rounds: usize,
}

/// Classifies `node`, or `None` when it is not a one-way cut node (or not in the graph).
pub fn classify(g: &MixedGraph, node: &str) -> Option<CutDirection> {
    let mut fixed_in = false;
    g.for_each_in_arc(node, None, |_, attrs| fixed_in |= attrs.oneway);
    let mut fixed_out = false;
    g.for_each_out_arc(node, None, |_, attrs| fixed_out |= attrs.oneway);

    if fixed_in == fixed_out {
        return None;
    }
    let two_way_neighbor = g
        .successors(node)
        .into_iter()
        .any(|m| g.has_arc(m, node));
    if two_way_neighbor {
        return None;
    }
    Some(if fixed_in {
        CutDirection::AllIn
    } else {
        CutDirection::AllOut
    })
}

/// Scans every node once, in node order.
pub fn detect(g: &MixedGraph, round: usize) -> Vec<CutNode> {
    g.nodes()
        .filter_map(|node| {
            classify(g, node).map(|direction| CutNode {
                node: node.to_string(),
                direction,
                round,
            })
        })
        .collect()
}

pub fn run(g: &MixedGraph, mode: CutNodeMode) -> CutNodeOutcome {
    if g.is_empty() {
        return CutNodeOutcome {
            graph: MixedGraph::new(),
            removed: Vec::new(),
            rounds: 0,
        };
    }

    let mut work = g.clone();
    let mut removed: Vec<CutNode> = Vec::new();
    let mut rounds = 0;
    loop {
        let found = detect(&work, rounds + 1);
        if found.is_empty() {
            break;
        }
        rounds += 1;
        tracing::debug!(round = rounds, count = found.len(), "one-way cut nodes");
        work = work.without_nodes(found.iter().map(|c| c.node.as_str()));
        removed.extend(found);
        if mode == CutNodeMode::SinglePass {
            break;
        }
    }

    let graph = oracle::largest_strongly_connected_component(&work);

    tracing::info!(
        cut_nodes = removed.len(),
        rounds,
        kept_nodes = graph.node_count(),
        dropped_nodes = g.node_count() - graph.node_count(),
        "cut node filter"
    );

    CutNodeOutcome {
        graph,
        removed,
        rounds,
    }
}
