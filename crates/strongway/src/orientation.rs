//! Greedy orientation of flexible edges.
//!
//! Edges are decided one at a time, in a fixed order. Edge `i` is tried as `u -> v` against
//! the arcs committed so far plus both directions of every edge after it (the optimistic
//! relaxation: later edges may still go either way). If that keeps the graph strongly
//! connected, `u -> v` is committed; otherwise `v -> u` is committed without a second test.
//! Decisions are never revisited, so the loop is strictly sequential.

use crate::graphlib::ArcKey;
use crate::model::{ArcProvenance, MixedGraph};
use crate::options::EdgeOrder;
use crate::oracle;
use rustc_hash::FxHashSet;
use serde::Serialize;

/// One two-way connection, in the direction it is tried first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FlexibleEdge {
    pub u: String,
    pub v: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decision {
    Forward,
    Reversed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommittedArc {
    pub from: String,
    pub to: String,
    pub provenance: ArcProvenance,
}

#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Every non-flexible arc, in arc order.
    pub fixed: Vec<ArcKey>,
    pub flexible: Vec<FlexibleEdge>,
}

#[derive(Debug, Clone, Default)]
pub struct OrientationOutcome {
    /// Fixed arcs first (arc order), then one resolved arc per flexible edge (edge order).
    pub committed: Vec<CommittedArc>,
    pub edges: Vec<FlexibleEdge>,
    pub decisions: Vec<Decision>,
    pub forward: usize,
    pub reversed: usize,
}

/// Splits the arcs of `g` into fixed arcs and logical flexible edges.
///
/// The two arcs of a flexible pair yield one edge. With [`EdgeOrder::Input`] edges follow the
/// first-seen arc and keep its direction; with [`EdgeOrder::Lexicographic`] they are sorted
/// by endpoint ids and tried as `min -> max`.
pub fn partition(g: &MixedGraph, order: EdgeOrder) -> Partition {
    let mut out = Partition::default();
    let mut seen: FxHashSet<(&str, &str)> = FxHashSet::default();

    for (key, attrs) in g.arc_entries() {
        if !attrs.flexible {
            out.fixed.push(key.clone());
            continue;
        }
        let (v, w) = (key.v.as_str(), key.w.as_str());
        if !seen.insert((v.min(w), v.max(w))) {
            continue;
        }
        let edge = match order {
            EdgeOrder::Input => FlexibleEdge {
                u: key.v.clone(),
                v: key.w.clone(),
            },
            EdgeOrder::Lexicographic => FlexibleEdge {
                u: v.min(w).to_string(),
                v: v.max(w).to_string(),
            },
        };
        out.flexible.push(edge);
    }

    if order == EdgeOrder::Lexicographic {
        out.flexible.sort();
    }
    out
}

pub fn flexible_edges(g: &MixedGraph, order: EdgeOrder) -> Vec<FlexibleEdge> {
    partition(g, order).flexible
}

pub fn solve(g: &MixedGraph, order: EdgeOrder) -> OrientationOutcome {
    let Partition { fixed, flexible } = partition(g, order);
    let n = g.node_count();
    let ix = |id: &str| g.node_index(id).unwrap_or(usize::MAX);

    let mut committed: Vec<CommittedArc> = Vec::with_capacity(fixed.len() + flexible.len());
    let mut committed_ix: Vec<(usize, usize)> = Vec::with_capacity(fixed.len() + flexible.len());
    for key in &fixed {
        let provenance = g
            .arc_by_key(key)
            .map(|attrs| attrs.provenance())
            .unwrap_or(ArcProvenance::Fixed);
        committed.push(CommittedArc {
            from: key.v.clone(),
            to: key.w.clone(),
            provenance,
        });
        committed_ix.push((ix(&key.v), ix(&key.w)));
    }

    let edges_ix: Vec<(usize, usize)> = flexible.iter().map(|e| (ix(&e.u), ix(&e.v))).collect();
    let mut decisions: Vec<Decision> = Vec::with_capacity(flexible.len());

    tracing::info!(
        fixed = fixed.len(),
        flexible = flexible.len(),
        "orienting flexible edges"
    );

    for (i, edge) in flexible.iter().enumerate() {
        let (u, v) = edges_ix[i];
        let undecided = edges_ix[i + 1..]
            .iter()
            .flat_map(|&(x, y)| [(x, y), (y, x)]);
        let trial = committed_ix
            .iter()
            .copied()
            .chain(std::iter::once((u, v)))
            .chain(undecided);

        let (decision, from, to) = if oracle::is_strongly_connected_indexed(n, trial) {
            (Decision::Forward, &edge.u, &edge.v)
        } else {
            (Decision::Reversed, &edge.v, &edge.u)
        };
        tracing::debug!(from = %from, to = %to, ?decision, "committed");

        committed_ix.push(match decision {
            Decision::Forward => (u, v),
            Decision::Reversed => (v, u),
        });
        committed.push(CommittedArc {
            from: from.clone(),
            to: to.clone(),
            provenance: ArcProvenance::Resolved,
        });
        decisions.push(decision);
    }

    let forward = decisions
        .iter()
        .filter(|d| **d == Decision::Forward)
        .count();
    let reversed = decisions.len() - forward;
    tracing::info!(forward, reversed, "flexible edges resolved");

    OrientationOutcome {
        committed,
        edges: flexible,
        decisions,
        forward,
        reversed,
    }
}
