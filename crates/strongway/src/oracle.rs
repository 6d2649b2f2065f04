//! Strong-connectivity queries.
//!
//! Thin wrappers over the Tarjan / Kosaraju routines in `graphlib::alg`, shaped for the two
//! ways the pipeline asks: "is this node set + arc list strongly connected?" and "give me the
//! largest strongly connected piece of this graph".

use crate::graphlib::alg::{self, IndexDigraph};
use crate::graphlib::Graph;
use rustc_hash::FxHashMap;

/// True iff every node reaches every other node through `arcs`. Vacuously true for 0 or 1
/// node. Arcs naming a node outside `nodes` are ignored.
pub fn is_strongly_connected<'a, I, A>(nodes: I, arcs: A) -> bool
where
    I: IntoIterator<Item = &'a str>,
    A: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    for id in nodes {
        let next = index.len();
        index.entry(id).or_insert(next);
    }
    let arcs = arcs
        .into_iter()
        .filter_map(|(v, w)| Some((*index.get(v)?, *index.get(w)?)));
    is_strongly_connected_indexed(index.len(), arcs)
}

/// Index-based variant used on the solver's hot path.
pub fn is_strongly_connected_indexed<A>(node_count: usize, arcs: A) -> bool
where
    A: IntoIterator<Item = (usize, usize)>,
{
    IndexDigraph::from_arcs(node_count, arcs).is_strongly_connected()
}

/// Induced subgraph on the largest strongly connected node set. Ties go to the component
/// holding the earliest-inserted node. Empty in, empty out.
pub fn largest_strongly_connected_component<N, E>(g: &Graph<N, E>) -> Graph<N, E>
where
    N: Clone,
    E: Clone,
{
    if g.is_empty() {
        return Graph::new();
    }
    let keep = alg::largest_scc(g);
    g.induced_subgraph(keep.iter().map(String::as_str))
}
