//! Adjacency cache used by [`Graph`](super::Graph).
//!
//! The filters query successors / predecessors of every node, and scanning all arcs each time
//! is O(E) per query. The cache stores arc indices in CSR form and is rebuilt lazily after any
//! structural mutation.

use super::entries::ArcEntry;

#[derive(Debug, Clone)]
pub(in crate::graph) struct AdjCache {
    pub(in crate::graph) generation: u64,
    pub(in crate::graph) out_offsets: Vec<usize>,
    pub(in crate::graph) out_arcs: Vec<usize>,
    pub(in crate::graph) in_offsets: Vec<usize>,
    pub(in crate::graph) in_arcs: Vec<usize>,
}

impl AdjCache {
    pub(in crate::graph) fn stale() -> Self {
        Self {
            generation: u64::MAX,
            out_offsets: vec![0],
            out_arcs: Vec::new(),
            in_offsets: vec![0],
            in_arcs: Vec::new(),
        }
    }

    pub(in crate::graph) fn build<E>(generation: u64, node_count: usize, arcs: &[ArcEntry<E>]) -> Self {
        let mut out_offsets = vec![0usize; node_count + 1];
        let mut in_offsets = vec![0usize; node_count + 1];
        for a in arcs {
            out_offsets[a.v_ix + 1] += 1;
            in_offsets[a.w_ix + 1] += 1;
        }
        for i in 0..node_count {
            out_offsets[i + 1] += out_offsets[i];
            in_offsets[i + 1] += in_offsets[i];
        }

        let mut out_fill = out_offsets.clone();
        let mut in_fill = in_offsets.clone();
        let mut out_arcs = vec![0usize; arcs.len()];
        let mut in_arcs = vec![0usize; arcs.len()];
        for (arc_ix, a) in arcs.iter().enumerate() {
            out_arcs[out_fill[a.v_ix]] = arc_ix;
            out_fill[a.v_ix] += 1;
            in_arcs[in_fill[a.w_ix]] = arc_ix;
            in_fill[a.w_ix] += 1;
        }

        Self {
            generation,
            out_offsets,
            out_arcs,
            in_offsets,
            in_arcs,
        }
    }

    pub(in crate::graph) fn out_arcs(&self, v_ix: usize) -> &[usize] {
        let start = self.out_offsets[v_ix];
        let end = self.out_offsets[v_ix + 1];
        &self.out_arcs[start..end]
    }

    pub(in crate::graph) fn in_arcs(&self, v_ix: usize) -> &[usize] {
        let start = self.in_offsets[v_ix];
        let end = self.in_offsets[v_ix + 1];
        &self.in_arcs[start..end]
    }
}
