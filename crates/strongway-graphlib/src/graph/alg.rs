//! Connectivity algorithms over [`Graph`] and over compact index digraphs.
//!
//! Every traversal here is iterative: road networks routinely have tens of thousands of
//! nodes, well past what a recursive DFS can survive on a default thread stack.

use super::{Graph, HashSet};

const UNVISITED: usize = usize::MAX;

/// A directed graph over node indices `0..node_count`, stored as forward and reverse CSR.
///
/// This is the representation the orientation hot path rebuilds for every feasibility check,
/// so it avoids string keys and hashing entirely.
#[derive(Debug, Clone)]
pub struct IndexDigraph {
    out_offsets: Vec<usize>,
    out_targets: Vec<usize>,
    in_offsets: Vec<usize>,
    in_sources: Vec<usize>,
}

impl IndexDigraph {
    /// Builds the digraph from `(from, to)` index pairs. Pairs naming an index outside
    /// `0..node_count` are skipped.
    pub fn from_arcs<I>(node_count: usize, arcs: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let arcs: Vec<(usize, usize)> = arcs
            .into_iter()
            .filter(|&(v, w)| v < node_count && w < node_count)
            .collect();

        let mut out_offsets = vec![0usize; node_count + 1];
        let mut in_offsets = vec![0usize; node_count + 1];
        for &(v, w) in &arcs {
            out_offsets[v + 1] += 1;
            in_offsets[w + 1] += 1;
        }
        for i in 0..node_count {
            out_offsets[i + 1] += out_offsets[i];
            in_offsets[i + 1] += in_offsets[i];
        }

        let mut out_fill = out_offsets.clone();
        let mut in_fill = in_offsets.clone();
        let mut out_targets = vec![0usize; arcs.len()];
        let mut in_sources = vec![0usize; arcs.len()];
        for &(v, w) in &arcs {
            out_targets[out_fill[v]] = w;
            out_fill[v] += 1;
            in_sources[in_fill[w]] = v;
            in_fill[w] += 1;
        }

        Self {
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
        }
    }

    pub fn from_graph<N, E>(g: &Graph<N, E>) -> Self {
        Self::from_arcs(g.node_count(), g.arcs.iter().map(|a| (a.v_ix, a.w_ix)))
    }

    pub fn node_count(&self) -> usize {
        self.out_offsets.len() - 1
    }

    pub fn arc_count(&self) -> usize {
        self.out_targets.len()
    }

    pub fn successors(&self, v: usize) -> &[usize] {
        &self.out_targets[self.out_offsets[v]..self.out_offsets[v + 1]]
    }

    pub fn predecessors(&self, v: usize) -> &[usize] {
        &self.in_sources[self.in_offsets[v]..self.in_offsets[v + 1]]
    }

    /// Number of nodes reachable from `root` (including `root`), following arcs forward or
    /// backward.
    fn reach_count(&self, root: usize, backward: bool) -> usize {
        let mut seen = vec![false; self.node_count()];
        let mut stack = vec![root];
        seen[root] = true;
        let mut count = 1;
        while let Some(v) = stack.pop() {
            let next = if backward {
                self.predecessors(v)
            } else {
                self.successors(v)
            };
            for &w in next {
                if !seen[w] {
                    seen[w] = true;
                    count += 1;
                    stack.push(w);
                }
            }
        }
        count
    }

    /// Every node reaches every other node. Vacuously true for 0 or 1 node.
    ///
    /// Kosaraju's single-root check: node 0 must reach everything, and everything must reach
    /// node 0.
    pub fn is_strongly_connected(&self) -> bool {
        let n = self.node_count();
        if n <= 1 {
            return true;
        }
        self.reach_count(0, false) == n && self.reach_count(0, true) == n
    }

    /// Strongly connected components (Tarjan), each listed in ascending index order.
    ///
    /// Components are emitted in Tarjan's completion order (reverse topological order of the
    /// condensation).
    pub fn tarjan(&self) -> Vec<Vec<usize>> {
        let n = self.node_count();
        let mut index = vec![UNVISITED; n];
        let mut lowlink = vec![0usize; n];
        let mut on_stack = vec![false; n];
        let mut stack: Vec<usize> = Vec::new();
        // (node, offset of the next successor to visit)
        let mut call: Vec<(usize, usize)> = Vec::new();
        let mut next_index = 0usize;
        let mut sccs: Vec<Vec<usize>> = Vec::new();

        for root in 0..n {
            if index[root] != UNVISITED {
                continue;
            }
            index[root] = next_index;
            lowlink[root] = next_index;
            next_index += 1;
            stack.push(root);
            on_stack[root] = true;
            call.push((root, 0));

            while let Some(frame) = call.last_mut() {
                let v = frame.0;
                let succ = self.successors(v);
                if frame.1 < succ.len() {
                    let w = succ[frame.1];
                    frame.1 += 1;
                    if index[w] == UNVISITED {
                        index[w] = next_index;
                        lowlink[w] = next_index;
                        next_index += 1;
                        stack.push(w);
                        on_stack[w] = true;
                        call.push((w, 0));
                    } else if on_stack[w] {
                        lowlink[v] = lowlink[v].min(index[w]);
                    }
                    continue;
                }

                call.pop();
                if let Some(&(parent, _)) = call.last() {
                    lowlink[parent] = lowlink[parent].min(lowlink[v]);
                }
                if lowlink[v] == index[v] {
                    let mut scc: Vec<usize> = Vec::new();
                    while let Some(w) = stack.pop() {
                        on_stack[w] = false;
                        scc.push(w);
                        if w == v {
                            break;
                        }
                    }
                    scc.sort_unstable();
                    sccs.push(scc);
                }
            }
        }

        sccs
    }
}

/// Picks the largest set. Ties go to the set holding the smallest index, i.e. the
/// earliest-inserted node. Each set must be sorted ascending.
pub fn largest_index_set(sets: Vec<Vec<usize>>) -> Vec<usize> {
    let mut best: Option<Vec<usize>> = None;
    for set in sets {
        let Some(&first) = set.first() else {
            continue;
        };
        let better = match &best {
            None => true,
            Some(b) => set.len() > b.len() || (set.len() == b.len() && Some(&first) < b.first()),
        };
        if better {
            best = Some(set);
        }
    }
    best.unwrap_or_default()
}

fn ids_of<N, E>(g: &Graph<N, E>, ixs: &[usize]) -> Vec<String> {
    ixs.iter().map(|&ix| g.nodes[ix].id.clone()).collect()
}

fn component_indices<N, E>(g: &Graph<N, E>) -> Vec<Vec<usize>> {
    let n = g.node_count();
    let cache = g.ensure_adj();
    let mut seen = vec![false; n];
    let mut out: Vec<Vec<usize>> = Vec::new();

    for start in 0..n {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut comp: Vec<usize> = vec![start];
        let mut stack: Vec<usize> = vec![start];
        while let Some(v) = stack.pop() {
            let out_nbrs = cache.out_arcs(v).iter().map(|&a| g.arcs[a].w_ix);
            let in_nbrs = cache.in_arcs(v).iter().map(|&a| g.arcs[a].v_ix);
            for w in out_nbrs.chain(in_nbrs) {
                if !seen[w] {
                    seen[w] = true;
                    comp.push(w);
                    stack.push(w);
                }
            }
        }
        comp.sort_unstable();
        out.push(comp);
    }

    out
}

/// Weakly connected components (arc direction ignored), ordered by their earliest node and
/// each listed in node insertion order.
pub fn components<N, E>(g: &Graph<N, E>) -> Vec<Vec<String>> {
    component_indices(g)
        .iter()
        .map(|comp| ids_of(g, comp))
        .collect()
}

/// The largest weakly connected component; empty for an empty graph.
pub fn largest_component<N, E>(g: &Graph<N, E>) -> Vec<String> {
    ids_of(g, &largest_index_set(component_indices(g)))
}

/// Strongly connected components, each listed in node insertion order.
pub fn tarjan<N, E>(g: &Graph<N, E>) -> Vec<Vec<String>> {
    IndexDigraph::from_graph(g)
        .tarjan()
        .iter()
        .map(|scc| ids_of(g, scc))
        .collect()
}

/// The largest strongly connected component; empty for an empty graph.
pub fn largest_scc<N, E>(g: &Graph<N, E>) -> Vec<String> {
    ids_of(g, &largest_index_set(IndexDigraph::from_graph(g).tarjan()))
}

pub fn is_strongly_connected<N, E>(g: &Graph<N, E>) -> bool {
    IndexDigraph::from_graph(g).is_strongly_connected()
}

/// Bridges of the undirected topology underlying `g`.
///
/// Each arc contributes one undirected edge between its endpoints regardless of direction;
/// antiparallel arcs collapse into a single edge and self-loops are ignored. Bridges are
/// reported as `(parent, child)` pairs of the DFS tree, in the order the DFS retreats over them.
pub fn bridges<N, E>(g: &Graph<N, E>) -> Vec<(String, String)> {
    let n = g.node_count();

    let mut seen_edges: HashSet<(usize, usize)> = HashSet::default();
    let mut edges: Vec<(usize, usize)> = Vec::new();
    for a in &g.arcs {
        if a.v_ix == a.w_ix {
            continue;
        }
        let pair = (a.v_ix.min(a.w_ix), a.v_ix.max(a.w_ix));
        if seen_edges.insert(pair) {
            edges.push(pair);
        }
    }

    // Undirected CSR of (neighbor, edge id).
    let mut offsets = vec![0usize; n + 1];
    for &(u, v) in &edges {
        offsets[u + 1] += 1;
        offsets[v + 1] += 1;
    }
    for i in 0..n {
        offsets[i + 1] += offsets[i];
    }
    let mut fill = offsets.clone();
    let mut incident = vec![(0usize, 0usize); edges.len() * 2];
    for (e, &(u, v)) in edges.iter().enumerate() {
        incident[fill[u]] = (v, e);
        fill[u] += 1;
        incident[fill[v]] = (u, e);
        fill[v] += 1;
    }

    let mut disc = vec![UNVISITED; n];
    let mut low = vec![0usize; n];
    let mut time = 0usize;
    // (node, tree edge used to reach it, offset of the next incident edge)
    let mut call: Vec<(usize, usize, usize)> = Vec::new();
    let mut out: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if disc[root] != UNVISITED {
            continue;
        }
        disc[root] = time;
        low[root] = time;
        time += 1;
        call.push((root, UNVISITED, offsets[root]));

        while let Some(frame) = call.last_mut() {
            let (v, tree_edge) = (frame.0, frame.1);
            if frame.2 < offsets[v + 1] {
                let (w, e) = incident[frame.2];
                frame.2 += 1;
                if e == tree_edge {
                    continue;
                }
                if disc[w] == UNVISITED {
                    disc[w] = time;
                    low[w] = time;
                    time += 1;
                    call.push((w, e, offsets[w]));
                } else {
                    low[v] = low[v].min(disc[w]);
                }
                continue;
            }

            call.pop();
            if let Some(&(parent, _, _)) = call.last() {
                low[parent] = low[parent].min(low[v]);
                if low[v] > disc[parent] {
                    out.push((parent, v));
                }
            }
        }
    }

    out.into_iter()
        .map(|(u, v)| (g.nodes[u].id.clone(), g.nodes[v].id.clone()))
        .collect()
}
