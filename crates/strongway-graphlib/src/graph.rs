//! Graph container APIs used by `strongway`.
//!
//! This module contains the core `Graph` container plus the connectivity algorithms
//! re-exported as `strongway_graphlib::alg`.
//!
//! Unlike a builder that creates endpoints on demand, [`Graph::set_arc`] refuses arcs whose
//! endpoints are not already nodes: a dangling arc in road data is a broken input, not
//! something later stages should paper over.

use rustc_hash::FxBuildHasher;
use std::cell::{Ref, RefCell};

mod adj_cache;
pub mod alg;
mod arc_key;
mod entries;
mod error;

use adj_cache::AdjCache;
use arc_key::ArcKeyView;
use entries::{ArcEntry, NodeEntry};

pub use arc_key::ArcKey;
pub use error::GraphError;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

#[derive(Debug, Clone)]
pub struct Graph<N, E> {
    nodes: Vec<NodeEntry<N>>,
    node_index: HashMap<String, usize>,

    arcs: Vec<ArcEntry<E>>,
    arc_index: HashMap<ArcKey, usize>,

    // Successor / predecessor queries go through a lazily rebuilt CSR cache. Interior
    // mutability keeps the query APIs on `&self`; the cache is only rebuilt when
    // `adj_gen` moved, which cannot happen while a `&self` borrow is live.
    adj_gen: u64,
    adj_cache: RefCell<AdjCache>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            node_index: HashMap::default(),
            arcs: Vec::new(),
            arc_index: HashMap::default(),
            adj_gen: 0,
            adj_cache: RefCell::new(AdjCache::stale()),
        }
    }

    fn invalidate_adj(&mut self) {
        self.adj_gen = self.adj_gen.wrapping_add(1);
    }

    fn ensure_adj(&self) -> Ref<'_, AdjCache> {
        if self.adj_cache.borrow().generation != self.adj_gen {
            *self.adj_cache.borrow_mut() =
                AdjCache::build(self.adj_gen, self.nodes.len(), &self.arcs);
        }
        self.adj_cache.borrow()
    }

    fn arc_index_of(&self, v: &str, w: &str) -> Option<usize> {
        self.arc_index.get(&ArcKeyView { v, w }).copied()
    }

    fn reindex_nodes_from(&mut self, start: usize) {
        for i in start..self.nodes.len() {
            let id = self.nodes[i].id.as_str();
            if let Some(ix) = self.node_index.get_mut(id) {
                *ix = i;
            }
        }
    }

    fn reindex_arcs_from(&mut self, start: usize) {
        for i in start..self.arcs.len() {
            let key = &self.arcs[i].key;
            if let Some(ix) = self.arc_index.get_mut(key) {
                *ix = i;
            }
        }
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Inserts a node, or overwrites the label of an existing one.
    ///
    /// Re-adding an id never changes its position in node order.
    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut Self {
        let id = id.into();
        if let Some(&idx) = self.node_index.get(&id) {
            self.nodes[idx].label = label;
            return self;
        }
        self.invalidate_adj();
        let idx = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            label,
        });
        self.node_index.insert(id, idx);
        self
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx].label)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        self.node_index
            .get(id)
            .copied()
            .map(move |idx| &mut self.nodes[idx].label)
    }

    /// Position of `id` in node insertion order.
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    pub fn for_each_node<F>(&self, mut f: F)
    where
        F: FnMut(&str, &N),
    {
        for n in &self.nodes {
            f(&n.id, &n.label);
        }
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn arcs(&self) -> impl Iterator<Item = &ArcKey> {
        self.arcs.iter().map(|a| &a.key)
    }

    /// Arcs with their labels, in arc order.
    pub fn arc_entries(&self) -> impl Iterator<Item = (&ArcKey, &E)> {
        self.arcs.iter().map(|a| (&a.key, &a.label))
    }

    pub fn arc_keys(&self) -> Vec<ArcKey> {
        self.arcs.iter().map(|a| a.key.clone()).collect()
    }

    pub fn for_each_arc<F>(&self, mut f: F)
    where
        F: FnMut(&ArcKey, &E),
    {
        for a in &self.arcs {
            f(&a.key, &a.label);
        }
    }

    /// Inserts the arc `v -> w`, or overwrites the label of the existing one (last write wins).
    ///
    /// Both endpoints must already be nodes of the graph.
    pub fn set_arc(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        label: E,
    ) -> Result<&mut Self, GraphError> {
        let v = v.into();
        let w = w.into();
        let (Some(v_ix), Some(w_ix)) = (self.node_index(&v), self.node_index(&w)) else {
            let missing = if self.has_node(&v) { w.clone() } else { v.clone() };
            return Err(GraphError::UnknownNode {
                from: v,
                to: w,
                missing,
            });
        };

        if let Some(idx) = self.arc_index_of(&v, &w) {
            self.arcs[idx].label = label;
            return Ok(self);
        }

        self.invalidate_adj();
        let key = ArcKey { v, w };
        let idx = self.arcs.len();
        self.arcs.push(ArcEntry {
            key: key.clone(),
            v_ix,
            w_ix,
            label,
        });
        self.arc_index.insert(key, idx);
        Ok(self)
    }

    pub fn has_arc(&self, v: &str, w: &str) -> bool {
        self.arc_index_of(v, w).is_some()
    }

    /// True when both `v -> w` and `w -> v` exist.
    pub fn is_bidirectional(&self, v: &str, w: &str) -> bool {
        self.has_arc(v, w) && self.has_arc(w, v)
    }

    pub fn arc(&self, v: &str, w: &str) -> Option<&E> {
        let idx = self.arc_index_of(v, w)?;
        Some(&self.arcs[idx].label)
    }

    pub fn arc_mut(&mut self, v: &str, w: &str) -> Option<&mut E> {
        let idx = self.arc_index_of(v, w)?;
        Some(&mut self.arcs[idx].label)
    }

    pub fn arc_by_key(&self, key: &ArcKey) -> Option<&E> {
        self.arc(&key.v, &key.w)
    }

    pub fn remove_arc(&mut self, v: &str, w: &str) -> bool {
        let Some(idx) = self.arc_index_of(v, w) else {
            return false;
        };
        self.invalidate_adj();
        let _ = self.arc_index.remove_entry(&self.arcs[idx].key);
        self.arcs.remove(idx);
        self.reindex_arcs_from(idx);
        true
    }

    /// Keeps only the arcs for which `f` returns true. Returns the number of arcs removed.
    pub fn retain_arcs<F>(&mut self, mut f: F) -> usize
    where
        F: FnMut(&ArcKey, &E) -> bool,
    {
        let before = self.arcs.len();
        self.arcs.retain(|a| f(&a.key, &a.label));
        let removed = before - self.arcs.len();
        if removed > 0 {
            self.invalidate_adj();
            self.arc_index.clear();
            for (i, a) in self.arcs.iter().enumerate() {
                self.arc_index.insert(a.key.clone(), i);
            }
        }
        removed
    }

    pub fn remove_node(&mut self, id: &str) -> bool {
        let Some(idx) = self.node_index.remove(id) else {
            return false;
        };

        self.invalidate_adj();
        self.nodes.remove(idx);
        self.reindex_nodes_from(idx);

        // Remove incident arcs.
        for a in &self.arcs {
            if a.v_ix == idx || a.w_ix == idx {
                let _ = self.arc_index.remove_entry(&a.key);
            }
        }
        self.arcs.retain(|a| a.v_ix != idx && a.w_ix != idx);
        for a in &mut self.arcs {
            if a.v_ix > idx {
                a.v_ix -= 1;
            }
            if a.w_ix > idx {
                a.w_ix -= 1;
            }
        }
        self.reindex_arcs_from(0);

        true
    }

    pub fn successors(&self, v: &str) -> Vec<&str> {
        let Some(&v_ix) = self.node_index.get(v) else {
            return Vec::new();
        };
        let cache = self.ensure_adj();
        cache
            .out_arcs(v_ix)
            .iter()
            .map(|&arc_ix| self.arcs[arc_ix].key.w.as_str())
            .collect()
    }

    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        let Some(&v_ix) = self.node_index.get(v) else {
            return Vec::new();
        };
        let cache = self.ensure_adj();
        cache
            .in_arcs(v_ix)
            .iter()
            .map(|&arc_ix| self.arcs[arc_ix].key.v.as_str())
            .collect()
    }

    /// Successors followed by predecessors, each neighbor reported once.
    pub fn neighbors(&self, v: &str) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for w in self.successors(v) {
            if !out.contains(&w) {
                out.push(w);
            }
        }
        for u in self.predecessors(v) {
            if !out.contains(&u) {
                out.push(u);
            }
        }
        out
    }

    pub fn out_arcs(&self, v: &str, w: Option<&str>) -> Vec<ArcKey> {
        let mut out: Vec<ArcKey> = Vec::new();
        self.for_each_out_arc(v, w, |key, _| out.push(key.clone()));
        out
    }

    pub fn in_arcs(&self, v: &str, u: Option<&str>) -> Vec<ArcKey> {
        let mut out: Vec<ArcKey> = Vec::new();
        self.for_each_in_arc(v, u, |key, _| out.push(key.clone()));
        out
    }

    pub fn for_each_out_arc<F>(&self, v: &str, w: Option<&str>, mut f: F)
    where
        F: FnMut(&ArcKey, &E),
    {
        let Some(&v_ix) = self.node_index.get(v) else {
            return;
        };
        let cache = self.ensure_adj();
        for &arc_ix in cache.out_arcs(v_ix) {
            let a = &self.arcs[arc_ix];
            if w.is_none_or(|w| a.key.w == w) {
                f(&a.key, &a.label);
            }
        }
    }

    pub fn for_each_in_arc<F>(&self, v: &str, u: Option<&str>, mut f: F)
    where
        F: FnMut(&ArcKey, &E),
    {
        let Some(&v_ix) = self.node_index.get(v) else {
            return;
        };
        let cache = self.ensure_adj();
        for &arc_ix in cache.in_arcs(v_ix) {
            let a = &self.arcs[arc_ix];
            if u.is_none_or(|u| a.key.v == u) {
                f(&a.key, &a.label);
            }
        }
    }

    /// Builds the subgraph induced by `keep`.
    ///
    /// Kept nodes stay in parent order, and every arc with both endpoints kept is copied in
    /// parent order with its label cloned. Ids in `keep` that are not nodes are ignored.
    pub fn induced_subgraph<'a, I>(&self, keep: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
        N: Clone,
        E: Clone,
    {
        let mut kept = vec![false; self.nodes.len()];
        for id in keep {
            if let Some(&ix) = self.node_index.get(id) {
                kept[ix] = true;
            }
        }

        let mut out: Self = Self::new();
        let mut remap = vec![usize::MAX; self.nodes.len()];
        for (ix, n) in self.nodes.iter().enumerate() {
            if !kept[ix] {
                continue;
            }
            remap[ix] = out.nodes.len();
            out.node_index.insert(n.id.clone(), out.nodes.len());
            out.nodes.push(n.clone());
        }
        for a in &self.arcs {
            if !(kept[a.v_ix] && kept[a.w_ix]) {
                continue;
            }
            out.arc_index.insert(a.key.clone(), out.arcs.len());
            out.arcs.push(ArcEntry {
                key: a.key.clone(),
                v_ix: remap[a.v_ix],
                w_ix: remap[a.w_ix],
                label: a.label.clone(),
            });
        }
        out
    }

    /// Induced subgraph on every node except those in `drop`.
    pub fn without_nodes<'a, I>(&self, drop: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
        N: Clone,
        E: Clone,
    {
        let dropped: HashSet<&str> = drop.into_iter().collect();
        let keep: Vec<&str> = self.nodes().filter(|id| !dropped.contains(id)).collect();
        self.induced_subgraph(keep)
    }
}
