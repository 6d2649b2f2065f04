//! Arc key types.
//!
//! An arc is an ordered `(v, w)` pair; at most one arc exists per ordered pair.

use std::hash::{Hash, Hasher};

#[derive(Clone, Copy, Hash)]
pub(in crate::graph) struct ArcKeyView<'a> {
    pub(in crate::graph) v: &'a str,
    pub(in crate::graph) w: &'a str,
}

impl<'a> hashbrown::Equivalent<ArcKey> for ArcKeyView<'a> {
    fn equivalent(&self, key: &ArcKey) -> bool {
        key.v == self.v && key.w == self.w
    }
}

#[derive(Debug, Clone, PartialOrd, Ord)]
pub struct ArcKey {
    pub v: String,
    pub w: String,
}

impl ArcKey {
    pub fn new(v: impl Into<String>, w: impl Into<String>) -> Self {
        Self {
            v: v.into(),
            w: w.into(),
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            v: self.w.clone(),
            w: self.v.clone(),
        }
    }
}

impl PartialEq for ArcKey {
    fn eq(&self, other: &Self) -> bool {
        self.v == other.v && self.w == other.w
    }
}

impl Eq for ArcKey {}

impl Hash for ArcKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.v.hash(state);
        self.w.hash(state);
    }
}
