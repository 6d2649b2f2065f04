//! Pipeline configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How one-way cut nodes are pruned before the strongly connected extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CutNodeMode {
    /// Detect once, remove the whole batch, stop.
    #[default]
    SinglePass,
    /// Repeat detection and removal until no cut node is left. Removing a cut node can turn a
    /// neighbor into one, so this may prune more than `SinglePass`.
    Fixpoint,
}

impl FromStr for CutNodeMode {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single-pass" | "single" => Ok(Self::SinglePass),
            "fixpoint" => Ok(Self::Fixpoint),
            _ => Err(()),
        }
    }
}

/// Order in which flexible edges are decided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeOrder {
    /// First-seen arc order; each edge is tried in the direction it was first seen.
    #[default]
    Input,
    /// Sorted by `(min(u, v), max(u, v))`; each edge is tried as `min -> max`.
    Lexicographic,
}

impl FromStr for EdgeOrder {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "input" => Ok(Self::Input),
            "lexicographic" | "lex" => Ok(Self::Lexicographic),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct OrientationOptions {
    pub cut_node_mode: CutNodeMode,
    pub edge_order: EdgeOrder,
}

impl OrientationOptions {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidOptions {
            message: e.to_string(),
        })
    }

    pub fn with_cut_node_mode(mut self, mode: CutNodeMode) -> Self {
        self.cut_node_mode = mode;
        self
    }

    pub fn with_edge_order(mut self, order: EdgeOrder) -> Self {
        self.edge_order = order;
        self
    }
}
