//! Structured pipeline report.

use crate::cut_nodes::CutNode;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineStatus {
    /// The committed orientation verified strongly connected on the first try.
    #[default]
    Oriented,
    /// Verification failed; the result is the largest strongly connected piece of the
    /// committed orientation.
    Degraded,
}

/// Per-stage counts of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationReport {
    pub input_nodes: usize,
    pub input_arcs: usize,

    pub bridges_removed: Vec<(String, String)>,
    pub bridge_arcs_removed: usize,
    pub bridge_component_nodes: usize,

    pub cut_nodes_removed: Vec<CutNode>,
    pub cut_node_rounds: usize,

    pub filtered_nodes: usize,
    pub filtered_arcs: usize,

    pub fixed_arcs: usize,
    pub flexible_edges: usize,
    pub resolved_forward: usize,
    pub resolved_reversed: usize,

    pub final_nodes: usize,
    pub final_arcs: usize,
    pub status: PipelineStatus,
}

impl OrientationReport {
    pub fn is_degraded(&self) -> bool {
        self.status == PipelineStatus::Degraded
    }

    pub fn nodes_pruned(&self) -> usize {
        self.input_nodes - self.final_nodes
    }
}
