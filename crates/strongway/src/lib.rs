//! Strong orientation of mixed road graphs.
//!
//! Given nodes joined by one-way (fixed) and two-way (flexible) connections, [`orient`] prunes
//! what can never be strongly connected, decides a direction for every two-way connection and
//! returns a fully directed, strongly connected graph together with an [`OrientationReport`].

pub use strongway_graphlib as graphlib;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod bridge_filter;
pub mod cut_nodes;
pub mod error;
pub mod model;
pub mod options;
pub mod oracle;
pub mod orientation;
pub mod pipeline;
pub mod report;

pub use error::{Error, Result};
pub use model::{
    ArcAttrs, ArcProvenance, MixedGraph, NodeAttrs, Position, RoadArc, RoadNetwork, RoadNode,
    build_mixed_graph,
};
pub use options::{CutNodeMode, EdgeOrder, OrientationOptions};
pub use orientation::CommittedArc;
pub use pipeline::{Orientation, orient};
pub use report::{OrientationReport, PipelineStatus};
