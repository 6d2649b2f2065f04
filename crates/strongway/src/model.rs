//! Node and arc records of the mixed road graph, and the road-network interchange format.
//!
//! A road network arrives as plain nodes plus arcs flagged `oneway`. Two-way roads normally
//! show up as a pair of opposing arcs; both become `flexible` arcs of the [`MixedGraph`] and
//! collapse into one logical edge once the solver commits a direction.

use crate::error::{Error, Result};
use crate::graphlib::Graph;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Attributes carried through every stage untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeAttrs {
    pub position: Option<Position>,
    pub label: Option<String>,
}

/// Where an arc came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArcProvenance {
    /// A one-way connection of the source data. Never reoriented.
    Fixed,
    /// Half of a two-way connection whose direction is not decided yet.
    Flexible,
    /// A two-way connection the solver committed to this direction.
    Resolved,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ArcAttrs {
    pub oneway: bool,
    pub flexible: bool,
    pub resolved: bool,
}

impl ArcAttrs {
    pub const fn fixed() -> Self {
        Self {
            oneway: true,
            flexible: false,
            resolved: false,
        }
    }

    pub const fn flexible() -> Self {
        Self {
            oneway: false,
            flexible: true,
            resolved: false,
        }
    }

    pub const fn resolved() -> Self {
        Self {
            oneway: false,
            flexible: false,
            resolved: true,
        }
    }

    pub fn provenance(&self) -> ArcProvenance {
        if self.flexible {
            ArcProvenance::Flexible
        } else if self.resolved {
            ArcProvenance::Resolved
        } else {
            ArcProvenance::Fixed
        }
    }
}

pub type MixedGraph = Graph<NodeAttrs, ArcAttrs>;

/// OSM node ids are integers; hand-written fixtures tend to use strings. Accept both.
fn node_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Signed(i64),
        Unsigned(u64),
        Text(String),
    }

    Ok(match Repr::deserialize(deserializer)? {
        Repr::Signed(v) => v.to_string(),
        Repr::Unsigned(v) => v.to_string(),
        Repr::Text(v) => v,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadNode {
    #[serde(deserialize_with = "node_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadArc {
    #[serde(deserialize_with = "node_id")]
    pub from: String,
    #[serde(deserialize_with = "node_id")]
    pub to: String,
    #[serde(default)]
    pub oneway: bool,
}

/// A road network as handed over by the graph source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadNetwork {
    #[serde(default)]
    pub nodes: Vec<RoadNode>,
    #[serde(default)]
    pub arcs: Vec<RoadArc>,
}

impl RoadNetwork {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidNetwork {
            message: e.to_string(),
        })
    }

    pub fn with_node(mut self, id: impl Into<String>) -> Self {
        self.nodes.push(RoadNode {
            id: id.into(),
            x: None,
            y: None,
            label: None,
        });
        self
    }

    pub fn with_nodes<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ids.into_iter().fold(self, |net, id| net.with_node(id))
    }

    pub fn with_one_way(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.arcs.push(RoadArc {
            from: from.into(),
            to: to.into(),
            oneway: true,
        });
        self
    }

    /// Adds a two-way road as the pair of opposing non-oneway arcs.
    pub fn with_two_way(mut self, u: impl Into<String>, v: impl Into<String>) -> Self {
        let u = u.into();
        let v = v.into();
        self.arcs.push(RoadArc {
            from: u.clone(),
            to: v.clone(),
            oneway: false,
        });
        self.arcs.push(RoadArc {
            from: v,
            to: u,
            oneway: false,
        });
        self
    }

    pub fn to_mixed_graph(&self) -> Result<MixedGraph> {
        build_mixed_graph(self)
    }
}

/// Builds the mixed graph: every arc is fixed when `oneway`, flexible otherwise.
///
/// Fails on the first arc naming a node the network does not declare.
pub fn build_mixed_graph(network: &RoadNetwork) -> Result<MixedGraph> {
    let mut g = MixedGraph::new();
    for n in &network.nodes {
        let position = match (n.x, n.y) {
            (Some(x), Some(y)) => Some(Position { x, y }),
            _ => None,
        };
        g.set_node(
            n.id.clone(),
            NodeAttrs {
                position,
                label: n.label.clone(),
            },
        );
    }
    for a in &network.arcs {
        let attrs = if a.oneway {
            ArcAttrs::fixed()
        } else {
            ArcAttrs::flexible()
        };
        g.set_arc(a.from.clone(), a.to.clone(), attrs)?;
    }
    Ok(g)
}
