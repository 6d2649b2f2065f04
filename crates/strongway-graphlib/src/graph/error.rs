//! Graph construction errors.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("arc {from} -> {to} references unknown node `{missing}`")]
    UnknownNode {
        from: String,
        to: String,
        missing: String,
    },
}
