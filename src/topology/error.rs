//! Errors raised while building or exporting a topology.

use crate::config::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error(transparent)]
    Config(#[from] ValidationError),

    /// The classifier was handed a graph that was never repaired for connectivity
    #[error("Cannot classify a disconnected graph ({components} components across {nodes} nodes)")]
    Disconnected { components: usize, nodes: usize },

    #[error("Failed to write edge list to '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
