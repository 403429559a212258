//! Network topology module.
//!
//! This module contains the random topology generator: graph storage,
//! randomized construction with connectivity repair, spanning-tree based
//! switch/host classification and the engine that chains them together.

pub mod types;
pub mod graph;
pub mod disjoint_set;
pub mod error;
pub mod builder;
pub mod classifier;
pub mod pendant;
pub mod engine;
pub mod stats;

// Re-export key types and functions for easier access
pub use types::{ClassifiedEdge, Edge, Node, NodeId, Role};
pub use graph::GraphModel;
pub use disjoint_set::DisjointSetForest;
pub use error::TopologyError;
pub use builder::{build_random_graph, RandomTopologyBuilder};
pub use classifier::{Classification, SpanningTreeClassifier};
pub use pendant::PendantHostAttacher;
pub use engine::{Topology, TopologyEngine};
pub use stats::{DegreeStats, TopologySummary};
