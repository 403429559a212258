//! # Topogen - Random switch/host topologies for network simulations
//!
//! This library synthesizes random, connected network topologies made of
//! switches and hosts, for use by simulators and graph visualization tools.
//!
//! ## Overview
//!
//! Given a node count, an edge probability and a host probability, Topogen
//! produces a topology that is connected, never links two hosts directly, and
//! normally contains at least two hosts. Generation is driven by an injected
//! random generator, so any topology can be reproduced from its seed.
//!
//! ## Key Features
//!
//! - **Random Construction**: Independent per-pair edge sampling
//! - **Connectivity Repair**: Isolated nodes and orphan components are joined
//!   to the main component with single random edges
//! - **Spanning-Tree Classification**: Nodes whose links all lie on a random
//!   Kruskal tree stay switches; nodes with redundant links may become hosts
//! - **Pendant Hosts**: Alternate strategy that hangs leaf hosts off switches
//! - **Batch Generation**: Independent topologies built in parallel
//!
//! ## Architecture
//!
//! - `config`: Configuration structures and validation errors
//! - `config_loader`: YAML loading and command-line overrides
//! - `topology`: Graph model, builder, classifier and engine
//! - `export`: Edge-list output
//! - `utils`: Validation helpers
//!
//! ## Example Usage
//!
//! ```rust
//! use topogen::config::TopologyConfig;
//! use topogen::topology::TopologyEngine;
//!
//! let engine = TopologyEngine::new(TopologyConfig::new(8, 0.3, 0.5))?;
//! let topology = engine.build_seeded(42)?;
//!
//! assert!(topology.graph().is_connected());
//! for (a, b) in topology.edge_list() {
//!     // e.g. "s1 h4"
//!     assert!(!(a.starts_with('h') && b.starts_with('h')));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Configuration Format
//!
//! ```yaml
//! general:
//!   seed: 42
//!
//! topology:
//!   nodes: 20
//!   edge_probability: 0.15
//!   host_probability: 0.5
//!   host_strategy: classifier   # or pendant
//! ```
//!
//! ## Error Handling
//!
//! Library functions return typed errors (`ValidationError`, `TopologyError`)
//! built with `thiserror`. The `topogen` binary reports them through
//! `color_eyre`.

pub mod config;
pub mod config_loader;
pub mod export;
pub mod topology;
pub mod utils;
