//! Shared utilities: input validation and topology post-condition checks.

pub mod validation;

pub use validation::{validate_classified_topology, validate_node_count, validate_probability};
