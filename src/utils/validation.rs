//! Validation utilities.
//!
//! Input checks shared by the configuration and the topology builders, plus
//! post-condition checks on finished topologies.

use crate::config::ValidationError;
use crate::topology::classifier::MIN_HOSTS;
use crate::topology::{GraphModel, Topology};

/// Smallest topology the generator accepts
pub const MIN_NODES: usize = 2;

/// Validate the number of nodes to generate
///
/// # Examples
/// ```
/// use topogen::utils::validation::validate_node_count;
///
/// assert!(validate_node_count(2).is_ok());
/// assert!(validate_node_count(1).is_err()); // a single node has no possible edge
/// ```
pub fn validate_node_count(nodes: usize) -> Result<(), ValidationError> {
    if nodes < MIN_NODES {
        return Err(ValidationError::InvalidNodeCount(nodes));
    }
    Ok(())
}

/// Validate that `value` is a finite probability in [0, 1]
pub fn validate_probability(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::InvalidProbability { field, value });
    }
    Ok(())
}

/// List the switch/host post-conditions a finished topology violates
///
/// Checks for:
/// - Edges joining two hosts
/// - Fewer than two hosts
/// - Hosts left without any link
/// - A disconnected set of classified edges
///
/// An empty list means every post-condition holds. Violations are reported
/// rather than corrected.
pub fn validate_classified_topology(topology: &Topology) -> Vec<String> {
    let mut problems = Vec::new();

    let host_pairs = topology.edges().iter().filter(|e| e.is_host_to_host()).count();
    if host_pairs > 0 {
        problems.push(format!("{} edge(s) connect two hosts", host_pairs));
    }

    if topology.host_count() < MIN_HOSTS {
        problems.push(format!(
            "Topology has {} host(s), expected at least {}",
            topology.host_count(),
            MIN_HOSTS
        ));
    }

    if !topology.stranded_hosts().is_empty() {
        let labels: Vec<String> = topology
            .stranded_hosts()
            .iter()
            .map(|host| host.label(topology.graph().role(*host)))
            .collect();
        problems.push(format!("Hosts without links: {}", labels.join(", ")));
    }

    let mut classified = GraphModel::with_nodes(topology.node_count());
    for edge in topology.edges() {
        classified.add_edge(edge.source.0, edge.target.0);
    }
    if !classified.is_connected() {
        problems.push(format!(
            "Classified edges form {} components",
            classified.component_count()
        ));
    }

    problems
}
