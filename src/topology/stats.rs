//! Summary statistics for a generated topology.

use serde::{Deserialize, Serialize};

use super::engine::Topology;
use crate::config::HostStrategy;

/// Statistical summary of node degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeStats {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub median: f64,
}

/// Counts describing a finished topology, written out as `summary.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologySummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub strategy: HostStrategy,
    pub nodes: usize,
    pub switches: usize,
    pub hosts: usize,
    pub raw_edges: usize,
    pub edges: usize,
    pub pruned_edges: usize,
    pub stranded_hosts: Vec<String>,
    pub degree: DegreeStats,
}

impl TopologySummary {
    pub fn from_topology(topology: &Topology) -> Self {
        let graph = topology.graph();
        let degrees: Vec<usize> = graph.node_ids().map(|n| graph.degree(n)).collect();

        Self {
            seed: topology.seed(),
            strategy: topology.strategy(),
            nodes: topology.node_count(),
            switches: topology.switch_count(),
            hosts: topology.host_count(),
            raw_edges: topology.raw_edges().len(),
            edges: topology.edges().len(),
            pruned_edges: topology.pruned_edges().len(),
            stranded_hosts: topology
                .stranded_hosts()
                .iter()
                .map(|&host| host.label(graph.role(host)))
                .collect(),
            degree: calculate_stats(&degrees),
        }
    }
}

/// Calculate min, max, mean and median of a set of degrees
pub fn calculate_stats(values: &[usize]) -> DegreeStats {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return DegreeStats {
            min: 0,
            max: 0,
            mean: 0.0,
            median: 0.0,
        };
    };

    let sum: usize = sorted.iter().sum();
    let mean = sum as f64 / sorted.len() as f64;

    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    };

    DegreeStats {
        min,
        max,
        mean,
        median,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TopologyConfig;
    use crate::topology::engine::TopologyEngine;

    #[test]
    fn test_calculate_stats() {
        let stats = calculate_stats(&[3, 1, 2, 2]);
        assert_eq!(stats.min, 1);
        assert_eq!(stats.max, 3);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.median, 2.0);

        let stats = calculate_stats(&[5, 1, 3]);
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn test_calculate_stats_empty() {
        let stats = calculate_stats(&[]);
        assert_eq!(stats.min, 0);
        assert_eq!(stats.mean, 0.0);
    }

    #[test]
    fn test_summary_counts() {
        let engine = TopologyEngine::new(TopologyConfig::new(8, 0.4, 0.5)).unwrap();
        let topology = engine.build_seeded(21).unwrap();
        let summary = TopologySummary::from_topology(&topology);

        assert_eq!(summary.seed, Some(21));
        assert_eq!(summary.nodes, 8);
        assert_eq!(summary.switches + summary.hosts, 8);
        assert_eq!(summary.edges + summary.pruned_edges, summary.raw_edges);
        assert!(summary.degree.min >= 1);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"strategy\":\"classifier\""));
    }
}
