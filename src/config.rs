use serde::{Deserialize, Serialize};

use crate::utils::validation::{validate_node_count, validate_probability};

/// Strategy used to decide which nodes become hosts
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HostStrategy {
    /// Label existing nodes by comparing their edges against a random spanning tree
    #[default]
    Classifier,
    /// Keep every generated node as a switch and hang new leaf hosts off them
    Pendant,
}

/// Top-level configuration file layout
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub topology: TopologyConfig,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.topology.validate()
    }
}

/// Settings that do not affect the shape of the topology
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct GeneralConfig {
    /// Seed for the random generator; a fresh entropy seed is drawn when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Parameters of a single topology build
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TopologyConfig {
    /// Number of nodes generated before host classification
    pub nodes: usize,
    /// Probability that any given pair of nodes is linked
    pub edge_probability: f64,
    /// Probability that an eligible node becomes a host
    pub host_probability: f64,
    #[serde(default)]
    pub host_strategy: HostStrategy,
}

impl TopologyConfig {
    pub fn new(nodes: usize, edge_probability: f64, host_probability: f64) -> Self {
        Self {
            nodes,
            edge_probability,
            host_probability,
            host_strategy: HostStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, host_strategy: HostStrategy) -> Self {
        self.host_strategy = host_strategy;
        self
    }

    /// Reject node counts and probabilities the builder cannot work with
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_node_count(self.nodes)?;
        validate_probability("edge_probability", self.edge_probability)?;
        validate_probability("host_probability", self.host_probability)?;
        Ok(())
    }
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self::new(10, 0.2, 0.5)
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid node count {0}: a topology needs at least 2 nodes")]
    InvalidNodeCount(usize),
    #[error("Invalid {field} {value}: must be a probability in [0, 1]")]
    InvalidProbability { field: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parsing() {
        let yaml = r#"
general:
  seed: 42
topology:
  nodes: 12
  edge_probability: 0.3
  host_probability: 0.25
  host_strategy: pendant
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.seed, Some(42));
        assert_eq!(config.topology.nodes, 12);
        assert_eq!(config.topology.host_strategy, HostStrategy::Pendant);
    }

    #[test]
    fn test_host_strategy_defaults_to_classifier() {
        let yaml = r#"
topology:
  nodes: 5
  edge_probability: 0.5
  host_probability: 0.5
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.topology.host_strategy, HostStrategy::Classifier);
        assert_eq!(config.general.seed, None);
    }

    #[test]
    fn test_validation_errors() {
        let config = TopologyConfig::new(1, 0.5, 0.5);
        assert_eq!(config.validate(), Err(ValidationError::InvalidNodeCount(1)));

        let config = TopologyConfig::new(5, 1.5, 0.5);
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidProbability { field: "edge_probability", .. })
        ));

        let config = TopologyConfig::new(5, 0.5, -0.1);
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidProbability { field: "host_probability", .. })
        ));

        let config = TopologyConfig::new(5, f64::NAN, 0.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_boundary_probabilities_are_valid() {
        assert!(TopologyConfig::new(2, 0.0, 0.0).validate().is_ok());
        assert!(TopologyConfig::new(2, 1.0, 1.0).validate().is_ok());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.topology.host_strategy, HostStrategy::Classifier);
    }
}
