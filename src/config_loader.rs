use crate::config::{Config, HostStrategy};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse configuration from a YAML file.
///
/// Values are not validated here: command-line overrides may still replace
/// them, so [`apply_overrides`] validates the merged result.
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration file '{}'", config_path.display()))?;

    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration file '{}'", config_path.display()))?;

    Ok(config)
}

/// Command-line values that take precedence over the YAML file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub nodes: Option<usize>,
    pub edge_probability: Option<f64>,
    pub host_probability: Option<f64>,
    pub host_strategy: Option<HostStrategy>,
    pub seed: Option<u64>,
}

/// Apply CLI overrides to a configuration, then validate the merged values
pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) -> Result<()> {
    if let Some(nodes) = overrides.nodes {
        info!("Overriding node count: {}", nodes);
        config.topology.nodes = nodes;
    }

    if let Some(edge_probability) = overrides.edge_probability {
        info!("Overriding edge probability: {}", edge_probability);
        config.topology.edge_probability = edge_probability;
    }

    if let Some(host_probability) = overrides.host_probability {
        info!("Overriding host probability: {}", host_probability);
        config.topology.host_probability = host_probability;
    }

    if let Some(host_strategy) = overrides.host_strategy {
        config.topology.host_strategy = host_strategy;
    }

    if overrides.seed.is_some() {
        config.general.seed = overrides.seed;
    }

    config.validate()?;

    Ok(())
}
