use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use topogen::config::{Config, HostStrategy};
use topogen::config_loader::{self, CliOverrides};
use topogen::export::save_edge_list;
use topogen::topology::{Topology, TopologyEngine, TopologySummary};
use topogen::utils::validate_classified_topology;

/// Random switch/host topology generator for network simulations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a topology configuration YAML file; other flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for edge lists and the summary
    #[arg(short, long, default_value = "topogen_output")]
    output: PathBuf,

    /// Number of nodes to generate
    #[arg(short, long)]
    nodes: Option<usize>,

    /// Probability that any pair of nodes is linked
    #[arg(short, long)]
    edge_probability: Option<f64>,

    /// Probability that an eligible node becomes a host
    #[arg(long)]
    host_probability: Option<f64>,

    /// How hosts are chosen
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Seed for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of independent topologies to generate
    #[arg(long, default_value_t = 1)]
    count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Classifier,
    Pendant,
}

impl From<StrategyArg> for HostStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Classifier => HostStrategy::Classifier,
            StrategyArg::Pendant => HostStrategy::Pendant,
        }
    }
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            nodes: self.nodes,
            edge_probability: self.edge_probability,
            host_probability: self.host_probability,
            host_strategy: self.strategy.map(HostStrategy::from),
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting topogen");

    let mut config = match &args.config {
        Some(path) => config_loader::load_config(path)?,
        None => Config::default(),
    };
    config_loader::apply_overrides(&mut config, &args.overrides())?;

    let engine = TopologyEngine::new(config.topology.clone())?;
    info!(
        "Generating {} topology(ies): {} nodes, edge probability {}, host probability {}, {:?} hosts",
        args.count,
        config.topology.nodes,
        config.topology.edge_probability,
        config.topology.host_probability,
        config.topology.host_strategy
    );

    let topologies = match config.general.seed {
        Some(seed) => engine.build_many(args.count, seed)?,
        None if args.count == 1 => vec![engine.build_from_entropy()?],
        None => {
            let base_seed: u64 = rand::random();
            info!("Using random base seed {}", base_seed);
            engine.build_many(args.count, base_seed)?
        }
    };

    fs::create_dir_all(&args.output)
        .wrap_err_with(|| format!("Failed to create output directory '{}'", args.output.display()))?;

    for (i, topology) in topologies.iter().enumerate() {
        let stem = if topologies.len() == 1 {
            "topology".to_string()
        } else {
            format!("topology_{}", i)
        };
        write_topology(&args.output, &stem, topology)?;
    }

    info!("Topology generation completed successfully");
    Ok(())
}

/// Write the classified and raw edge lists plus a JSON summary for one topology
fn write_topology(output_dir: &Path, stem: &str, topology: &Topology) -> Result<()> {
    for problem in validate_classified_topology(topology) {
        warn!("{}: {}", stem, problem);
    }

    save_edge_list(&output_dir.join(format!("{}.edges", stem)), &topology.edge_list())?;
    save_edge_list(&output_dir.join(format!("{}.raw.edges", stem)), &topology.raw_edge_list())?;

    let summary = TopologySummary::from_topology(topology);
    let summary_path = output_dir.join(format!("{}.summary.json", stem));
    let json = serde_json::to_string_pretty(&summary)?;
    fs::write(&summary_path, json)
        .wrap_err_with(|| format!("Failed to write summary '{}'", summary_path.display()))?;

    info!(
        "{}: {} switches, {} hosts, {} edges (seed {:?})",
        stem,
        summary.switches,
        summary.hosts,
        summary.edges,
        summary.seed
    );
    Ok(())
}
