//! Single entry point that turns a [`TopologyConfig`] into a finished topology.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::builder::RandomTopologyBuilder;
use super::classifier::{SpanningTreeClassifier, MIN_HOSTS};
use super::error::TopologyError;
use super::graph::GraphModel;
use super::pendant::PendantHostAttacher;
use super::types::{ClassifiedEdge, Edge, NodeId, Role};
use crate::config::{HostStrategy, TopologyConfig, ValidationError};

/// A connected switch/host topology
#[derive(Debug, Clone)]
pub struct Topology {
    /// Final graph with roles set; still holds any pruned host-host edges
    graph: GraphModel,
    /// Edges of the random graph before any host handling
    raw_edges: Vec<Edge>,
    edges: Vec<ClassifiedEdge>,
    pruned: Vec<Edge>,
    stranded_hosts: Vec<NodeId>,
    spanning_tree: Option<Vec<Edge>>,
    strategy: HostStrategy,
    seed: Option<u64>,
}

impl Topology {
    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    /// Role-tagged edges, without host-host links
    pub fn edges(&self) -> &[ClassifiedEdge] {
        &self.edges
    }

    /// Edges of the random graph before classification
    pub fn raw_edges(&self) -> &[Edge] {
        &self.raw_edges
    }

    pub fn pruned_edges(&self) -> &[Edge] {
        &self.pruned
    }

    /// Hosts that lost every link to pruning
    pub fn stranded_hosts(&self) -> &[NodeId] {
        &self.stranded_hosts
    }

    /// Spanning tree used for classification, absent for pendant hosts
    pub fn spanning_tree(&self) -> Option<&[Edge]> {
        self.spanning_tree.as_deref()
    }

    pub fn strategy(&self) -> HostStrategy {
        self.strategy
    }

    /// Seed the topology was generated from, when known
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn host_count(&self) -> usize {
        self.graph.nodes().iter().filter(|n| n.role.is_host()).count()
    }

    pub fn switch_count(&self) -> usize {
        self.graph.nodes().iter().filter(|n| n.role.is_switch()).count()
    }

    pub fn meets_host_minimum(&self) -> bool {
        self.host_count() >= MIN_HOSTS
    }

    /// Classified edges as label pairs, e.g. `("s1", "h3")`
    pub fn edge_list(&self) -> Vec<(String, String)> {
        self.edges.iter().map(ClassifiedEdge::labels).collect()
    }

    /// Pre-classification edges as label pairs, e.g. `("n1", "n3")`
    pub fn raw_edge_list(&self) -> Vec<(String, String)> {
        self.raw_edges
            .iter()
            .map(|edge| {
                let (a, b) = edge.endpoints();
                (a.label(Role::Unknown), b.label(Role::Unknown))
            })
            .collect()
    }
}

/// Runs graph construction followed by the configured host strategy
#[derive(Debug, Clone)]
pub struct TopologyEngine {
    config: TopologyConfig,
}

impl TopologyEngine {
    /// Validates the configuration before any randomness is drawn
    pub fn new(config: TopologyConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Build one topology from the supplied generator
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Topology, TopologyError> {
        let builder = RandomTopologyBuilder::new(self.config.nodes, self.config.edge_probability)?;
        let mut graph = builder.build(rng)?;
        let raw_edges = graph.edges().to_vec();

        let topology = match self.config.host_strategy {
            HostStrategy::Classifier => {
                let classifier = SpanningTreeClassifier::new(self.config.host_probability)?;
                let classification = classifier.classify(&graph, rng)?;
                for (i, &role) in classification.roles.iter().enumerate() {
                    graph.set_role(NodeId::new(i), role);
                }
                Topology {
                    graph,
                    raw_edges,
                    edges: classification.edges,
                    pruned: classification.pruned,
                    stranded_hosts: classification.stranded_hosts,
                    spanning_tree: Some(classification.spanning_tree),
                    strategy: HostStrategy::Classifier,
                    seed: None,
                }
            }
            HostStrategy::Pendant => {
                PendantHostAttacher::new(self.config.host_probability)?.attach(&mut graph, rng);
                let roles = graph.roles();
                let edges = graph
                    .edges()
                    .iter()
                    .map(|&edge| ClassifiedEdge::new(edge, &roles))
                    .collect();
                Topology {
                    graph,
                    raw_edges,
                    edges,
                    pruned: Vec::new(),
                    stranded_hosts: Vec::new(),
                    spanning_tree: None,
                    strategy: HostStrategy::Pendant,
                    seed: None,
                }
            }
        };

        info!(
            "Built topology: {} nodes ({} switches, {} hosts), {} edges, {} pruned",
            topology.node_count(),
            topology.switch_count(),
            topology.host_count(),
            topology.edges.len(),
            topology.pruned.len()
        );
        if !topology.meets_host_minimum() {
            warn!(
                "Topology has only {} host(s); fewer than {} nodes had a redundant link",
                topology.host_count(),
                MIN_HOSTS
            );
        }

        Ok(topology)
    }

    /// Build a reproducible topology from a fixed seed
    pub fn build_seeded(&self, seed: u64) -> Result<Topology, TopologyError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut topology = self.build(&mut rng)?;
        topology.seed = Some(seed);
        Ok(topology)
    }

    /// Build with a freshly drawn seed, recorded on the result
    pub fn build_from_entropy(&self) -> Result<Topology, TopologyError> {
        let seed: u64 = rand::thread_rng().gen();
        info!("Using random seed {}", seed);
        self.build_seeded(seed)
    }

    /// Build `count` independent topologies in parallel.
    ///
    /// Topology `i` uses seed `base_seed + i`, so results match sequential
    /// calls to [`TopologyEngine::build_seeded`].
    pub fn build_many(&self, count: usize, base_seed: u64) -> Result<Vec<Topology>, TopologyError> {
        (0..count)
            .into_par_iter()
            .map(|i| self.build_seeded(base_seed.wrapping_add(i as u64)))
            .collect()
    }
}
