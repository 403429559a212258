//! Random connected graph construction.
//!
//! Construction runs in three phases, each callable on its own:
//!
//! 1. [`sample_edges`]: one Bernoulli trial per unordered node pair.
//! 2. [`attach_isolated_nodes`]: every node left without edges is linked to a
//!    uniformly random other node.
//! 3. [`repair_connectivity`]: a traversal from a random node marks the main
//!    component; each remaining orphan component is peeled off and joined to
//!    it with a single edge.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::error::TopologyError;
use super::graph::GraphModel;
use super::types::{Edge, NodeId};
use crate::config::ValidationError;
use crate::utils::validation::{validate_node_count, validate_probability};

/// Builds connected random graphs of a fixed size and edge density
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomTopologyBuilder {
    node_count: usize,
    edge_probability: f64,
}

impl RandomTopologyBuilder {
    pub fn new(node_count: usize, edge_probability: f64) -> Result<Self, ValidationError> {
        validate_node_count(node_count)?;
        validate_probability("edge_probability", edge_probability)?;
        Ok(Self { node_count, edge_probability })
    }

    /// Generate a graph that is connected on return
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GraphModel, TopologyError> {
        let mut graph = GraphModel::with_nodes(self.node_count);

        let sampled = sample_edges(&mut graph, self.edge_probability, rng)?;
        let patched = attach_isolated_nodes(&mut graph, rng);
        let repairs = repair_connectivity(&mut graph, rng);

        debug!(
            "Generated graph: {} nodes, {} sampled edges, {} isolated-node edges, {} repair edges",
            graph.node_count(),
            sampled,
            patched.len(),
            repairs.len()
        );

        Ok(graph)
    }
}

/// Build a connected random graph in one call
pub fn build_random_graph<R: Rng + ?Sized>(
    node_count: usize,
    edge_probability: f64,
    rng: &mut R,
) -> Result<GraphModel, TopologyError> {
    RandomTopologyBuilder::new(node_count, edge_probability)?.build(rng)
}

/// Include each of the C(n, 2) unordered node pairs with probability `edge_probability`.
///
/// Every pair is considered exactly once. Returns the number of edges added.
pub fn sample_edges<R: Rng + ?Sized>(
    graph: &mut GraphModel,
    edge_probability: f64,
    rng: &mut R,
) -> Result<usize, ValidationError> {
    validate_probability("edge_probability", edge_probability)?;

    let n = graph.node_count();
    let mut added = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen_bool(edge_probability) && graph.add_edge(NodeId::new(i), NodeId::new(j)) {
                added += 1;
            }
        }
    }

    Ok(added)
}

/// Give every node with no edges one edge to a uniformly random other node.
///
/// This removes isolated nodes but does not by itself make the graph
/// connected. Returns the edges that were added.
pub fn attach_isolated_nodes<R: Rng + ?Sized>(graph: &mut GraphModel, rng: &mut R) -> Vec<Edge> {
    let n = graph.node_count();
    let mut added = Vec::new();
    if n < 2 {
        return added;
    }

    for i in 0..n {
        let node = NodeId::new(i);
        // An earlier attachment may already have reached this node
        if graph.degree(node) > 0 {
            continue;
        }

        // Draw from the n - 1 other nodes, skipping over `node` itself
        let mut other = rng.gen_range(0..n - 1);
        if other >= i {
            other += 1;
        }
        let other = NodeId::new(other);

        if graph.add_edge(node, other) {
            added.push(Edge::new(node, other));
        }
    }

    added
}

/// Join every component to the one containing a random start node.
///
/// For each orphan component exactly one edge is added, between a random
/// node already in the main component and a random node of the orphan.
/// Orphans are merged into the main component as they are attached, so the
/// graph is connected on return. Returns the repair edges in the order they
/// were added; an already connected graph gets none.
pub fn repair_connectivity<R: Rng + ?Sized>(graph: &mut GraphModel, rng: &mut R) -> Vec<Edge> {
    let n = graph.node_count();
    let mut repairs = Vec::new();
    if n == 0 {
        return repairs;
    }

    let all_nodes: Vec<NodeId> = graph.node_ids().collect();
    let mut main_component = traverse_from_random(graph, &all_nodes, |_| true, rng);
    let mut in_main = vec![false; n];
    for node in &main_component {
        in_main[node.index()] = true;
    }

    loop {
        let unvisited: Vec<NodeId> = graph.node_ids().filter(|node| !in_main[node.index()]).collect();
        if unvisited.is_empty() {
            break;
        }

        let orphan = traverse_from_random(graph, &unvisited, |node| !in_main[node.index()], rng);

        let (Some(&anchor), Some(&target)) = (main_component.choose(rng), orphan.choose(rng)) else {
            break;
        };

        graph.add_edge(anchor, target);
        repairs.push(Edge::new(anchor, target));
        debug!("Joined orphan component of {} node(s) via {}-{}", orphan.len(), anchor, target);

        for node in orphan {
            in_main[node.index()] = true;
            main_component.push(node);
        }
    }

    repairs
}

/// Depth-first traversal from a random node of `candidates`, staying within `allowed`.
///
/// A traversal that comes back empty is retried from a freshly drawn start
/// node. Returns an empty set only when no candidate is allowed at all.
pub fn traverse_from_random<F, R>(
    graph: &GraphModel,
    candidates: &[NodeId],
    allowed: F,
    rng: &mut R,
) -> Vec<NodeId>
where
    F: Fn(NodeId) -> bool,
    R: Rng + ?Sized,
{
    if !candidates.iter().any(|&node| graph.contains_node(node) && allowed(node)) {
        return Vec::new();
    }

    loop {
        let Some(&seed) = candidates.choose(rng) else {
            return Vec::new();
        };

        let reached = graph.reachable_from(seed, &allowed);
        if !reached.is_empty() {
            return reached;
        }

        debug!("Traversal from node {} reached nothing, reseeding", seed);
    }
}
