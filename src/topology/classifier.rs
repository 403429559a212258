//! Switch/host classification driven by a random spanning tree.
//!
//! A random-order Kruskal tree is built over the (unweighted) graph. A node
//! whose incident edges all lie on that tree carries no redundant link and is
//! kept as a switch. Every other node may become a host.

use std::collections::HashSet;

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use super::disjoint_set::DisjointSetForest;
use super::error::TopologyError;
use super::graph::GraphModel;
use super::types::{ClassifiedEdge, Edge, NodeId, Role};
use crate::config::ValidationError;
use crate::utils::validation::validate_probability;

/// Number of hosts forced before the host probability takes over
pub const MIN_HOSTS: usize = 2;

/// Result of classifying a connected graph
#[derive(Debug, Clone)]
pub struct Classification {
    /// Role of each node, indexed by `NodeId::index`
    pub roles: Vec<Role>,
    /// Spanning tree the roles were derived from
    pub spanning_tree: Vec<Edge>,
    /// Original edges with role-tagged endpoints, host-host links removed
    pub edges: Vec<ClassifiedEdge>,
    /// Host-host edges that were dropped
    pub pruned: Vec<Edge>,
    /// Hosts with no edge left after pruning
    pub stranded_hosts: Vec<NodeId>,
}

impl Classification {
    pub fn host_count(&self) -> usize {
        self.roles.iter().filter(|role| role.is_host()).count()
    }

    pub fn switch_count(&self) -> usize {
        self.roles.iter().filter(|role| role.is_switch()).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanningTreeClassifier {
    host_probability: f64,
}

impl SpanningTreeClassifier {
    pub fn new(host_probability: f64) -> Result<Self, ValidationError> {
        validate_probability("host_probability", host_probability)?;
        Ok(Self { host_probability })
    }

    /// Classify every node of a connected graph and relabel its edges.
    ///
    /// Fails with [`TopologyError::Disconnected`] when the graph has not been
    /// repaired for connectivity first.
    pub fn classify<R: Rng + ?Sized>(
        &self,
        graph: &GraphModel,
        rng: &mut R,
    ) -> Result<Classification, TopologyError> {
        let spanning_tree = random_spanning_tree(graph, rng)?;
        let roles = assign_roles(graph, &spanning_tree, self.host_probability, rng)?;
        let (edges, pruned) = relabel(graph, &roles);
        let stranded_hosts = stranded_hosts(&roles, &edges);

        if !pruned.is_empty() {
            debug!("Dropped {} host-host edge(s)", pruned.len());
        }
        if !stranded_hosts.is_empty() {
            warn!(
                "{} host(s) lost every link when host-host edges were dropped",
                stranded_hosts.len()
            );
        }

        Ok(Classification {
            roles,
            spanning_tree,
            edges,
            pruned,
            stranded_hosts,
        })
    }
}

/// Shuffle the edge list and run Kruskal's algorithm over it.
///
/// With all edges unweighted the shuffle is the only tie-break, so the tree
/// is a uniformly random Kruskal order tree.
pub fn random_spanning_tree<R: Rng + ?Sized>(
    graph: &GraphModel,
    rng: &mut R,
) -> Result<Vec<Edge>, TopologyError> {
    let n = graph.node_count();
    let mut edges = graph.edges().to_vec();
    edges.shuffle(rng);

    let mut forest = DisjointSetForest::new(n);
    let mut tree = Vec::with_capacity(n.saturating_sub(1));

    for edge in edges {
        if tree.len() + 1 >= n {
            break;
        }
        let (a, b) = edge.endpoints();
        if forest.union(a, b) {
            tree.push(edge);
        }
    }

    if forest.set_count() != 1 {
        return Err(TopologyError::Disconnected {
            components: forest.set_count(),
            nodes: n,
        });
    }

    Ok(tree)
}

/// Mark the nodes whose incident edges all belong to `tree`.
///
/// Depends only on the graph and the tree, never on a random draw.
pub fn forced_switches(graph: &GraphModel, tree: &[Edge]) -> Vec<bool> {
    let mut tree_incident: Vec<HashSet<Edge>> = vec![HashSet::new(); graph.node_count()];
    for &edge in tree {
        let (a, b) = edge.endpoints();
        for node in [a, b] {
            if let Some(set) = tree_incident.get_mut(node.index()) {
                set.insert(edge);
            }
        }
    }

    graph
        .node_ids()
        .map(|node| graph.incident_edges(node) == tree_incident[node.index()])
        .collect()
}

/// Assign a role to every node, visiting nodes in random order.
///
/// Forced nodes become switches. The first [`MIN_HOSTS`] eligible nodes
/// visited become hosts; later eligible nodes are hosts with probability
/// `host_probability`, which must lie in `[0, 1]`.
pub fn assign_roles<R: Rng + ?Sized>(
    graph: &GraphModel,
    tree: &[Edge],
    host_probability: f64,
    rng: &mut R,
) -> Result<Vec<Role>, ValidationError> {
    validate_probability("host_probability", host_probability)?;
    let forced = forced_switches(graph, tree);

    let mut order: Vec<NodeId> = graph.node_ids().collect();
    order.shuffle(rng);

    let mut roles = vec![Role::Unknown; graph.node_count()];
    let mut hosts = 0;

    for node in order {
        let role = if forced[node.index()] {
            Role::Switch
        } else if hosts < MIN_HOSTS || rng.gen_bool(host_probability) {
            Role::Host
        } else {
            Role::Switch
        };

        if role.is_host() {
            hosts += 1;
        }
        roles[node.index()] = role;
    }

    Ok(roles)
}

/// Tag edge endpoints with their roles and split off host-host edges.
///
/// Returns the kept edges followed by the pruned ones, both in the graph's
/// insertion order.
pub fn relabel(graph: &GraphModel, roles: &[Role]) -> (Vec<ClassifiedEdge>, Vec<Edge>) {
    let mut kept = Vec::with_capacity(graph.edge_count());
    let mut pruned = Vec::new();

    for &edge in graph.edges() {
        let classified = ClassifiedEdge::new(edge, roles);
        if classified.is_host_to_host() {
            pruned.push(edge);
        } else {
            kept.push(classified);
        }
    }

    (kept, pruned)
}

/// Hosts that no kept edge touches
pub fn stranded_hosts(roles: &[Role], edges: &[ClassifiedEdge]) -> Vec<NodeId> {
    let mut linked = vec![false; roles.len()];
    for edge in edges {
        for (node, _) in [edge.source, edge.target] {
            if let Some(flag) = linked.get_mut(node.index()) {
                *flag = true;
            }
        }
    }

    roles
        .iter()
        .enumerate()
        .filter(|&(i, role)| role.is_host() && !linked[i])
        .map(|(i, _)| NodeId::new(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::builder::build_random_graph;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn id(i: usize) -> NodeId {
        NodeId::new(i)
    }

    fn complete_graph(n: usize) -> GraphModel {
        let mut graph = GraphModel::with_nodes(n);
        for i in 0..n {
            for j in (i + 1)..n {
                graph.add_edge(id(i), id(j));
            }
        }
        graph
    }

    fn is_spanning_tree(graph: &GraphModel, tree: &[Edge]) -> bool {
        let mut tree_graph = GraphModel::with_nodes(graph.node_count());
        for edge in tree {
            let (a, b) = edge.endpoints();
            if !graph.contains_edge(a, b) || !tree_graph.add_edge(a, b) {
                return false;
            }
        }
        tree.len() + 1 == graph.node_count() && tree_graph.is_connected()
    }

    #[test]
    fn test_spanning_tree_of_complete_graph() {
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = complete_graph(6);
            let tree = random_spanning_tree(&graph, &mut rng).unwrap();
            assert_eq!(tree.len(), 5);
            assert!(is_spanning_tree(&graph, &tree));
        }
    }

    #[test]
    fn test_spanning_tree_of_random_graphs() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = build_random_graph(10, 0.3, &mut rng).unwrap();
            let tree = random_spanning_tree(&graph, &mut rng).unwrap();
            assert!(is_spanning_tree(&graph, &tree));
        }
    }

    #[test]
    fn test_spanning_tree_rejects_disconnected_graph() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut graph = GraphModel::with_nodes(4);
        graph.add_edge(id(0), id(1));
        graph.add_edge(id(2), id(3));

        let result = random_spanning_tree(&graph, &mut rng);
        assert!(matches!(
            result,
            Err(TopologyError::Disconnected { components: 2, nodes: 4 })
        ));

        let classifier = SpanningTreeClassifier::new(0.5).unwrap();
        assert!(classifier.classify(&graph, &mut rng).is_err());
    }

    #[test]
    fn test_forced_switches_on_path() {
        // A path is its own spanning tree, so every node is forced
        let mut graph = GraphModel::with_nodes(4);
        graph.add_edge(id(0), id(1));
        graph.add_edge(id(1), id(2));
        graph.add_edge(id(2), id(3));
        let tree = graph.edges().to_vec();

        assert_eq!(forced_switches(&graph, &tree), vec![true; 4]);
    }

    #[test]
    fn test_forced_switches_with_cycle() {
        // Triangle 0-1-2 with a pendant 3 hanging off 2
        let mut graph = GraphModel::with_nodes(4);
        graph.add_edge(id(0), id(1));
        graph.add_edge(id(1), id(2));
        graph.add_edge(id(2), id(0));
        graph.add_edge(id(2), id(3));
        let tree = vec![
            Edge::new(id(0), id(1)),
            Edge::new(id(1), id(2)),
            Edge::new(id(2), id(3)),
        ];

        assert_eq!(forced_switches(&graph, &tree), vec![false, true, false, true]);
    }

    #[test]
    fn test_forced_switches_ignore_random_draws() {
        let mut rng = StdRng::seed_from_u64(8);
        let graph = build_random_graph(12, 0.3, &mut rng).unwrap();
        let tree = random_spanning_tree(&graph, &mut rng).unwrap();
        let forced = forced_switches(&graph, &tree);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let roles = assign_roles(&graph, &tree, 0.5, &mut rng).unwrap();
            for (i, &is_forced) in forced.iter().enumerate() {
                if is_forced {
                    assert_eq!(roles[i], Role::Switch);
                }
            }
        }
    }

    #[test]
    fn test_minimum_hosts_with_zero_probability() {
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = complete_graph(5);
            let tree = random_spanning_tree(&graph, &mut rng).unwrap();
            let eligible = forced_switches(&graph, &tree).iter().filter(|f| !**f).count();

            let roles = assign_roles(&graph, &tree, 0.0, &mut rng).unwrap();
            let hosts = roles.iter().filter(|r| r.is_host()).count();

            assert_eq!(hosts, MIN_HOSTS.min(eligible));
            assert!(roles.iter().all(|r| *r != Role::Unknown));
        }
    }

    #[test]
    fn test_full_host_probability_makes_every_eligible_node_a_host() {
        let mut rng = StdRng::seed_from_u64(4);
        let graph = complete_graph(6);
        let tree = random_spanning_tree(&graph, &mut rng).unwrap();
        let forced = forced_switches(&graph, &tree);

        let roles = assign_roles(&graph, &tree, 1.0, &mut rng).unwrap();
        for (i, role) in roles.iter().enumerate() {
            let expected = if forced[i] { Role::Switch } else { Role::Host };
            assert_eq!(*role, expected);
        }
    }

    #[test]
    fn test_assign_roles_rejects_bad_probability() {
        let mut rng = StdRng::seed_from_u64(2);
        let graph = complete_graph(4);
        let tree = random_spanning_tree(&graph, &mut rng).unwrap();

        for bad in [f64::NAN, -0.1, 1.5] {
            let result = assign_roles(&graph, &tree, bad, &mut rng);
            assert!(matches!(
                result,
                Err(ValidationError::InvalidProbability { field: "host_probability", .. })
            ));
        }
    }

    #[test]
    fn test_tree_graph_has_no_hosts() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut graph = GraphModel::with_nodes(3);
        graph.add_edge(id(0), id(1));
        graph.add_edge(id(1), id(2));

        let classification = SpanningTreeClassifier::new(1.0)
            .unwrap()
            .classify(&graph, &mut rng)
            .unwrap();
        assert_eq!(classification.host_count(), 0);
        assert_eq!(classification.switch_count(), 3);
        assert_eq!(classification.edges.len(), 2);
    }

    #[test]
    fn test_relabel_prunes_host_pairs() {
        let mut graph = GraphModel::with_nodes(3);
        graph.add_edge(id(0), id(1));
        graph.add_edge(id(1), id(2));
        graph.add_edge(id(0), id(2));
        let roles = vec![Role::Switch, Role::Host, Role::Host];

        let (kept, pruned) = relabel(&graph, &roles);
        assert_eq!(pruned, vec![Edge::new(id(1), id(2))]);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].labels(), ("s1".to_string(), "h2".to_string()));
        assert_eq!(kept[1].labels(), ("s1".to_string(), "h3".to_string()));
        assert!(stranded_hosts(&roles, &kept).is_empty());
    }

    #[test]
    fn test_stranded_host_is_reported() {
        // Host 2 only neighbors host 1, so dropping that edge strands it
        let mut graph = GraphModel::with_nodes(3);
        graph.add_edge(id(0), id(1));
        graph.add_edge(id(1), id(2));
        let roles = vec![Role::Switch, Role::Host, Role::Host];

        let (kept, pruned) = relabel(&graph, &roles);
        assert_eq!(pruned.len(), 1);
        assert_eq!(stranded_hosts(&roles, &kept), vec![id(2)]);
    }

    #[test]
    fn test_classify_four_node_complete_graph() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = complete_graph(4);
            assert_eq!(graph.edge_count(), 6);

            let classification = SpanningTreeClassifier::new(0.5)
                .unwrap()
                .classify(&graph, &mut rng)
                .unwrap();

            assert_eq!(classification.spanning_tree.len(), 3);
            assert!(classification.host_count() >= 2);
            assert!(classification.edges.iter().all(|edge| !edge.is_host_to_host()));
            assert_eq!(
                classification.edges.len() + classification.pruned.len(),
                graph.edge_count()
            );
        }
    }
}
