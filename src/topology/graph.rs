//! Node/edge container with adjacency lookup.

use std::collections::HashSet;

use super::types::{Edge, Node, NodeId, Role};

/// Undirected simple graph over an arena of nodes.
///
/// The adjacency lists are kept as the symmetric closure of the edge list:
/// every successful [`GraphModel::add_edge`] updates both endpoints.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<NodeId>>,
}

impl GraphModel {
    /// Create `count` role-less nodes with no edges
    pub fn with_nodes(count: usize) -> Self {
        Self {
            nodes: (0..count)
                .map(|i| Node { id: NodeId::new(i), role: Role::Unknown })
                .collect(),
            edges: Vec::new(),
            adjacency: vec![Vec::new(); count],
        }
    }

    /// Append a role-less node and return its handle
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node { id, role: Role::Unknown });
        self.adjacency.push(Vec::new());
        id
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|node| node.id)
    }

    /// Edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency
            .get(node.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    pub fn contains_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Insert an undirected edge.
    ///
    /// Returns `false` without modifying the graph for self-loops, duplicates
    /// and handles outside the arena.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b || !self.contains_node(a) || !self.contains_node(b) || self.contains_edge(a, b) {
            return false;
        }
        self.adjacency[a.index()].push(b);
        self.adjacency[b.index()].push(a);
        self.edges.push(Edge::new(a, b));
        true
    }

    /// Every edge touching `node`
    pub fn incident_edges(&self, node: NodeId) -> HashSet<Edge> {
        self.neighbors(node)
            .iter()
            .map(|&neighbor| Edge::new(node, neighbor))
            .collect()
    }

    pub fn role(&self, node: NodeId) -> Role {
        self.nodes
            .get(node.index())
            .map(|n| n.role)
            .unwrap_or_default()
    }

    pub fn set_role(&mut self, node: NodeId, role: Role) {
        if let Some(n) = self.nodes.get_mut(node.index()) {
            n.role = role;
        }
    }

    pub fn roles(&self) -> Vec<Role> {
        self.nodes.iter().map(|n| n.role).collect()
    }

    /// Depth-first traversal from `seed` that only enters nodes accepted by `allowed`.
    ///
    /// Returns the visited nodes in visit order. The seed itself must be
    /// allowed, otherwise nothing is visited.
    pub fn reachable_from<F>(&self, seed: NodeId, allowed: F) -> Vec<NodeId>
    where
        F: Fn(NodeId) -> bool,
    {
        if !self.contains_node(seed) || !allowed(seed) {
            return Vec::new();
        }

        let mut seen = vec![false; self.nodes.len()];
        let mut order = Vec::new();
        let mut stack = vec![seed];

        while let Some(node) = stack.pop() {
            if seen[node.index()] {
                continue;
            }
            seen[node.index()] = true;
            order.push(node);

            for &neighbor in self.neighbors(node) {
                if !seen[neighbor.index()] && allowed(neighbor) {
                    stack.push(neighbor);
                }
            }
        }

        order
    }

    /// Number of connected components
    pub fn component_count(&self) -> usize {
        let mut assigned = vec![false; self.nodes.len()];
        let mut components = 0;

        for node in self.node_ids() {
            if assigned[node.index()] {
                continue;
            }
            components += 1;
            for reached in self.reachable_from(node, |_| true) {
                assigned[reached.index()] = true;
            }
        }

        components
    }

    /// True when a single traversal from any node reaches every node
    pub fn is_connected(&self) -> bool {
        match self.nodes.first() {
            Some(first) => self.reachable_from(first.id, |_| true).len() == self.nodes.len(),
            None => true,
        }
    }

    /// Nodes that have no incident edges
    pub fn isolated_nodes(&self) -> Vec<NodeId> {
        self.node_ids().filter(|&n| self.degree(n) == 0).collect()
    }
}
