//! Topology type definitions.
//!
//! Nodes live in an arena and are referred to by [`NodeId`] handles. Role
//! labels such as `s3` or `h2` are only produced at the edge-list boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle of a node inside a [`GraphModel`](super::graph::GraphModel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }

    /// Render the node with the given role as a one-based label (`s1`, `h4`, `n2`)
    pub fn label(self, role: Role) -> String {
        format!("{}{}", role.prefix(), self.0 + 1)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

/// Function of a node in the finished topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    /// Not classified yet
    #[default]
    Unknown,
    /// Forwards traffic between its neighbors
    Switch,
    /// Endpoint that never forwards; must only be attached to switches
    Host,
}

impl Role {
    /// Label prefix used when rendering edge lists
    pub fn prefix(self) -> char {
        match self {
            Self::Unknown => 'n',
            Self::Switch => 's',
            Self::Host => 'h',
        }
    }

    pub fn is_host(self) -> bool {
        matches!(self, Self::Host)
    }

    pub fn is_switch(self) -> bool {
        matches!(self, Self::Switch)
    }
}

/// A node record in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub role: Role,
}

/// Unordered pair of distinct nodes.
///
/// The endpoints are stored lowest handle first so that `Edge::new(a, b)` and
/// `Edge::new(b, a)` compare and hash equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    a: NodeId,
    b: NodeId,
}

impl Edge {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }

    pub fn endpoints(self) -> (NodeId, NodeId) {
        (self.a, self.b)
    }

    pub fn is_self_loop(self) -> bool {
        self.a == self.b
    }
}

/// An edge whose endpoints carry their assigned roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassifiedEdge {
    pub source: (NodeId, Role),
    pub target: (NodeId, Role),
}

impl ClassifiedEdge {
    pub fn new(edge: Edge, roles: &[Role]) -> Self {
        let (a, b) = edge.endpoints();
        let role_of = |node: NodeId| roles.get(node.index()).copied().unwrap_or_default();
        Self {
            source: (a, role_of(a)),
            target: (b, role_of(b)),
        }
    }

    pub fn edge(&self) -> Edge {
        Edge::new(self.source.0, self.target.0)
    }

    pub fn is_host_to_host(&self) -> bool {
        self.source.1.is_host() && self.target.1.is_host()
    }

    pub fn source_label(&self) -> String {
        self.source.0.label(self.source.1)
    }

    pub fn target_label(&self) -> String {
        self.target.0.label(self.target.1)
    }

    /// Both endpoint labels, e.g. `("s1", "h3")`
    pub fn labels(&self) -> (String, String) {
        (self.source_label(), self.target_label())
    }
}
