//! Union-find (disjoint set forest) used to reject cycle-forming edges while
//! building a spanning tree.

use super::types::NodeId;

#[derive(Clone, Debug)]
pub struct DisjointSetForest {
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets: usize,
}

impl DisjointSetForest {
    /// One singleton set per node handle `0..n`
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            sets: n,
        }
    }

    /// Representative of the set containing `node`
    pub fn find(&mut self, node: NodeId) -> NodeId {
        let mut node = node.index();
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        NodeId::new(root)
    }

    /// Merge the sets containing `left` and `right`.
    ///
    /// Returns `false` when both were already in the same set.
    pub fn union(&mut self, left: NodeId, right: NodeId) -> bool {
        let mut left = self.find(left).index();
        let mut right = self.find(right).index();
        if left == right {
            return false;
        }
        let left_rank = self.rank[left];
        let right_rank = self.rank[right];
        if left_rank < right_rank {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if left_rank == right_rank {
            self.rank[left] = left_rank.saturating_add(1);
        }
        self.sets -= 1;
        true
    }

    /// Number of disjoint sets remaining
    pub fn set_count(&self) -> usize {
        self.sets
    }
}
