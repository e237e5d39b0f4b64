//! Huffman tree construction.
//!
//! The tree lives in an arena: nodes are stored in a `Vec` and refer to their
//! children by [`NodeId`]. Leaves occupy the first slots in ascending symbol
//! order, merged nodes follow in creation order, and the root is the last node.
//!
//! ## Ordering
//! Construction repeatedly removes the two lowest nodes under the total order
//! `(weight, leftmost symbol, creation sequence)`. The first node removed
//! becomes the left child. A node's creation sequence is its arena index, so
//! the order is reproducible from the frequency table alone.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::frequency::FrequencyTable;

/// Handle to a node in a [`HuffmanTree`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index of this node.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A leaf or internal node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Holds one symbol, weighted by its frequency.
    Leaf { symbol: u8, weight: u64 },
    /// Holds two children, weighted by their sum.
    Internal {
        weight: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    /// Weight of the subtree rooted here.
    #[inline]
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }
}

/// Priority key: `(weight, leftmost symbol, creation sequence)`.
type Key = (u64, u8, usize);

/// Prefix-free binary tree built by greedy Huffman merging.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl HuffmanTree {
    /// Build a tree from a frequency table.
    ///
    /// An empty table yields an empty tree with no root. A table with one
    /// symbol yields a single leaf that is also the root.
    pub fn build(frequencies: &FrequencyTable) -> Self {
        let leaf_count = frequencies.distinct_symbols();
        if leaf_count == 0 {
            return Self::default();
        }

        let mut nodes = Vec::with_capacity(2 * leaf_count - 1);
        let mut heap: BinaryHeap<Reverse<Key>> = BinaryHeap::with_capacity(leaf_count);

        for (symbol, weight) in frequencies.iter() {
            heap.push(Reverse((weight, symbol, nodes.len())));
            nodes.push(Node::Leaf { symbol, weight });
        }

        while heap.len() > 1 {
            let (Some(Reverse(first)), Some(Reverse(second))) = (heap.pop(), heap.pop()) else {
                break;
            };
            let (left_weight, leftmost, left) = first;
            let (right_weight, _, right) = second;

            // Saturates only for tables whose total already overflows u64,
            // which the container rejects before building.
            let weight = left_weight.saturating_add(right_weight);
            heap.push(Reverse((weight, leftmost, nodes.len())));
            nodes.push(Node::Internal {
                weight,
                left: NodeId(left),
                right: NodeId(right),
            });
        }

        let root = heap.pop().map(|Reverse((_, _, id))| NodeId(id));
        let tree = Self { nodes, root };

        debug!(
            leaves = leaf_count,
            nodes = tree.nodes.len(),
            depth = tree.depth(),
            "built huffman tree"
        );

        tree
    }

    /// Root handle, or `None` for an empty tree.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Look up a node by handle.
    ///
    /// # Panics
    /// If `id` did not come from this tree.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Handles of every node in creation order; the root comes last.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Check if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total number of nodes (leaves and internal).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves, i.e. distinct symbols.
    pub fn leaf_count(&self) -> usize {
        self.nodes.len().div_ceil(2)
    }

    /// Root weight, equal to the length of the input it was built from.
    pub fn weight(&self) -> u64 {
        self.root.map_or(0, |root| self.node(root).weight())
    }

    /// Length of the longest root-to-leaf path (0 for one leaf or none).
    pub fn depth(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };

        let mut max_depth = 0;
        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.node(id) {
                Node::Leaf { .. } => max_depth = max_depth.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((*right, depth + 1));
                    stack.push((*left, depth + 1));
                }
            }
        }
        max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_symbol(tree: &HuffmanTree, id: NodeId) -> Option<u8> {
        match tree.node(id) {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    fn children(tree: &HuffmanTree, id: NodeId) -> (NodeId, NodeId) {
        match tree.node(id) {
            Node::Internal { left, right, .. } => (*left, *right),
            Node::Leaf { .. } => panic!("expected internal node"),
        }
    }

    #[test]
    fn test_empty_tree() {
        let tree = HuffmanTree::build(&FrequencyTable::new());
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.leaf_count(), 0);
        assert_eq!(tree.weight(), 0);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_single_symbol() {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(&[0x41; 1000]));
        let root = tree.root().unwrap();
        assert_eq!(
            tree.node(root),
            &Node::Leaf {
                symbol: 0x41,
                weight: 1000
            }
        );
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_aaabbc_shape() {
        // C(1) and B(2) merge first; A(3) ties the merged node and wins on
        // leftmost symbol, so it becomes the left child of the root.
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(b"AAABBC"));
        let root = tree.root().unwrap();
        assert_eq!(tree.weight(), 6);
        assert_eq!(tree.depth(), 2);

        let (left, right) = children(&tree, root);
        assert_eq!(leaf_symbol(&tree, left), Some(b'A'));

        let (rl, rr) = children(&tree, right);
        assert_eq!(leaf_symbol(&tree, rl), Some(b'C'));
        assert_eq!(leaf_symbol(&tree, rr), Some(b'B'));
        assert_eq!(tree.node(right).weight(), 3);
    }

    #[test]
    fn test_equal_weights_break_on_symbol() {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(b"dcba"));
        let root = tree.root().unwrap();

        // (a,b) merges first, then (c,d); the root's left subtree starts at 'a'.
        let (left, right) = children(&tree, root);
        let (ll, lr) = children(&tree, left);
        let (rl, rr) = children(&tree, right);
        assert_eq!(leaf_symbol(&tree, ll), Some(b'a'));
        assert_eq!(leaf_symbol(&tree, lr), Some(b'b'));
        assert_eq!(leaf_symbol(&tree, rl), Some(b'c'));
        assert_eq!(leaf_symbol(&tree, rr), Some(b'd'));
    }

    #[test]
    fn test_internal_weights_sum_children() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(data));
        assert_eq!(tree.weight(), data.len() as u64);
        assert_eq!(tree.len(), 2 * tree.leaf_count() - 1);

        for id in tree.ids() {
            if let Node::Internal {
                weight,
                left,
                right,
            } = tree.node(id)
            {
                assert_eq!(*weight, tree.node(*left).weight() + tree.node(*right).weight());
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let table = FrequencyTable::from_bytes(b"mississippi river banks");
        assert_eq!(HuffmanTree::build(&table), HuffmanTree::build(&table));
    }
}
