//! Huffman tree construction.
//!
//! The tree is built greedily: the two lightest nodes are repeatedly merged
//! until one remains. Nodes live in an arena and refer to their children by
//! index; every child has exactly one parent and there are no back links.
//!
//! ## Tie-breaking
//!
//! Nodes of equal weight are taken in insertion order. Leaves are inserted in
//! the order their symbols first appear in the input and each merged node is
//! inserted after everything already queued, which makes the tree (and the
//! container) a pure function of the input bytes.
//!
//! ## Degenerate alphabets
//!
//! - No symbols: there is no tree ([`HuffmanTree::build`] returns `None`).
//! - One symbol: a single merge still happens, wrapping the leaf as the left
//!   child of an internal node with no right child, so the symbol's code is
//!   `0` rather than empty.

use crate::code_table::CodeTable;
use crate::frequency::FrequencyTable;
use oxihuff_core::BitString;
use oxihuff_core::progress::{NoProgress, Progress, Stage, Ticker};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

/// Index of a node in the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A single symbol and its frequency.
    Leaf {
        /// The byte value.
        symbol: u8,
        /// Occurrences in the input.
        weight: u64,
    },
    /// Merge of two lighter nodes.
    Internal {
        /// Sum of the children's weights.
        weight: u64,
        /// The lighter (first taken) child, reached with a `0` bit.
        left: NodeId,
        /// The second child, reached with a `1` bit. Absent only for a
        /// single-symbol alphabet.
        right: Option<NodeId>,
    },
}

impl Node {
    /// Total frequency under this node.
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// A finished Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
    leaf_count: usize,
}

impl HuffmanTree {
    /// Build a tree from symbol frequencies.
    ///
    /// Returns `None` when the table is empty.
    pub fn build(freq: &FrequencyTable) -> Option<Self> {
        Self::build_with_progress(freq, &mut NoProgress)
    }

    /// Build a tree from symbol frequencies, reporting each merge to `progress`.
    pub fn build_with_progress<P: Progress + ?Sized>(
        freq: &FrequencyTable,
        progress: &mut P,
    ) -> Option<Self> {
        if freq.is_empty() {
            return None;
        }

        let leaf_count = freq.len();
        let mut nodes = Vec::with_capacity(leaf_count * 2);
        // Min-heap on (weight, insertion sequence).
        let mut queue = BinaryHeap::with_capacity(leaf_count);

        for (seq, (symbol, weight)) in freq.iter().enumerate() {
            let id = NodeId(nodes.len());
            nodes.push(Node::Leaf { symbol, weight });
            queue.push(Reverse((weight, seq, id)));
        }

        let mut seq = leaf_count;
        let merges = (leaf_count as u64 - 1).max(1);
        let mut ticker = Ticker::start(progress, Stage::BuildingTree, merges);
        let mut merged = 0u64;

        if queue.len() == 1 {
            let Reverse((weight, _, left)) = queue.pop()?;
            let id = NodeId(nodes.len());
            nodes.push(Node::Internal {
                weight,
                left,
                right: None,
            });
            queue.push(Reverse((weight, seq, id)));
            merged += 1;
        }

        while queue.len() > 1 {
            let Reverse((left_weight, _, left)) = queue.pop()?;
            let Reverse((right_weight, _, right)) = queue.pop()?;

            let weight = left_weight + right_weight;
            let id = NodeId(nodes.len());
            nodes.push(Node::Internal {
                weight,
                left,
                right: Some(right),
            });
            queue.push(Reverse((weight, seq, id)));
            seq += 1;

            merged += 1;
            ticker.tick(progress, merged);
        }

        let Reverse((_, _, root)) = queue.pop()?;
        ticker.done(progress, merged);

        let tree = Self {
            nodes,
            root,
            leaf_count,
        };
        log::debug!(
            "built Huffman tree: {} leaves, {} nodes, depth {}",
            tree.leaf_count,
            tree.nodes.len(),
            tree.depth()
        );
        Some(tree)
    }

    /// Handle of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node behind `id`.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Total weight of the tree (the input length).
    pub fn root_weight(&self) -> u64 {
        self.node(self.root).weight()
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of nodes, leaves included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match *self.node(id) {
                Node::Leaf { .. } => deepest = deepest.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    if let Some(right) = right {
                        stack.push((right, depth + 1));
                    }
                }
            }
        }
        deepest
    }

    /// Symbols under `id`, left to right.
    pub fn symbols(&self, id: NodeId) -> Vec<u8> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            match *self.node(id) {
                Node::Leaf { symbol, .. } => out.push(symbol),
                Node::Internal { left, right, .. } => {
                    if let Some(right) = right {
                        stack.push(right);
                    }
                    stack.push(left);
                }
            }
        }
        out
    }

    /// Assign each leaf the path leading to it: `0` for left, `1` for right.
    pub fn code_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        let mut stack = vec![(self.root, BitString::new())];

        while let Some((id, path)) = stack.pop() {
            match *self.node(id) {
                Node::Leaf { symbol, .. } => {
                    table.insert(symbol, path);
                }
                Node::Internal { left, right, .. } => {
                    if let Some(right) = right {
                        let mut right_path = path.clone();
                        right_path.push(true);
                        stack.push((right, right_path));
                    }
                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((left, left_path));
                }
            }
        }

        log::trace!("code table: {:?}", table);
        table
    }

    fn fmt_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: NodeId,
        depth: usize,
        edge: Option<char>,
    ) -> fmt::Result {
        let indent = "  ".repeat(depth);
        let label = edge.map(|e| format!("{e}: ")).unwrap_or_default();

        match *self.node(id) {
            Node::Leaf { symbol, weight } => {
                writeln!(f, "{indent}{label}({weight}) {}", symbol_label(symbol))
            }
            Node::Internal {
                weight,
                left,
                right,
            } => {
                let members: Vec<String> = self
                    .symbols(id)
                    .into_iter()
                    .map(symbol_label)
                    .collect();
                writeln!(f, "{indent}{label}({weight}) {{{}}}", members.join(" "))?;
                self.fmt_node(f, left, depth + 1, Some('0'))?;
                if let Some(right) = right {
                    self.fmt_node(f, right, depth + 1, Some('1'))?;
                }
                Ok(())
            }
        }
    }
}

/// Depth-first dump, one node per line, children indented under parents.
impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root, 0, None)
    }
}

/// Printable form of a symbol: `'A'` for graphic ASCII, `0x0a` otherwise.
pub fn symbol_label(symbol: u8) -> String {
    if symbol.is_ascii_graphic() {
        format!("'{}'", symbol as char)
    } else {
        format!("{symbol:#04x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_for(data: &[u8]) -> HuffmanTree {
        HuffmanTree::build(&FrequencyTable::build(data)).unwrap()
    }

    #[test]
    fn test_empty_alphabet() {
        assert!(HuffmanTree::build(&FrequencyTable::build(b"")).is_none());
    }

    #[test]
    fn test_single_symbol_wraps_leaf() {
        let tree = tree_for(b"AAA");
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.depth(), 1);
        match *tree.node(tree.root()) {
            Node::Internal { weight, left, right } => {
                assert_eq!(weight, 3);
                assert!(right.is_none());
                assert_eq!(
                    *tree.node(left),
                    Node::Leaf {
                        symbol: b'A',
                        weight: 3
                    }
                );
            }
            Node::Leaf { .. } => panic!("root must be internal"),
        }

        let codes = tree.code_table();
        assert_eq!(codes.get(b'A').unwrap().to_string(), "0");
    }

    #[test]
    fn test_three_equal_weights() {
        // A, B, C all weight 2: A+B merge first, then C joins (C,AB).
        let tree = tree_for(b"AABBCC");
        let codes = tree.code_table();
        assert_eq!(codes.get(b'C').unwrap().to_string(), "0");
        assert_eq!(codes.get(b'A').unwrap().to_string(), "10");
        assert_eq!(codes.get(b'B').unwrap().to_string(), "11");
        assert_eq!(tree.root_weight(), 6);
        assert_eq!(tree.symbols(tree.root()), vec![b'C', b'A', b'B']);
    }

    #[test]
    fn test_merged_node_queued_after_equal_weights() {
        // Weights: a=1 b=1 c=2 d=2. a+b=2 is queued behind c and d, so c+d
        // merge next and the root joins (ab, cd).
        let tree = tree_for(b"abccdd");
        let codes = tree.code_table();
        assert_eq!(codes.get(b'a').unwrap().to_string(), "00");
        assert_eq!(codes.get(b'b').unwrap().to_string(), "01");
        assert_eq!(codes.get(b'c').unwrap().to_string(), "10");
        assert_eq!(codes.get(b'd').unwrap().to_string(), "11");
    }

    #[test]
    fn test_skewed_weights_give_deep_tree() {
        // Fibonacci weights produce a maximally unbalanced tree.
        let fib = [1usize, 1, 2, 3, 5, 8, 13, 21];
        let mut data = Vec::new();
        for (i, &n) in fib.iter().enumerate() {
            data.extend(std::iter::repeat_n(b'a' + i as u8, n));
        }
        let tree = tree_for(&data);
        assert_eq!(tree.depth(), fib.len() - 1);
        let codes = tree.code_table();
        assert_eq!(codes.get(b'h').unwrap().len(), 1);
        assert_eq!(codes.max_code_len(), fib.len() - 1);
    }

    #[test]
    fn test_deterministic() {
        let data = b"the quick brown fox jumps over the lazy dog";
        assert_eq!(tree_for(data), tree_for(data));
        assert_eq!(tree_for(data).code_table(), tree_for(data).code_table());
    }

    #[test]
    fn test_dump() {
        let dump = tree_for(b"AABBCC").to_string();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines[0], "(6) {'C' 'A' 'B'}");
        assert_eq!(lines[1], "  0: (2) 'C'");
        assert_eq!(lines[2], "  1: (4) {'A' 'B'}");
        assert_eq!(lines[3], "    0: (2) 'A'");
        assert_eq!(lines[4], "    1: (2) 'B'");
    }

    #[test]
    fn test_symbol_label() {
        assert_eq!(symbol_label(b'A'), "'A'");
        assert_eq!(symbol_label(b'\n'), "0x0a");
        assert_eq!(symbol_label(b' '), "0x20");
    }
}
