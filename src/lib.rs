//! Canonical Huffman compression for text.
//!
//! A compressed blob is `<frequency table as JSON> 0x00 <packed body>`. The
//! decoder rebuilds the exact tree the encoder used from the embedded table,
//! so no dictionary travels outside the blob.
//!
//! ```
//! let blob = texthuff::compress("abracadabra")?;
//! assert_eq!(texthuff::decompress(&blob)?, "abracadabra");
//! # Ok::<(), texthuff::Error>(())
//! ```

use bitvec::prelude::*;
use derivative::Derivative;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};
use tracing::{debug, trace};

pub mod bits;
pub mod codec;
pub mod error;
pub mod header;

pub use codec::{compress, decompress, inspect, split_blob, Summary, SymbolSummary, DELIMITER};
pub use error::{Error, Result};
pub use header::FrequencyTable;

/// A bit string as stored in a [`CodeTable`].
pub type Code = BitBox<u8, Msb0>;

/// Node of a Huffman tree. Leaves carry a symbol and no children, internal
/// nodes carry both children and no symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    weight: u64,
    symbol: Option<char>,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    pub fn leaf(symbol: char, weight: u64) -> Self {
        Self {
            weight,
            symbol: Some(symbol),
            left: None,
            right: None,
        }
    }

    pub fn from_children(left: Node, right: Node) -> Self {
        Self {
            weight: left.weight + right.weight,
            symbol: None,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn symbol(&self) -> Option<char> {
        self.symbol
    }

    pub fn left(&self) -> Option<&Node> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.symbol.is_some()
    }
}

/// Queue entry. Ordered by weight, then by the order entries were queued.
#[derive(Debug, Derivative)]
#[derivative(PartialEq, Eq, PartialOrd, Ord)]
struct Queued {
    weight: u64,
    seq: usize,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    node: Node,
}

/// Builds the canonical tree for `table`.
///
/// Leaves are queued sorted by `(count, symbol)`, so equal-weight leaves come
/// out in character order. Every other equal-weight pair comes out in the
/// order it was queued. The first node popped in a merge becomes the left
/// child. A table with one symbol yields that leaf as the root.
pub fn build_tree(table: &FrequencyTable) -> Result<Node> {
    if let Some((symbol, _)) = table.iter().find(|&(_, count)| count == 0) {
        return Err(Error::InvalidInput(format!(
            "symbol {symbol:?} has a zero count"
        )));
    }

    let mut leaves: Vec<(char, u64)> = table.iter().collect();
    leaves.sort_unstable_by_key(|&(symbol, count)| (count, symbol));

    let mut pq: BinaryHeap<_> = leaves
        .into_iter()
        .enumerate()
        .map(|(seq, (symbol, count))| {
            Reverse(Queued {
                weight: count,
                seq,
                node: Node::leaf(symbol, count),
            })
        })
        .collect();

    let mut seq = pq.len();
    while let Some(Reverse(left)) = pq.pop() {
        let Some(Reverse(right)) = pq.pop() else {
            debug!(
                symbols = table.len(),
                weight = left.weight,
                "built huffman tree"
            );
            return Ok(left.node);
        };

        let weight = left
            .weight
            .checked_add(right.weight)
            .ok_or_else(|| Error::InvalidInput("total count overflows".into()))?;
        pq.push(Reverse(Queued {
            weight,
            seq,
            node: Node::from_children(left.node, right.node),
        }));
        seq += 1;
    }

    Err(Error::InvalidInput("frequency table is empty".into()))
}

/// Prefix code for every leaf of a tree: 0 for left, 1 for right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeTable {
    codes: BTreeMap<char, Code>,
}

impl CodeTable {
    /// Walks `root` depth first. A root that is itself a leaf gets the empty
    /// code.
    pub fn from_tree(root: &Node) -> Self {
        let mut codes = BTreeMap::new();
        let mut stack = vec![(root, BitVec::<u8, Msb0>::new())];

        while let Some((node, prefix)) = stack.pop() {
            if let Some(symbol) = node.symbol() {
                trace!(?symbol, code = %bit_string(&prefix), "assigned code");
                codes.insert(symbol, prefix.into_boxed_bitslice());
                continue;
            }

            if let Some(right) = node.right() {
                let mut code = prefix.clone();
                code.push(true);
                stack.push((right, code));
            }

            if let Some(left) = node.left() {
                let mut code = prefix;
                code.push(false);
                stack.push((left, code));
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: char) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(&symbol).map(|code| code.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &BitSlice<u8, Msb0>)> {
        self.codes.iter().map(|(&symbol, code)| (symbol, code.as_bitslice()))
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<String> = self.codes.values().map(|c| bit_string(c)).collect();
        codes.sort();
        codes.windows(2).all(|pair| !pair[1].starts_with(&pair[0]))
    }

    /// Concatenates the codes of every character of `text`.
    pub fn encode(&self, text: &str) -> Result<BitVec<u8, Msb0>> {
        let mut out = BitVec::new();
        for symbol in text.chars() {
            let code = self.codes.get(&symbol).ok_or(Error::UnknownSymbol(symbol))?;
            out.extend_from_bitslice(code);
        }

        Ok(out)
    }
}

/// Renders bits as a string of `0` and `1`.
pub fn bit_string(bits: &BitSlice<u8, Msb0>) -> String {
    bits.iter().by_vals().map(|b| if b { '1' } else { '0' }).collect()
}
