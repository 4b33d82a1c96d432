//! Compress and decompress entry points.

use bitvec::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::bits;
use crate::error::{Error, Result};
use crate::header::FrequencyTable;
use crate::{bit_string, build_tree, CodeTable, Node};

/// Byte separating the header from the packed body.
pub const DELIMITER: u8 = 0x00;

/// Compresses `text` into a self-describing blob.
pub fn compress(text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(Error::EmptyInput);
    }

    let table = FrequencyTable::from_text(text);
    let tree = build_tree(&table)?;
    let codes = CodeTable::from_tree(&tree);
    debug_assert!(codes.is_prefix_free());

    let body = codes.encode(text)?;
    let mut out = table.to_header()?;
    out.push(DELIMITER);
    let header_len = out.len();
    out.extend(bits::pack(&body));

    debug!(
        chars = tree.weight(),
        symbols = table.len(),
        header_bytes = header_len,
        body_bits = body.len(),
        total_bytes = out.len(),
        "compressed"
    );
    Ok(out)
}

/// Restores the text of a blob produced by [`compress`].
pub fn decompress(blob: &[u8]) -> Result<String> {
    let (table, body) = split_blob(blob)?;
    let tree = build_tree(&table).map_err(into_header_error)?;
    let bits = bits::unpack(body);

    let text = walk(&tree, &bits)?;
    debug!(
        chars = tree.weight(),
        body_bits = bits.len(),
        "decompressed"
    );
    Ok(text)
}

/// Splits a blob at the first delimiter and parses the frequency table.
pub fn split_blob(blob: &[u8]) -> Result<(FrequencyTable, &[u8])> {
    let at = blob
        .iter()
        .position(|&b| b == DELIMITER)
        .ok_or_else(|| Error::malformed("delimiter not found"))?;
    let table = FrequencyTable::from_header(&blob[..at])?;

    Ok((table, &blob[at + 1..]))
}

fn into_header_error(e: Error) -> Error {
    match e {
        Error::InvalidInput(message) => Error::malformed(message),
        other => other,
    }
}

fn walk(root: &Node, bits: &BitSlice<u8, Msb0>) -> Result<String> {
    let expected = usize::try_from(root.weight())
        .map_err(|_| Error::malformed("total count does not fit in memory"))?;

    // zero-length code: the count alone says how often to repeat the symbol
    if let Some(symbol) = root.symbol() {
        if !bits.is_empty() {
            return Err(Error::corrupt("body bits for a single-symbol table", 0));
        }
        let bytes = expected
            .checked_mul(symbol.len_utf8())
            .ok_or_else(|| Error::malformed("count too large"))?;
        let mut out = String::new();
        out.try_reserve_exact(bytes)
            .map_err(|_| Error::malformed("count too large"))?;
        out.extend(std::iter::repeat(symbol).take(expected));
        return Ok(out);
    }

    let mut out = String::with_capacity(expected.min(bits.len()));
    let mut decoded = 0;
    let mut node = root;
    for (offset, bit) in bits.iter().by_vals().enumerate() {
        let next = if bit { node.right() } else { node.left() };
        node = next.ok_or_else(|| Error::corrupt("walk left the tree", offset))?;

        if let Some(symbol) = node.symbol() {
            if decoded == expected {
                return Err(Error::corrupt(
                    format!("more than {expected} symbols in body"),
                    offset,
                ));
            }
            out.push(symbol);
            decoded += 1;
            node = root;
        }
    }

    if !std::ptr::eq(node, root) {
        return Err(Error::corrupt("body ends inside a code", bits.len()));
    }
    if decoded != expected {
        return Err(Error::corrupt(
            format!("decoded {decoded} symbols, header counts {expected}"),
            bits.len(),
        ));
    }

    Ok(out)
}

/// What a blob holds, without decoding its body.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub chars: u64,
    pub header_bytes: usize,
    pub body_bytes: usize,
    pub body_bits: usize,
    pub symbols: Vec<SymbolSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolSummary {
    pub symbol: char,
    pub count: u64,
    pub code: String,
}

/// Parses the header of `blob` and derives its code table.
pub fn inspect(blob: &[u8]) -> Result<Summary> {
    let (table, body) = split_blob(blob)?;
    let tree = build_tree(&table).map_err(into_header_error)?;
    let codes = CodeTable::from_tree(&tree);

    let symbols = table
        .iter()
        .map(|(symbol, count)| SymbolSummary {
            symbol,
            count,
            code: codes.get(symbol).map(bit_string).unwrap_or_default(),
        })
        .collect();

    Ok(Summary {
        chars: tree.weight(),
        header_bytes: blob.len() - body.len(),
        body_bytes: body.len(),
        body_bits: bits::unpack(body).len(),
        symbols,
    })
}
