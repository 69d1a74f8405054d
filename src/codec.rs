use std::io::Write;

use crate::bits::{BitReader, BitWriter};
use crate::code::CodeTable;
use crate::errors::HuffError;
use crate::freq::FrequencyTable;
use crate::tree::{HuffNode, HuffmanTree};

/// The three value objects a coding run is made of, built together and
/// threaded explicitly into [`encode_symbols`] and [`decode_symbols`].
///
/// There is no hidden coder state: every codebook is a pure function of the
/// frequency table it was built from, so an encoder and a decoder that start
/// from the same table always agree on the tree and the codes.
#[derive(Debug, Clone)]
pub struct Codebook {
    pub freqs: FrequencyTable,
    pub tree: HuffmanTree,
    pub codes: CodeTable,
}

impl Codebook {
    /// Builds table, tree and codes from the exact sequence that is going to
    /// be encoded. Returns `None` for empty input, which has nothing to
    /// model.
    pub fn from_text(text: &str) -> Option<Self> {
        let freqs = FrequencyTable::from_text(text);
        // only the empty table can fail here
        Self::from_frequencies(freqs).ok()
    }

    /// Rebuilds the codebook from a frequency table, typically one
    /// deserialized out of a container. Tree construction is deterministic,
    /// so the result is identical to the codebook used at encode time.
    pub fn from_frequencies(freqs: FrequencyTable) -> Result<Self, HuffError> {
        let tree = HuffmanTree::from_frequencies(&freqs)?;
        let codes = CodeTable::from_tree(&tree);
        Ok(Codebook { freqs, tree, codes })
    }

    /// Exact length in bits of the packed payload for the counted sequence:
    /// the sum over all symbols of `count * code length`.
    pub fn encoded_bit_len(&self) -> u64 {
        self.freqs
            .iter()
            .filter_map(|(symbol, count)| {
                self.codes
                    .get(symbol)
                    .map(|code| count as u64 * code.len() as u64)
            })
            .sum()
    }
}

/// Emits the code bits for every symbol of `text` in input order. The caller
/// flushes the writer once the whole sequence has been emitted.
///
/// Fails with [`HuffError::MissingCode`] only when the table was built from
/// different data than the sequence being encoded.
pub fn encode_symbols<W: Write>(
    text: &str,
    codes: &CodeTable,
    writer: &mut BitWriter<W>,
) -> Result<(), HuffError> {
    for symbol in text.chars() {
        let code = codes.get(symbol).ok_or(HuffError::MissingCode(symbol))?;
        writer.write_code(code)?;
    }
    Ok(())
}

/// Decodes exactly `count` symbols by replaying the tree: left on 0, right
/// on 1, emit on reaching a leaf.
///
/// When the root itself is a leaf the symbol is emitted without consuming
/// any bits; a single-symbol payload carries no information. Decoding never
/// looks for an end-of-stream marker, the symbol count alone stops it.
pub fn decode_symbols(tree: &HuffmanTree, count: usize, reader: &mut BitReader) -> String {
    let mut output = String::with_capacity(count);

    for _ in 0..count {
        let mut node = tree.root();
        loop {
            match node {
                HuffNode::Leaf { symbol, .. } => {
                    output.push(*symbol);
                    break;
                }
                HuffNode::Internal { left, right, .. } => {
                    node = if reader.read_bit() == 0 { left } else { right };
                }
            }
        }
    }
    output
}
