use std::collections::BTreeMap;

use crate::errors::HuffError;
use crate::Symbol;

/// Number of occurrences of every symbol in the input sequence.
///
/// Counts are always at least 1 and sum up to the length in symbols of the
/// counted sequence. Iteration runs in ascending code-point order, which
/// keeps both the serialized form and the tree-building order reproducible
/// across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<Symbol, u32>,
}

impl FrequencyTable {
    /// Counts the symbols of `text` in a single pass.
    pub fn from_text(text: &str) -> Self {
        let mut counts = BTreeMap::new();
        for symbol in text.chars() {
            *counts.entry(symbol).or_insert(0u32) += 1;
        }
        FrequencyTable { counts }
    }

    pub fn get(&self, symbol: Symbol) -> Option<u32> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the length in symbols of the counted sequence.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&count| count as u64).sum()
    }

    /// Iterates over `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u32)> + Clone + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }

    /// Serializes the table into its container form: a big-endian count of
    /// distinct symbols followed, per symbol in ascending order, by a
    /// one-byte UTF-8 length, the UTF-8 bytes of the symbol and a big-endian
    /// frequency.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(4 + self.counts.len() * 9);
        bytes.extend_from_slice(&(self.counts.len() as u32).to_be_bytes());

        let mut utf8 = [0u8; 4];
        for (&symbol, &count) in &self.counts {
            let encoded = symbol.encode_utf8(&mut utf8);
            bytes.push(encoded.len() as u8);
            bytes.extend_from_slice(encoded.as_bytes());
            bytes.extend_from_slice(&count.to_be_bytes());
        }
        bytes
    }

    /// Rebuilds a table serialized by [`to_bytes`](Self::to_bytes),
    /// rejecting any structural damage: truncated fields, symbol encodings
    /// that are not exactly one UTF-8 scalar, zero frequencies, duplicate
    /// symbols and trailing bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, HuffError> {
        let mut pos = 0usize;
        let distinct = read_u32(data, &mut pos)
            .ok_or_else(|| corrupt("frequency table shorter than its count field"))?
            as usize;

        let mut counts = BTreeMap::new();
        for _ in 0..distinct {
            let symbol_len = *data
                .get(pos)
                .ok_or_else(|| corrupt("frequency table entry truncated"))?
                as usize;
            pos += 1;
            if !(1..=4).contains(&symbol_len) {
                return Err(corrupt("symbol length outside the UTF-8 range 1..=4"));
            }

            let symbol_bytes = data
                .get(pos..pos + symbol_len)
                .ok_or_else(|| corrupt("symbol bytes truncated"))?;
            pos += symbol_len;
            let symbol = decode_symbol(symbol_bytes)?;

            let count = read_u32(data, &mut pos)
                .ok_or_else(|| corrupt("frequency field truncated"))?;
            if count == 0 {
                return Err(corrupt("symbol with zero frequency"));
            }
            if counts.insert(symbol, count).is_some() {
                return Err(corrupt("duplicate symbol in frequency table"));
            }
        }

        if pos != data.len() {
            return Err(corrupt("trailing bytes after the last table entry"));
        }
        Ok(FrequencyTable { counts })
    }
}

fn corrupt(message: &str) -> HuffError {
    HuffError::CorruptContainer(message.to_string())
}

fn read_u32(data: &[u8], pos: &mut usize) -> Option<u32> {
    let bytes: [u8; 4] = data.get(*pos..*pos + 4)?.try_into().ok()?;
    *pos += 4;
    Some(u32::from_be_bytes(bytes))
}

/// Decodes a length-prefixed symbol field, which must hold exactly one
/// Unicode scalar.
fn decode_symbol(bytes: &[u8]) -> Result<Symbol, HuffError> {
    let text =
        std::str::from_utf8(bytes).map_err(|_| corrupt("symbol bytes are not valid UTF-8"))?;
    let mut chars = text.chars();
    let symbol = chars
        .next()
        .ok_or_else(|| corrupt("empty symbol encoding"))?;
    if chars.next().is_some() {
        return Err(corrupt("symbol encoding spans more than one character"));
    }
    Ok(symbol)
}
