use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use dsi_progress_logger::{ProgressLog, ProgressLogger};
use log::info;

use crate::bits::{BitReader, BitWriter};
use crate::codec::{decode_symbols, encode_symbols, Codebook};
use crate::errors::HuffError;
use crate::freq::FrequencyTable;

/// Container layout, all integers big-endian:
///
/// | offset | size      | field                                    |
/// |--------|-----------|------------------------------------------|
/// | 0      | 4 bytes   | N, symbols in the original sequence      |
/// | 4      | 4 bytes   | L, byte length of the serialized table   |
/// | 8      | L bytes   | serialized frequency table               |
/// | 8 + L  | remaining | packed code bits, final byte zero-padded |
const HEADER_LEN: u64 = 8;

/// Byte sizes of a finished compression run.
#[derive(Debug, Clone, Copy)]
pub struct CompressionStats {
    pub original_bytes: u64,
    pub compressed_bytes: u64,
}

impl CompressionStats {
    /// Size reduction as a percentage of the original size. Negative when
    /// the container overhead exceeds what the codes save.
    pub fn reduction_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.compressed_bytes as f64 / self.original_bytes as f64) * 100.0
    }
}

/// Compresses `text` into a container written to `sink`.
///
/// The codebook is built fresh from the input; nothing is reused across
/// calls. Empty input produces a container with N = 0, an empty table and no
/// payload, which [`decompress`] turns back into the empty string.
pub fn compress<W: Write>(text: &str, mut sink: W) -> Result<CompressionStats, HuffError> {
    let symbol_count = text.chars().count();
    if symbol_count as u64 > u32::MAX as u64 {
        return Err(HuffError::InputTooLarge(symbol_count as u64));
    }

    let mut pl = ProgressLogger::default();

    pl.start("Counting symbol frequencies...");
    let freqs = FrequencyTable::from_text(text);
    pl.done();

    let table = freqs.to_bytes();
    sink.write_all(&(symbol_count as u32).to_be_bytes())?;
    sink.write_all(&(table.len() as u32).to_be_bytes())?;
    sink.write_all(&table)?;

    if symbol_count == 0 {
        sink.flush()?;
        return Ok(CompressionStats {
            original_bytes: 0,
            compressed_bytes: HEADER_LEN + table.len() as u64,
        });
    }

    pl.start("Building the Huffman tree...");
    // symbol_count > 0, so the table is never empty here
    let book = Codebook::from_frequencies(freqs)?;
    pl.done();

    pl.start("Encoding symbols...");
    let mut writer = BitWriter::new(sink);
    encode_symbols(text, &book.codes, &mut writer)?;
    writer.flush()?;
    pl.done();

    let payload_bits = book.encoded_bit_len();
    let stats = CompressionStats {
        original_bytes: text.len() as u64,
        compressed_bytes: HEADER_LEN + table.len() as u64 + payload_bits.div_ceil(8),
    };

    info!(
        "{} symbols over a {}-symbol alphabet packed into {} bits",
        symbol_count,
        book.freqs.len(),
        payload_bits,
    );
    Ok(stats)
}

/// Decodes a container back into the original text.
///
/// The header is validated eagerly, before any payload byte is looked at:
/// the declared table length must fit the file, the table itself must parse,
/// its counts must sum to N, and the payload must supply at least the exact
/// number of bits the rebuilt codes assign to N symbols. A corrupt header
/// therefore fails cleanly instead of decoding garbage.
pub fn decompress(data: &[u8]) -> Result<String, HuffError> {
    if data.len() < HEADER_LEN as usize {
        return Err(HuffError::CorruptContainer(
            "container shorter than its 8-byte header".to_string(),
        ));
    }
    let symbol_count = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
    let table_len = u32::from_be_bytes([data[4], data[5], data[6], data[7]]) as usize;

    let rest = &data[HEADER_LEN as usize..];
    if table_len > rest.len() {
        return Err(HuffError::CorruptContainer(format!(
            "table length field claims {} bytes but only {} remain",
            table_len,
            rest.len()
        )));
    }
    let (table_bytes, payload) = rest.split_at(table_len);

    let freqs = FrequencyTable::from_bytes(table_bytes)?;
    if freqs.total() != symbol_count as u64 {
        return Err(HuffError::CorruptContainer(format!(
            "frequency table accounts for {} symbols but the header claims {}",
            freqs.total(),
            symbol_count
        )));
    }
    if symbol_count == 0 {
        return Ok(String::new());
    }

    let mut pl = ProgressLogger::default();

    pl.start("Rebuilding the Huffman tree...");
    let book = Codebook::from_frequencies(freqs)?;
    pl.done();

    let needed_bits = book.encoded_bit_len();
    if (payload.len() as u64) * 8 < needed_bits {
        return Err(HuffError::CorruptContainer(format!(
            "payload holds {} bits but decoding {} symbols needs {}",
            payload.len() as u64 * 8,
            symbol_count,
            needed_bits
        )));
    }

    pl.start("Decoding symbols...");
    let mut reader = BitReader::new(payload);
    let text = decode_symbols(&book.tree, symbol_count, &mut reader);
    pl.done();

    Ok(text)
}

/// Reads `input` as UTF-8 text and writes its container to `output`.
pub fn compress_file(input: &Path, output: &Path) -> Result<CompressionStats, HuffError> {
    let text = std::fs::read_to_string(input)?;
    let sink = BufWriter::new(File::create(output)?);
    compress(&text, sink)
}

/// Reads a container from `input` and writes the decoded text to `output`.
/// The output file is only created after the whole container has decoded
/// successfully, so a corrupt input never leaves partial output behind.
pub fn decompress_file(input: &Path, output: &Path) -> Result<(), HuffError> {
    let data = std::fs::read(input)?;
    let text = decompress(&data)?;
    std::fs::write(output, text.as_bytes())?;
    Ok(())
}
