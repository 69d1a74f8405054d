mod common;

use rstest::rstest;

use huffpress::bits::{BitReader, BitWriter};
use huffpress::codec::{decode_symbols, encode_symbols};
use huffpress::{Codebook, HuffError};

use crate::common::*;

fn round_trip(text: &str) -> String {
    let book = Codebook::from_text(text).expect("non-empty input");

    let mut payload = Vec::new();
    let mut writer = BitWriter::new(&mut payload);
    encode_symbols(text, &book.codes, &mut writer).unwrap();
    writer.flush().unwrap();

    let mut reader = BitReader::new(&payload);
    decode_symbols(&book.tree, text.chars().count(), &mut reader)
}

#[rstest]
#[case(SAMPLE_TEXT.to_string())]
#[case("mississippi".to_string())]
#[case("ab".to_string())]
#[case("héllo wörld ☃ ░▒▓".to_string())]
#[case(zipf_text(1, 10_000))]
#[case(zipf_text(2, 100_000))]
fn decoder_reproduces_the_encoded_sequence(#[case] text: String) {
    assert_eq!(round_trip(&text), text);
}

#[test]
fn single_symbol_run_round_trips() {
    assert_eq!(round_trip("aaaa"), "aaaa");
}

#[test]
fn single_symbol_decode_reads_no_payload_bits() {
    let book = Codebook::from_text("xxxxx").unwrap();

    // an empty payload suffices: the bare-leaf tree yields its symbol
    // without touching the reader
    let mut reader = BitReader::new(&[]);
    assert_eq!(decode_symbols(&book.tree, 5, &mut reader), "xxxxx");
}

#[test]
fn four_as_encode_to_four_zero_bits() {
    let book = Codebook::from_text("aaaa").unwrap();

    let mut payload = Vec::new();
    let mut writer = BitWriter::new(&mut payload);
    encode_symbols("aaaa", &book.codes, &mut writer).unwrap();
    writer.flush().unwrap();

    assert_eq!(book.encoded_bit_len(), 4);
    assert_eq!(payload, vec![0b0000_0000]);
}

#[test]
fn symbol_outside_the_table_is_a_lookup_error() {
    let book = Codebook::from_text("aaab").unwrap();

    let mut writer = BitWriter::new(Vec::new());
    let result = encode_symbols("cab", &book.codes, &mut writer);

    assert!(matches!(result, Err(HuffError::MissingCode('c'))));
}

#[test]
fn codebook_of_empty_input_is_none() {
    assert!(Codebook::from_text("").is_none());
}

#[test]
fn payload_length_matches_the_bit_accounting() {
    let text = zipf_text(9, 25_000);
    let book = Codebook::from_text(&text).unwrap();

    let mut payload = Vec::new();
    let mut writer = BitWriter::new(&mut payload);
    encode_symbols(&text, &book.codes, &mut writer).unwrap();
    writer.flush().unwrap();

    assert_eq!(payload.len() as u64, book.encoded_bit_len().div_ceil(8));
}
