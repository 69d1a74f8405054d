use rand::prelude::{Distribution, SmallRng};
use rand::SeedableRng;
use rand_distr::Zipf;

#[allow(dead_code)]
pub const SAMPLE_TEXT: &str =
    "the quick brown fox jumps over the lazy dog, then naps in the afternoon sun";

/// Number of letters the generated corpora draw from.
const ALPHABET: u64 = 26;

/// Generates `len` lowercase letters sampled from a Zipfian distribution,
/// which gives the skewed per-symbol counts typical of natural text.
#[allow(dead_code)]
pub fn zipf_text(seed: u64, len: usize) -> String {
    let mut rng = SmallRng::seed_from_u64(seed);
    let distribution = Zipf::new(ALPHABET, 1.2f32).unwrap();

    (0..len)
        .map(|_| {
            let rank = distribution.sample(&mut rng) as u8;
            (b'a' + rank - 1) as char
        })
        .collect()
}
