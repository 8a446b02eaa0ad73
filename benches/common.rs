#![allow(dead_code)]

use rand::distributions::Uniform;
use rand::{thread_rng, Rng};
use std::ops::Range;

/// Generates a random byte string, length drawn from `len` and bytes
/// drawn from the alphabet `0..=scale.end`, so both input size and
/// alphabet size can be varied independently.
pub fn gen_bytes(len: Range<usize>, scale: Range<u8>) -> Vec<u8> {
    let mut rng = thread_rng();
    let n = rng.gen_range(len.start..len.end.max(len.start + 1));
    let hi = scale.end.max(scale.start + 1).saturating_sub(1);
    let uni = Uniform::from(0..=hi);
    (0..n).map(|_| rng.sample(uni)).collect()
}

/// Picks a random contiguous slice of `text` as a search pattern, so
/// benchmarked patterns are guaranteed to occur at least once.
pub fn gen_pattern(text: &[u8], len: usize) -> Vec<u8> {
    if text.is_empty() || len == 0 {
        return Vec::new();
    }
    let len = len.min(text.len());
    let mut rng = thread_rng();
    let start = rng.gen_range(0..=(text.len() - len));
    text[start..start + len].to_vec()
}
