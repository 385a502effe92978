//! Seed construction: random bits and digest-expanded bits.

use sha2::{Digest, Sha256};

use crate::error::{AutomataError, Result};
use crate::rule::check_probability;
use crate::source::UniformSource;

/// Default chance that a randomly seeded cell starts alive.
pub const DEFAULT_CHANCE: f64 = 0.40;

/// Draws `length` cells, each alive with probability `chance`.
pub fn random_bits<S: UniformSource + ?Sized>(
    length: usize,
    chance: f64,
    source: &mut S,
) -> Result<Vec<u8>> {
    if length == 0 {
        return Err(AutomataError::InvalidLength);
    }
    let chance = check_probability("chance", chance)?;
    Ok((0..length)
        .map(|_| u8::from(source.next_unit() < chance))
        .collect())
}

/// Expands bytes into bits, most significant bit first.
pub fn expand_bits(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes
        .iter()
        .flat_map(|&b| (0..8).rev().map(move |shift| (b >> shift) & 1))
}

/// Digests `data` with `D` and expands the digest into seed bits.
///
/// `length` defaults to the digest's bit length. Shorter lengths truncate the
/// bit stream; longer ones pad it with zeros. The result depends only on
/// the input bytes, the algorithm and the length.
pub fn digest_bits<D: Digest>(data: &[u8], length: Option<usize>) -> Result<Vec<u8>> {
    let digest = D::digest(data);
    let length = length.unwrap_or(digest.len() * 8);
    if length == 0 {
        return Err(AutomataError::InvalidLength);
    }
    let mut bits: Vec<u8> = expand_bits(&digest).take(length).collect();
    bits.resize(length, 0);
    Ok(bits)
}

/// [`digest_bits`] with SHA-256.
pub fn sha256_bits(data: &[u8], length: Option<usize>) -> Result<Vec<u8>> {
    digest_bits::<Sha256>(data, length)
}
