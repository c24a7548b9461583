// Breaking single-byte and repeating-key XOR ciphers with English letter
// statistics.
//
// Candidate plaintexts are scored by the Bhattacharyya coefficient between
// their letter distribution and a reference English one: the sum over a-z of
// sqrt(observed * expected). The closer the distributions, the nearer the
// coefficient gets to 1, so -ln(coefficient) makes a distance where lower is
// more English-like.
//
// Case is folded before counting, which makes a key byte and its case-flipped
// twin score identically (they differ in the single ASCII case bit, so one
// produces the same text as the other with the cases swapped). The tiebreak
// on non-printable bytes settles it: the wrong twin also flips that bit in
// every space, turning them into NULs.
use std::ops::Range;

use rayon::prelude::*;

use crate::{hamming_distance, repeating_key_xor};

// Relative frequencies of a-z in English text.
const LETTER_FREQUENCIES: [f64; 26] = [
    0.0804, // a
    0.0148, // b
    0.0334, // c
    0.0382, // d
    0.1249, // e
    0.0240, // f
    0.0187, // g
    0.0505, // h
    0.0757, // i
    0.0016, // j
    0.0054, // k
    0.0407, // l
    0.0251, // m
    0.0723, // n
    0.0764, // o
    0.0214, // p
    0.0012, // q
    0.0628, // r
    0.0651, // s
    0.0928, // t
    0.0273, // u
    0.0105, // v
    0.0168, // w
    0.0023, // x
    0.0166, // y
    0.0009, // z
];

pub struct XorBreakResult {
    pub plaintext: Vec<u8>,
    pub key: u8,
    pub score: f64,
}

/// Score how far a candidate plaintext's letter distribution is from
/// English. Lower is better; `INFINITY` means no overlap at all.
pub fn english_score(bytes: &[u8]) -> f64 {
    if bytes.is_empty() {
        return f64::INFINITY;
    }
    let mut counts = [0u32; 26];
    for &b in bytes {
        let c = b.to_ascii_lowercase();
        if c.is_ascii_lowercase() {
            counts[(c - b'a') as usize] += 1;
        }
    }
    let total = bytes.len() as f64;
    let coefficient: f64 = counts
        .iter()
        .zip(LETTER_FREQUENCIES.iter())
        .map(|(&count, &expected)| (count as f64 / total * expected).sqrt())
        .sum();
    if coefficient == 0.0 {
        f64::INFINITY
    } else {
        -coefficient.ln()
    }
}

/// Brute force a ciphertext XORed with a single repeated byte.
///
/// Tries all 256 keys in parallel, keeping the candidate whose plaintext
/// scores most English-like, with ties broken by fewer non-printable bytes.
pub fn break_single_byte_xor(ciphertext: &[u8]) -> XorBreakResult {
    let (key, plaintext, score, _) = (0..=255u8)
        .into_par_iter()
        .map(|key| {
            let plaintext = repeating_key_xor(ciphertext, &[key]);
            let score = english_score(&plaintext);
            let n_unprintable = count_unprintable(&plaintext);
            (key, plaintext, score, n_unprintable)
        })
        .min_by(|a, b| a.2.total_cmp(&b.2).then(a.3.cmp(&b.3)))
        .expect("candidate key range is non-empty");
    XorBreakResult {
        plaintext,
        key,
        score,
    }
}

/// Break a repeating-key XOR cipher, returning the key and the plaintext.
///
/// The key size is guessed by the normalized Hamming distance between leading
/// key-sized blocks (bytes XORed with the same key byte sit at common
/// multiples of the key size, and English XORed with English has a low bit
/// distance). The top few guesses are each solved column-by-column as
/// single-byte XOR, and the plaintext that scores best wins.
///
/// Returns `None` when the ciphertext is too short to hold two blocks of any
/// key size in the range.
pub fn break_repeating_key_xor(
    ciphertext: &[u8],
    key_sizes: Range<usize>,
) -> Option<(Vec<u8>, Vec<u8>)> {
    let mut ranked: Vec<(f64, usize)> = key_sizes
        .filter(|&ks| ks > 0 && 2 * ks <= ciphertext.len())
        .map(|ks| (normalized_block_distance(ciphertext, ks), ks))
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut best: Option<(f64, Vec<u8>, Vec<u8>)> = None;
    for &(_, key_size) in ranked.iter().take(5) {
        let key: Vec<u8> = (0..key_size)
            .map(|offset| {
                let column: Vec<u8> = ciphertext
                    .iter()
                    .skip(offset)
                    .step_by(key_size)
                    .copied()
                    .collect();
                break_single_byte_xor(&column).key
            })
            .collect();
        let plaintext = repeating_key_xor(ciphertext, &key);
        let score = english_score(&plaintext);
        if best.as_ref().map_or(true, |(s, _, _)| score < *s) {
            best = Some((score, key, plaintext));
        }
    }

    best.map(|(_, key, plaintext)| (key, plaintext))
}

fn normalized_block_distance(bytes: &[u8], key_size: usize) -> f64 {
    let blocks: Vec<&[u8]> = bytes.chunks_exact(key_size).take(6).collect();
    let mut total = 0;
    let mut n_pairs = 0;
    for (i, a) in blocks.iter().enumerate() {
        for b in &blocks[i + 1..] {
            total += hamming_distance(a, b);
            n_pairs += 1;
        }
    }
    total as f64 / n_pairs as f64 / key_size as f64
}

fn count_unprintable(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .filter(|b| !(b.is_ascii_graphic() || b.is_ascii_whitespace()))
        .count()
}
