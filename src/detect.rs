/// ECB mode detection.
use std::collections::HashSet;

/// Report whether any fixed-size block of the ciphertext repeats an earlier
/// block.
///
/// ECB encrypts each block independently, so identical plaintext blocks give
/// identical ciphertext blocks; a repeat is a reliable fingerprint of the
/// mode. A negative result only means something when the plaintext contained
/// at least two identical, block-aligned blocks, so callers probing an oracle
/// should feed two or more full blocks of repeated filler first.
pub fn has_repeated_block(ciphertext: &[u8], block_size: usize) -> bool {
    let mut seen_blocks = HashSet::new();
    ciphertext
        .chunks(block_size)
        .any(|block| !seen_blocks.insert(block))
}
