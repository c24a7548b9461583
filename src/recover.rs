/// Byte-at-a-time recovery of an ECB oracle's secret suffix.
use std::collections::HashMap;

use log::{debug, warn};
use rayon::prelude::*;

use crate::{has_repeated_block, probe_geometry, AttackError, EncryptionOracle, Geometry};

/// Recover the secret suffix an ECB oracle appends to every input.
///
/// Probes the oracle's geometry, confirms it really is encrypting in ECB
/// mode, then resolves the suffix one byte at a time: filler aligns the next
/// unknown byte to the end of a block, a dictionary maps each of the 256
/// possible ciphertext blocks back to the byte that produced it, and the
/// block the oracle actually emits picks out the true byte.
///
/// The recovered bytes so far feed every later dictionary, so positions are
/// resolved strictly in order; only the 256 probes within one position are
/// independent, and those run in parallel.
pub fn recover_suffix<O>(oracle: &O) -> Result<Vec<u8>, AttackError>
where
    O: EncryptionOracle + Sync,
{
    let Geometry {
        block_size,
        prefix_len,
        suffix_len,
    } = probe_geometry(oracle)?;

    // Three blocks of filler guarantee two identical aligned blocks whatever
    // the prefix alignment, so a negative here is conclusive.
    if !has_repeated_block(&oracle.encrypt(&vec![b'A'; 3 * block_size]), block_size) {
        return Err(AttackError::NotEcb);
    }
    debug!("oracle geometry: block size {block_size}, prefix {prefix_len}, suffix {suffix_len}");

    // Filler that rounds the hidden prefix up to a block boundary; everything
    // we control starts at `input_start`.
    let prefix_fill = block_size - prefix_len % block_size;
    let input_start = prefix_len + prefix_fill;

    let mut recovered = Vec::with_capacity(suffix_len);
    for index in 0..suffix_len {
        let block_start = input_start + (index / block_size) * block_size;
        // Enough filler that the byte at `index` lands last in its block.
        let filler = vec![b'A'; prefix_fill + block_size - index % block_size - 1];

        let dictionary = build_dictionary(oracle, &filler, &recovered, block_start, block_size);
        let ciphertext = oracle.encrypt(&filler);
        let target_block = &ciphertext[block_start..block_start + block_size];
        match dictionary.get(target_block) {
            Some(&byte) => recovered.push(byte),
            // A miss means the oracle is non-deterministic or our offsets are
            // wrong; everything recovered so far is suspect, so drop it.
            None => return Err(AttackError::DictionaryMiss { index }),
        }
    }
    Ok(recovered)
}

/// Map each candidate value of the next unknown byte to the ciphertext block
/// it produces at the target offset.
fn build_dictionary<O>(
    oracle: &O,
    filler: &[u8],
    recovered: &[u8],
    block_start: usize,
    block_size: usize,
) -> HashMap<Vec<u8>, u8>
where
    O: EncryptionOracle + Sync,
{
    let entries: Vec<(Vec<u8>, u8)> = (0..=255u8)
        .into_par_iter()
        .map(|candidate| {
            let probe = [filler, recovered, &[candidate]].concat();
            let ciphertext = oracle.encrypt(&probe);
            let block = ciphertext[block_start..block_start + block_size].to_vec();
            (block, candidate)
        })
        .collect();

    let mut dictionary = HashMap::with_capacity(entries.len());
    for (block, candidate) in entries {
        if let Some(previous) = dictionary.insert(block, candidate) {
            // Distinct candidates cannot produce the same block under a real
            // block cipher; keep the latest entry but make the anomaly known.
            warn!("dictionary collision: candidates {previous} and {candidate} map to one block");
        }
    }
    dictionary
}
