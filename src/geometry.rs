/// Probing an oracle's layout from nothing but ciphertext lengths and block
/// collisions.
use crate::{AttackError, EncryptionOracle};

/// Upper bound on the block size probe. No block cipher in scope has blocks
/// anywhere near this large, so failing to see a length jump within this many
/// filler bytes means the oracle is not padding the way we assume.
const MAX_BLOCK_SIZE: usize = 128;

/// Everything the byte recovery engine needs to know about an oracle's
/// layout, derived purely from chosen-plaintext probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub block_size: usize,
    pub prefix_len: usize,
    pub suffix_len: usize,
}

/// Determine block size, hidden prefix length and secret suffix length.
///
/// Three probes, in order:
/// 1. Grow a filler input one byte at a time until the ciphertext length
///    jumps; the jump is the block size, because padding always adds between
///    one byte and one full block.
/// 2. Encrypt two inputs differing only in their first byte; the first block
///    where the ciphertexts diverge is where attacker input begins. Then grow
///    a filler run until two consecutive blocks after that boundary become
///    identical, which pins down the prefix length within the boundary block.
/// 3. Account for the suffix from the lengths observed at the padding jump.
///
/// Step 2 assumes an ECB oracle; if no filler length up to one full block
/// produces the duplicate-block signature, the oracle is reported as not ECB
/// rather than probed further.
pub fn probe_geometry(oracle: &impl EncryptionOracle) -> Result<Geometry, AttackError> {
    let base_len = oracle.encrypt(&[]).len();
    let mut fill = Vec::new();
    let jumped_len = loop {
        fill.push(b'A');
        let len = oracle.encrypt(&fill).len();
        if len != base_len {
            break len;
        }
        if fill.len() > MAX_BLOCK_SIZE {
            return Err(AttackError::BlockSizeNotFound {
                max_trials: MAX_BLOCK_SIZE,
            });
        }
    };
    let block_size = jumped_len - base_len;

    let prefix_len = probe_prefix_len(oracle, block_size)?;

    // At the jump the padded plaintext grew by one whole block, so the
    // unpadded length `prefix + fill + suffix` was an exact block multiple.
    let suffix_len = jumped_len
        .checked_sub(prefix_len + fill.len() + block_size)
        .ok_or(AttackError::GeometryInconsistent(
            "prefix and filler longer than the padded ciphertext",
        ))?;

    // Cross-check against the no-input probe: the padding it implies must be
    // between one byte and one block.
    let implied_padding = base_len
        .checked_sub(prefix_len + suffix_len)
        .ok_or(AttackError::GeometryInconsistent(
            "prefix and suffix do not fit the base ciphertext",
        ))?;
    if implied_padding == 0 || implied_padding > block_size {
        return Err(AttackError::GeometryInconsistent(
            "implied padding is not between one byte and one block",
        ));
    }

    Ok(Geometry {
        block_size,
        prefix_len,
        suffix_len,
    })
}

fn probe_prefix_len(
    oracle: &impl EncryptionOracle,
    block_size: usize,
) -> Result<usize, AttackError> {
    // Blocks before the attacker's first byte are frozen; the first block
    // where these two ciphertexts differ is the one our input starts in.
    let c1 = oracle.encrypt(b"0");
    let c2 = oracle.encrypt(b"1");
    let boundary_block = c1
        .chunks(block_size)
        .zip(c2.chunks(block_size))
        .position(|(a, b)| a != b)
        .ok_or(AttackError::GeometryInconsistent(
            "different probe inputs produced identical ciphertexts",
        ))?;

    // Grow the filler until it completes the boundary block and then fills
    // the two blocks after it exactly, which makes those two blocks encrypt
    // identically. The extra filler that achieves this tells us how much of
    // the boundary block belongs to the prefix. One full block of trials is
    // always enough under ECB.
    for extra in 0..=block_size {
        let ciphertext = oracle.encrypt(&vec![b'A'; 2 * block_size + extra]);
        let mut blocks = ciphertext.chunks(block_size).skip(boundary_block + 1);
        let (first, second) = match (blocks.next(), blocks.next()) {
            (Some(first), Some(second)) => (first, second),
            _ => {
                return Err(AttackError::GeometryInconsistent(
                    "ciphertext too short for the probed boundary block",
                ))
            }
        };
        if first == second {
            return Ok((boundary_block + 1) * block_size - extra);
        }
    }

    // ECB must show the duplicate-block signature within one block of fill.
    Err(AttackError::NotEcb)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{encrypt_aes_128_cbc, random_bytes, EcbSuffixOracle, BLOCK_SIZE};

    #[test]
    fn probes_exact_prefix_length_for_every_alignment() {
        let suffix = b"secret suffix".to_vec();
        for prefix_len in 0..(2 * BLOCK_SIZE) {
            let oracle = EcbSuffixOracle::with_prefix(
                random_bytes(),
                vec![b'P'; prefix_len],
                suffix.clone(),
            );

            let geometry = probe_geometry(&oracle).unwrap();

            assert_eq!(
                geometry,
                Geometry {
                    block_size: BLOCK_SIZE,
                    prefix_len,
                    suffix_len: suffix.len(),
                },
                "failed for prefix length {prefix_len}"
            );
        }
    }

    #[test]
    fn probes_geometry_without_a_prefix() {
        let oracle = EcbSuffixOracle::new(random_bytes(), vec![0x42; 20]);

        let geometry = probe_geometry(&oracle).unwrap();

        assert_eq!(
            geometry,
            Geometry {
                block_size: BLOCK_SIZE,
                prefix_len: 0,
                suffix_len: 20,
            }
        );
    }

    #[test]
    fn probes_zero_length_suffix() {
        let oracle = EcbSuffixOracle::with_prefix(random_bytes(), vec![b'P'; 7], Vec::new());

        let geometry = probe_geometry(&oracle).unwrap();

        assert_eq!(geometry.suffix_len, 0);
    }

    #[test]
    fn probes_multi_block_suffix() {
        let oracle =
            EcbSuffixOracle::with_prefix(random_bytes(), vec![b'P'; 30], vec![b'S'; 100]);

        let geometry = probe_geometry(&oracle).unwrap();

        assert_eq!(geometry.prefix_len, 30);
        assert_eq!(geometry.suffix_len, 100);
    }

    struct CbcOracle {
        key: [u8; BLOCK_SIZE],
        iv: [u8; BLOCK_SIZE],
        suffix: Vec<u8>,
    }

    impl EncryptionOracle for CbcOracle {
        fn encrypt(&self, input: &[u8]) -> Vec<u8> {
            let plaintext = [input, self.suffix.as_slice()].concat();
            encrypt_aes_128_cbc(&plaintext, &self.key, &self.iv)
        }
    }

    #[test]
    fn reports_not_ecb_for_cbc_oracle() {
        let oracle = CbcOracle {
            key: random_bytes(),
            iv: random_bytes(),
            suffix: b"chained, not codebook".to_vec(),
        };

        assert_eq!(probe_geometry(&oracle), Err(AttackError::NotEcb));
    }
}
