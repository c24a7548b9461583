/// Encryption oracles the attacks are run against.
use rand::Rng;

use crate::{encrypt_aes_128_cbc, encrypt_aes_128_ecb, BLOCK_SIZE};

/// A black box that encrypts attacker-chosen plaintext under secrets the
/// attacker never sees.
///
/// Implementations must be deterministic (same input, same output) and
/// callable through a shared reference, so independent probes can run
/// concurrently.
pub trait EncryptionOracle {
    fn encrypt(&self, input: &[u8]) -> Vec<u8>;
}

/// An AES-128-ECB oracle that hides a prefix and a secret suffix around
/// every input it encrypts.
///
/// The key, prefix and suffix are fixed at construction and never exposed;
/// the only observable behaviour is `encrypt`.
pub struct EcbSuffixOracle {
    key: [u8; BLOCK_SIZE],
    prefix: Vec<u8>,
    suffix: Vec<u8>,
}

impl EcbSuffixOracle {
    pub fn new(key: [u8; BLOCK_SIZE], suffix: Vec<u8>) -> Self {
        Self::with_prefix(key, Vec::new(), suffix)
    }

    pub fn with_prefix(key: [u8; BLOCK_SIZE], prefix: Vec<u8>, suffix: Vec<u8>) -> Self {
        Self {
            key,
            prefix,
            suffix,
        }
    }

    /// Build an oracle whose prefix is random bytes of random length below
    /// `max_prefix_len`.
    pub fn with_random_prefix(
        key: [u8; BLOCK_SIZE],
        suffix: Vec<u8>,
        max_prefix_len: usize,
    ) -> Self {
        let mut rng = rand::thread_rng();
        let prefix_len = if max_prefix_len == 0 {
            0
        } else {
            rng.gen_range(0..max_prefix_len)
        };
        let prefix = (0..prefix_len).map(|_| rng.gen()).collect();
        Self::with_prefix(key, prefix, suffix)
    }
}

impl EncryptionOracle for EcbSuffixOracle {
    fn encrypt(&self, input: &[u8]) -> Vec<u8> {
        let plaintext = [self.prefix.as_slice(), input, &self.suffix].concat();
        encrypt_aes_128_ecb(&plaintext, &self.key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Ecb,
    Cbc,
}

/// Encrypt a plaintext under a fresh random key, flipping a coin between ECB
/// and CBC and wrapping the input in a few random bytes either side.
///
/// Returns the mode actually used so a classifier can be scored against it.
pub fn encrypt_with_random_mode(plaintext: &[u8]) -> (Mode, Vec<u8>) {
    let mut rng = rand::thread_rng();
    let key = random_bytes::<BLOCK_SIZE>();
    let head: Vec<u8> = (0..rng.gen_range(5..=10)).map(|_| rng.gen()).collect();
    let tail: Vec<u8> = (0..rng.gen_range(5..=10)).map(|_| rng.gen()).collect();
    let framed = [head.as_slice(), plaintext, &tail].concat();
    if rng.gen::<bool>() {
        (Mode::Ecb, encrypt_aes_128_ecb(&framed, &key))
    } else {
        let iv = random_bytes::<BLOCK_SIZE>();
        (Mode::Cbc, encrypt_aes_128_cbc(&framed, &key, &iv))
    }
}

pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    rand::thread_rng().fill(&mut bytes[..]);
    bytes
}
