/// CBC bit-flipping: forging plaintext the oracle's sanitizer would never
/// let through.
use crate::{decrypt_aes_128_cbc, encrypt_aes_128_cbc, BLOCK_SIZE};

/// A CBC oracle that frames attacker input in a query string, stripping the
/// metacharacters `;` and `=` from the input first.
///
/// The sanitizer only ever sees the submitted plaintext, which is exactly
/// the gap the bit-flipping attack drives through.
pub struct CbcQueryOracle {
    key: [u8; BLOCK_SIZE],
    iv: [u8; BLOCK_SIZE],
}

impl CbcQueryOracle {
    // Two full blocks, so attacker input starts block-aligned at offset 32.
    const QUERY_PREFIX: &'static [u8] = b"comment1=cooking%20MCs;userdata=";
    const QUERY_SUFFIX: &'static [u8] = b";comment2=%20like%20a%20pound%20of%20bacon";

    pub fn new(key: [u8; BLOCK_SIZE], iv: [u8; BLOCK_SIZE]) -> Self {
        Self { key, iv }
    }

    pub fn encrypt(&self, input: &[u8]) -> Vec<u8> {
        let sanitized: Vec<u8> = input
            .iter()
            .filter(|b| ![b';', b'='].contains(b))
            .copied()
            .collect();
        let plaintext = [Self::QUERY_PREFIX, &sanitized, Self::QUERY_SUFFIX].concat();
        encrypt_aes_128_cbc(&plaintext, &self.key, &self.iv)
    }

    /// Decrypt a ciphertext under the oracle's own key and report whether it
    /// contains the admin token.
    pub fn is_admin(&self, ciphertext: &[u8]) -> bool {
        let token = b";admin=true;";
        decrypt_aes_128_cbc(ciphertext, &self.key, &self.iv)
            .map(|plaintext| plaintext.windows(token.len()).any(|w| w == token))
            .unwrap_or(false)
    }
}

/// Forge a ciphertext that decrypts to a query containing `;admin=true;`.
///
/// Submits two blocks of filler: the second is where the forgery will land,
/// the first is sacrificial. CBC decryption XORs each decrypted block with
/// the previous ciphertext block, so XORing `filler ⊕ desired` into the
/// sacrificial ciphertext block turns the following block's plaintext into
/// exactly `desired`, at the price of scrambling the sacrificial block,
/// which carried nothing the checker cares about.
pub fn forge_admin_ciphertext(oracle: &CbcQueryOracle) -> Vec<u8> {
    let filler = [b'A'; 2 * BLOCK_SIZE];
    let desired = b";admin=true;AAAA";

    let mut ciphertext = oracle.encrypt(&filler);
    let sacrificial_block = CbcQueryOracle::QUERY_PREFIX.len();
    for (byte, d) in ciphertext[sacrificial_block..sacrificial_block + BLOCK_SIZE]
        .iter_mut()
        .zip(desired)
    {
        *byte ^= b'A' ^ d;
    }
    ciphertext
}
