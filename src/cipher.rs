/// AES-128 in ECB and CBC modes, built on the raw block primitive.
///
/// The attack code needs per-block control over what gets encrypted, so the
/// modes are assembled by hand here rather than going through a higher-level
/// mode wrapper.
use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes128;

use crate::{pkcs7_pad, pkcs7_unpad};

pub const BLOCK_SIZE: usize = 16;

pub fn encrypt_aes_128_ecb(plaintext: &[u8], key: &[u8; BLOCK_SIZE]) -> Vec<u8> {
    let cipher = Aes128::new(GenericArray::from_slice(key));
    let padded = pkcs7_pad(plaintext, BLOCK_SIZE);
    let mut ciphertext = Vec::with_capacity(padded.len());
    for chunk in padded.chunks_exact(BLOCK_SIZE) {
        let mut block = GenericArray::clone_from_slice(chunk);
        cipher.encrypt_block(&mut block);
        ciphertext.extend_from_slice(&block);
    }
    ciphertext
}

pub fn decrypt_aes_128_ecb(ciphertext: &[u8], key: &[u8; BLOCK_SIZE]) -> Result<Vec<u8>, String> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(format!(
            "ciphertext length {} is not a positive multiple of {BLOCK_SIZE}",
            ciphertext.len()
        ));
    }
    let cipher = Aes128::new(GenericArray::from_slice(key));
    let mut plaintext = Vec::with_capacity(ciphertext.len());
    for chunk in ciphertext.chunks_exact(BLOCK_SIZE) {
        let mut block = GenericArray::clone_from_slice(chunk);
        cipher.decrypt_block(&mut block);
        plaintext.extend_from_slice(&block);
    }
    pkcs7_unpad(&mut plaintext)?;
    Ok(plaintext)
}

pub fn encrypt_aes_128_cbc(
    plaintext: &[u8],
    key: &[u8; BLOCK_SIZE],
    iv: &[u8; BLOCK_SIZE],
) -> Vec<u8> {
    let cipher = Aes128::new(GenericArray::from_slice(key));
    let padded = pkcs7_pad(plaintext, BLOCK_SIZE);
    let mut ciphertext = Vec::with_capacity(padded.len());
    let mut last_block = *iv;
    for chunk in padded.chunks_exact(BLOCK_SIZE) {
        let mut block = GenericArray::clone_from_slice(&xor_block(
            chunk.try_into().expect("chunk is one block"),
            &last_block,
        ));
        cipher.encrypt_block(&mut block);
        last_block = block
            .as_slice()
            .try_into()
            .expect("encrypted block is one block");
        ciphertext.extend_from_slice(&last_block);
    }
    ciphertext
}

pub fn decrypt_aes_128_cbc(
    ciphertext: &[u8],
    key: &[u8; BLOCK_SIZE],
    iv: &[u8; BLOCK_SIZE],
) -> Result<Vec<u8>, String> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(format!(
            "ciphertext length {} is not a positive multiple of {BLOCK_SIZE}",
            ciphertext.len()
        ));
    }
    let cipher = Aes128::new(GenericArray::from_slice(key));
    let mut plaintext = Vec::with_capacity(ciphertext.len());
    let mut last_block = *iv;
    for chunk in ciphertext.chunks_exact(BLOCK_SIZE) {
        let mut block = GenericArray::clone_from_slice(chunk);
        cipher.decrypt_block(&mut block);
        let decrypted: [u8; BLOCK_SIZE] = block
            .as_slice()
            .try_into()
            .expect("decrypted block is one block");
        plaintext.extend_from_slice(&xor_block(&decrypted, &last_block));
        last_block = chunk.try_into().expect("chunk is one block");
    }
    pkcs7_unpad(&mut plaintext)?;
    Ok(plaintext)
}

fn xor_block(a: &[u8; BLOCK_SIZE], b: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
    let mut out = [0u8; BLOCK_SIZE];
    for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b)) {
        *o = x ^ y;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::random_bytes;

    #[test]
    fn ecb_encrypt_block_matches_known_vector() {
        let key: [u8; 16] = b"Thats my Kung Fu".as_slice().try_into().unwrap();
        let plaintext = b"Two One Nine Two";

        let ciphertext = encrypt_aes_128_ecb(plaintext, &key);

        #[rustfmt::skip]
        let expected = [
            0x29, 0xC3, 0x50, 0x5F,
            0x57, 0x14, 0x20, 0xF6,
            0x40, 0x22, 0x99, 0xB3,
            0x1A, 0x02, 0xD7, 0x3A,
        ];
        assert_eq!(ciphertext[..16], expected);
        // One extra block for the mandatory padding.
        assert_eq!(ciphertext.len(), 32);
    }

    #[test]
    fn ecb_round_trips() {
        let key = random_bytes::<16>();
        let plaintext = b"attack at dawn, bring shovels";

        let ciphertext = encrypt_aes_128_ecb(plaintext, &key);
        let decrypted = decrypt_aes_128_ecb(&ciphertext, &key).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn ecb_is_deterministic() {
        let key = random_bytes::<16>();
        let plaintext = b"the same plaintext every time";

        assert_eq!(
            encrypt_aes_128_ecb(plaintext, &key),
            encrypt_aes_128_ecb(plaintext, &key)
        );
    }

    #[test]
    fn cbc_round_trips() {
        let key = random_bytes::<16>();
        let iv = random_bytes::<16>();
        let plaintext = b"I'm back and I'm ringin' the bell";

        let ciphertext = encrypt_aes_128_cbc(plaintext, &key, &iv);
        let decrypted = decrypt_aes_128_cbc(&ciphertext, &key, &iv).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn cbc_chains_blocks() {
        let key = random_bytes::<16>();
        let iv = random_bytes::<16>();
        let plaintext = [b'A'; 48];

        let ciphertext = encrypt_aes_128_cbc(&plaintext, &key, &iv);

        // Identical plaintext blocks must not produce identical ciphertext
        // blocks once chained.
        assert_ne!(ciphertext[..16], ciphertext[16..32]);
        assert_ne!(ciphertext[16..32], ciphertext[32..48]);
    }

    #[test]
    fn decrypt_rejects_ragged_ciphertext() {
        let key = random_bytes::<16>();

        assert!(decrypt_aes_128_ecb(&[0u8; 17], &key).is_err());
        assert!(decrypt_aes_128_cbc(&[0u8; 15], &key, &key).is_err());
    }
}
