/// Byte-wise XOR helpers.

/// XOR the first `a.len()` bytes of `b` into `a`.
///
/// The second buffer must be at least as long as the first; the output is
/// always `a.len()` bytes.
pub fn xor_bytes(a: &[u8], b: &[u8]) -> Result<Vec<u8>, String> {
    if a.len() > b.len() {
        return Err(format!(
            "second buffer must be at least as long as first ({} > {})",
            a.len(),
            b.len()
        ));
    }
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect())
}

/// XOR a message with a key, repeating the key as many times as needed.
pub fn repeating_key_xor(message: &[u8], key: &[u8]) -> Vec<u8> {
    message
        .iter()
        .zip(key.iter().cycle())
        .map(|(m, k)| m ^ k)
        .collect()
}

/// The number of differing bits between two equal-length buffers.
pub fn hamming_distance(a: &[u8], b: &[u8]) -> u32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{hex_decode, hex_encode};

    #[test]
    fn xor_bytes_xors_equal_length_buffers() {
        let a = hex_decode("1c0111001f010100061a024b53535009181c").unwrap();
        let b = hex_decode("686974207468652062756c6c277320657965").unwrap();

        let xored = xor_bytes(&a, &b).unwrap();

        assert_eq!(hex_encode(&xored), "746865206b696420646f6e277420706c6179");
    }

    #[test]
    fn xor_bytes_truncates_to_first_buffer() {
        let xored = xor_bytes(&[0x0F, 0xF0], &[0xFF, 0xFF, 0xFF, 0xFF]).unwrap();

        assert_eq!(xored, vec![0xF0, 0x0F]);
    }

    #[test]
    fn xor_bytes_fails_when_first_buffer_longer() {
        assert!(xor_bytes(&[1, 2, 3], &[1, 2]).is_err());
    }

    #[test]
    fn repeating_key_xor_encrypts_message() {
        let message = "Burning 'em, if you ain't quick and nimble\nI go crazy when I hear a cymbal";

        let ciphertext = repeating_key_xor(message.as_bytes(), b"ICE");

        let expected = "0b3637272a2b2e63622c2e69692a23693a2a3c6324202d623d63343c2a2622632427276527\
                        2a282b2f20430a652e2c652a3124333a653e2b2027630c692b20283165286326302e27282f";
        assert_eq!(ciphertext, hex_decode(expected).unwrap());
    }

    #[test]
    fn hamming_distance_counts_differing_bits() {
        assert_eq!(hamming_distance(b"this is a test", b"wokka wokka!!!"), 37);
    }
}
