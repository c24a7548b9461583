/// Hex and base64 transcoding.
use base64::Engine;

pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

pub fn hex_decode(hex: &str) -> Result<Vec<u8>, String> {
    // from_str_radix tolerates a leading '+', so check digits ourselves.
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("invalid hex string: '{hex}'"));
    }
    if hex.len() % 2 != 0 {
        return Err(format!("odd-length hex string ({} chars)", hex.len()));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("{e}: '{hex}'")))
        .collect()
}

pub fn base64_encode(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

pub fn base64_decode(s: &str) -> Result<Vec<u8>, String> {
    base64::engine::general_purpose::STANDARD
        .decode(s.trim().replace('\n', ""))
        .map_err(|e| format!("{e}"))
}

pub fn hex_to_base64(hex: &str) -> Result<String, String> {
    Ok(base64_encode(&hex_decode(hex)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[test]
    fn hex_to_base64_converts_known_string() {
        let hex = "49276d206b696c6c696e6720796f757220627261696e206c696b65206120706f69736f6e6f7573206d757368726f6f6d";

        assert_eq!(
            hex_to_base64(hex).unwrap(),
            "SSdtIGtpbGxpbmcgeW91ciBicmFpbiBsaWtlIGEgcG9pc29ub3VzIG11c2hyb29t"
        );
    }

    #[rstest]
    #[case("0a3f", &[0x0A, 0x3F])]
    #[case("", &[])]
    #[case("ff00ff", &[0xFF, 0x00, 0xFF])]
    fn hex_decode_returns_expected_bytes(#[case] hex: &str, #[case] expected: &[u8]) {
        assert_eq!(hex_decode(hex).unwrap(), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("zz")]
    #[case("+f")]
    #[case("-1")]
    fn hex_decode_rejects_invalid_input(#[case] hex: &str) {
        assert!(hex_decode(hex).is_err());
    }

    #[test]
    fn hex_round_trips() {
        let bytes: Vec<u8> = (0..=255).collect();

        let decoded = hex_decode(&hex_encode(&bytes)).unwrap();

        assert_eq!(decoded, bytes);
    }

    #[rstest]
    #[case("QUJD", b"ABC".as_slice())]
    #[case("T2ggbXkgZ29zaA==", &[79, 104, 32, 109, 121, 32, 103, 111, 115, 104])]
    fn base64_decode_returns_expected_bytes(#[case] encoded: &str, #[case] expected: &[u8]) {
        assert_eq!(base64_decode(encoded).unwrap(), expected);
    }

    #[test]
    fn base64_round_trips() {
        let bytes: Vec<u8> = (0..=255).collect();

        let decoded = base64_decode(&base64_encode(&bytes)).unwrap();

        assert_eq!(decoded, bytes);
    }
}
