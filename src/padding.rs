/// PKCS#7 padding.

/// Append PKCS#7 padding to a message for the given block size.
///
/// A message whose length is already a multiple of the block size gains a
/// full block of padding, so every padded message ends in at least one
/// padding byte.
pub fn pkcs7_pad(message: &[u8], block_size: usize) -> Vec<u8> {
    debug_assert!(block_size > 0 && block_size < 256);
    let n_pad = block_size - message.len() % block_size;
    let mut padded = Vec::with_capacity(message.len() + n_pad);
    padded.extend_from_slice(message);
    padded.resize(message.len() + n_pad, n_pad as u8);
    padded
}

/// Check that a message carries consistent trailing PKCS#7 padding.
///
/// Empty messages and padding lengths exceeding the message length are
/// invalid.
pub fn pkcs7_validate(message: &[u8]) -> bool {
    let n_pad = match message.last() {
        Some(&n) => n as usize,
        None => return false,
    };
    if n_pad > message.len() {
        return false;
    }
    message[message.len() - n_pad..].iter().all(|&b| b as usize == n_pad)
}

/// Strip validated PKCS#7 padding from a message in place.
pub fn pkcs7_unpad(message: &mut Vec<u8>) -> Result<(), String> {
    if !pkcs7_validate(message) {
        return Err("invalid pkcs7 padding".to_string());
    }
    let n_pad = *message.last().unwrap() as usize;
    message.truncate(message.len() - n_pad);
    Ok(())
}
