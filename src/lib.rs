mod bitflip;
mod cipher;
mod codec;
mod detect;
mod english;
mod error;
mod geometry;
mod oracle;
mod padding;
mod profile;
mod recover;
mod xor;

pub use bitflip::{forge_admin_ciphertext, CbcQueryOracle};
pub use cipher::{
    decrypt_aes_128_cbc, decrypt_aes_128_ecb, encrypt_aes_128_cbc, encrypt_aes_128_ecb, BLOCK_SIZE,
};
pub use codec::{base64_decode, base64_encode, hex_decode, hex_encode, hex_to_base64};
pub use detect::has_repeated_block;
pub use english::{break_repeating_key_xor, break_single_byte_xor, english_score, XorBreakResult};
pub use error::AttackError;
pub use geometry::{probe_geometry, Geometry};
pub use oracle::{encrypt_with_random_mode, random_bytes, EcbSuffixOracle, EncryptionOracle, Mode};
pub use padding::{pkcs7_pad, pkcs7_unpad, pkcs7_validate};
pub use profile::{forge_admin_profile, ProfileOracle, UserProfile};
pub use recover::recover_suffix;
pub use xor::{hamming_distance, repeating_key_xor, xor_bytes};
