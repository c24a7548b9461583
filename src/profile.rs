/// ECB cut-and-paste: splicing blocks from one ciphertext into another.
use std::collections::HashMap;
use std::fmt::Display;

use crate::{decrypt_aes_128_ecb, encrypt_aes_128_ecb, pkcs7_pad, BLOCK_SIZE};

#[derive(Debug, PartialEq, Eq)]
pub struct UserProfile {
    pub email: String,
    pub uid: u32,
    pub role: String,
}

impl UserProfile {
    /// Build the profile the oracle hands out for an email address:
    /// metacharacters are stripped, the role is always "user".
    fn for_email(email: &str) -> Self {
        Self {
            email: email.replace(['&', '='], ""),
            uid: 10,
            role: "user".to_string(),
        }
    }
}

impl Display for UserProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "email={}&uid={}&role={}", self.email, self.uid, self.role)
    }
}

impl TryFrom<&str> for UserProfile {
    type Error = String;

    fn try_from(query: &str) -> Result<Self, Self::Error> {
        let fields = parse_query(query);
        let get = |key: &str| {
            fields
                .get(key)
                .cloned()
                .ok_or_else(|| format!("'{key}' not found in query '{query}'"))
        };
        Ok(Self {
            email: get("email")?,
            uid: get("uid")?
                .parse::<u32>()
                .map_err(|e| format!("uid is not a number: {e}"))?,
            role: get("role")?,
        })
    }
}

/// Encrypts encoded user profiles for attacker-chosen emails under a fixed
/// hidden key, and decrypts submitted profile ciphertexts with the same key.
pub struct ProfileOracle {
    key: [u8; BLOCK_SIZE],
}

impl ProfileOracle {
    pub fn new(key: [u8; BLOCK_SIZE]) -> Self {
        Self { key }
    }

    pub fn profile_for(&self, email: &str) -> Vec<u8> {
        let encoded = UserProfile::for_email(email).to_string();
        encrypt_aes_128_ecb(encoded.as_bytes(), &self.key)
    }

    pub fn decrypt_profile(&self, ciphertext: &[u8]) -> Result<UserProfile, String> {
        let encoded = decrypt_aes_128_ecb(ciphertext, &self.key)?;
        UserProfile::try_from(String::from_utf8_lossy(&encoded).as_ref())
    }
}

/// Forge a profile ciphertext that decrypts with `role=admin`, using only
/// the oracle's `profile_for` capability.
///
/// ECB encrypts every block independently, so a block cut from one
/// ciphertext decrypts the same wherever it is pasted. Two queries suffice:
/// one whose email pushes "admin" plus its own padding into an aligned block
/// of its own, and one whose email length leaves the role value alone in the
/// final block. Swapping that final block for the cut one rewrites the role.
pub fn forge_admin_profile(oracle: &ProfileOracle) -> Vec<u8> {
    // "email=" is 6 bytes, so 10 filler characters make the next block start
    // exactly at our "admin" payload. The payload carries its own PKCS#7
    // padding so the pasted block also ends the forged message cleanly.
    let cut_email = [
        vec![b'A'; BLOCK_SIZE - "email=".len()],
        pkcs7_pad(b"admin", BLOCK_SIZE),
    ]
    .concat();
    let cut_ciphertext = oracle.profile_for(&String::from_utf8_lossy(&cut_email));
    let admin_block = &cut_ciphertext[BLOCK_SIZE..2 * BLOCK_SIZE];

    // 13 characters of email make "email=<email>&uid=10&role=" fill two
    // blocks exactly, leaving the role value as the whole final block.
    let paste_email = "admin@mail.co";
    let paste_ciphertext = oracle.profile_for(paste_email);

    [
        &paste_ciphertext[..paste_ciphertext.len() - BLOCK_SIZE],
        admin_block,
    ]
    .concat()
}

fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
