//! Toy one-time pad keyed by a derived BB84 key.
//!
//! Each key bit masks a whole byte: a `1` flips all eight bits (`0xFF`), a
//! `0` leaves the byte alone. The key repeats when the message is longer,
//! which is exactly what a real one-time pad forbids; this is a teaching aid.

use crate::core::errors::CipherError;

fn mask(bit: bool) -> u8 {
    if bit { 0xFF } else { 0x00 }
}

/// XORs `input[j]` with the mask of `key[j % key.len()]`.
///
/// Encryption and decryption are the same operation.
pub fn apply(input: &[u8], key: &[bool]) -> Result<Vec<u8>, CipherError> {
    if key.is_empty() {
        return Err(CipherError::EmptyKey);
    }

    Ok(input
        .iter()
        .zip(key.iter().cycle())
        .map(|(&byte, &bit)| byte ^ mask(bit))
        .collect())
}

pub fn encrypt(plaintext: &[u8], key: &[bool]) -> Result<Vec<u8>, CipherError> {
    apply(plaintext, key)
}

pub fn decrypt(ciphertext: &[u8], key: &[bool]) -> Result<Vec<u8>, CipherError> {
    apply(ciphertext, key)
}

/// Renders bytes as space-separated lowercase hex pairs, e.g. `"9e 48 ff"`.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| hex::encode([*b]))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses hex, ignoring any whitespace between digits.
pub fn from_hex(text: &str) -> Result<Vec<u8>, CipherError> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(hex::decode(digits)?)
}

/// Encrypts UTF-8 text and returns the ciphertext as hex.
pub fn encrypt_text(plaintext: &str, key: &[bool]) -> Result<String, CipherError> {
    encrypt(plaintext.as_bytes(), key).map(|c| to_hex(&c))
}

/// Decrypts hex ciphertext back to text. Bytes that do not form valid UTF-8
/// (e.g. when the wrong key is used) become U+FFFD.
pub fn decrypt_hex(ciphertext: &str, key: &[bool]) -> Result<String, CipherError> {
    let bytes = from_hex(ciphertext)?;
    let plain = decrypt(&bytes, key)?;
    Ok(String::from_utf8_lossy(&plain).into_owned())
}
