//! Key-chained XOR transform.
//!
//! Both directions chain the key through the *ciphertext* stream, so
//! `decode(encode(p, k), k) == p` for any `p` and `k`. Which initial key each
//! side uses is protocol convention, not a property of the cipher.

use bytes::BufMut;

/// Initial key for enciphering requests.
pub const REQUEST_KEY: u8 = 0xAB;

/// Initial key for deciphering responses.
pub const RESPONSE_KEY: u8 = 0x2B;

/// Encipher `plaintext`, starting from `key`.
///
/// Each output byte becomes the key for the next input byte.
pub fn encode(plaintext: &[u8], key: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(plaintext.len());
    encode_into(plaintext, key, &mut out);
    out
}

/// Decipher `ciphertext`, starting from `key`.
///
/// Each input byte becomes the key for the next input byte.
pub fn decode(ciphertext: &[u8], key: u8) -> Vec<u8> {
    let mut out = ciphertext.to_vec();
    decode_in_place(&mut out, key);
    out
}

/// Encipher `plaintext` and prefix it with its 4-byte big-endian length.
///
/// The length saturates at `u32::MAX`; [`crate::encode_frame`] rejects such
/// bodies instead.
pub fn encode_with_header(plaintext: &[u8], key: u8) -> Vec<u8> {
    let len = u32::try_from(plaintext.len()).unwrap_or(u32::MAX);
    let mut out = Vec::with_capacity(4 + plaintext.len());
    out.extend_from_slice(&len.to_be_bytes());
    encode_into(plaintext, key, &mut out);
    out
}

pub(crate) fn encode_into(plaintext: &[u8], mut key: u8, out: &mut impl BufMut) {
    for &byte in plaintext {
        key ^= byte;
        out.put_u8(key);
    }
}

pub(crate) fn decode_in_place(buf: &mut [u8], mut key: u8) {
    for byte in buf.iter_mut() {
        let next_key = *byte;
        *byte ^= key;
        key = next_key;
    }
}
