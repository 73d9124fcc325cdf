//! Key-chained XOR cipher and length-prefixed framing.
//!
//! Every message on the wire is:
//! - A 4-byte big-endian length of the *plaintext* body
//! - The body, enciphered byte by byte with a key taken from the previous
//!   ciphertext byte
//!
//! Requests are enciphered starting from [`REQUEST_KEY`], responses are
//! deciphered starting from [`RESPONSE_KEY`]. This is obfuscation, not
//! security.

pub mod cipher;
pub mod codec;
pub mod error;

pub use cipher::{decode, encode, encode_with_header, REQUEST_KEY, RESPONSE_KEY};
pub use codec::{
    declared_length, decode_frame, encode_frame, FrameConfig, PlugCodec, DEFAULT_MAX_PAYLOAD,
    HEADER_SIZE,
};
pub use error::{FrameError, Result};
