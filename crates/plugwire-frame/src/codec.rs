use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::debug;

use crate::cipher::{decode_in_place, encode_into, REQUEST_KEY, RESPONSE_KEY};
use crate::error::{FrameError, Result};

/// Frame header: big-endian plaintext length (4 bytes).
pub const HEADER_SIZE: usize = 4;

/// Default maximum payload size: 16 MiB.
pub const DEFAULT_MAX_PAYLOAD: usize = 16 * 1024 * 1024;

/// Configuration for the frame codec.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum payload size in bytes. Default: 16 MiB.
    pub max_payload_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}

/// Encipher `plaintext` with `key` and append the framed result to `dst`.
///
/// Wire format:
/// ```text
/// ┌──────────────────┬──────────────────────────────┐
/// │ Length (4B BE)   │ Body (Length bytes)          │
/// │ plaintext bytes  │ key-chained XOR of plaintext │
/// └──────────────────┴──────────────────────────────┘
/// ```
pub fn encode_frame(plaintext: &[u8], key: u8, dst: &mut BytesMut) -> Result<()> {
    let len = u32::try_from(plaintext.len()).map_err(|_| FrameError::PayloadTooLarge {
        size: plaintext.len(),
        max: u32::MAX as usize,
    })?;
    dst.reserve(HEADER_SIZE + plaintext.len());
    dst.put_u32(len);
    encode_into(plaintext, key, dst);
    Ok(())
}

/// Length declared by the header at the front of `src`, if a full header is buffered.
pub fn declared_length(src: &[u8]) -> Option<usize> {
    let header: [u8; HEADER_SIZE] = src.get(..HEADER_SIZE)?.try_into().ok()?;
    Some(u32::from_be_bytes(header) as usize)
}

/// Decode a frame from a buffer, deciphering the body with `key`.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes exactly the frame bytes; anything after it stays in
/// the buffer.
pub fn decode_frame(src: &mut BytesMut, key: u8, max_payload: usize) -> Result<Option<Bytes>> {
    let Some(payload_len) = declared_length(src) else {
        return Ok(None); // Need more data
    };

    if payload_len > max_payload {
        debug!(declared = payload_len, max = max_payload, "rejecting oversized frame");
        return Err(FrameError::PayloadTooLarge {
            size: payload_len,
            max: max_payload,
        });
    }

    let total = HEADER_SIZE + payload_len;
    if src.len() < total {
        src.reserve(total - src.len());
        return Ok(None); // Need more data
    }

    src.advance(HEADER_SIZE);
    let mut body = src.split_to(payload_len);
    decode_in_place(&mut body, key);

    Ok(Some(body.freeze()))
}

/// `tokio_util` codec for the framed, enciphered stream.
///
/// Holds the key used for outgoing bodies and the key used for incoming ones,
/// so the same type serves both ends of a connection.
#[derive(Debug, Clone)]
pub struct PlugCodec {
    encode_key: u8,
    decode_key: u8,
    config: FrameConfig,
}

impl PlugCodec {
    /// Create a codec with explicit keys.
    pub fn new(encode_key: u8, decode_key: u8) -> Self {
        Self {
            encode_key,
            decode_key,
            config: FrameConfig::default(),
        }
    }

    /// Codec for the controlling side: enciphers requests, deciphers responses.
    pub fn client() -> Self {
        Self::new(REQUEST_KEY, RESPONSE_KEY)
    }

    /// Codec for the device side: deciphers requests, enciphers responses.
    pub fn device() -> Self {
        Self::new(RESPONSE_KEY, REQUEST_KEY)
    }

    /// Replace the frame configuration.
    pub fn with_config(mut self, config: FrameConfig) -> Self {
        self.config = config;
        self
    }

    /// Current frame configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl Decoder for PlugCodec {
    type Item = Bytes;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>> {
        decode_frame(src, self.decode_key, self.config.max_payload_size)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>> {
        match self.decode(src)? {
            Some(frame) => Ok(Some(frame)),
            None if src.is_empty() => Ok(None),
            None => Err(FrameError::ConnectionClosed),
        }
    }
}

impl<T: AsRef<[u8]>> Encoder<T> for PlugCodec {
    type Error = FrameError;

    fn encode(&mut self, item: T, dst: &mut BytesMut) -> Result<()> {
        let payload = item.as_ref();
        if payload.len() > self.config.max_payload_size {
            return Err(FrameError::PayloadTooLarge {
                size: payload.len(),
                max: self.config.max_payload_size,
            });
        }
        encode_frame(payload, self.encode_key, dst)
    }
}
