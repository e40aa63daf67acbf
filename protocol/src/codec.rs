//! # Canonical Wire Codec
//!
//! The single binary encoding used both for transmitting transactions and
//! for computing the bytes that get signed. It is deliberately simple so
//! that two independent implementations agree byte for byte:
//!
//! ```text
//! u8         1 byte
//! i64        8 bytes, big-endian two's complement
//! bytes      u32 BE length || raw bytes
//! string     bytes of the UTF-8 encoding
//! sequence   u32 BE element count || elements
//! option     0x00 (absent) | 0x01 || value
//! ```
//!
//! No maps, no floats, no platform-dependent widths: the same value always
//! encodes to the same bytes. Decoding is strict and rejects truncated
//! input, oversize lengths, bad presence bytes, invalid UTF-8, and trailing
//! garbage, reporting the field and byte offset that failed.

use thiserror::Error;

use crate::config::{MAX_COINS_PER_SET, MAX_TX_SIZE_BYTES};
use crate::types::{Address, Coin, Coins};

/// Errors raised while decoding wire bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The leading tag byte does not name a registered transaction variant.
    #[error("unknown transaction variant tag 0x{tag:02X}")]
    UnknownVariant { tag: u8 },

    /// The bytes are structurally invalid.
    #[error("decode error in field `{field}` at byte {offset}: {reason}")]
    Decode {
        field: &'static str,
        offset: usize,
        reason: String,
    },
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Types with a canonical wire encoding.
pub trait WireEncode {
    fn encode_to(&self, w: &mut Writer);

    fn to_wire_bytes(&self) -> Vec<u8> {
        let mut w = Writer::new();
        self.encode_to(&mut w);
        w.into_bytes()
    }
}

/// Types that can be read back from their canonical wire encoding.
pub trait WireDecode: Sized {
    fn decode_from(r: &mut Reader<'_>) -> CodecResult<Self>;

    /// Decode a complete value; trailing bytes are an error.
    fn from_wire_bytes(bytes: &[u8]) -> CodecResult<Self> {
        let mut r = Reader::new(bytes)?;
        let value = Self::decode_from(&mut r)?;
        r.finish()?;
        Ok(value)
    }
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Append-only canonical encoder.
#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(256),
        }
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Length prefix for byte strings and sequences.
    pub fn write_len(&mut self, len: usize) {
        // Decode limits keep every legal length far below u32::MAX.
        self.buf.extend_from_slice(&(len as u32).to_be_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.write_len(bytes.len());
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    /// Writes the presence byte, then the value when present.
    pub fn write_option<T, F>(&mut self, value: Option<&T>, f: F)
    where
        F: FnOnce(&mut Self, &T),
    {
        match value {
            None => self.write_u8(0x00),
            Some(v) => {
                self.write_u8(0x01);
                f(self, v);
            }
        }
    }

    pub fn write_seq<T: WireEncode>(&mut self, items: &[T]) {
        self.write_len(items.len());
        for item in items {
            item.encode_to(self);
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Strict canonical decoder over a borrowed buffer.
#[derive(Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Fails when the input exceeds [`MAX_TX_SIZE_BYTES`].
    pub fn new(buf: &'a [u8]) -> CodecResult<Self> {
        if buf.len() > MAX_TX_SIZE_BYTES {
            return Err(CodecError::Decode {
                field: "tx",
                offset: 0,
                reason: format!(
                    "input is {} bytes, limit is {}",
                    buf.len(),
                    MAX_TX_SIZE_BYTES
                ),
            });
        }
        Ok(Self { buf, pos: 0 })
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn error(&self, field: &'static str, offset: usize, reason: impl Into<String>) -> CodecError {
        CodecError::Decode {
            field,
            offset,
            reason: reason.into(),
        }
    }

    fn take(&mut self, field: &'static str, n: usize) -> CodecResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(self.error(
                field,
                self.pos,
                format!("need {} bytes, {} remaining", n, self.remaining()),
            ));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self, field: &'static str) -> CodecResult<u8> {
        Ok(self.take(field, 1)?[0])
    }

    pub fn read_i64(&mut self, field: &'static str) -> CodecResult<i64> {
        let bytes = self.take(field, 8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(bytes);
        Ok(i64::from_be_bytes(arr))
    }

    /// Reads a length prefix and checks it against `max`.
    pub fn read_len(&mut self, field: &'static str, max: usize) -> CodecResult<usize> {
        let offset = self.pos;
        let bytes = self.take(field, 4)?;
        let mut arr = [0u8; 4];
        arr.copy_from_slice(bytes);
        let len = u32::from_be_bytes(arr) as usize;
        if len > max {
            return Err(self.error(field, offset, format!("length {} exceeds limit {}", len, max)));
        }
        Ok(len)
    }

    pub fn read_bytes(&mut self, field: &'static str) -> CodecResult<Vec<u8>> {
        let len = self.read_len(field, self.remaining())?;
        Ok(self.take(field, len)?.to_vec())
    }

    pub fn read_string(&mut self, field: &'static str) -> CodecResult<String> {
        let offset = self.pos;
        let bytes = self.read_bytes(field)?;
        String::from_utf8(bytes).map_err(|e| self.error(field, offset, e.to_string()))
    }

    /// Reads a presence byte: `false` for 0x00, `true` for 0x01.
    pub fn read_presence(&mut self, field: &'static str) -> CodecResult<bool> {
        let offset = self.pos;
        match self.read_u8(field)? {
            0x00 => Ok(false),
            0x01 => Ok(true),
            other => Err(self.error(field, offset, format!("invalid presence byte 0x{:02X}", other))),
        }
    }

    /// Reads an optional value; `f` decodes it when present.
    pub fn read_option<T, F>(&mut self, field: &'static str, f: F) -> CodecResult<Option<T>>
    where
        F: FnOnce(&mut Self) -> CodecResult<T>,
    {
        if self.read_presence(field)? {
            f(self).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn read_seq<T: WireDecode>(&mut self, field: &'static str, max: usize) -> CodecResult<Vec<T>> {
        let count = self.read_len(field, max)?;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(T::decode_from(self)?);
        }
        Ok(items)
    }

    /// Fails if any input is left unread.
    pub fn finish(self) -> CodecResult<()> {
        if self.remaining() != 0 {
            return Err(self.error(
                "tx",
                self.pos,
                format!("{} trailing bytes", self.remaining()),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Shared value types
// ---------------------------------------------------------------------------

impl WireEncode for Address {
    fn encode_to(&self, w: &mut Writer) {
        w.write_bytes(self.as_bytes());
    }
}

impl WireDecode for Address {
    fn decode_from(r: &mut Reader<'_>) -> CodecResult<Self> {
        r.read_bytes("address").map(Address::new)
    }
}

impl WireEncode for Coin {
    fn encode_to(&self, w: &mut Writer) {
        w.write_str(&self.denom);
        w.write_i64(self.amount);
    }
}

impl WireDecode for Coin {
    fn decode_from(r: &mut Reader<'_>) -> CodecResult<Self> {
        let denom = r.read_string("coin.denom")?;
        let amount = r.read_i64("coin.amount")?;
        Ok(Coin { denom, amount })
    }
}

impl WireEncode for Coins {
    fn encode_to(&self, w: &mut Writer) {
        w.write_seq(&self.0);
    }
}

impl WireDecode for Coins {
    fn decode_from(r: &mut Reader<'_>) -> CodecResult<Self> {
        r.read_seq("coins", MAX_COINS_PER_SET).map(Coins)
    }
}

/// Canonical encoding of a chain identifier, the domain-separation prefix
/// of every signable byte sequence.
pub fn encode_chain_id(chain_id: &str) -> Vec<u8> {
    let mut w = Writer::new();
    w.write_str(chain_id);
    w.into_bytes()
}
