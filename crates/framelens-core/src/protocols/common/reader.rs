use std::net::Ipv4Addr;
use std::ops::Range;

use crate::protocols::error::DecodeError;
use crate::protocols::registry::ProtocolId;

use super::address::MacAddress;
use super::bytes::{read_u16_be, read_u32_be};

/// Bounds-checked field access over one layer's buffer.
///
/// Every failed read reports `BufferTooShort` tagged with the protocol being
/// decoded, so parsers never index bytes directly.
pub struct FieldReader<'a> {
    protocol: ProtocolId,
    buffer: &'a [u8],
}

impl<'a> FieldReader<'a> {
    pub fn new(protocol: ProtocolId, buffer: &'a [u8]) -> Self {
        Self { protocol, buffer }
    }

    pub fn too_short(&self, needed: usize) -> DecodeError {
        DecodeError::BufferTooShort {
            protocol: self.protocol,
            needed,
            actual: self.buffer.len(),
        }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), DecodeError> {
        if self.buffer.len() < needed {
            return Err(self.too_short(needed));
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, DecodeError> {
        self.buffer
            .get(offset)
            .copied()
            .ok_or_else(|| self.too_short(offset + 1))
    }

    /// Big-endian `u16` at `range.start`; `range` must span two bytes.
    pub fn read_u16_be(&self, range: Range<usize>) -> Result<u16, DecodeError> {
        debug_assert_eq!(range.len(), 2);
        read_u16_be(self.buffer, range.start).ok_or_else(|| self.too_short(range.end))
    }

    /// Big-endian `u32` at `range.start`; `range` must span four bytes.
    pub fn read_u32_be(&self, range: Range<usize>) -> Result<u32, DecodeError> {
        debug_assert_eq!(range.len(), 4);
        read_u32_be(self.buffer, range.start).ok_or_else(|| self.too_short(range.end))
    }

    pub fn read_mac(&self, range: Range<usize>) -> Result<MacAddress, DecodeError> {
        self.read_array(range).map(MacAddress)
    }

    pub fn read_ipv4(&self, range: Range<usize>) -> Result<Ipv4Addr, DecodeError> {
        self.read_array::<4>(range).map(Ipv4Addr::from)
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], DecodeError> {
        self.buffer
            .get(range.clone())
            .ok_or_else(|| self.too_short(range.end))
    }

    fn read_array<const N: usize>(&self, range: Range<usize>) -> Result<[u8; N], DecodeError> {
        let bytes = self.read_slice(range)?;
        bytes.try_into().map_err(|_| DecodeError::BufferTooShort {
            protocol: self.protocol,
            needed: N,
            actual: bytes.len(),
        })
    }
}
