use serde::Serialize;

use crate::protocols::common::reader::FieldReader;
use crate::protocols::error::DecodeError;
use crate::protocols::registry::ProtocolId;

use super::layout;

/// Flags and fragment offset unpacked from the single 16-bit word at byte 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FragmentFlags {
    pub reserved: bool,
    pub dont_fragment: bool,
    pub more_fragments: bool,
    /// Offset in 8-byte units.
    pub fragment_offset: u16,
}

impl FragmentFlags {
    pub fn from_word(word: u16) -> Self {
        Self {
            reserved: word & layout::RESERVED_FLAG_MASK != 0,
            dont_fragment: word & layout::DONT_FRAGMENT_MASK != 0,
            more_fragments: word & layout::MORE_FRAGMENTS_MASK != 0,
            fragment_offset: word & layout::FRAGMENT_OFFSET_MASK,
        }
    }

    pub fn is_fragment(&self) -> bool {
        self.more_fragments || self.fragment_offset != 0
    }
}

/// Split byte 0 into (version, IHL).
pub fn split_version_ihl(byte: u8) -> (u8, u8) {
    (
        (byte & layout::VERSION_MASK) >> layout::VERSION_SHIFT,
        byte & layout::IHL_MASK,
    )
}

pub struct Ipv4Reader<'a> {
    fields: FieldReader<'a>,
}

impl<'a> Ipv4Reader<'a> {
    pub fn new(packet: &'a [u8]) -> Self {
        Self {
            fields: FieldReader::new(ProtocolId::IpV4, packet),
        }
    }

    pub fn fields(&self) -> &FieldReader<'a> {
        &self.fields
    }

    pub fn version_ihl(&self) -> Result<(u8, u8), DecodeError> {
        self.fields
            .read_u8(layout::VERSION_IHL_OFFSET)
            .map(split_version_ihl)
    }

    /// Header length implied by IHL, checked against the minimum and the
    /// buffer.
    pub fn header_len(&self) -> Result<usize, DecodeError> {
        let (_, ihl) = self.version_ihl()?;
        let length = ihl as usize * layout::IHL_WORD_LEN;
        if length < layout::MIN_HEADER_LEN {
            return Err(DecodeError::InvalidHeaderLength {
                protocol: ProtocolId::IpV4,
                length,
                minimum: layout::MIN_HEADER_LEN,
            });
        }
        self.fields.require_len(length)?;
        Ok(length)
    }

    pub fn fragment_flags(&self) -> Result<FragmentFlags, DecodeError> {
        self.fields
            .read_u16_be(layout::FLAGS_FRAGMENT_RANGE.clone())
            .map(FragmentFlags::from_word)
    }
}
