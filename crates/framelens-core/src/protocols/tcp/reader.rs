use std::fmt;

use serde::Serialize;

use crate::protocols::common::CodeName;
use crate::protocols::common::reader::FieldReader;
use crate::protocols::error::DecodeError;
use crate::protocols::layer::serialize_hex;
use crate::protocols::registry::ProtocolId;

use super::layout;
use super::tables::option_kind;

/// The six control bits from the low end of the offset/flags word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TcpFlags {
    pub urg: bool,
    pub ack: bool,
    pub psh: bool,
    pub rst: bool,
    pub syn: bool,
    pub fin: bool,
}

impl TcpFlags {
    pub fn from_word(word: u16) -> Self {
        Self {
            urg: word & layout::URG_MASK != 0,
            ack: word & layout::ACK_MASK != 0,
            psh: word & layout::PSH_MASK != 0,
            rst: word & layout::RST_MASK != 0,
            syn: word & layout::SYN_MASK != 0,
            fin: word & layout::FIN_MASK != 0,
        }
    }
}

impl fmt::Display for TcpFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.urg, "URG"),
            (self.ack, "ACK"),
            (self.psh, "PSH"),
            (self.rst, "RST"),
            (self.syn, "SYN"),
            (self.fin, "FIN"),
        ];
        let set: Vec<&str> = names
            .into_iter()
            .filter(|(on, _)| *on)
            .map(|(_, name)| name)
            .collect();
        write!(f, "[{}]", set.join(","))
    }
}

/// Data offset nibble of the offset/flags word.
pub fn data_offset(word: u16) -> u8 {
    ((word & layout::DATA_OFFSET_MASK) >> layout::DATA_OFFSET_SHIFT) as u8
}

/// Reserved bits 11..6 of the offset/flags word.
pub fn reserved_bits(word: u16) -> u8 {
    ((word & layout::RESERVED_MASK) >> layout::RESERVED_SHIFT) as u8
}

pub struct TcpReader<'a> {
    fields: FieldReader<'a>,
}

impl<'a> TcpReader<'a> {
    pub fn new(segment: &'a [u8]) -> Self {
        Self {
            fields: FieldReader::new(ProtocolId::Tcp, segment),
        }
    }

    pub fn fields(&self) -> &FieldReader<'a> {
        &self.fields
    }

    pub fn offset_flags_word(&self) -> Result<u16, DecodeError> {
        self.fields.read_u16_be(layout::OFFSET_FLAGS_RANGE.clone())
    }

    /// Header length from the data offset, within `[20, buffer length]`.
    pub fn header_len(&self) -> Result<usize, DecodeError> {
        let length = data_offset(self.offset_flags_word()?) as usize * layout::DATA_OFFSET_WORD_LEN;
        if length < layout::MIN_HEADER_LEN {
            return Err(DecodeError::InvalidHeaderLength {
                protocol: ProtocolId::Tcp,
                length,
                minimum: layout::MIN_HEADER_LEN,
            });
        }
        self.fields.require_len(length)?;
        Ok(length)
    }
}

/// One entry of the options area, named for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TcpOption<'a> {
    pub kind: CodeName<u8>,
    /// Total size including kind and length bytes.
    pub length: usize,
    #[serde(serialize_with = "serialize_hex")]
    pub data: &'a [u8],
}

impl fmt::Display for TcpOption<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.name)?;
        if !self.data.is_empty() {
            write!(f, " ({} bytes)", self.data.len())?;
        }
        Ok(())
    }
}

/// Walk the options area. Stops at End of Option List or at the first
/// length byte that is missing, below 2, or runs past the area.
pub fn walk_options(raw: &[u8]) -> Vec<TcpOption<'_>> {
    let mut options = Vec::new();
    let mut offset = 0;
    while let Some(&kind) = raw.get(offset) {
        match kind {
            layout::OPTION_END | layout::OPTION_NOP => {
                options.push(TcpOption {
                    kind: option_kind(kind),
                    length: 1,
                    data: &[],
                });
                offset += 1;
                if kind == layout::OPTION_END {
                    break;
                }
            }
            _ => {
                let Some(&length) = raw.get(offset + 1) else {
                    log::debug!("tcp: option {kind} missing length byte");
                    break;
                };
                let length = length as usize;
                let Some(data) = raw.get(offset + 2..offset + length).filter(|_| length >= 2) else {
                    log::debug!("tcp: option {kind} has invalid length {length}");
                    break;
                };
                options.push(TcpOption {
                    kind: option_kind(kind),
                    length,
                    data,
                });
                offset += length;
            }
        }
    }
    options
}
