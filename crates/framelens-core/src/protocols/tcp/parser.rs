use std::fmt;

use serde::Serialize;

use crate::protocols::common::hex_dump;
use crate::protocols::common::ports::{format_port, port_label};
use crate::protocols::dispatch::assemble;
use crate::protocols::error::DecodeError;
use crate::protocols::layer::{Header, Layer, serialize_hex};

use super::layout;
use super::reader::{TcpFlags, TcpOption, TcpReader, data_offset, reserved_bits, walk_options};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TcpHeader<'a> {
    pub source_port: u16,
    pub destination_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_service: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_service: Option<&'static str>,
    pub sequence_number: u32,
    pub acknowledgment_number: u32,
    pub data_offset: u8,
    pub reserved: u8,
    pub flags: TcpFlags,
    pub window: u16,
    pub checksum: u16,
    pub urgent_pointer: u16,
    #[serde(serialize_with = "serialize_hex")]
    pub raw_options: &'a [u8],
    pub options: Vec<TcpOption<'a>>,
    pub header_length: usize,
}

/// Decode a TCP segment header. The segment body is never decoded.
pub fn parse_tcp(segment: &[u8]) -> Result<Layer<'_>, DecodeError> {
    let reader = TcpReader::new(segment);
    let fields = reader.fields();
    fields.require_len(layout::MIN_HEADER_LEN)?;

    let header_length = reader.header_len()?;
    let word = reader.offset_flags_word()?;
    let source_port = fields.read_u16_be(layout::SOURCE_PORT_RANGE.clone())?;
    let destination_port = fields.read_u16_be(layout::DESTINATION_PORT_RANGE.clone())?;
    let raw_options = fields.read_slice(layout::OPTIONS_OFFSET..header_length)?;

    let header = TcpHeader {
        source_port,
        destination_port,
        source_service: port_label(source_port),
        destination_service: port_label(destination_port),
        sequence_number: fields.read_u32_be(layout::SEQUENCE_RANGE.clone())?,
        acknowledgment_number: fields.read_u32_be(layout::ACKNOWLEDGMENT_RANGE.clone())?,
        data_offset: data_offset(word),
        reserved: reserved_bits(word),
        flags: TcpFlags::from_word(word),
        window: fields.read_u16_be(layout::WINDOW_RANGE.clone())?,
        checksum: fields.read_u16_be(layout::CHECKSUM_RANGE.clone())?,
        urgent_pointer: fields.read_u16_be(layout::URGENT_POINTER_RANGE.clone())?,
        raw_options,
        options: walk_options(raw_options),
        header_length,
    };

    assemble(
        Header::Tcp(header),
        segment,
        header_length,
        segment.len(),
        None,
    )
}

impl fmt::Display for TcpHeader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options: Vec<String> = self.options.iter().map(ToString::to_string).collect();
        write!(
            f,
            "Tcp [Header {} bytes] - Source Port: {} - Destination Port: {} - Sequence: {} - Acknowledgment: {} - Data Offset: {} - Reserved: 0x{:02x} - Flags: {} - Window: {} - Checksum: 0x{:04x} - Urgent Pointer: {} - Options: [{}] ({})",
            self.header_length,
            format_port(self.source_port, self.source_service),
            format_port(self.destination_port, self.destination_service),
            self.sequence_number,
            self.acknowledgment_number,
            self.data_offset,
            self.reserved,
            self.flags,
            self.window,
            self.checksum,
            self.urgent_pointer,
            hex_dump(self.raw_options),
            options.join(", ")
        )
    }
}
