use std::fmt;

use serde::Serialize;

use crate::protocols::common::ports::{format_port, port_label};
use crate::protocols::common::reader::FieldReader;
use crate::protocols::dispatch::assemble;
use crate::protocols::error::DecodeError;
use crate::protocols::layer::{Header, Layer};
use crate::protocols::registry::ProtocolId;

use super::layout;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UdpHeader {
    pub source_port: u16,
    pub destination_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_service: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_service: Option<&'static str>,
    pub length: u16,
    pub checksum: u16,
}

pub fn parse_udp(datagram: &[u8]) -> Result<Layer<'_>, DecodeError> {
    let reader = FieldReader::new(ProtocolId::Udp, datagram);
    reader.require_len(layout::HEADER_LEN)?;

    let source_port = reader.read_u16_be(layout::SOURCE_PORT_RANGE.clone())?;
    let destination_port = reader.read_u16_be(layout::DESTINATION_PORT_RANGE.clone())?;
    let header = UdpHeader {
        source_port,
        destination_port,
        source_service: port_label(source_port),
        destination_service: port_label(destination_port),
        length: reader.read_u16_be(layout::LENGTH_RANGE.clone())?,
        checksum: reader.read_u16_be(layout::CHECKSUM_RANGE.clone())?,
    };

    let total_length = header.length as usize;
    assemble(
        Header::Udp(header),
        datagram,
        layout::HEADER_LEN,
        total_length,
        None,
    )
}

impl fmt::Display for UdpHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Udp [Header {} bytes] - Source Port: {} - Destination Port: {} - Length: {} - Checksum: 0x{:04x}",
            layout::HEADER_LEN,
            format_port(self.source_port, self.source_service),
            format_port(self.destination_port, self.destination_service),
            self.length,
            self.checksum
        )
    }
}
