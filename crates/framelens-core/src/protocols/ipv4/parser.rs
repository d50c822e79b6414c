use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;

use crate::protocols::common::hex_dump;
use crate::protocols::dispatch::assemble;
use crate::protocols::error::DecodeError;
use crate::protocols::layer::{Header, Layer, serialize_hex};

use super::layout;
use super::reader::{FragmentFlags, Ipv4Reader};
use super::tables::{IpNextProtocol, next_protocol};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ipv4Header<'a> {
    pub version: u8,
    pub ihl: u8,
    pub tos: u8,
    pub total_length: u16,
    pub identification: u16,
    pub flags: FragmentFlags,
    pub ttl: u8,
    pub protocol: IpNextProtocol,
    pub header_checksum: u16,
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
    #[serde(serialize_with = "serialize_hex")]
    pub options: &'a [u8],
    pub header_length: usize,
}

/// Decode an IPv4 header and descend into ICMP, TCP or UDP.
pub fn parse_ipv4(packet: &[u8]) -> Result<Layer<'_>, DecodeError> {
    let reader = Ipv4Reader::new(packet);
    let fields = reader.fields();
    fields.require_len(layout::MIN_HEADER_LEN)?;

    let (version, ihl) = reader.version_ihl()?;
    let header_length = reader.header_len()?;

    let header = Ipv4Header {
        version,
        ihl,
        tos: fields.read_u8(layout::TOS_OFFSET)?,
        total_length: fields.read_u16_be(layout::TOTAL_LENGTH_RANGE.clone())?,
        identification: fields.read_u16_be(layout::IDENTIFICATION_RANGE.clone())?,
        flags: reader.fragment_flags()?,
        ttl: fields.read_u8(layout::TTL_OFFSET)?,
        protocol: next_protocol(fields.read_u8(layout::PROTOCOL_OFFSET)?),
        header_checksum: fields.read_u16_be(layout::CHECKSUM_RANGE.clone())?,
        source: fields.read_ipv4(layout::SOURCE_RANGE.clone())?,
        destination: fields.read_ipv4(layout::DESTINATION_RANGE.clone())?,
        options: fields.read_slice(layout::OPTIONS_OFFSET..header_length)?,
        header_length,
    };
    if !header.protocol.is_known() {
        log::debug!("ipv4: unknown protocol {}", header.protocol.value);
    }

    let child = header.protocol.protocol;
    let total_length = header.total_length as usize;
    assemble(
        Header::Ipv4(header),
        packet,
        header_length,
        total_length,
        child,
    )
}

impl fmt::Display for Ipv4Header<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IpV4 [Header {} bytes] - Version: {} - IHL: {} - TOS: {} - Total Length: {} - Identification: {} - Reserved: {} - Dont Fragment: {} - More Fragments: {} - Fragment Offset: {} - TTL: {} - Protocol: {} ({}) - Header Checksum: 0x{:04x} - Source: {} - Destination: {} - Options: [{}]",
            self.header_length,
            self.version,
            self.ihl,
            self.tos,
            self.total_length,
            self.identification,
            self.flags.reserved,
            self.flags.dont_fragment,
            self.flags.more_fragments,
            self.flags.fragment_offset,
            self.ttl,
            self.protocol.name,
            self.protocol.value,
            self.header_checksum,
            self.source,
            self.destination,
            hex_dump(self.options)
        )
    }
}
