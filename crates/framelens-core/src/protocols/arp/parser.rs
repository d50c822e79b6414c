use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;

use crate::protocols::common::reader::FieldReader;
use crate::protocols::common::{CodeName, MacAddress};
use crate::protocols::dispatch::assemble;
use crate::protocols::error::DecodeError;
use crate::protocols::ethernet::{EtherType, resolve_ether_type};
use crate::protocols::layer::{Header, Layer};
use crate::protocols::registry::ProtocolId;

use super::layout;
use super::tables;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArpHeader {
    pub hardware_type: CodeName<u16>,
    pub protocol_type: EtherType,
    pub hardware_addr_len: u8,
    pub protocol_addr_len: u8,
    pub operation: CodeName<u16>,
    pub sender_mac: MacAddress,
    pub sender_ip: Ipv4Addr,
    pub target_mac: MacAddress,
    pub target_ip: Ipv4Addr,
}

/// Decode an ARP packet. Bytes past the 28-byte header (Ethernet padding)
/// are left in the raw payload.
pub fn parse_arp(packet: &[u8]) -> Result<Layer<'_>, DecodeError> {
    let reader = FieldReader::new(ProtocolId::Arp, packet);
    reader.require_len(layout::HEADER_LEN)?;

    let header = ArpHeader {
        hardware_type: tables::hardware_type(
            reader.read_u16_be(layout::HARDWARE_TYPE_RANGE.clone())?,
        ),
        protocol_type: resolve_ether_type(reader.read_u16_be(layout::PROTOCOL_TYPE_RANGE.clone())?),
        hardware_addr_len: reader.read_u8(layout::HARDWARE_ADDR_LEN_OFFSET)?,
        protocol_addr_len: reader.read_u8(layout::PROTOCOL_ADDR_LEN_OFFSET)?,
        operation: tables::operation(reader.read_u16_be(layout::OPERATION_RANGE.clone())?),
        sender_mac: reader.read_mac(layout::SENDER_MAC_RANGE.clone())?,
        sender_ip: reader.read_ipv4(layout::SENDER_IP_RANGE.clone())?,
        target_mac: reader.read_mac(layout::TARGET_MAC_RANGE.clone())?,
        target_ip: reader.read_ipv4(layout::TARGET_IP_RANGE.clone())?,
    };
    if !header.operation.is_known() {
        log::debug!("arp: unknown operation {}", header.operation.value);
    }

    assemble(
        Header::Arp(header),
        packet,
        layout::HEADER_LEN,
        layout::HEADER_LEN,
        None,
    )
}

impl fmt::Display for ArpHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Arp [Header {} bytes] - Hardware Type: {} - Protocol Type: {} 0x{:04x} - Operation: {} - Sender MAC: {} - Sender IP: {} - Target MAC: {} - Target IP: {}",
            layout::HEADER_LEN,
            self.hardware_type,
            self.protocol_type.name,
            self.protocol_type.value,
            self.operation,
            self.sender_mac,
            self.sender_ip,
            self.target_mac,
            self.target_ip
        )
    }
}
