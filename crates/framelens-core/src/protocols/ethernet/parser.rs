use std::fmt;

use serde::Serialize;

use crate::protocols::common::MacAddress;
use crate::protocols::common::reader::FieldReader;
use crate::protocols::dispatch::assemble;
use crate::protocols::error::DecodeError;
use crate::protocols::layer::{Header, Layer};
use crate::protocols::registry::ProtocolId;

use super::layout;
use super::tables::{EtherType, resolve_ether_type};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EthernetHeader {
    pub destination: MacAddress,
    pub source: MacAddress,
    pub ether_type: EtherType,
}

/// Decode an Ethernet II frame and descend into IPv4 or ARP.
pub fn parse_ethernet(frame: &[u8]) -> Result<Layer<'_>, DecodeError> {
    let reader = FieldReader::new(ProtocolId::Ethernet, frame);
    reader.require_len(layout::HEADER_LEN)?;

    let header = EthernetHeader {
        destination: reader.read_mac(layout::DEST_MAC_RANGE.clone())?,
        source: reader.read_mac(layout::SRC_MAC_RANGE.clone())?,
        ether_type: resolve_ether_type(reader.read_u16_be(layout::ETHER_TYPE_RANGE.clone())?),
    };
    if !header.ether_type.is_known() {
        log::debug!("ethernet: unknown EtherType 0x{:04x}", header.ether_type.value);
    }

    let child = header.ether_type.protocol;
    assemble(
        Header::Ethernet(header),
        frame,
        layout::HEADER_LEN,
        frame.len(),
        child,
    )
}

impl fmt::Display for EthernetHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ethernet [Header {} bytes] - Destination MAC: {} - Source MAC: {} - EtherType: {} 0x{:04x}",
            layout::HEADER_LEN,
            self.destination,
            self.source,
            self.ether_type.name,
            self.ether_type.value
        )
    }
}
