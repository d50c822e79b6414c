use crate::protocols::common::lookup::{ProtocolCode, resolve_protocol};
use crate::protocols::registry::ProtocolId;

use super::layout;

/// EtherType value as resolved against the registered network protocols.
pub type EtherType = ProtocolCode<u16>;

pub static ETHER_TYPES: &[(u16, &str, ProtocolId)] = &[
    (layout::ETHER_TYPE_IPV4, "IPV4", ProtocolId::IpV4),
    (layout::ETHER_TYPE_ARP, "ARP", ProtocolId::Arp),
];

pub fn resolve_ether_type(value: u16) -> EtherType {
    resolve_protocol(ETHER_TYPES, value)
}
