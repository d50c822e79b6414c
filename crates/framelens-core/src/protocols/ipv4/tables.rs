use crate::protocols::common::lookup::{ProtocolCode, resolve_protocol};
use crate::protocols::registry::ProtocolId;

use super::layout;

/// IPv4 protocol field as resolved against the registered transports.
pub type IpNextProtocol = ProtocolCode<u8>;

pub static NEXT_PROTOCOLS: &[(u8, &str, ProtocolId)] = &[
    (layout::PROTOCOL_ICMP, "ICMP", ProtocolId::IcmpV4),
    (layout::PROTOCOL_TCP, "TCP", ProtocolId::Tcp),
    (layout::PROTOCOL_UDP, "UDP", ProtocolId::Udp),
];

pub fn next_protocol(value: u8) -> IpNextProtocol {
    resolve_protocol(NEXT_PROTOCOLS, value)
}

#[cfg(test)]
mod tests {
    use super::next_protocol;
    use crate::protocols::registry::ProtocolId;

    #[test]
    fn transports_resolve() {
        assert_eq!(next_protocol(1).protocol, Some(ProtocolId::IcmpV4));
        assert_eq!(next_protocol(6).protocol, Some(ProtocolId::Tcp));
        assert_eq!(next_protocol(17).protocol, Some(ProtocolId::Udp));
    }

    #[test]
    fn other_protocols_are_unknown() {
        let gre = next_protocol(47);
        assert_eq!(gre.name, "Unknown");
        assert_eq!(gre.value, 47);
        assert_eq!(gre.protocol, None);
    }
}
