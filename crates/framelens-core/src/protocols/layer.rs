//! Decoded layer tree.
//!
//! A [`Layer`] is the envelope shared by every protocol: the raw header and
//! residual payload (sub-slices of the frame buffer), the computed lengths,
//! the typed header, and the next layer when the header names a registered
//! child protocol. A layer without `next` is terminal.

use std::fmt;

use serde::{Serialize, Serializer};

use super::arp::ArpHeader;
use super::common::hex_dump;
use super::ethernet::EthernetHeader;
use super::icmpv4::IcmpV4Header;
use super::ipv4::Ipv4Header;
use super::registry::ProtocolId;
use super::tcp::TcpHeader;
use super::udp::UdpHeader;

/// Typed header of one decoded layer, one variant per registered decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Header<'a> {
    Ethernet(EthernetHeader),
    Arp(ArpHeader),
    Ipv4(Ipv4Header<'a>),
    Tcp(TcpHeader<'a>),
    Udp(UdpHeader),
    IcmpV4(IcmpV4Header),
}

impl<'a> Header<'a> {
    pub fn protocol(&self) -> ProtocolId {
        match self {
            Header::Ethernet(_) => ProtocolId::Ethernet,
            Header::Arp(_) => ProtocolId::Arp,
            Header::Ipv4(_) => ProtocolId::IpV4,
            Header::Tcp(_) => ProtocolId::Tcp,
            Header::Udp(_) => ProtocolId::Udp,
            Header::IcmpV4(_) => ProtocolId::IcmpV4,
        }
    }

    pub fn as_ethernet(&self) -> Option<&EthernetHeader> {
        match self {
            Header::Ethernet(header) => Some(header),
            _ => None,
        }
    }

    pub fn as_arp(&self) -> Option<&ArpHeader> {
        match self {
            Header::Arp(header) => Some(header),
            _ => None,
        }
    }

    pub fn as_ipv4(&self) -> Option<&Ipv4Header<'a>> {
        match self {
            Header::Ipv4(header) => Some(header),
            _ => None,
        }
    }

    pub fn as_tcp(&self) -> Option<&TcpHeader<'a>> {
        match self {
            Header::Tcp(header) => Some(header),
            _ => None,
        }
    }

    pub fn as_udp(&self) -> Option<&UdpHeader> {
        match self {
            Header::Udp(header) => Some(header),
            _ => None,
        }
    }

    pub fn as_icmpv4(&self) -> Option<&IcmpV4Header> {
        match self {
            Header::IcmpV4(header) => Some(header),
            _ => None,
        }
    }
}

impl fmt::Display for Header<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Header::Ethernet(header) => header.fmt(f),
            Header::Arp(header) => header.fmt(f),
            Header::Ipv4(header) => header.fmt(f),
            Header::Tcp(header) => header.fmt(f),
            Header::Udp(header) => header.fmt(f),
            Header::IcmpV4(header) => header.fmt(f),
        }
    }
}

/// One decoded protocol layer and, optionally, the layer it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer<'a> {
    pub protocol: ProtocolId,
    pub header: Header<'a>,
    pub header_length: usize,
    pub total_length: usize,
    #[serde(serialize_with = "serialize_hex")]
    pub raw_header: &'a [u8],
    #[serde(serialize_with = "serialize_hex")]
    pub raw_payload: &'a [u8],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Box<Layer<'a>>>,
}

impl<'a> Layer<'a> {
    pub fn protocol_name(&self) -> &'static str {
        self.protocol.name()
    }

    /// True when the header named a registered child protocol and that child
    /// was decoded into `next`.
    pub fn can_descend(&self) -> bool {
        self.next.is_some()
    }

    pub fn next_layer(&self) -> Option<&Layer<'a>> {
        self.next.as_deref()
    }

    /// Iterate this layer and every layer below it, outermost first.
    pub fn iter(&self) -> impl Iterator<Item = &Layer<'a>> {
        std::iter::successors(Some(self), |layer| layer.next_layer())
    }

    pub fn protocol_chain(&self) -> Vec<ProtocolId> {
        self.iter().map(|layer| layer.protocol).collect()
    }

    pub fn find(&self, protocol: ProtocolId) -> Option<&Layer<'a>> {
        self.iter().find(|layer| layer.protocol == protocol)
    }

    /// Deepest decoded layer.
    pub fn innermost(&self) -> &Layer<'a> {
        self.iter().last().unwrap_or(self)
    }
}

impl fmt::Display for Layer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, layer) in self.iter().enumerate() {
            if depth > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", layer.header)?;
            if !layer.can_descend() && !layer.raw_payload.is_empty() {
                write!(
                    f,
                    " - Payload [{} bytes]: {}",
                    layer.raw_payload.len(),
                    hex_dump(layer.raw_payload)
                )?;
            }
        }
        Ok(())
    }
}

pub(crate) fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex_dump(bytes))
}
