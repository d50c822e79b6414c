//! Ethernet II decoding.
//!
//! The 14-byte header carries destination and source MAC addresses and the
//! EtherType. IPv4 (0x0800) and ARP (0x0806) are decoded further; any other
//! EtherType is kept as an "Unknown" value and the payload stays raw.
//! 802.1Q tags and trailer padding are not interpreted.

pub mod layout;
pub mod parser;
pub mod tables;

pub use parser::{EthernetHeader, parse_ethernet};
pub use tables::{EtherType, resolve_ether_type};
