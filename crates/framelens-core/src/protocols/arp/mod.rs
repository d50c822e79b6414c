//! ARP decoding.
//!
//! The fixed 28-byte layout assumes Ethernet hardware addresses and IPv4
//! protocol addresses. Hardware type and operation are named through the IANA
//! registries in `tables`; unknown codes keep their raw value. ARP is always
//! terminal.

pub mod layout;
pub mod parser;
pub mod tables;

pub use parser::{ArpHeader, parse_arp};
