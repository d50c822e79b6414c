//! ICMPv4 decoding: type, code and checksum.
//!
//! The type is named through one table and the (type, code) pair through a
//! second; a pair without an entry resolves to "No Detail". Always terminal.

pub mod layout;
pub mod parser;
pub mod tables;

pub use parser::{IcmpV4Header, parse_icmpv4};
pub use tables::IcmpDetail;
