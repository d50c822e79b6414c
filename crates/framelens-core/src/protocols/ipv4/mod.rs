//! IPv4 decoding.
//!
//! The header length comes from the IHL nibble (IHL×4, at least 20 bytes) and
//! the buffer is re-sliced to it, so options between byte 20 and the computed
//! length stay with the header. The flags/fragment word is unpacked with the
//! masks in `layout`. The checksum is reported, never verified.
//!
//! The payload is everything after the header in the captured buffer; the
//! declared total length is reported but not used to trim or validate it.

pub mod layout;
pub mod parser;
pub mod reader;
pub mod tables;

pub use parser::{Ipv4Header, parse_ipv4};
pub use reader::FragmentFlags;
