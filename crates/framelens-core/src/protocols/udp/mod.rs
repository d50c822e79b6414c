//! UDP decoding: fixed 8-byte header, always terminal.
//!
//! The declared length is reported as-is and is not used to trim or validate
//! the captured payload.

pub mod layout;
pub mod parser;

pub use parser::{UdpHeader, parse_udp};
