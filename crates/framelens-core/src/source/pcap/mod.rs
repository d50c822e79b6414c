//! PCAP/PCAPNG source implementation.
//!
//! Handles file I/O and block iteration with `pcap-parser`, emitting one
//! `CapturedFrame` per packet block together with its link type.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::PcapFileSource;
