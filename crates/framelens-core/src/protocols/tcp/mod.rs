//! TCP decoding.
//!
//! The header length is the data-offset nibble ×4 and must lie between 20
//! bytes and the buffer length. Control flags and reserved bits are unpacked
//! from the same 16-bit word with the masks in `layout`. Options are kept raw
//! and also walked into named entries for display; a malformed option list
//! never fails the decode. Well-known ports get a label, nothing more: TCP is
//! always terminal.

pub mod layout;
pub mod parser;
pub mod reader;
pub mod tables;

pub use parser::{TcpHeader, parse_tcp};
pub use reader::{TcpFlags, TcpOption, walk_options};
