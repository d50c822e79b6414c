//! Building blocks shared by every protocol decoder.
//!
//! - `bytes`: `Option`-returning big-endian reads and hex rendering
//! - `reader`: bounds-checked field access reporting `BufferTooShort`
//! - `address`: MAC address value with canonical rendering
//! - `lookup`: code→name tables with an explicit "Unknown" fallback
//! - `ports`: well-known port labels used as display hints

pub mod address;
pub mod bytes;
pub mod lookup;
pub mod ports;
pub mod reader;

pub use address::MacAddress;
pub use bytes::{hex_dump, read_u16_be, read_u32_be};
pub use lookup::{CodeName, ProtocolCode, UNKNOWN};
