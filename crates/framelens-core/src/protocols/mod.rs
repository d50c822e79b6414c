//! Protocol decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: byte offsets, ranges and bit masks (source of truth)
//! - `reader`: safe byte access and protocol conventions (packed fields)
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `tables`: code→name registries, where the protocol has any
//!
//! Decoding is pure: a decoder takes the bytes of its layer, builds the typed
//! header, and hands the residual payload back to [`dispatch`] when the header
//! names a registered child protocol. Layers borrow the frame buffer and never
//! copy or mutate it.

pub mod arp;
pub mod common;
pub mod dispatch;
pub mod error;
pub mod ethernet;
pub mod icmpv4;
pub mod ipv4;
pub mod layer;
pub mod registry;
pub mod tcp;
pub mod udp;

pub use dispatch::{decode, is_registered};
pub use error::DecodeError;
pub use layer::{Header, Layer};
pub use registry::ProtocolId;
