use thiserror::Error;

use super::registry::ProtocolId;

/// Conditions that fail the decode of a whole frame.
///
/// Unknown codes (EtherType, IP protocol, ARP/ICMP codes, TCP option kinds)
/// are not errors; they resolve to an "Unknown" value and stop descent.
///
/// # Examples
/// ```
/// use framelens_core::{DecodeError, ProtocolId};
///
/// let err = DecodeError::UnsupportedProtocol { protocol: ProtocolId::Http };
/// assert!(err.to_string().contains("unsupported protocol"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("{protocol} buffer too short: need {needed} bytes, got {actual}")]
    BufferTooShort {
        protocol: ProtocolId,
        needed: usize,
        actual: usize,
    },
    #[error("unsupported protocol: {protocol}")]
    UnsupportedProtocol { protocol: ProtocolId },
    #[error("invalid {protocol} header length: {length} bytes (minimum {minimum})")]
    InvalidHeaderLength {
        protocol: ProtocolId,
        length: usize,
        minimum: usize,
    },
}

impl DecodeError {
    /// Protocol whose decoder raised the error.
    pub fn protocol(&self) -> ProtocolId {
        match self {
            DecodeError::BufferTooShort { protocol, .. }
            | DecodeError::UnsupportedProtocol { protocol }
            | DecodeError::InvalidHeaderLength { protocol, .. } => *protocol,
        }
    }
}
