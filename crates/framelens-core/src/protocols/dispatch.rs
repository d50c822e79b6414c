//! Dispatch factory: protocol identifier → decoder.
//!
//! The mapping is an exhaustive match over [`ProtocolId`]; identifiers without
//! a decoder fail with `UnsupportedProtocol`. Decoders that resolve a child
//! protocol come back here through [`assemble`], so a frame is decoded as a
//! strictly descending chain with no backtracking.

use super::error::DecodeError;
use super::layer::{Header, Layer};
use super::registry::ProtocolId;
use super::{arp, ethernet, icmpv4, ipv4, tcp, udp};

/// Decode `buffer` as `protocol` and every layer it carries.
///
/// # Examples
/// ```
/// use framelens_core::{DecodeError, ProtocolId, decode};
///
/// let udp = [0x13, 0x88, 0x00, 0x35, 0x00, 0x0a, 0x00, 0x00, 0xde, 0xad];
/// let layer = decode(&udp, ProtocolId::Udp)?;
/// assert_eq!(layer.protocol_name(), "Udp");
/// assert!(!layer.can_descend());
///
/// let err = decode(&udp, ProtocolId::Http).unwrap_err();
/// assert!(matches!(err, DecodeError::UnsupportedProtocol { .. }));
/// # Ok::<(), DecodeError>(())
/// ```
///
/// # Errors
/// `BufferTooShort` or `InvalidHeaderLength` when any layer of the chain is
/// malformed, `UnsupportedProtocol` when `protocol` has no decoder. No partial
/// layer is returned on error.
pub fn decode(buffer: &[u8], protocol: ProtocolId) -> Result<Layer<'_>, DecodeError> {
    log::trace!("decoding {} bytes as {}", buffer.len(), protocol);
    match protocol {
        ProtocolId::Ethernet => ethernet::parse_ethernet(buffer),
        ProtocolId::Arp => arp::parse_arp(buffer),
        ProtocolId::IpV4 => ipv4::parse_ipv4(buffer),
        ProtocolId::Tcp => tcp::parse_tcp(buffer),
        ProtocolId::Udp => udp::parse_udp(buffer),
        ProtocolId::IcmpV4 => icmpv4::parse_icmpv4(buffer),
        ProtocolId::Http | ProtocolId::Ssh => Err(DecodeError::UnsupportedProtocol { protocol }),
    }
}

/// Whether `protocol` has a registered decoder.
pub fn is_registered(protocol: ProtocolId) -> bool {
    !matches!(protocol, ProtocolId::Http | ProtocolId::Ssh)
}

/// Split `buffer` at `header_length` and descend into `child` when present.
pub(crate) fn assemble<'a>(
    header: Header<'a>,
    buffer: &'a [u8],
    header_length: usize,
    total_length: usize,
    child: Option<ProtocolId>,
) -> Result<Layer<'a>, DecodeError> {
    let protocol = header.protocol();
    let (raw_header, raw_payload) =
        buffer
            .split_at_checked(header_length)
            .ok_or(DecodeError::BufferTooShort {
                protocol,
                needed: header_length,
                actual: buffer.len(),
            })?;

    let next = match child {
        Some(child) => Some(Box::new(decode(raw_payload, child)?)),
        None => None,
    };

    Ok(Layer {
        protocol,
        header,
        header_length,
        total_length,
        raw_header,
        raw_payload,
        next,
    })
}

#[cfg(test)]
mod tests {
    use super::{decode, is_registered};
    use crate::protocols::error::DecodeError;
    use crate::protocols::registry::ProtocolId;

    #[test]
    fn unregistered_protocols_fail() {
        let data = [0u8; 64];
        for protocol in [ProtocolId::Http, ProtocolId::Ssh] {
            assert!(!is_registered(protocol));
            assert_eq!(
                decode(&data, protocol),
                Err(DecodeError::UnsupportedProtocol { protocol })
            );
        }
    }

    #[test]
    fn registered_protocols_decode_zero_buffers_or_fail_explicitly() {
        let data = [0u8; 64];
        for protocol in ProtocolId::ALL.into_iter().filter(|id| is_registered(*id)) {
            match decode(&data, protocol) {
                Ok(layer) => assert_eq!(layer.protocol, protocol),
                Err(err) => assert!(!matches!(err, DecodeError::UnsupportedProtocol { .. })),
            }
        }
    }

    #[test]
    fn empty_buffer_is_too_short() {
        let err = decode(&[], ProtocolId::Ethernet).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::BufferTooShort {
                protocol: ProtocolId::Ethernet,
                needed: 14,
                actual: 0,
            }
        ));
    }
}
