use std::fmt;

use serde::Serialize;

use crate::protocols::common::CodeName;
use crate::protocols::common::reader::FieldReader;
use crate::protocols::dispatch::assemble;
use crate::protocols::error::DecodeError;
use crate::protocols::layer::{Header, Layer};
use crate::protocols::registry::ProtocolId;

use super::layout;
use super::tables::{IcmpDetail, icmp_detail, icmp_type};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IcmpV4Header {
    pub icmp_type: CodeName<u8>,
    pub detail: IcmpDetail,
    pub checksum: u16,
}

pub fn parse_icmpv4(message: &[u8]) -> Result<Layer<'_>, DecodeError> {
    let reader = FieldReader::new(ProtocolId::IcmpV4, message);
    reader.require_len(layout::HEADER_LEN)?;

    let type_value = reader.read_u8(layout::TYPE_OFFSET)?;
    let code = reader.read_u8(layout::CODE_OFFSET)?;
    let header = IcmpV4Header {
        icmp_type: icmp_type(type_value),
        detail: icmp_detail(type_value, code),
        checksum: reader.read_u16_be(layout::CHECKSUM_RANGE.clone())?,
    };

    assemble(
        Header::IcmpV4(header),
        message,
        layout::HEADER_LEN,
        message.len(),
        None,
    )
}

impl fmt::Display for IcmpV4Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IcmpV4 [Header {} bytes] - Type: {} - Code: {} - Detail: {} - Checksum: 0x{:04x}",
            layout::HEADER_LEN,
            self.icmp_type,
            self.detail.code,
            self.detail.name,
            self.checksum
        )
    }
}

#[cfg(test)]
mod tests {
    use super::parse_icmpv4;
    use crate::protocols::error::DecodeError;
    use crate::protocols::icmpv4::layout;

    #[test]
    fn destination_host_unreachable() {
        let data = [layout::TYPE_DESTINATION_UNREACHABLE, 1, 0xfc, 0xfe, 0, 0, 0, 0];
        let layer = parse_icmpv4(&data).unwrap();
        let header = layer.header.as_icmpv4().unwrap();
        assert_eq!(header.icmp_type.name, "Destination Unreachable");
        assert_eq!(header.detail.name, "Host Unreachable");
        assert_eq!(header.checksum, 0xfcfe);
        assert_eq!(layer.raw_payload.len(), 4);
        assert!(!layer.can_descend());
    }

    #[test]
    fn unmatched_code_keeps_type() {
        let data = [layout::TYPE_DESTINATION_UNREACHABLE, 99, 0, 0];
        let layer = parse_icmpv4(&data).unwrap();
        let header = layer.header.as_icmpv4().unwrap();
        assert_eq!(header.detail.name, "No Detail");
        assert_eq!(header.detail.type_value, 3);
        assert_eq!(header.icmp_type.value, 3);
    }

    #[test]
    fn render_echo() {
        let data = [layout::TYPE_ECHO, 0, 0xf7, 0xff, 0x00, 0x01, 0x00, 0x02];
        let text = parse_icmpv4(&data).unwrap().to_string();
        assert!(text.starts_with("IcmpV4 [Header 4 bytes] - Type: Echo (8)"));
        assert!(text.contains("Detail: No Detail"));
        assert!(text.ends_with("Payload [4 bytes]: 00 01 00 02"));
    }

    #[test]
    fn parse_short_message() {
        let err = parse_icmpv4(&[8, 0, 0]).unwrap_err();
        assert!(matches!(err, DecodeError::BufferTooShort { needed: 4, .. }));
    }
}
