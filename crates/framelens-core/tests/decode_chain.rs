use etherparse::{Ipv4HeaderSlice, PacketBuilder, TcpHeaderSlice};
use framelens_core::{DecodeError, ProtocolId, decode};

const SRC_MAC: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01];
const DST_MAC: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x02];
const SRC_IP: [u8; 4] = [192, 168, 1, 10];
const DST_IP: [u8; 4] = [192, 168, 1, 20];

fn build_tcp(payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::new();
    let builder = PacketBuilder::ethernet2(SRC_MAC, DST_MAC)
        .ipv4(SRC_IP, DST_IP, 64)
        .tcp(51000, 443, 0x0102_0304, 4096)
        .ack(0x0a0b_0c0d)
        .psh();
    frame.reserve(builder.size(payload.len()));
    builder.write(&mut frame, payload).expect("build tcp frame");
    frame
}

fn build_udp(payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::new();
    let builder = PacketBuilder::ethernet2(SRC_MAC, DST_MAC)
        .ipv4(SRC_IP, DST_IP, 64)
        .udp(5353, 53);
    frame.reserve(builder.size(payload.len()));
    builder.write(&mut frame, payload).expect("build udp frame");
    frame
}

fn build_icmp_echo(payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::new();
    let builder = PacketBuilder::ethernet2(SRC_MAC, DST_MAC)
        .ipv4(SRC_IP, DST_IP, 64)
        .icmpv4_echo_request(7, 1);
    frame.reserve(builder.size(payload.len()));
    builder.write(&mut frame, payload).expect("build icmp frame");
    frame
}

#[test]
fn ethernet_ipv4_tcp_matches_etherparse() {
    let payload = b"hello";
    let frame = build_tcp(payload);
    let layer = decode(&frame, ProtocolId::Ethernet).expect("decode");

    assert_eq!(
        layer.protocol_chain(),
        vec![ProtocolId::Ethernet, ProtocolId::IpV4, ProtocolId::Tcp]
    );

    let ethernet = layer.header.as_ethernet().expect("ethernet");
    assert_eq!(ethernet.source.octets(), SRC_MAC);
    assert_eq!(ethernet.destination.octets(), DST_MAC);
    assert_eq!(ethernet.ether_type.value, 0x0800);

    let ip_layer = layer.find(ProtocolId::IpV4).expect("ipv4 layer");
    let expected_ip = Ipv4HeaderSlice::from_slice(&frame[14..]).expect("etherparse ipv4");
    let ip = ip_layer.header.as_ipv4().expect("ipv4");
    assert_eq!(ip.version, 4);
    assert_eq!(ip.ihl, expected_ip.ihl());
    assert_eq!(ip.total_length, expected_ip.total_len());
    assert_eq!(ip.identification, expected_ip.identification());
    assert_eq!(ip.flags.dont_fragment, expected_ip.dont_fragment());
    assert_eq!(ip.flags.more_fragments, expected_ip.more_fragments());
    assert_eq!(ip.ttl, 64);
    assert_eq!(ip.protocol.value, 6);
    assert_eq!(ip.header_checksum, expected_ip.header_checksum());
    assert_eq!(ip.source.octets(), SRC_IP);
    assert_eq!(ip.destination.octets(), DST_IP);
    assert_eq!(ip_layer.header_length, 20);
    assert_eq!(ip_layer.total_length, expected_ip.total_len() as usize);

    let tcp_layer = layer.innermost();
    let expected_tcp = TcpHeaderSlice::from_slice(&frame[34..]).expect("etherparse tcp");
    let tcp = tcp_layer.header.as_tcp().expect("tcp");
    assert_eq!(tcp.source_port, 51000);
    assert_eq!(tcp.destination_port, 443);
    assert_eq!(tcp.destination_service, Some("HTTPS"));
    assert_eq!(tcp.sequence_number, 0x0102_0304);
    assert_eq!(tcp.acknowledgment_number, 0x0a0b_0c0d);
    assert_eq!(tcp.data_offset, expected_tcp.data_offset());
    assert!(tcp.flags.ack && tcp.flags.psh);
    assert!(!tcp.flags.syn && !tcp.flags.fin && !tcp.flags.rst && !tcp.flags.urg);
    assert_eq!(tcp.window, 4096);
    assert_eq!(tcp.checksum, expected_tcp.checksum());
    assert_eq!(tcp_layer.raw_payload, payload);
    assert!(!tcp_layer.can_descend());
}

#[test]
fn ethernet_ipv4_udp_matches_etherparse() {
    let payload = [0xde, 0xad, 0xbe, 0xef];
    let frame = build_udp(&payload);
    let layer = decode(&frame, ProtocolId::Ethernet).expect("decode");

    let udp_layer = layer.find(ProtocolId::Udp).expect("udp layer");
    let udp = udp_layer.header.as_udp().expect("udp");
    assert_eq!(udp.source_port, 5353);
    assert_eq!(udp.destination_port, 53);
    assert_eq!(udp.length, 12);
    assert_eq!(u16::from_be_bytes([frame[40], frame[41]]), udp.checksum);
    assert_eq!(udp_layer.header_length, 8);
    assert_eq!(udp_layer.total_length, 12);
    assert_eq!(udp_layer.raw_payload, payload);
}

#[test]
fn ethernet_ipv4_icmp_echo_matches_etherparse() {
    let frame = build_icmp_echo(&[1, 2, 3, 4]);
    let layer = decode(&frame, ProtocolId::Ethernet).expect("decode");

    let icmp_layer = layer.innermost();
    let icmp = icmp_layer.header.as_icmpv4().expect("icmp");
    assert_eq!(icmp.icmp_type.value, 8);
    assert_eq!(icmp.detail.code, 0);
    assert_eq!(icmp.checksum, u16::from_be_bytes([frame[36], frame[37]]));
    // Echo identifier and sequence stay in the residual payload.
    assert_eq!(icmp_layer.raw_payload, &[0, 7, 0, 1, 1, 2, 3, 4]);
}

#[test]
fn ether_type_decides_descent() {
    let mut frame = build_udp(&[0; 4]);
    for ether_type in [0x86dd_u16, 0x88cc, 0x0000, 0xffff] {
        frame[12..14].copy_from_slice(&ether_type.to_be_bytes());
        let layer = decode(&frame, ProtocolId::Ethernet).expect("decode");
        let ethernet = layer.header.as_ethernet().expect("ethernet");
        assert!(!layer.can_descend(), "0x{ether_type:04x} should be terminal");
        assert_eq!(ethernet.ether_type.value, ether_type);
        assert_eq!(ethernet.ether_type.name, "Unknown");
        assert_eq!(layer.raw_payload.len(), frame.len() - 14);
    }
}

#[test]
fn decoding_is_deterministic() {
    let frame = build_tcp(b"same bytes");
    let first = decode(&frame, ProtocolId::Ethernet).expect("first");
    let second = decode(&frame, ProtocolId::Ethernet).expect("second");
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn truncated_transport_fails_whole_frame() {
    let frame = build_tcp(&[]);
    let err = decode(&frame[..14 + 20 + 10], ProtocolId::Ethernet).unwrap_err();
    assert_eq!(
        err,
        DecodeError::BufferTooShort {
            protocol: ProtocolId::Tcp,
            needed: 20,
            actual: 10,
        }
    );
}

#[test]
fn unregistered_protocols_fail() {
    let frame = build_tcp(b"GET / HTTP/1.1\r\n");
    for protocol in [ProtocolId::Http, ProtocolId::Ssh] {
        let err = decode(&frame, protocol).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedProtocol { protocol: p } if p == protocol));
        assert!(err.to_string().contains("unsupported protocol"));
    }
}

#[test]
fn rendering_has_one_line_per_layer() {
    let frame = build_udp(&[0xab, 0xcd]);
    let text = decode(&frame, ProtocolId::Ethernet).expect("decode").to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Ethernet [Header 14 bytes]"));
    assert!(lines[1].starts_with("IpV4 [Header 20 bytes]"));
    assert!(lines[2].starts_with("Udp [Header 8 bytes]"));
    assert!(lines[2].ends_with("Payload [2 bytes]: ab cd"));
}

#[test]
fn layer_tree_serializes_to_json() {
    let frame = build_udp(&[0x01]);
    let layer = decode(&frame, ProtocolId::Ethernet).expect("decode");
    let value = serde_json::to_value(&layer).expect("json");
    assert_eq!(value["protocol"], "Ethernet");
    assert_eq!(value["next"]["protocol"], "IpV4");
    assert_eq!(value["next"]["next"]["protocol"], "Udp");
    assert_eq!(value["next"]["next"]["raw_payload"], "01");
    assert!(value["next"]["next"].get("next").is_none());
}
