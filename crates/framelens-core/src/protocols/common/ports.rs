/// Ports labeled with an application name. Labels are display hints only;
/// they never trigger further decoding.
pub static WELL_KNOWN_PORTS: &[(u16, &str)] = &[(22, "SSH"), (80, "HTTP"), (443, "HTTPS")];

pub fn port_label(port: u16) -> Option<&'static str> {
    WELL_KNOWN_PORTS
        .iter()
        .find(|(known, _)| *known == port)
        .map(|&(_, label)| label)
}

/// Render a port with its label, e.g. `443 [HTTPS]`.
pub fn format_port(port: u16, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("{port} [{label}]"),
        None => port.to_string(),
    }
}
