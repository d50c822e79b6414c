//! Hex frame input for `frame decode`.

/// Parse a hex string into bytes. Whitespace and `:` are ignored, so
/// `"00 1a:2b"` and `"001a2b"` are the same frame.
pub fn parse_hex_frame(input: &str) -> Result<Vec<u8>, String> {
    let digits = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .map(|c| {
            c.to_digit(16)
                .map(|digit| digit as u8)
                .ok_or_else(|| format!("invalid hex character '{c}'"))
        })
        .collect::<Result<Vec<u8>, String>>()?;

    if digits.is_empty() {
        return Err("frame is empty".to_string());
    }
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits ({})", digits.len()));
    }
    Ok(digits
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}
