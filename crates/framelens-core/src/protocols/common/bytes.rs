/// Read a big-endian `u16` starting at `offset`.
///
/// Returns `None` when `offset + 1` is outside the buffer.
///
/// # Examples
/// ```
/// use framelens_core::protocols::common::read_u16_be;
///
/// assert_eq!(read_u16_be(&[0x08, 0x06], 0), Some(0x0806));
/// assert_eq!(read_u16_be(&[0x08], 0), None);
/// ```
pub fn read_u16_be(buffer: &[u8], offset: usize) -> Option<u16> {
    let end = offset.checked_add(2)?;
    let bytes = buffer.get(offset..end)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

/// Read a big-endian `u32` starting at `offset`.
pub fn read_u32_be(buffer: &[u8], offset: usize) -> Option<u32> {
    let end = offset.checked_add(4)?;
    let bytes = buffer.get(offset..end)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Render bytes as space-separated, two-digit lowercase hex pairs.
///
/// # Examples
/// ```
/// use framelens_core::protocols::common::hex_dump;
///
/// assert_eq!(hex_dump(&[0x00, 0x0a, 0xff]), "00 0a ff");
/// assert_eq!(hex_dump(&[]), "");
/// ```
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{:02x}", byte));
    }
    out
}
