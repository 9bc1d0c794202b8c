use std::os::raw::c_char;

/// Encode `text` as a null-terminated single-byte (Latin-1) buffer.
///
/// Characters outside the single-byte range are replaced with `?`. An
/// interior NUL in `text` would terminate the native string early; callers
/// crossing a C boundary do not produce such strings in practice.
pub(crate) fn encode_latin1(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len() + 1);
    for ch in text.chars() {
        bytes.push(u8::try_from(u32::from(ch)).unwrap_or(b'?'));
    }
    bytes.push(0);
    bytes
}

/// Decode a null-terminated single-byte (Latin-1) string.
///
/// # Safety
///
/// `pointer` must point to readable memory terminated by a `0` byte.
pub(crate) unsafe fn decode_latin1(pointer: *const c_char) -> String {
    let mut text = String::new();
    let mut cursor = pointer.cast::<u8>();
    while *cursor != 0 {
        text.push(char::from(*cursor));
        cursor = cursor.add(1);
    }
    text
}
