use std::fmt;

/// A boolean with the same single-byte memory layout as C's `_Bool`.
///
/// Rust's `bool` already guarantees a one-byte representation holding `0` or
/// `1`, but native headers frequently declare their own byte-wide boolean
/// whose loaded value is not guaranteed to be `0` or `1`. `NativeBool` accepts
/// any byte from the native side (nonzero reads as `true`) while always
/// storing exactly `0` or `1` when constructed from a `bool`, so it can be
/// passed through an `extern "C"` signature in either direction.
#[repr(transparent)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NativeBool(u8);

impl NativeBool {
    pub const FALSE: NativeBool = NativeBool(0);
    pub const TRUE: NativeBool = NativeBool(1);

    /// Read the value, treating any nonzero byte as `true`
    #[must_use]
    pub const fn get(self) -> bool {
        self.0 != 0
    }
}

impl From<bool> for NativeBool {
    fn from(value: bool) -> Self {
        NativeBool(value as u8)
    }
}

impl From<NativeBool> for bool {
    fn from(value: NativeBool) -> Self {
        value.get()
    }
}

impl fmt::Debug for NativeBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.get(), f)
    }
}

impl fmt::Display for NativeBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.get(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_bool_is_one_byte() {
        assert_eq!(std::mem::size_of::<NativeBool>(), 1);
        assert_eq!(std::mem::align_of::<NativeBool>(), 1);
    }

    #[test]
    fn test_native_bool_round_trip() {
        assert!(bool::from(NativeBool::from(true)));
        assert!(!bool::from(NativeBool::from(false)));
        assert_eq!(NativeBool::from(true), NativeBool::TRUE);
        assert_eq!(NativeBool::from(false), NativeBool::FALSE);
    }

    #[test]
    fn test_native_bool_accepts_nonzero_bytes() {
        // A native library may hand back any nonzero byte for "true".
        let raw: u8 = 0xFF;
        let value: NativeBool = unsafe { std::mem::transmute(raw) };
        assert!(value.get());
    }

    #[test]
    fn test_native_bool_default_is_false() {
        assert_eq!(NativeBool::default(), NativeBool::FALSE);
    }
}
