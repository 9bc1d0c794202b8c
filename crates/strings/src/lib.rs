//! Owned bidirectional cache between Rust strings and C strings.
//!
//! Text crossing a C ABI boundary goes through [`NativeStringCache`], which
//! interns each distinct string into one null-terminated single-byte buffer
//! and remembers the association in both directions. Conversions of equal
//! inputs therefore return the identical address, and every buffer the cache
//! allocates stays valid until it is explicitly released.
//!
//! The cache is an owned value, not ambient global state: create one per
//! process and pass it by reference to whatever drives the native boundary.

mod cache;
mod encoding;

pub use self::cache::NativeStringCache;
