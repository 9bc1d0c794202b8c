use parking_lot::Mutex;
use std::collections::HashMap;
use std::os::raw::c_char;
use tracing::debug;

use crate::encoding::{decode_latin1, encode_latin1};

/// Shared empty C string handed out for empty or null inputs. Never cached,
/// never freed.
static EMPTY_C_STRING: &[u8] = b"\0";

struct CacheEntry {
    text: String,
    /// Whether the cache allocated the buffer at this address. Addresses
    /// first observed through `resolve` belong to the native side and are
    /// never freed here.
    owned: bool,
}

#[derive(Default)]
struct Maps {
    /// string value -> native address
    by_string: HashMap<String, usize>,
    /// native address -> string value (the reverse direction; release uses
    /// it to locate the string-side entry to remove)
    by_address: HashMap<usize, CacheEntry>,
}

/// A bidirectional cache between Rust strings and null-terminated
/// single-byte C strings.
///
/// The two directions form a bijection over the live entries: each distinct
/// string has at most one cached address and each cached address has exactly
/// one string. Buffers allocated by [`intern`](NativeStringCache::intern) are
/// owned by the cache until [`release`](NativeStringCache::release) or
/// [`release_all`](NativeStringCache::release_all) frees them; nothing is
/// freed implicitly before the cache itself is dropped.
///
/// Both directions are guarded by one internal mutex, so a cache can be
/// shared freely across threads. Intended use is one cache per process,
/// owned by whoever drives the native boundary and passed by reference.
#[derive(Default)]
pub struct NativeStringCache {
    inner: Mutex<Maps>,
}

impl NativeStringCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a string to a cached, null-terminated single-byte C string
    /// and return its address.
    ///
    /// An empty input converts to a shared empty C string without creating a
    /// cache entry. Otherwise the cached address is returned when one exists;
    /// repeated calls with equal strings yield the identical address and
    /// allocate at most once.
    pub fn intern(&self, text: &str) -> *const c_char {
        if text.is_empty() {
            return EMPTY_C_STRING.as_ptr().cast();
        }

        let mut maps = self.inner.lock();
        if let Some(&address) = maps.by_string.get(text) {
            return address as *const c_char;
        }

        let pointer = allocate_native(&encode_latin1(text));
        let address = pointer as usize;
        maps.by_string.insert(text.to_owned(), address);
        maps.by_address.insert(
            address,
            CacheEntry {
                text: text.to_owned(),
                owned: true,
            },
        );
        pointer
    }

    /// Convert a C string address back to a string.
    ///
    /// A cached address returns its associated string without touching
    /// native memory. An unknown address is decoded once (null-terminated,
    /// single-byte) and then cached in both directions, unless it decodes to
    /// the empty string, which is returned without caching.
    ///
    /// # Safety
    ///
    /// A non-null `address` not already cached must point to readable memory
    /// terminated by a `0` byte.
    pub unsafe fn resolve(&self, address: *const c_char) -> String {
        if address.is_null() {
            return String::new();
        }

        let mut maps = self.inner.lock();
        if let Some(entry) = maps.by_address.get(&(address as usize)) {
            return entry.text.clone();
        }

        let text = decode_latin1(address);
        if text.is_empty() {
            return text;
        }
        // A second address carrying an already-cached string would break the
        // bijection; hand the text back without caching the newcomer.
        if maps.by_string.contains_key(&text) {
            return text;
        }

        maps.by_string.insert(text.clone(), address as usize);
        maps.by_address.insert(
            address as usize,
            CacheEntry {
                text: text.clone(),
                owned: false,
            },
        );
        text
    }

    /// Release one cached entry, freeing its buffer if the cache allocated
    /// it.
    ///
    /// Addresses that are not cached — foreign, already released, or the
    /// shared empty string — are ignored, so cleanup code can call this
    /// unconditionally and repeatedly without risking a double free.
    pub fn release(&self, address: *const c_char) {
        if address.is_null() {
            return;
        }

        let mut maps = self.inner.lock();
        let Some(entry) = maps.by_address.remove(&(address as usize)) else {
            return;
        };
        maps.by_string.remove(&entry.text);
        if entry.owned {
            // SAFETY: the cache allocated this buffer and removing the entry
            // above makes this the only remaining reference to it.
            unsafe { libc::free(address.cast_mut().cast()) };
        }
    }

    /// Release every cached entry, freeing all cache-owned buffers and
    /// clearing both directions of the mapping. Safe to call on an empty
    /// cache.
    pub fn release_all(&self) {
        let mut maps = self.inner.lock();
        let count = maps.by_address.len();
        for (&address, entry) in &maps.by_address {
            if entry.owned {
                // SAFETY: as in `release`; the maps are cleared below.
                unsafe { libc::free((address as *mut c_char).cast()) };
            }
        }
        maps.by_address.clear();
        maps.by_string.clear();
        if count > 0 {
            debug!(count, "released all cached native strings");
        }
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().by_address.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().by_address.is_empty()
    }
}

impl Drop for NativeStringCache {
    fn drop(&mut self) {
        self.release_all();
    }
}

fn allocate_native(bytes: &[u8]) -> *const c_char {
    // bytes already carries the trailing null terminator.
    let pointer = unsafe { libc::malloc(bytes.len()) };
    assert!(
        !pointer.is_null(),
        "native allocation of {} bytes failed",
        bytes.len()
    );
    // SAFETY: malloc returned a block of exactly bytes.len() bytes.
    unsafe {
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), pointer.cast::<u8>(), bytes.len());
    }
    pointer.cast_const().cast()
}
