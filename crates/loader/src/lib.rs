//! Platform-aware resolution and loading of native shared libraries.
//!
//! Loading a library by logical name goes through three layers:
//!
//! 1. [`Platform`] classifies the host OS once per process and derives the
//!    file-naming conventions (extension, `lib` prefix, runtime identifier).
//! 2. [`search`] walks an ordered, memoized directory list and matches
//!    candidate files by prefix, so suffixed filenames like `libfoo.2.so`
//!    still resolve for the logical name `foo`.
//! 3. [`NativeLibrary`] loads the resolved file (falling back to the host
//!    loader's own search) and exposes exported symbols as typed callables.

pub mod library;
pub mod platform;
pub mod search;

pub use self::{
    library::{export_name_for, NativeLibrary},
    platform::Platform,
    search::{find_in_directories, find_library_path, search_directories},
};
