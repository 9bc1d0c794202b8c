use libloading::{Library, Symbol};
use nativekit_core::{Error, Result};
use std::ffi::c_void;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::platform::Platform;
use crate::search;

/// An opened native shared library.
///
/// The handle exclusively owns the underlying OS library handle until
/// [`close`](NativeLibrary::close) is called or the value is dropped.
#[derive(Debug)]
pub struct NativeLibrary {
    library: Library,
    path: PathBuf,
}

impl NativeLibrary {
    /// Load a native library from an exact file path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        // SAFETY: loading a library runs its initialization routines; the
        // caller vouches for the file being a well-behaved native library.
        let library = unsafe { Library::new(path) }
            .map_err(|e| Error::library_load(path, e.to_string()))?;
        debug!(path = %path.display(), "loaded native library");
        Ok(Self {
            library,
            path: path.to_path_buf(),
        })
    }

    /// Resolve and load a library by logical name.
    ///
    /// The search-directory list is consulted first; when it yields nothing,
    /// resolution falls back to the host loader's own search (`dlopen` /
    /// `LoadLibrary`) with the platform-conventional filename. Failure of
    /// both is reported as [`Error::LibraryNotFound`] naming the logical
    /// name.
    pub fn open_by_name(name: &str) -> Result<Self> {
        let platform = Platform::current();
        match search::find_library_path(name, platform) {
            Ok(path) => return Self::open(path),
            Err(Error::LibraryNotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let file_name = format!(
            "{}{}{}",
            platform.file_prefix(),
            name,
            platform.file_extension()?
        );
        debug!(
            library = name,
            file = %file_name,
            "search directories exhausted, deferring to host loader"
        );
        // SAFETY: as in `open`; the host loader searches its default paths.
        match unsafe { Library::new(&file_name) } {
            Ok(library) => Ok(Self {
                library,
                path: PathBuf::from(file_name),
            }),
            Err(_) => Err(Error::library_not_found(name)),
        }
    }

    /// The path (or host-loader filename) this library was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up an exported symbol and bind it to the callable type `T`.
    ///
    /// # Safety
    ///
    /// `T` must match the actual signature of the exported symbol; a mismatch
    /// is undefined behavior at call time.
    pub unsafe fn symbol<T>(&self, name: &str) -> Result<Symbol<'_, T>> {
        self.library
            .get(name.as_bytes())
            .map_err(|_| Error::symbol_not_found(name, self.path.display().to_string()))
    }

    /// Look up an exported symbol and return its raw address.
    ///
    /// # Safety
    ///
    /// The address is only valid while this library stays loaded.
    pub unsafe fn symbol_address(&self, name: &str) -> Result<*const c_void> {
        let symbol: Symbol<'_, unsafe extern "C" fn()> = self.symbol(name)?;
        Ok(*symbol as *const c_void)
    }

    /// Look up the export whose name is derived from `T`'s identifier via
    /// [`export_name_for`] and bind it to `T`.
    ///
    /// # Safety
    ///
    /// As for [`symbol`](NativeLibrary::symbol).
    pub unsafe fn typed_export<T>(&self) -> Result<Symbol<'_, T>> {
        self.symbol(&export_name_for::<T>())
    }

    /// Unload the library, releasing the OS handle.
    ///
    /// Dropping the value unloads it as well; `close` exists so callers can
    /// observe unload failures instead of discarding them.
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.library
            .close()
            .map_err(|e| Error::library_load(&path, e.to_string()))
    }
}

/// Derive an export name from a type's identifier.
///
/// The last path segment of the type name is taken and a leading `d_` or
/// `D_` is stripped case-insensitively, so a binding type named
/// `D_frobnicate` resolves the export `frobnicate`. Intended for named
/// marker or wrapper types; bare function pointer types do not carry a usable
/// identifier.
#[must_use]
pub fn export_name_for<T>() -> String {
    let full = std::any::type_name::<T>();
    let ident = full.rsplit("::").next().unwrap_or(full);
    let ident = if ident.len() >= 2 && ident[..2].eq_ignore_ascii_case("d_") {
        &ident[2..]
    } else {
        ident
    };
    ident.to_string()
}
