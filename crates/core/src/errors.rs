use std::path::PathBuf;

/// Result type alias for nativekit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for nativekit operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The platform is recognized but has no implemented native-library
    /// convention (Android and iOS resolution is deliberately unimplemented)
    #[error("platform '{platform}' is not supported: {message}")]
    UnsupportedPlatform { platform: String, message: String },

    /// The current operating system could not be classified into a known
    /// platform tag
    #[error("the current operating system could not be classified into a known platform")]
    UnknownPlatform,

    /// Neither the directory search nor the host loader's own resolution
    /// located the requested library
    #[error("could not find the native library '{name}'; is it placed in one of the search directories?")]
    LibraryNotFound { name: String },

    /// A library file was found but the host loader failed to load it
    #[error("failed to load native library '{path}': {message}")]
    LibraryLoad { path: PathBuf, message: String },

    /// A requested exported symbol does not exist in a loaded library
    #[error("no exported symbol '{symbol}' in library '{library}'")]
    SymbolNotFound { symbol: String, library: String },

    /// File system operations
    #[error("file system {operation} operation failed for '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

// Helper methods for creating errors with context
impl Error {
    /// Create an unsupported-platform error
    #[must_use]
    pub fn unsupported_platform(platform: impl Into<String>, message: impl Into<String>) -> Self {
        Error::UnsupportedPlatform {
            platform: platform.into(),
            message: message.into(),
        }
    }

    /// Create a library-not-found error naming the logical library name
    #[must_use]
    pub fn library_not_found(name: impl Into<String>) -> Self {
        Error::LibraryNotFound { name: name.into() }
    }

    /// Create a library-load error with the path that failed
    #[must_use]
    pub fn library_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::LibraryLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a symbol-not-found error
    #[must_use]
    pub fn symbol_not_found(symbol: impl Into<String>, library: impl Into<String>) -> Self {
        Error::SymbolNotFound {
            symbol: symbol.into(),
            library: library.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::FileSystem {
            path: PathBuf::new(),
            operation: "unknown".to_string(),
            source: error,
        }
    }
}
