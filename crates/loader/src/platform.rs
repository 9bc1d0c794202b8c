use nativekit_core::{Error, Result};
use once_cell::sync::Lazy;
use std::fmt;

/// The platform value for this process, detected once and cached forever.
static CURRENT_PLATFORM: Lazy<Platform> = Lazy::new(detect_platform);

/// Runtime platforms with a native-library file-naming convention.
///
/// Android and iOS are recognized tags, but asking either for a file
/// extension or runtime identifier is an explicit [`Error::UnsupportedPlatform`]
/// rather than a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// The operating system could not be classified
    Unknown,
    /// Desktop Windows, 32-bit or 64-bit
    Windows,
    /// Desktop macOS
    MacOs,
    /// Desktop Linux distributions
    Linux,
    /// Mobile Android (recognized, resolution unimplemented)
    Android,
    /// Mobile iOS (recognized, resolution unimplemented)
    Ios,
}

fn detect_platform() -> Platform {
    if cfg!(target_os = "windows") {
        Platform::Windows
    } else if cfg!(target_os = "macos") {
        Platform::MacOs
    } else if cfg!(target_os = "linux") {
        Platform::Linux
    } else if cfg!(target_os = "android") {
        Platform::Android
    } else if cfg!(target_os = "ios") {
        Platform::Ios
    } else {
        Platform::Unknown
    }
}

impl Platform {
    /// The platform this process is running on.
    ///
    /// Computed lazily on first use and memoized for the process lifetime;
    /// every subsequent call returns the identical value.
    #[must_use]
    pub fn current() -> Platform {
        *CURRENT_PLATFORM
    }

    /// The shared-library file extension for this platform, dot included.
    pub fn file_extension(self) -> Result<&'static str> {
        match self {
            Platform::Windows => Ok(".dll"),
            Platform::MacOs => Ok(".dylib"),
            Platform::Linux => Ok(".so"),
            Platform::Android | Platform::Ios => Err(Error::unsupported_platform(
                self.to_string(),
                "no implemented library file extension convention",
            )),
            Platform::Unknown => Err(Error::UnknownPlatform),
        }
    }

    /// The conventional library filename prefix: empty on Windows, `lib`
    /// everywhere else.
    #[must_use]
    pub fn file_prefix(self) -> &'static str {
        match self {
            Platform::Windows => "",
            _ => "lib",
        }
    }

    /// The runtime identifier naming platform-qualified subdirectories such
    /// as `libs/<rid>` and `runtimes/<rid>/native`.
    ///
    /// Process bitness is only distinguished on Windows.
    pub fn runtime_identifier(self) -> Result<&'static str> {
        match self {
            Platform::Windows => Ok(if cfg!(target_pointer_width = "64") {
                "win-x64"
            } else {
                "win-x86"
            }),
            Platform::MacOs => Ok("osx-x64"),
            Platform::Linux => Ok("linux-x64"),
            Platform::Android | Platform::Ios => Err(Error::unsupported_platform(
                self.to_string(),
                "no implemented runtime identifier",
            )),
            Platform::Unknown => Err(Error::UnknownPlatform),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Unknown => "unknown",
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
            Platform::Linux => "Linux",
            Platform::Android => "Android",
            Platform::Ios => "iOS",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_platform_is_memoized() {
        let first = Platform::current();
        let second = Platform::current();
        assert_eq!(first, second);
    }

    #[test]
    fn test_current_platform_matches_compile_target() {
        let platform = Platform::current();
        #[cfg(target_os = "linux")]
        assert_eq!(platform, Platform::Linux);
        #[cfg(target_os = "macos")]
        assert_eq!(platform, Platform::MacOs);
        #[cfg(target_os = "windows")]
        assert_eq!(platform, Platform::Windows);
    }

    #[test]
    fn test_file_extension_per_platform() {
        assert_eq!(Platform::Windows.file_extension().unwrap(), ".dll");
        assert_eq!(Platform::MacOs.file_extension().unwrap(), ".dylib");
        assert_eq!(Platform::Linux.file_extension().unwrap(), ".so");
    }

    #[test]
    fn test_file_prefix_is_empty_only_on_windows() {
        assert_eq!(Platform::Windows.file_prefix(), "");
        assert_eq!(Platform::MacOs.file_prefix(), "lib");
        assert_eq!(Platform::Linux.file_prefix(), "lib");
    }

    #[test]
    fn test_runtime_identifiers() {
        assert_eq!(Platform::MacOs.runtime_identifier().unwrap(), "osx-x64");
        assert_eq!(Platform::Linux.runtime_identifier().unwrap(), "linux-x64");
        let windows = Platform::Windows.runtime_identifier().unwrap();
        assert!(windows == "win-x64" || windows == "win-x86");
    }

    #[test]
    fn test_mobile_platforms_are_unsupported() {
        for platform in [Platform::Android, Platform::Ios] {
            assert!(matches!(
                platform.file_extension(),
                Err(Error::UnsupportedPlatform { .. })
            ));
            assert!(matches!(
                platform.runtime_identifier(),
                Err(Error::UnsupportedPlatform { .. })
            ));
        }
    }

    #[test]
    fn test_unknown_platform_errors() {
        assert!(matches!(
            Platform::Unknown.file_extension(),
            Err(Error::UnknownPlatform)
        ));
        assert!(matches!(
            Platform::Unknown.runtime_identifier(),
            Err(Error::UnknownPlatform)
        ));
    }
}
