use nativekit_core::{Error, Result};
use once_cell::sync::OnceCell;
use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::platform::Platform;

/// The default search-directory list, computed once and cached for the
/// process lifetime.
static SEARCH_DIRECTORIES: OnceCell<Vec<PathBuf>> = OnceCell::new();

/// The ordered list of directories searched for native library files.
///
/// Order is significant: it defines precedence when more than one directory
/// holds a matching file. The defaults are the current working directory, the
/// executable's directory, `libs/<rid>`, and `runtimes/<rid>/native`.
///
/// Computed on first call and memoized for the process lifetime. Directories
/// are not required to exist at that point; existence is only checked while
/// searching.
pub fn search_directories(platform: Platform) -> Result<&'static [PathBuf]> {
    let directories = SEARCH_DIRECTORIES.get_or_try_init(|| default_search_directories(platform))?;
    Ok(directories.as_slice())
}

fn default_search_directories(platform: Platform) -> Result<Vec<PathBuf>> {
    let rid = platform.runtime_identifier()?;

    let mut directories = Vec::with_capacity(4);
    if let Ok(working_directory) = env::current_dir() {
        directories.push(working_directory);
    }
    if let Some(base_directory) = executable_directory() {
        directories.push(base_directory);
    }
    directories.push(PathBuf::from(format!("libs/{rid}")));
    directories.push(PathBuf::from(format!("runtimes/{rid}/native")));

    Ok(directories)
}

fn executable_directory() -> Option<PathBuf> {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// Find a native library file for `name` by scanning the memoized
/// search-directory list in order.
///
/// Returns [`Error::LibraryNotFound`] when no directory holds a match.
pub fn find_library_path(name: &str, platform: Platform) -> Result<PathBuf> {
    find_in_directories(name, platform, search_directories(platform)?)
}

/// Find a native library file for `name` in an explicit, ordered directory
/// list.
///
/// A candidate matches when its extension is the platform's library extension
/// and its filename without that extension *starts with*
/// `<prefix><name>`. The prefix match (rather than an exact match)
/// accommodates version- or architecture-suffixed filenames such as
/// `libfoo.2.so`. Directories that do not exist are skipped. Directories are
/// scanned in list order; within one directory, files are taken in the order
/// the filesystem yields them, which is not guaranteed to be stable when
/// several files share the prefix.
pub fn find_in_directories<P: AsRef<Path>>(
    name: &str,
    platform: Platform,
    directories: &[P],
) -> Result<PathBuf> {
    let file_name_stem = format!("{}{}", platform.file_prefix(), name);
    let extension = platform.file_extension()?;

    for directory in directories {
        let directory = directory.as_ref();
        if !directory.is_dir() {
            continue;
        }
        if let Some(path) = scan_directory(directory, &file_name_stem, extension)? {
            debug!(
                library = name,
                path = %path.display(),
                "resolved native library file"
            );
            return Ok(path);
        }
    }

    Err(Error::library_not_found(name))
}

/// Scan a single existing directory for the first file whose stem starts
/// with `file_name_stem` and whose name ends with `extension`.
fn scan_directory(
    directory: &Path,
    file_name_stem: &str,
    extension: &str,
) -> Result<Option<PathBuf>> {
    let entries =
        fs::read_dir(directory).map_err(|e| Error::file_system(directory, "read_dir", e))?;

    for entry in entries {
        let entry = entry.map_err(|e| Error::file_system(directory, "read_dir", e))?;
        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(OsStr::to_str) else {
            continue;
        };
        let Some(stem) = file_name.strip_suffix(extension) else {
            continue;
        };
        if stem.starts_with(file_name_stem) {
            return Ok(Some(path));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        File::create(path).expect("failed to create test file");
    }

    #[test]
    fn test_prefix_match_accepts_suffixed_filenames() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("libfoo.2.so"));

        let found = find_in_directories("foo", Platform::Linux, &[dir.path()]).unwrap();
        assert_eq!(found, dir.path().join("libfoo.2.so"));
    }

    #[test]
    fn test_prefix_match_anchors_at_start() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("barfoo.so"));

        let result = find_in_directories("foo", Platform::Linux, &[dir.path()]);
        assert!(matches!(result, Err(Error::LibraryNotFound { .. })));
    }

    #[test]
    fn test_extension_must_match_platform() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("libfoo.dylib"));

        let result = find_in_directories("foo", Platform::Linux, &[dir.path()]);
        assert!(matches!(result, Err(Error::LibraryNotFound { .. })));
    }

    #[test]
    fn test_directory_order_defines_precedence() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        touch(&first.path().join("libfoo.so"));
        touch(&second.path().join("libfoo.so"));

        let found =
            find_in_directories("foo", Platform::Linux, &[first.path(), second.path()]).unwrap();
        assert_eq!(found, first.path().join("libfoo.so"));

        let found =
            find_in_directories("foo", Platform::Linux, &[second.path(), first.path()]).unwrap();
        assert_eq!(found, second.path().join("libfoo.so"));
    }

    #[test]
    fn test_missing_directories_are_skipped() {
        let present = TempDir::new().unwrap();
        touch(&present.path().join("libfoo.so"));
        let missing = present.path().join("does-not-exist");

        let found = find_in_directories(
            "foo",
            Platform::Linux,
            &[missing.as_path(), present.path()],
        )
        .unwrap();
        assert_eq!(found, present.path().join("libfoo.so"));
    }

    #[test]
    fn test_rid_qualified_layout_end_to_end() {
        let base = TempDir::new().unwrap();
        let empty = base.path().join("app");
        let rid_dir = base.path().join("libs/linux-x64");
        fs::create_dir_all(&empty).unwrap();
        fs::create_dir_all(&rid_dir).unwrap();
        touch(&rid_dir.join("libexample.so"));

        let found = find_in_directories(
            "example",
            Platform::Linux,
            &[empty.as_path(), rid_dir.as_path()],
        )
        .unwrap();
        assert_eq!(found, rid_dir.join("libexample.so"));
    }

    #[test]
    fn test_windows_filenames_have_no_prefix() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("foo.dll"));

        let found = find_in_directories("foo", Platform::Windows, &[dir.path()]).unwrap();
        assert_eq!(found, dir.path().join("foo.dll"));
    }

    #[test]
    fn test_unsupported_platform_fails_before_scanning() {
        let dir = TempDir::new().unwrap();
        let result = find_in_directories("foo", Platform::Android, &[dir.path()]);
        assert!(matches!(result, Err(Error::UnsupportedPlatform { .. })));
    }

    #[test]
    fn test_search_is_deterministic_across_calls() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        touch(&first.path().join("libfoo.so"));
        touch(&second.path().join("libfoo.1.so"));

        let dirs = [first.path(), second.path()];
        let a = find_in_directories("foo", Platform::Linux, &dirs).unwrap();
        let b = find_in_directories("foo", Platform::Linux, &dirs).unwrap();
        assert_eq!(a, b);
    }
}
