//! Filesystem utilities.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::layout::LibraryGlob;

/// List the files directly inside `dir` whose names match `glob`.
///
/// Subdirectories are not descended into and the result is sorted by file
/// name so repeated passes agree. A matching symlink counts if its target
/// is a file; dangling links are skipped.
pub fn matching_files(dir: &Path, glob: &LibraryGlob) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !glob.matches(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let is_file = if entry.path_is_symlink() {
            match std::fs::metadata(entry.path()) {
                Ok(meta) => meta.is_file(),
                Err(e) => {
                    tracing::debug!("Skipping broken link {}: {}", entry.path().display(), e);
                    false
                }
            }
        } else {
            entry.file_type().is_file()
        };

        if is_file {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_matching_files() {
        let tmp = TempDir::new().unwrap();
        let lib = tmp.path().join("lib");
        fs::create_dir_all(lib.join("cmake")).unwrap();
        fs::write(lib.join("zlib.lib"), "").unwrap();
        fs::write(lib.join("minizip.lib"), "").unwrap();
        fs::write(lib.join("zlib.pdb"), "").unwrap();
        fs::write(lib.join("cmake").join("nested.lib"), "").unwrap();

        let glob = LibraryGlob::new("*.lib").unwrap();
        let files = matching_files(&lib, &glob).unwrap();

        assert_eq!(files, vec![lib.join("minizip.lib"), lib.join("zlib.lib")]);
    }

    #[test]
    fn test_matching_files_skips_directories_named_like_libraries() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("odd.lib")).unwrap();

        let glob = LibraryGlob::new("*.lib").unwrap();
        assert!(matching_files(tmp.path(), &glob).unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_matching_files_follows_links_and_skips_dangling_ones() {
        let tmp = TempDir::new().unwrap();
        let lib = tmp.path().join("lib");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("libz.so.1.2"), "").unwrap();
        std::os::unix::fs::symlink(lib.join("libz.so.1.2"), lib.join("libz.so")).unwrap();
        std::os::unix::fs::symlink(lib.join("gone.so"), lib.join("libz-old.so")).unwrap();

        let glob = LibraryGlob::new("*.so").unwrap();
        assert_eq!(matching_files(&lib, &glob).unwrap(), vec![lib.join("libz.so")]);
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/root/ext"), Path::new("/root/ext/Headers/zlib-1.2")),
            PathBuf::from("Headers/zlib-1.2")
        );
    }
}
