use std::path::Path;

use crate::error::{ConvertError, Result};

const HEADER_EXTENSIONS: &[&str] = &[".h", ".hpp"];
const SOURCE_EXTENSIONS: &[&str] = &[".c", ".cpp"];

/// Header and source files found in the include directories, as
/// `directory/file_name` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    pub headers: Vec<String>,
    pub sources: Vec<String>,
}

/// List the headers (`.h`, `.hpp`) and sources (`.c`, `.cpp`) directly inside
/// each of `dirs`.
///
/// Relative directories are resolved against `root`, but the emitted entries
/// keep the directory exactly as written so the Qt project stays relative
/// too.  Within a directory, files are listed in file-name order.
///
/// A directory that does not exist or cannot be read is an error.
pub fn list_headers_and_sources<S: AsRef<str>>(root: &Path, dirs: &[S]) -> Result<FileSet> {
    let mut files = FileSet::default();

    for dir in dirs {
        let dir = dir.as_ref();
        let full = root.join(dir);
        let entries = std::fs::read_dir(&full).map_err(|e| ConvertError::fs(&full, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ConvertError::fs(&full, e))?;
            let file_type = entry.file_type().map_err(|e| ConvertError::fs(entry.path(), e))?;
            let is_file = if file_type.is_symlink() {
                std::fs::metadata(entry.path())
                    .map(|m| m.is_file())
                    .map_err(|e| ConvertError::fs(entry.path(), e))?
            } else {
                file_type.is_file()
            };
            if is_file {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();

        for name in names {
            if has_extension(&name, HEADER_EXTENSIONS) {
                files.headers.push(format!("{dir}/{name}"));
            } else if has_extension(&name, SOURCE_EXTENSIONS) {
                files.sources.push(format!("{dir}/{name}"));
            }
        }
    }

    tracing::debug!(
        headers = files.headers.len(),
        sources = files.sources.len(),
        "scanned include directories"
    );

    Ok(files)
}

fn has_extension(name: &str, extensions: &[&str]) -> bool {
    extensions.iter().any(|ext| name.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn classifies_by_extension() {
        let tmp = TempDir::new().unwrap();
        for f in ["inc/a.h", "inc/b.hpp", "inc/c.c", "inc/d.cpp", "inc/e.s", "inc/f.txt"] {
            touch(tmp.path(), f);
        }

        let files = list_headers_and_sources(tmp.path(), &["inc"]).unwrap();
        assert_eq!(files.headers, vec!["inc/a.h", "inc/b.hpp"]);
        assert_eq!(files.sources, vec!["inc/c.c", "inc/d.cpp"]);
    }

    #[test]
    fn keeps_directory_order_and_sorts_within() {
        let tmp = TempDir::new().unwrap();
        for f in ["z/b.h", "z/a.h", "a/c.h"] {
            touch(tmp.path(), f);
        }

        let files = list_headers_and_sources(tmp.path(), &["z", "a"]).unwrap();
        assert_eq!(files.headers, vec!["z/a.h", "z/b.h", "a/c.h"]);
    }

    #[test]
    fn subdirectories_are_not_listed() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "inc/nested.h/x.h");
        touch(tmp.path(), "inc/top.h");

        let files = list_headers_and_sources(tmp.path(), &["inc"]).unwrap();
        assert_eq!(files.headers, vec!["inc/top.h"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_listed() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "real/a.h");
        fs::create_dir_all(tmp.path().join("inc")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("real/a.h"), tmp.path().join("inc/link.h")).unwrap();

        let files = list_headers_and_sources(tmp.path(), &["inc"]).unwrap();
        assert_eq!(files.headers, vec!["inc/link.h"]);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("inc")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone.h"), tmp.path().join("inc/dangling.h")).unwrap();

        let err = list_headers_and_sources(tmp.path(), &["inc"]).unwrap_err();
        match err {
            ConvertError::FilesystemAccess { path, .. } => assert!(path.ends_with("inc/dangling.h")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_directory_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = list_headers_and_sources(tmp.path(), &["does/not/exist"]).unwrap_err();
        match err {
            ConvertError::FilesystemAccess { path, .. } => {
                assert!(path.ends_with("does/not/exist"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
