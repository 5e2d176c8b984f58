//! Rendering and saving of Qt Creator `.pro` files.
//!
//! The output is a console application template followed by four
//! backslash-continued variable lists:
//!
//! ```text
//! DEFINES +=   \
//! USE_HAL_DRIVER  \
//!
//! INCLUDEPATH +=   \
//!     ../Core/Inc  \
//! ```
//!
//! Values are written verbatim.  Nothing is quoted or escaped, so a path
//! containing spaces or `$` ends up in the file as is.

use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::scan::FileSet;

/// Extension of the generated project file.
pub const PRO_EXTENSION: &str = "pro";

const BASE_TEMPLATE: &str = "\
QT += core
QT -= gui

CONFIG += c++11

TARGET = qt
CONFIG += console
CONFIG -= app_bundle

TEMPLATE = app


DEFINES += QT_DEPRECATED_WARNINGS

";

const CONTINUATION: &str = "  \\\n";
const INDENT: &str = "\t";

/// A fully assembled Qt project.  Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QtProject {
    defines: Vec<String>,
    include_paths: Vec<String>,
    files: FileSet,
}

impl QtProject {
    pub fn new(defines: Vec<String>, include_paths: Vec<String>, files: FileSet) -> Self {
        Self { defines, include_paths, files }
    }

    /// Render the complete `.pro` text.
    pub fn render(&self) -> String {
        let mut out = String::from(BASE_TEMPLATE);
        out.push('\n');
        push_list(&mut out, "DEFINES", &self.defines, "");
        out.push('\n');
        push_list(&mut out, "INCLUDEPATH", &self.include_paths, INDENT);
        out.push('\n');
        push_list(&mut out, "HEADERS", &self.files.headers, INDENT);
        out.push_str("\n\n");
        push_list(&mut out, "SOURCES", &self.files.sources, INDENT);
        out
    }

    /// Write the rendered project to `dir/<target_name>.pro`, replacing any
    /// existing file.  Returns the path written.
    pub fn save(&self, dir: impl AsRef<Path>, target_name: &str) -> Result<PathBuf> {
        let path = dir.as_ref().join(format!("{target_name}.{PRO_EXTENSION}"));
        std::fs::write(&path, self.render()).map_err(|e| ConvertError::fs(&path, e))?;
        Ok(path)
    }
}

/// Append `NAME += ` followed by one continued line per value.
fn push_list(out: &mut String, name: &str, values: &[String], indent: &str) {
    out.push_str(name);
    out.push_str(" += ");
    out.push_str(CONTINUATION);
    for value in values {
        out.push_str(indent);
        out.push_str(value);
        out.push_str(CONTINUATION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QtProject {
        QtProject::new(
            vec!["FOO".into(), "BAR".into()],
            vec!["inc1".into(), "inc2".into()],
            FileSet {
                headers: vec!["inc1/a.h".into()],
                sources: vec!["inc2/b.cpp".into()],
            },
        )
    }

    #[test]
    fn render_starts_with_template() {
        let text = sample().render();
        assert!(text.starts_with("QT += core\nQT -= gui\n\nCONFIG += c++11\n"));
        assert!(text.contains("TEMPLATE = app\n\n\nDEFINES += QT_DEPRECATED_WARNINGS\n\n\n"));
    }

    #[test]
    fn render_full_layout() {
        let expected = format!(
            "{BASE_TEMPLATE}\n\
             DEFINES +=   \\\n\
             FOO  \\\n\
             BAR  \\\n\
             \n\
             INCLUDEPATH +=   \\\n\
             \tinc1  \\\n\
             \tinc2  \\\n\
             \n\
             HEADERS +=   \\\n\
             \tinc1/a.h  \\\n\
             \n\n\
             SOURCES +=   \\\n\
             \tinc2/b.cpp  \\\n"
        );
        assert_eq!(sample().render(), expected);
    }

    #[test]
    fn empty_lists_still_emit_headers() {
        let text = QtProject::new(vec![], vec![], FileSet::default()).render();
        assert!(text.contains("DEFINES +=   \\\n\nINCLUDEPATH +=   \\\n\nHEADERS +=   \\\n\n\nSOURCES +=   \\\n"));
    }

    #[test]
    fn values_are_not_escaped() {
        let project = QtProject::new(vec!["VERSION=\"1.0 beta\"".into()], vec![], FileSet::default());
        assert!(project.render().contains("VERSION=\"1.0 beta\"  \\\n"));
    }

    #[test]
    fn save_writes_target_pro() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = sample().save(tmp.path(), "Demo").unwrap();
        assert_eq!(path, tmp.path().join("Demo.pro"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), sample().render());
    }

    #[test]
    fn save_truncates_existing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("Demo.pro");
        std::fs::write(&path, "x".repeat(100_000)).unwrap();
        sample().save(tmp.path(), "Demo").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), sample().render());
    }

    #[test]
    fn save_into_missing_dir_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = sample().save(tmp.path().join("nope"), "Demo").unwrap_err();
        assert!(matches!(err, ConvertError::FilesystemAccess { .. }));
    }
}
