use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::paths;

/// File extension of Keil µVision 5 project files.
pub const UVPROJX_EXTENSION: &str = ".uvprojx";

// ═══════════════════════════════════════════════════════════════════════════════
//  Locator
// ═══════════════════════════════════════════════════════════════════════════════

/// Return the first file in `dir` (non-recursive) whose name ends with
/// `.uvprojx`, or `None` when there is none.
///
/// Entries are examined in file-name order so repeated runs in the same
/// directory pick the same project.
pub fn find_project_file(dir: impl AsRef<Path>) -> Result<Option<PathBuf>> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|e| ConvertError::fs(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConvertError::fs(dir, e))?;
        names.push(entry.file_name());
    }
    names.sort();

    Ok(names
        .into_iter()
        .find(|name| name.to_string_lossy().ends_with(UVPROJX_EXTENSION))
        .map(|name| dir.join(name)))
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Uvprojx – top-level handle
// ═══════════════════════════════════════════════════════════════════════════════

/// How to pick the project name when a `.uvprojx` declares several targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetNamePolicy {
    /// Every `<TargetName>` is visited and the last one wins.
    #[default]
    LastMatch,
    /// Exactly one `<TargetName>` must exist; more is an error.
    Unique,
}

/// Handle for a `.uvprojx` file.
///
/// Only the raw XML source is kept; every query builds a `roxmltree`
/// document, walks it, and returns owned values, so no borrowed tree escapes
/// a single call.
#[derive(Debug, Clone)]
pub struct Uvprojx {
    source: String,
    /// Directory containing the `.uvprojx` file.  Include paths inside the
    /// project are relative to it.  `None` when created via
    /// [`Uvprojx::parse`] without a file path.
    directory: Option<PathBuf>,
}

impl Uvprojx {
    /// Parse a `.uvprojx` file from its XML source string.
    ///
    /// The source is checked for well-formedness up front so that a
    /// malformed file fails here rather than on the first query.
    pub fn parse(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        roxmltree::Document::parse(&source)?;
        Ok(Self { source, directory: None })
    }

    /// Load a `.uvprojx` file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConvertError::ProjectFileNotFound { path: path.to_path_buf() });
        }
        let source = std::fs::read_to_string(path).map_err(|e| ConvertError::fs(path, e))?;
        let mut uvprojx = Self::parse(source)?;
        let canonical = path.canonicalize().map_err(|e| ConvertError::fs(path, e))?;
        uvprojx.directory = canonical.parent().map(Path::to_path_buf);
        Ok(uvprojx)
    }

    /// The raw XML source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parent directory of the `.uvprojx` file (set by
    /// [`from_file`](Self::from_file)).
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn target_name(&self, policy: TargetNamePolicy) -> Result<String> {
        let doc = roxmltree::Document::parse(&self.source)?;
        target_name(doc.root_element(), policy)
    }

    pub fn raw_include_paths(&self) -> Result<Vec<String>> {
        let doc = roxmltree::Document::parse(&self.source)?;
        Ok(raw_include_paths(doc.root_element()))
    }

    pub fn raw_defines(&self) -> Result<Vec<String>> {
        let doc = roxmltree::Document::parse(&self.source)?;
        Ok(raw_defines(doc.root_element()))
    }

    /// Include directories, flattened, `/`-separated and deduplicated.
    pub fn include_paths(&self) -> Result<Vec<String>> {
        Ok(paths::flatten_and_dedupe(&self.raw_include_paths()?, paths::INCLUDE_DELIMITER))
    }

    /// Defines, flattened, duplicates kept.
    pub fn defines(&self) -> Result<Vec<String>> {
        Ok(paths::flatten_defines(&self.raw_defines()?, paths::DEFINE_DELIMITER))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Queries – roxmltree → owned values
// ═══════════════════════════════════════════════════════════════════════════════

/// Resolve the target name according to `policy`.
///
/// A missing element, an element without text, or whitespace-only text are
/// all [`ConvertError::EmptyTargetName`].
pub fn target_name(root: roxmltree::Node, policy: TargetNamePolicy) -> Result<String> {
    let matches: Vec<roxmltree::Node> = elements_named(root, "TargetName").collect();

    if policy == TargetNamePolicy::Unique && matches.len() > 1 {
        return Err(ConvertError::AmbiguousTargetName { count: matches.len() });
    }

    let name = matches.last().and_then(|n| n.text()).unwrap_or("");
    if name.trim().is_empty() {
        return Err(ConvertError::EmptyTargetName);
    }

    Ok(name.to_string())
}

/// Collect the raw include path values.
///
/// First every `<IncludePath>` below a `<VariousControls>` (verbatim, still
/// `;`-joined), then the directory of every `<FilePath>` below a `<File>`.
/// Startup files are skipped: their directory usually only holds assembly.
pub fn raw_include_paths(root: roxmltree::Node) -> Vec<String> {
    let mut includes: Vec<String> = texts_within(root, "VariousControls", "IncludePath")
        .map(String::from)
        .collect();

    for file_path in texts_within(root, "File", "FilePath") {
        if file_path.starts_with("startup") {
            continue;
        }
        let normalized = paths::normalize_separators(file_path);
        let dir = paths::containing_dir(&normalized);
        if !includes.iter().any(|i| i == dir) {
            includes.push(dir.to_string());
        }
    }

    includes
}

/// Collect the raw `<Define>` values below every `<VariousControls>`.
pub fn raw_defines(root: roxmltree::Node) -> Vec<String> {
    texts_within(root, "VariousControls", "Define")
        .map(String::from)
        .collect()
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Every element (including `node` itself) whose local tag name is `tag`,
/// in document order.
fn elements_named<'a, 'input: 'a>(
    node: roxmltree::Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = roxmltree::Node<'a, 'input>> + 'a {
    node.descendants()
        .filter(move |n| n.is_element() && n.tag_name().name() == tag)
}

/// Text of every `tag` element nested in a `section` element.  Elements
/// without text are skipped.  Nested sections are visited once per
/// enclosing section.
fn texts_within<'a, 'input: 'a>(
    root: roxmltree::Node<'a, 'input>,
    section: &'a str,
    tag: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    elements_named(root, section)
        .flat_map(move |s| elements_named(s, tag))
        .filter_map(|n| n.text())
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════════
