use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::qtpro::QtProject;
use crate::scan;
use crate::uvprojx::{self, TargetNamePolicy, Uvprojx};

/// Message shown when no `.uvprojx` exists in the project root.
pub const NOT_FOUND_MESSAGE: &str = "Keil project file not found";

/// Everything a conversion run needs to know.  Nothing is read from the
/// process working directory.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Directory searched for a `.uvprojx` when `project` is not set.
    pub root: PathBuf,
    /// Explicit project file; skips the search in `root`.
    pub project: Option<PathBuf>,
    /// Where `<TargetName>.pro` is written.  Defaults to the directory of
    /// the project file.
    pub output_dir: Option<PathBuf>,
    pub target_policy: TargetNamePolicy,
    /// Render only, do not write the `.pro` file.
    pub dry_run: bool,
}

impl ConvertOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            project: None,
            output_dir: None,
            target_policy: TargetNamePolicy::default(),
            dry_run: false,
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub target_name: String,
    /// Path of the written `.pro` file; `None` on a dry run.
    pub output: Option<PathBuf>,
    /// The rendered project text.
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Locate, parse, scan, render and (unless dry-running) save.
    ///
    /// Returns `Ok(None)` when there is no `.uvprojx` in the root; this is
    /// not an error.
    pub fn run(&self) -> Result<Option<Conversion>> {
        self.run_with(|_| {})
    }

    /// Like [`run`](Self::run), but hands the rendered text to `on_render`
    /// before the target name is resolved and the file is written, so the
    /// content is available even when saving fails.
    pub fn run_with<F>(&self, mut on_render: F) -> Result<Option<Conversion>>
    where
        F: FnMut(&str),
    {
        let Some(project_file) = self.locate()? else {
            tracing::debug!(root = %self.options.root.display(), "no .uvprojx in project root");
            return Ok(None);
        };
        tracing::info!(project = %project_file.display(), "converting Keil project");

        let uvprojx = Uvprojx::from_file(&project_file)?;
        let project_dir = uvprojx
            .directory()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.options.root.clone());

        let include_paths = uvprojx.include_paths()?;
        let defines = uvprojx.defines()?;
        tracing::debug!(
            include_paths = include_paths.len(),
            defines = defines.len(),
            "parsed project"
        );

        let files = scan::list_headers_and_sources(&project_dir, &include_paths)?;
        let qt = QtProject::new(defines, include_paths, files);
        let content = qt.render();
        on_render(&content);

        let target_name = uvprojx.target_name(self.options.target_policy)?;
        let output = if self.options.dry_run {
            None
        } else {
            let dir = self.options.output_dir.as_deref().unwrap_or(&project_dir);
            let path = qt.save(dir, &target_name)?;
            tracing::info!(output = %path.display(), "wrote Qt project");
            Some(path)
        };

        Ok(Some(Conversion { target_name, output, content }))
    }

    fn locate(&self) -> Result<Option<PathBuf>> {
        match &self.options.project {
            Some(path) => Ok(Some(path.clone())),
            None => uvprojx::find_project_file(&self.options.root),
        }
    }
}
