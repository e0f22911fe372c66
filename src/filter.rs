//! File selection for the collector.
//!
//! A file is selected when its name ends with one of the configured suffixes
//! and neither it nor any of its ancestor directories matches an exclude glob.

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

#[derive(Debug, Clone)]
pub(crate) struct FileFilter {
    extensions: Vec<String>,
    excludes: GlobSet,
}

impl FileFilter {
    /// Builds a filter from suffixes and exclude globs.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a glob does not compile.
    pub(crate) fn new(extensions: &[String], exclude_patterns: &[String]) -> Result<Self> {
        Ok(Self {
            extensions: extensions.to_vec(),
            excludes: Self::build_globset(exclude_patterns)?,
        })
    }

    fn build_globset(patterns: &[String]) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                Error::config(format!("Invalid glob pattern '{pattern}': {e}"))
            })?;
            builder.add(glob);
        }

        builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build glob set: {e}")))
    }

    /// Returns true if the file name ends with a configured suffix.
    pub(crate) fn matches_extension(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy();
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    /// Returns true if the root-relative path or one of its ancestors is excluded.
    pub(crate) fn is_excluded(&self, relative_path: &Path) -> bool {
        if self.excludes.is_empty() {
            return false;
        }

        relative_path
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty())
            .any(|p| self.excludes.is_match(p))
    }

    pub(crate) fn should_process(&self, relative_path: &Path) -> bool {
        self.matches_extension(relative_path) && !self.is_excluded(relative_path)
    }
}
