use crate::{
    config::CollectConfig,
    error::Result,
    file::{resolve_target, FileContent, SourceFile},
    filter::FileFilter,
};
use ignore::{DirEntry, WalkBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Statistics collected during scanning.
#[derive(Debug, Default, Clone)]
pub(crate) struct ScanStats {
    /// Regular files visited
    pub total_files: usize,

    /// Files matching the suffix filter
    pub matched_files: usize,

    /// Matched files whose content could not be read
    pub unreadable_files: usize,

    /// Files rejected by suffix or exclude patterns
    pub skipped_files: usize,

    /// Walk errors (unreadable directories, broken links)
    pub walk_errors: usize,
}

/// Walks the root directory and reads every eligible file.
pub(crate) struct Scanner {
    root_dir: PathBuf,
    respect_ignore_files: bool,
    follow_links: bool,
    file_filter: FileFilter,
    skip_path: Option<PathBuf>,
}

impl Scanner {
    /// Creates a new scanner from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is invalid.
    pub(crate) fn new(config: &CollectConfig) -> Result<Self> {
        Ok(Self {
            root_dir: config.root_dir.clone(),
            respect_ignore_files: config.respect_ignore_files,
            follow_links: config.follow_links,
            file_filter: FileFilter::new(&config.extensions, &config.exclude_patterns)?,
            skip_path: resolve_target(&config.output_path),
        })
    }

    /// Scans the root directory and returns eligible files in walk order.
    ///
    /// Entries are visited depth-first with siblings sorted by file name, so
    /// the order is stable across runs. Files that cannot be read are kept as
    /// [`FileContent::Unreadable`].
    pub(crate) fn scan(&self) -> (Vec<SourceFile>, ScanStats) {
        let mut files = Vec::new();
        let mut stats = ScanStats::default();

        debug!("Starting scan of {}", self.root_dir.display());

        let respect = self.respect_ignore_files;
        let walker = WalkBuilder::new(&self.root_dir)
            .standard_filters(false)
            .hidden(false)
            .git_ignore(respect)
            .git_global(respect)
            .git_exclude(respect)
            .ignore(respect)
            .parents(respect)
            .require_git(false)
            .follow_links(self.follow_links)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for result in walker {
            match result {
                Ok(entry) if is_file_entry(&entry) => {
                    stats.total_files += 1;
                    if let Some(file) = self.process_entry(&entry, &mut stats) {
                        files.push(file);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Walk error: {}", e);
                    stats.walk_errors += 1;
                }
            }
        }

        debug!(
            "Scan complete: {} total, {} matched, {} unreadable, {} skipped, {} walk errors",
            stats.total_files,
            stats.matched_files,
            stats.unreadable_files,
            stats.skipped_files,
            stats.walk_errors
        );

        (files, stats)
    }

    /// Processes a single directory entry.
    fn process_entry(&self, entry: &DirEntry, stats: &mut ScanStats) -> Option<SourceFile> {
        let path = entry.path();
        let relative = pathdiff::diff_paths(path, &self.root_dir)
            .unwrap_or_else(|| path.to_path_buf());

        if !self.file_filter.should_process(&relative) {
            trace!("Skipping {}", relative.display());
            stats.skipped_files += 1;
            return None;
        }

        if self.is_output_file(path) {
            debug!("Skipping aggregate output file: {}", path.display());
            stats.skipped_files += 1;
            return None;
        }

        trace!("Reading file: {}", path.display());
        stats.matched_files += 1;

        let file = SourceFile::load(path.to_path_buf(), relative.to_string_lossy().to_string());
        if let FileContent::Unreadable { reason } = &file.content {
            warn!("Failed to read {}: {}", path.display(), reason);
            stats.unreadable_files += 1;
        }

        Some(file)
    }

    fn is_output_file(&self, path: &Path) -> bool {
        self.skip_path
            .as_deref()
            .is_some_and(|skip| std::fs::canonicalize(path).is_ok_and(|p| p == skip))
    }
}

/// Regular files, plus any symlink that does not resolve to a directory.
///
/// Dangling links count as files so they surface as unreadable entries.
fn is_file_entry(entry: &DirEntry) -> bool {
    entry
        .file_type()
        .is_some_and(|ft| ft.is_file() || (ft.is_symlink() && !entry.path().is_dir()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn create_test_config(root: &Path) -> CollectConfig {
        CollectConfig::builder()
            .root_dir(root)
            .output_path(root.join("bundle.txt"))
            .build()
            .unwrap()
    }

    fn names(files: &[SourceFile]) -> Vec<&str> {
        files.iter().map(|f| f.relative_path.as_str()).collect()
    }

    #[test]
    fn test_scanner_finds_matching_files() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("A.java").write_str("class A {}").unwrap();
        temp.child("b.txt").write_str("ignored").unwrap();

        let config = create_test_config(temp.path());
        let (files, stats) = Scanner::new(&config).unwrap().scan();

        assert_eq!(names(&files), vec!["A.java"]);
        assert_eq!(files[0].content_str(), Some("class A {}"));
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.skipped_files, 1);
    }

    #[test]
    fn test_scanner_nested_directories_sorted() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("z/Z.java").write_str("class Z {}").unwrap();
        temp.child("a/b/B.java").write_str("class B {}").unwrap();
        temp.child("a/A.java").write_str("class A {}").unwrap();
        temp.child("M.java").write_str("class M {}").unwrap();

        let config = create_test_config(temp.path());
        let (files, _) = Scanner::new(&config).unwrap().scan();

        let expected: Vec<String> = ["M.java", "a/A.java", "a/b/B.java", "z/Z.java"]
            .iter()
            .map(|p| Path::new(p).components().collect::<PathBuf>().to_string_lossy().to_string())
            .collect();
        assert_eq!(names(&files), expected);

        let (again, _) = Scanner::new(&config).unwrap().scan();
        assert_eq!(names(&files), names(&again));
    }

    #[test]
    fn test_scanner_records_unreadable_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("A.java").write_str("class A {}").unwrap();
        temp.child("Bad.java").write_binary(&[0xff, 0xfe, 0x00]).unwrap();

        let config = create_test_config(temp.path());
        let (files, stats) = Scanner::new(&config).unwrap().scan();

        assert_eq!(files.len(), 2);
        assert_eq!(stats.unreadable_files, 1);
        let bad = files.iter().find(|f| f.relative_path == "Bad.java").unwrap();
        assert!(matches!(bad.content, FileContent::Unreadable { .. }));
    }

    #[test]
    fn test_scanner_includes_hidden_files() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child(".hidden/H.java").write_str("class H {}").unwrap();

        let config = create_test_config(temp.path());
        let (files, _) = Scanner::new(&config).unwrap().scan();

        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_scanner_ignores_gitignore_by_default() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child(".gitignore").write_str("Ignored.java\n").unwrap();
        temp.child("Included.java").write_str("class I {}").unwrap();
        temp.child("Ignored.java").write_str("class X {}").unwrap();

        let config = create_test_config(temp.path());
        let (files, _) = Scanner::new(&config).unwrap().scan();

        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_scanner_respects_gitignore_when_enabled() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child(".gitignore").write_str("Ignored.java\n").unwrap();
        temp.child("Included.java").write_str("class I {}").unwrap();
        temp.child("Ignored.java").write_str("class X {}").unwrap();

        let config = CollectConfig::builder()
            .root_dir(temp.path())
            .output_path(temp.path().join("bundle.txt"))
            .respect_ignore_files(true)
            .build()
            .unwrap();
        let (files, _) = Scanner::new(&config).unwrap().scan();

        assert_eq!(names(&files), vec!["Included.java"]);
    }

    #[test]
    fn test_scanner_exclude_patterns() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src/Main.java").write_str("class Main {}").unwrap();
        temp.child("build/Gen.java").write_str("class Gen {}").unwrap();

        let config = CollectConfig::builder()
            .root_dir(temp.path())
            .output_path(temp.path().join("bundle.txt"))
            .exclude_patterns(vec!["build".to_string()])
            .build()
            .unwrap();
        let (files, _) = Scanner::new(&config).unwrap().scan();

        assert_eq!(files.len(), 1);
        assert!(files[0].relative_path.ends_with("Main.java"));
    }

    #[test]
    fn test_scanner_skips_own_output() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("A.txt").write_str("a").unwrap();
        temp.child("bundle.txt").write_str("previous aggregate").unwrap();

        let config = CollectConfig::builder()
            .root_dir(temp.path())
            .extensions([".txt"])
            .output_path(temp.path().join("bundle.txt"))
            .build()
            .unwrap();
        let (files, _) = Scanner::new(&config).unwrap().scan();

        assert_eq!(names(&files), vec!["A.txt"]);
    }

    #[test]
    fn test_scanner_empty_directory() {
        let temp = assert_fs::TempDir::new().unwrap();

        let config = create_test_config(temp.path());
        let (files, stats) = Scanner::new(&config).unwrap().scan();

        assert!(files.is_empty());
        assert_eq!(stats.total_files, 0);
    }
}
