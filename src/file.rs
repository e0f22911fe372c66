use crate::error::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A file selected by the scan together with its read outcome.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path as produced by the walk (root joined with the entry)
    pub path: PathBuf,

    /// Path relative to the scanned root
    pub relative_path: String,

    /// File content or the reason it could not be read
    pub content: FileContent,
}

/// Outcome of reading a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// UTF-8 text with line endings translated to `\n`
    Text(String),

    /// The file could not be opened or decoded
    Unreadable {
        /// Underlying error message
        reason: String,
    },
}

impl SourceFile {
    /// Creates a readable source file.
    #[must_use]
    pub fn new_text(path: PathBuf, relative_path: String, content: String) -> Self {
        Self {
            path,
            relative_path,
            content: FileContent::Text(content),
        }
    }

    /// Creates a source file that failed to read.
    #[must_use]
    pub fn new_unreadable(path: PathBuf, relative_path: String, reason: String) -> Self {
        Self {
            path,
            relative_path,
            content: FileContent::Unreadable { reason },
        }
    }

    /// Reads `path` and records either its text or the failure reason.
    pub(crate) fn load(path: PathBuf, relative_path: String) -> Self {
        match read_text(&path) {
            Ok(content) => Self::new_text(path, relative_path, normalize_newlines(content)),
            Err(e) => {
                let reason = e.reason();
                Self::new_unreadable(path, relative_path, reason)
            }
        }
    }

    /// Returns true if the file was read successfully.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self.content, FileContent::Text(_))
    }

    /// Returns the text content if the file was readable.
    #[must_use]
    pub fn content_str(&self) -> Option<&str> {
        match &self.content {
            FileContent::Text(s) => Some(s),
            FileContent::Unreadable { .. } => None,
        }
    }
}

/// Reads a whole file as UTF-8.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and
/// [`Error::InvalidUtf8`] if its bytes are not valid UTF-8.
pub(crate) fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    String::from_utf8(bytes).map_err(|e| Error::invalid_utf8(path, &e))
}

/// Translates `\r\n` and lone `\r` into `\n`.
pub(crate) fn normalize_newlines(content: String) -> String {
    if !content.contains('\r') {
        return content;
    }
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Writes a file atomically.
///
/// Content goes to a `.tmp` sibling first, is synced, and is then renamed
/// over the target so readers never observe a half-written file.
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let mut temp_name = path
        .file_name()
        .ok_or_else(|| Error::config(format!("Invalid file path: {}", path.display())))?
        .to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let result = write_temp(&temp_path, content)
        .and_then(|()| fs::rename(&temp_path, path).map_err(|e| Error::io(path, e)));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn write_temp(temp_path: &Path, content: &[u8]) -> Result<()> {
    let mut temp_file = fs::File::create(temp_path).map_err(|e| Error::io(temp_path, e))?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file
        .sync_all()
        .map_err(|e| Error::io(temp_path, e))
}

/// Creates the parent directory of `path` if it has one.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))
        }
        _ => Ok(()),
    }
}

/// Resolves `path` to an absolute form that exists even if the file itself doesn't yet.
pub(crate) fn resolve_target(path: &Path) -> Option<PathBuf> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let name = path.file_name()?;
    fs::canonicalize(parent).ok().map(|p| p.join(name))
}
