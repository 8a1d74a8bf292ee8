//! Comparison context
//!
//! Wraps "which two files am I comparing"

use std::fmt::Display;
use std::path::PathBuf;

/// One uploaded workbook, as stored on disk
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Name the client sent
    pub file_name: String,
    /// Where the store wrote it
    pub path: PathBuf,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            path: path.into(),
        }
    }
}

/// Context for one comparison request
#[derive(Debug, Clone)]
pub struct ComparisonCtx {
    /// The general (consolidated) table
    pub consolidated: UploadedFile,
    /// The per-channel (specific) table
    pub specific: UploadedFile,
}

impl ComparisonCtx {
    pub fn new(consolidated: UploadedFile, specific: UploadedFile) -> Self {
        Self {
            consolidated,
            specific,
        }
    }
}

impl Display for ComparisonCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} x {}]",
            self.consolidated.file_name, self.specific.file_name
        )
    }
}
