//! Upload storage service - capability layer
//!
//! Only writes uploaded files into the upload folder. Files are keyed by the
//! client-supplied name, so uploads from separate requests with the same name
//! overwrite each other. Within one request, [`UploadStore::save_distinct`]
//! keeps the second file from landing on the first.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::UploadError;

/// Writes uploads into a single directory
#[derive(Debug, Clone)]
pub struct UploadStore {
    folder: PathBuf,
}

impl UploadStore {
    /// # Arguments
    /// - `folder`: directory uploads are written into
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Create the upload folder if it does not exist yet
    pub async fn ensure_folder(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.folder)
            .await
            .map_err(|e| UploadError::WriteFailed {
                path: self.folder.display().to_string(),
                source: e,
            })
    }

    /// Store `bytes` under the final component of `file_name`
    ///
    /// # Arguments
    /// - `field`: form field the file came from, used in errors and logs
    /// - `file_name`: client-supplied name; directories are stripped
    /// - `bytes`: file content
    ///
    /// # Returns
    /// The path the file was written to
    pub async fn save(
        &self,
        field: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, UploadError> {
        let name = checked_name(field, file_name)?;
        self.write(field, self.folder.join(name), bytes).await
    }

    /// Like [`save`](Self::save), but never writes over `taken`
    ///
    /// When the sanitized name resolves to `taken`, the file is stored as
    /// `<field>_<name>` instead.
    ///
    /// # Returns
    /// The path the file was written to
    pub async fn save_distinct(
        &self,
        field: &str,
        file_name: &str,
        bytes: &[u8],
        taken: &Path,
    ) -> Result<PathBuf, UploadError> {
        let name = checked_name(field, file_name)?;
        let mut path = self.folder.join(name);
        if path == taken {
            path = self.folder.join(format!("{}_{}", field, name));
        }
        self.write(field, path, bytes).await
    }

    async fn write(&self, field: &str, path: PathBuf, bytes: &[u8]) -> Result<PathBuf, UploadError> {
        debug!("Saving upload '{}' ({} bytes) to {}", field, bytes.len(), path.display());

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| UploadError::WriteFailed {
                path: path.display().to_string(),
                source: e,
            })?;

        Ok(path)
    }
}

fn checked_name<'a>(field: &str, file_name: &'a str) -> Result<&'a str, UploadError> {
    sanitize_file_name(file_name).ok_or_else(|| UploadError::InvalidFileName {
        field: field.to_string(),
    })
}

/// Keep only the last path component; reject names that resolve to nothing
fn sanitize_file_name(file_name: &str) -> Option<&str> {
    let name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    match name {
        "" | "." | ".." => None,
        _ => Some(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_directories_from_client_names() {
        assert_eq!(sanitize_file_name("consolidado.xlsx"), Some("consolidado.xlsx"));
        assert_eq!(sanitize_file_name("../../etc/passwd"), Some("passwd"));
        assert_eq!(sanitize_file_name(r"C:\Users\ana\especifico.xlsx"), Some("especifico.xlsx"));
        assert_eq!(sanitize_file_name(".."), None);
        assert_eq!(sanitize_file_name("pasta/"), None);
        assert_eq!(sanitize_file_name(""), None);
    }

    #[tokio::test]
    async fn saves_into_folder_and_overwrites_same_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("uploads"));
        store.ensure_folder().await.unwrap();

        let first = store.save("arquivo1", "dados.xlsx", b"um").await.unwrap();
        let second = store.save("arquivo2", "dados.xlsx", b"dois").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, dir.path().join("uploads").join("dados.xlsx"));
        assert_eq!(std::fs::read(&first).unwrap(), b"dois");
    }

    #[tokio::test]
    async fn distinct_save_keeps_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let first = store.save("arquivo1", "dados.xlsx", b"um").await.unwrap();
        let second = store
            .save_distinct("arquivo2", "outra/pasta/dados.xlsx", b"dois", &first)
            .await
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(second, dir.path().join("arquivo2_dados.xlsx"));
        assert_eq!(std::fs::read(&first).unwrap(), b"um");
        assert_eq!(std::fs::read(&second).unwrap(), b"dois");

        let other = store
            .save_distinct("arquivo2", "outro.xlsx", b"tres", &first)
            .await
            .unwrap();
        assert_eq!(other, dir.path().join("outro.xlsx"));
    }

    #[tokio::test]
    async fn rejects_empty_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let err = store.save("arquivo1", "", b"x").await.unwrap_err();
        assert!(matches!(err, UploadError::InvalidFileName { ref field } if field == "arquivo1"));
    }
}
