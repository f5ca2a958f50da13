use std::path::{Path, PathBuf};

/// One uploaded audio file, written under a collision-proof name and
/// removed when the guard drops. The guard is what makes "the temp
/// file is always removed exactly once" hold on every exit path,
/// including panics unwinding through the handler.
pub(crate) struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    pub(crate) async fn save(
        dir: &Path,
        filename: &str,
        bytes: &[u8],
    ) -> std::io::Result<Self> {
        let name = format!(
            "{}_{}",
            uuid::Uuid::new_v4().simple(),
            sanitize_filename(filename)
        );
        let path = dir.join(name);
        tokio::fs::write(&path, bytes).await?;
        Ok(Self { path })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            // Best-effort: a stuck temp file must not fail the request.
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "upload_cleanup_failed"
            );
        }
    }
}

// Client filenames can carry path components; only the final one is
// trusted.
fn sanitize_filename(filename: &str) -> String {
    Path::new(filename)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".to_string())
}
