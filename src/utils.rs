//! Small async filesystem helpers used by configuration handling.

use crate::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Creates `dir` and any missing parents.
pub(crate) async fn make_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Unable to create directory '{}'", dir.display()))
}

/// Resolves `path` to an absolute path with symlinks followed.
pub(crate) async fn canonicalize(path: &Path) -> Result<PathBuf> {
    tokio::fs::canonicalize(path)
        .await
        .with_context(|| format!("Unable to canonicalize '{}'", path.display()))
}
