//! Site output.
//!
//! Writes the rendered homepage and the static assets it references into the
//! output directory:
//!
//! ```text
//! dist/
//! ├── index.html          # Rendered homepage, stylesheet inlined
//! └── assets/             # Copied from <content>/assets/, structure kept
//!     └── images/
//!         └── hero.svg
//! ```
//!
//! Content documents reference assets by site-absolute path
//! (`/assets/images/hero.svg`), so the `assets/` prefix is kept on copy.
//! Without a remote host those paths resolve against this directory; with
//! one they are prefixed and the copies go unused.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Asset directory name, under both the content and the output directory.
pub const ASSETS_DIR: &str = "assets";

pub const INDEX_FILE: &str = "index.html";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("error walking assets: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Files produced by [`generate`], relative to the output directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    pub pages: Vec<PathBuf>,
    pub assets: Vec<PathBuf>,
}

pub fn generate(
    page_html: &str,
    content_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output_dir)?;

    fs::write(output_dir.join(INDEX_FILE), page_html)?;
    tracing::info!(path = %output_dir.join(INDEX_FILE).display(), "wrote homepage");

    let assets = copy_assets(&content_dir.join(ASSETS_DIR), &output_dir.join(ASSETS_DIR))?;

    Ok(GenerateReport {
        output_dir: output_dir.to_path_buf(),
        pages: vec![PathBuf::from(INDEX_FILE)],
        assets,
    })
}

/// Copy every file under `src` into `dst`. A missing `src` copies nothing.
///
/// Returns the copied paths relative to the output root, in file-name order.
fn copy_assets(src: &Path, dst: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    if !src.is_dir() {
        tracing::debug!(path = %src.display(), "no assets directory");
        return Ok(Vec::new());
    }

    let mut copied = Vec::new();
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)?;
            copied.push(Path::new(ASSETS_DIR).join(relative));
        }
    }
    tracing::debug!(count = copied.len(), "copied assets");
    Ok(copied)
}
