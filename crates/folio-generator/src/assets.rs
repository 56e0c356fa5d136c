//! Profile image resolution.
//!
//! Copies the local profile picture into the output directory, optionally
//! fingerprinted for cache busting, and hands back the URL pages use.

use std::{
    fmt, fs,
    io::Read,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

/// Asset processing errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The source file does not exist.
    #[error("asset not found: {0}")]
    NotFound(PathBuf),

    /// Invalid asset path.
    #[error("invalid asset path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// URL of an image as the deployed site serves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage(String);

impl ResolvedImage {
    /// Wrap an already-resolved URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResolvedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Directory under the output root that receives copied assets.
pub const ASSETS_DIR: &str = "assets";

/// The author's profile picture on disk.
#[derive(Debug, Clone)]
pub struct ProfileImage {
    source: PathBuf,
    fingerprint: bool,
}

impl ProfileImage {
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, fingerprint: bool) -> Self {
        Self {
            source: source.into(),
            fingerprint,
        }
    }

    /// Copy the image into `output_dir/assets/` and return its URL.
    pub fn resolve(&self, output_dir: &Path) -> Result<ResolvedImage> {
        if !self.source.is_file() {
            return Err(AssetError::NotFound(self.source.clone()));
        }

        let file_name = self
            .source
            .file_name()
            .ok_or_else(|| AssetError::InvalidPath(self.source.clone()))?
            .to_string_lossy()
            .to_string();

        let dest_name = if self.fingerprint {
            let hash = compute_hash(&self.source)?;
            let stem = self.source.file_stem().unwrap_or_default().to_string_lossy();
            match self.source.extension() {
                Some(ext) => format!("{stem}.{hash}.{}", ext.to_string_lossy()),
                None => format!("{stem}.{hash}"),
            }
        } else {
            file_name
        };

        let dest_dir = output_dir.join(ASSETS_DIR);
        fs::create_dir_all(&dest_dir)?;
        let dest_path = dest_dir.join(&dest_name);
        fs::copy(&self.source, &dest_path)?;

        debug!(
            src = %self.source.display(),
            dest = %dest_path.display(),
            "copied profile image"
        );

        Ok(ResolvedImage::new(format!("/{ASSETS_DIR}/{dest_name}")))
    }
}

/// Short FNV-1a hash of file contents.
fn compute_hash(path: &Path) -> Result<String> {
    let mut file = fs::File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;

    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in &buffer {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x100000001b3);
    }

    Ok(format!("{hash:016x}")[..8].to_string())
}
