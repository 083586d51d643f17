use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComposerError {
   #[error("Git command failed: {0}")]
   GitError(String),

   #[error("Not inside a git repository")]
   NoRepository,

   #[error("A prepare-commit-msg hook already exists at {} (use --force to replace it)", path.display())]
   HookExists { path: PathBuf },

   #[error("Hook at {} was not installed by emc, refusing to remove it", path.display())]
   HookNotOurs { path: PathBuf },

   #[error("Invalid emoji catalog: {0}")]
   CatalogError(String),

   #[error("Failed to read snapshot {}: {reason}", path.display())]
   SnapshotError { path: PathBuf, reason: String },

   #[error("Invalid config: {0}")]
   ConfigError(String),

   #[error("IO error: {0}")]
   IoError(#[from] std::io::Error),

   #[error("JSON error: {0}")]
   JsonError(#[from] serde_json::Error),

   #[error("Clipboard error: {0}")]
   ClipboardError(#[from] arboard::Error),

   #[error("{0}")]
   Other(String),
}

pub type Result<T> = std::result::Result<T, ComposerError>;
