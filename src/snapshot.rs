//! Drafts persisted between runs.
//!
//! `--save` writes the live draft next to the repository's git metadata and
//! `--restore` offers it back to the next session. The file is plain JSON so
//! other tools can produce one for `--load`.
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
   error::{ComposerError, Result},
   types::{Author, DraftSnapshot, Emoji},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SavedSnapshot {
   pub emoji:    Emoji,
   pub summary:  String,
   pub body:     String,
   /// Trailer lines the draft was saved with
   pub footer:   String,
   pub author:   Option<Author>,
   pub amend:    bool,
   /// RFC 3339 timestamp of the save
   pub saved_at: Option<String>,
}

impl SavedSnapshot {
   pub fn from_draft(draft: &DraftSnapshot, footer: &str, author: Option<Author>) -> Self {
      Self {
         emoji: draft.emoji.clone(),
         summary: draft.summary.clone(),
         body: draft.body.clone(),
         footer: footer.to_string(),
         author,
         amend: draft.amend,
         saved_at: Some(Utc::now().to_rfc3339()),
      }
   }

   pub fn to_draft(&self) -> DraftSnapshot {
      DraftSnapshot {
         amend:   self.amend,
         emoji:   self.emoji.clone(),
         summary: self.summary.clone(),
         body:    self.body.clone(),
      }
   }

   /// Load a snapshot; `Ok(None)` when the file does not exist.
   pub fn load(path: &Path) -> Result<Option<Self>> {
      if !path.exists() {
         return Ok(None);
      }
      let content = std::fs::read_to_string(path)?;
      let snapshot = serde_json::from_str(&content).map_err(|e| ComposerError::SnapshotError {
         path:   path.to_path_buf(),
         reason: e.to_string(),
      })?;
      Ok(Some(snapshot))
   }

   pub fn save(&self, path: &Path) -> Result<()> {
      if let Some(parent) = path.parent() {
         std::fs::create_dir_all(parent)?;
      }
      std::fs::write(path, serde_json::to_string_pretty(self)?)?;
      log::debug!("saved snapshot to {}", path.display());
      Ok(())
   }

   /// Remove a saved snapshot, ignoring a missing file.
   pub fn clear(path: &Path) -> Result<()> {
      match std::fs::remove_file(path) {
         Ok(()) => Ok(()),
         Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
         Err(e) => Err(e.into()),
      }
   }
}

/// Location of the saved snapshot for a repository.
pub fn snapshot_path(git_dir: &Path, file_name: &str) -> PathBuf {
   git_dir.join(file_name)
}

#[cfg(test)]
mod tests {
   use super::*;

   fn sample() -> DraftSnapshot {
      DraftSnapshot {
         amend:   true,
         emoji:   Emoji {
            character:   "✨".to_string(),
            shortcode:   ":sparkles:".to_string(),
            name:        "sparkles".to_string(),
            description: "Introduce new features.".to_string(),
         },
         summary: "added picker".to_string(),
         body:    "Ranks entries live.".to_string(),
      }
   }

   #[test]
   fn test_save_and_load() {
      let dir = tempfile::tempdir().unwrap();
      let path = snapshot_path(dir.path(), "EMC_SNAPSHOT.json");
      let saved =
         SavedSnapshot::from_draft(&sample(), "Signed-off-by: A <a@x.test>", Some(Author::parse("A <a@x.test>")));
      saved.save(&path).unwrap();

      let loaded = SavedSnapshot::load(&path).unwrap().unwrap();
      assert_eq!(loaded, saved);
      assert_eq!(loaded.to_draft(), sample());
      assert!(loaded.saved_at.is_some());
   }

   #[test]
   fn test_load_missing() {
      let dir = tempfile::tempdir().unwrap();
      assert!(SavedSnapshot::load(&dir.path().join("nope.json")).unwrap().is_none());
   }

   #[test]
   fn test_load_partial_fields() {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().join("partial.json");
      std::fs::write(&path, r#"{"summary": "only summary"}"#).unwrap();
      let loaded = SavedSnapshot::load(&path).unwrap().unwrap();
      assert_eq!(loaded.summary, "only summary");
      assert!(!loaded.amend);
      assert_eq!(loaded.emoji, Emoji::default());
   }

   #[test]
   fn test_load_malformed() {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().join("bad.json");
      std::fs::write(&path, "{not json").unwrap();
      assert!(matches!(SavedSnapshot::load(&path), Err(ComposerError::SnapshotError { .. })));
   }

   #[test]
   fn test_clear() {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().join("snap.json");
      SavedSnapshot::from_draft(&sample(), "", None).save(&path).unwrap();
      SavedSnapshot::clear(&path).unwrap();
      assert!(!path.exists());
      SavedSnapshot::clear(&path).unwrap();
   }
}
