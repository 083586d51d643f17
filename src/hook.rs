//! prepare-commit-msg hook installation.
use std::path::{Path, PathBuf};

use crate::error::{ComposerError, Result};

const HOOK_NAME: &str = "prepare-commit-msg";

/// Marker line identifying hooks written by `install_hook`
const HOOK_MARKER: &str = "# installed by emc (emoji-commit)";

fn hook_script() -> String {
   format!(
      "#!/bin/sh\n{HOOK_MARKER}\n# Leave merges, squashes and -m/-F messages alone.\ncase \"$2\" in\n  merge|squash|message|template) exit 0 ;;\nesac\nexec emc --message-file \"$1\" ${{2:+--hook-source \"$2\"}}\n"
   )
}

pub fn hook_path(git_dir: &Path) -> PathBuf {
   git_dir.join("hooks").join(HOOK_NAME)
}

fn is_ours(path: &Path) -> bool {
   std::fs::read_to_string(path).is_ok_and(|content| content.contains(HOOK_MARKER))
}

/// Write the hook into `git_dir/hooks`. An existing foreign hook is only
/// replaced with `force`.
pub fn install_hook(git_dir: &Path, force: bool) -> Result<PathBuf> {
   let path = hook_path(git_dir);
   if path.exists() && !force && !is_ours(&path) {
      return Err(ComposerError::HookExists { path });
   }

   if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
   }
   std::fs::write(&path, hook_script())?;
   set_executable(&path)?;
   log::debug!("installed hook at {}", path.display());
   Ok(path)
}

/// Remove a hook written by `install_hook`. Returns false when none exists.
pub fn uninstall_hook(git_dir: &Path) -> Result<bool> {
   let path = hook_path(git_dir);
   if !path.exists() {
      return Ok(false);
   }
   if !is_ours(&path) {
      return Err(ComposerError::HookNotOurs { path });
   }
   std::fs::remove_file(&path)?;
   Ok(true)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
   use std::os::unix::fs::PermissionsExt;

   let mut perms = std::fs::metadata(path)?.permissions();
   perms.set_mode(0o755);
   std::fs::set_permissions(path, perms)?;
   Ok(())
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
   Ok(())
}
