use std::{
   path::{Path, PathBuf},
   process::Command,
};

use indexmap::IndexSet;

use crate::{
   error::{ComposerError, Result},
   types::Author,
};

/// Run git with `args` in `dir`, returning stdout on success.
fn run_git(args: &[&str], dir: &str) -> Result<String> {
   log::trace!("git {}", args.join(" "));
   let output = Command::new("git")
      .args(args)
      .current_dir(dir)
      .output()
      .map_err(|e| ComposerError::GitError(format!("Failed to run git {}: {e}", args[0])))?;

   if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ComposerError::GitError(format!("git {} failed: {}", args[0], stderr.trim())));
   }

   Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Path of the repository's git directory (`.git` or a worktree's gitdir)
pub fn git_dir(dir: &str) -> Result<PathBuf> {
   let raw = run_git(&["rev-parse", "--git-dir"], dir).map_err(|_| ComposerError::NoRepository)?;
   let path = PathBuf::from(raw.trim());
   if path.is_absolute() {
      Ok(path)
   } else {
      Ok(Path::new(dir).join(path))
   }
}

/// Full message of the HEAD commit, `None` on an unborn branch
pub fn head_message(dir: &str) -> Result<Option<String>> {
   if run_git(&["rev-parse", "--verify", "--quiet", "HEAD"], dir).is_err() {
      return Ok(None);
   }
   let message = run_git(&["log", "-1", "--format=%B", "HEAD"], dir)?;
   Ok(Some(message.trim_end().to_string()))
}

/// Configured `user.name` / `user.email`
pub fn user_identity(dir: &str) -> Result<Author> {
   let name = run_git(&["config", "user.name"], dir)?.trim().to_string();
   let email = run_git(&["config", "--default", "", "user.email"], dir)?
      .trim()
      .to_string();
   Ok(Author { name, email })
}

/// Distinct authors of the most recent commits, newest first
pub fn recent_authors(dir: &str, limit: usize) -> Result<Vec<Author>> {
   if run_git(&["rev-parse", "--verify", "--quiet", "HEAD"], dir).is_err() {
      return Ok(Vec::new());
   }
   let max_count = format!("--max-count={limit}");
   let output = run_git(&["log", &max_count, "--format=%an%x00%ae"], dir)?;

   let authors: IndexSet<Author> = output
      .lines()
      .filter_map(|line| {
         let (name, email) = line.split_once('\0')?;
         Some(Author { name: name.to_string(), email: email.to_string() })
      })
      .filter(|author| !author.name.is_empty())
      .collect();
   Ok(authors.into_iter().collect())
}

/// Execute git commit with the given message
pub fn git_commit(message: &str, amend: bool, dry_run: bool, dir: &str, sign: bool) -> Result<()> {
   let mut args = vec!["commit"];
   if amend {
      args.push("--amend");
   }
   if sign {
      args.push("-S");
   }
   args.push("-m");
   args.push(message);

   if dry_run {
      println!("DRY RUN - Would execute:");
      println!(
         "git {} \"{}\"",
         args[..args.len() - 1].join(" "),
         message.replace('\n', "\\n")
      );
      return Ok(());
   }

   let output = Command::new("git")
      .args(&args)
      .current_dir(dir)
      .output()
      .map_err(|e| ComposerError::GitError(format!("Failed to run git commit: {e}")))?;

   if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      let stdout = String::from_utf8_lossy(&output.stdout);
      return Err(ComposerError::GitError(format!(
         "Git commit failed:\nstderr: {stderr}\nstdout: {stdout}"
      )));
   }

   let stdout = String::from_utf8_lossy(&output.stdout);
   println!("{}", stdout.trim_end());
   Ok(())
}

#[cfg(test)]
mod tests {
   use super::*;

   fn init_repo() -> tempfile::TempDir {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().to_str().unwrap();
      run_git(&["init", "-q"], path).unwrap();
      run_git(&["config", "user.name", "Test User"], path).unwrap();
      run_git(&["config", "user.email", "test@example.com"], path).unwrap();
      run_git(&["config", "commit.gpgsign", "false"], path).unwrap();
      dir
   }

   #[test]
   fn test_unborn_head() {
      let repo = init_repo();
      let path = repo.path().to_str().unwrap();
      assert_eq!(head_message(path).unwrap(), None);
      assert!(recent_authors(path, 10).unwrap().is_empty());
   }

   #[test]
   fn test_commit_and_read_head() {
      let repo = init_repo();
      let path = repo.path().to_str().unwrap();
      std::fs::write(repo.path().join("README"), "hello\n").unwrap();
      run_git(&["add", "README"], path).unwrap();
      run_git(&["commit", "-q", "-m", ":tada: first\n\nbody text"], path).unwrap();

      assert_eq!(head_message(path).unwrap().as_deref(), Some(":tada: first\n\nbody text"));

      git_commit(":bug: second", true, false, path, false).unwrap();
      assert_eq!(head_message(path).unwrap().as_deref(), Some(":bug: second"));
   }

   #[test]
   fn test_recent_authors_dedup() {
      let repo = init_repo();
      let path = repo.path().to_str().unwrap();
      for msg in ["one", "two"] {
         run_git(&["commit", "-q", "--allow-empty", "-m", msg], path).unwrap();
      }
      let authors = recent_authors(path, 10).unwrap();
      assert_eq!(authors, vec![Author {
         name:  "Test User".to_string(),
         email: "test@example.com".to_string(),
      }]);
   }

   #[test]
   fn test_user_identity_and_git_dir() {
      let repo = init_repo();
      let path = repo.path().to_str().unwrap();
      assert_eq!(user_identity(path).unwrap().to_string(), "Test User <test@example.com>");
      assert!(git_dir(path).unwrap().ends_with(".git"));
   }
}
