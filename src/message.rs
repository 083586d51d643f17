/// Commit message assembly and message file handling
use std::path::Path;

use crate::{
   error::Result,
   types::{Author, DraftSnapshot, EmojiFormat},
};

/// Render the emoji marker in the requested format. Empty when the draft has
/// no emoji.
pub fn format_emoji(draft: &DraftSnapshot, format: EmojiFormat) -> &str {
   let emoji = &draft.emoji;
   match format {
      EmojiFormat::Character if !emoji.character.is_empty() => &emoji.character,
      EmojiFormat::Shortcode if !emoji.shortcode.is_empty() => &emoji.shortcode,
      // Fall back to whichever form the entry has
      _ if !emoji.character.is_empty() => &emoji.character,
      _ => &emoji.shortcode,
   }
}

/// Build the first line: `<emoji> <summary>`
pub fn format_first_line(draft: &DraftSnapshot, format: EmojiFormat) -> String {
   let marker = format_emoji(draft, format);
   match (marker.is_empty(), draft.summary.is_empty()) {
      (true, _) => draft.summary.clone(),
      (false, true) => marker.to_string(),
      (false, false) => format!("{marker} {}", draft.summary),
   }
}

/// Format a draft and its trailers as the final commit message
pub fn format_commit_message(draft: &DraftSnapshot, footers: &[String], format: EmojiFormat) -> String {
   let mut result = format_first_line(draft, format);

   let body = draft.body.trim_end();
   if !body.is_empty() {
      result.push_str("\n\n");
      result.push_str(body);
   }
   append_footers(&result, footers)
}

/// Append trailers to `message`, skipping lines it already carries
pub fn append_footers(message: &str, footers: &[String]) -> String {
   let mut result = message.trim_end().to_string();
   // An amended message may already end with the same trailers
   let missing: Vec<&str> = footers
      .iter()
      .map(String::as_str)
      .filter(|footer| !result.lines().any(|line| line == *footer))
      .collect();
   if !missing.is_empty() {
      if !result.is_empty() {
         result.push_str("\n\n");
      }
      result.push_str(&missing.join("\n"));
   }
   result
}

/// Whether assembling `draft` gives back `message` in either emoji format.
///
/// Decomposition drops text outside the `<emoji> <summary>\n\n<body>`
/// layout, so a message that fails this check cannot be rebuilt from its
/// draft.
pub fn reassembles(draft: &DraftSnapshot, message: &str) -> bool {
   let message = message.trim_end();
   [EmojiFormat::Character, EmojiFormat::Shortcode]
      .into_iter()
      .any(|format| format_commit_message(draft, &[], format) == message)
}

/// Build trailer lines: co-authors first, then the sign-off
pub fn build_footers(co_authors: &[Author], signoff: Option<&Author>) -> Vec<String> {
   let mut footers: Vec<String> = co_authors
      .iter()
      .map(|author| format!("Co-authored-by: {author}"))
      .collect();

   if let Some(author) = signoff {
      let line = format!("Signed-off-by: {author}");
      if !footers.contains(&line) {
         footers.push(line);
      }
   }
   footers
}

/// Remove the `#` comment lines git writes into message files, plus any
/// trailing blank lines.
pub fn strip_comments(text: &str) -> String {
   let kept: Vec<&str> = text
      .lines()
      .filter(|line| !line.starts_with('#'))
      .map(str::trim_end)
      .collect();
   kept.join("\n").trim_end().to_string()
}

pub fn read_message_file(path: &Path) -> Result<String> {
   let content = std::fs::read_to_string(path)?;
   Ok(strip_comments(&content))
}

pub fn write_message_file(path: &Path, message: &str) -> Result<()> {
   std::fs::write(path, format!("{message}\n"))?;
   Ok(())
}
