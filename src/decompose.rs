//! Split a raw commit message into emoji, summary and body.
//!
//! The expected shape is an optional emoji marker and a subject on the first
//! line, a blank separator, then a free-form body. Every function here is
//! total: input that does not fit the shape yields empty values.
use crate::{
   emoji::{EmojiCatalog, is_emoji_grapheme, is_shortcode},
   types::{DraftSnapshot, Emoji},
};

fn first_line(message: &str) -> &str {
   message.split('\n').next().unwrap_or_default()
}

fn is_marker(token: &str) -> bool {
   is_emoji_grapheme(token) || is_shortcode(token)
}

/// Catalog entry for the emoji marker at the start of the message.
pub fn decompose_emoji(message: &str, catalog: &EmojiCatalog) -> Emoji {
   let token = first_line(message).split(' ').next().unwrap_or_default();

   let found = if is_emoji_grapheme(token) {
      catalog.by_character(token)
   } else if is_shortcode(token) {
      catalog.by_shortcode(token)
   } else {
      None
   };

   found.cloned().unwrap_or_default()
}

/// Subject line with any emoji marker removed.
pub fn decompose_summary(message: &str) -> String {
   let line = first_line(message);
   let tokens: Vec<&str> = line.split(' ').collect();

   if !is_marker(tokens[0]) {
      return line.to_string();
   }
   if tokens.len() <= 1 {
      return String::new();
   }
   tokens[1..].join(" ")
}

/// Subject, blank line, then at least one more line.
pub fn has_summary(message: &str) -> bool {
   let lines: Vec<&str> = message.split('\n').collect();
   if lines.len() <= 2 {
      return false;
   }
   !lines[0].is_empty() && lines[1].is_empty() && !lines[2].is_empty()
}

pub fn decompose_body(message: &str) -> String {
   if !has_summary(message) {
      return String::new();
   }
   message.split('\n').skip(2).collect::<Vec<_>>().join("\n")
}

/// Seed draft built from a full message.
pub fn decompose(message: &str, catalog: &EmojiCatalog, amend: bool) -> DraftSnapshot {
   DraftSnapshot {
      amend,
      emoji: decompose_emoji(message, catalog),
      summary: decompose_summary(message),
      body: decompose_body(message),
   }
}
