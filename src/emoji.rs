//! Emoji catalog: the ordered list of emoji a commit may be prefixed with.
//!
//! The default catalog (the gitmoji set) is compiled into the binary; a custom
//! JSON file with the same shape can replace it via `catalog_path` in the
//! config.
use std::path::Path;

use rust_embed::RustEmbed;
use unicode_properties::{EmojiStatus, UnicodeEmoji};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
   error::{ComposerError, Result},
   fuzzy,
   types::Emoji,
};

/// Embedded assets folder (compiled into binary)
#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

const CATALOG_FILE: &str = "emojis.json";

const VARIATION_SELECTOR: char = '\u{FE0F}';
const KEYCAP: char = '\u{20E3}';
const ZERO_WIDTH_JOINER: char = '\u{200D}';

#[derive(Debug, Clone, Default)]
pub struct EmojiCatalog {
   entries: Vec<Emoji>,
}

impl EmojiCatalog {
   pub const fn new(entries: Vec<Emoji>) -> Self {
      Self { entries }
   }

   /// Catalog shipped with the binary.
   pub fn embedded() -> Result<Self> {
      let file = Assets::get(CATALOG_FILE).ok_or_else(|| {
         ComposerError::CatalogError(format!("embedded {CATALOG_FILE} is missing"))
      })?;
      let content = std::str::from_utf8(file.data.as_ref())
         .map_err(|e| ComposerError::CatalogError(format!("{CATALOG_FILE} is not UTF-8: {e}")))?;
      Self::from_json(content)
   }

   pub fn from_file(path: &Path) -> Result<Self> {
      let content = std::fs::read_to_string(path)?;
      Self::from_json(&content)
         .map_err(|e| ComposerError::CatalogError(format!("{}: {e}", path.display())))
   }

   pub fn from_json(content: &str) -> Result<Self> {
      let entries: Vec<Emoji> = serde_json::from_str(content)?;
      if let Some(bad) = entries.iter().find(|e| !is_shortcode(&e.shortcode)) {
         return Err(ComposerError::CatalogError(format!(
            "entry {:?} has malformed shortcode {:?}",
            bad.name, bad.shortcode
         )));
      }
      Ok(Self { entries })
   }

   pub fn entries(&self) -> &[Emoji] {
      &self.entries
   }

   pub fn len(&self) -> usize {
      self.entries.len()
   }

   pub fn is_empty(&self) -> bool {
      self.entries.is_empty()
   }

   /// Find the entry for a literal emoji. The emoji variation selector is
   /// ignored on both sides, so "⚡" finds "⚡️".
   pub fn by_character(&self, character: &str) -> Option<&Emoji> {
      let wanted = strip_variation(character);
      self
         .entries
         .iter()
         .find(|e| strip_variation(&e.character) == wanted)
   }

   pub fn by_shortcode(&self, shortcode: &str) -> Option<&Emoji> {
      self.entries.iter().find(|e| e.shortcode == shortcode)
   }

   /// Resolve user input to an entry: a literal emoji, a shortcode (with or
   /// without colons), or a search term taking the best ranked match.
   pub fn resolve(&self, input: &str) -> Option<&Emoji> {
      let input = input.trim();
      if input.is_empty() {
         return None;
      }
      if is_emoji_grapheme(input) {
         return self.by_character(input);
      }
      if is_shortcode(input) {
         return self.by_shortcode(input);
      }
      if let Some(found) = self.by_shortcode(&format!(":{input}:")) {
         return Some(found);
      }
      fuzzy::rank(input, &self.entries)
         .first()
         .map(|&idx| &self.entries[idx])
   }
}

fn strip_variation(s: &str) -> String {
   s.chars().filter(|&c| c != VARIATION_SELECTOR).collect()
}

/// Whether `token` matches the shortcode grammar `:name:`.
pub fn is_shortcode(token: &str) -> bool {
   token.len() > 2
      && token.starts_with(':')
      && token.ends_with(':')
      && token[1..token.len() - 1]
         .chars()
         .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-'))
}

/// Whether `token` is exactly one grapheme cluster that renders as an emoji.
///
/// Characters whose default presentation is text (`©`, `⬆`, digits) only
/// count when the cluster asks for emoji presentation with U+FE0F, a keycap
/// or a ZWJ sequence.
pub fn is_emoji_grapheme(token: &str) -> bool {
   let mut graphemes = token.graphemes(true);
   let (Some(grapheme), None) = (graphemes.next(), graphemes.next()) else {
      return false;
   };
   let Some(first) = grapheme.chars().next() else {
      return false;
   };
   match first.emoji_status() {
      EmojiStatus::EmojiPresentation
      | EmojiStatus::EmojiPresentationAndModifierBase
      | EmojiStatus::EmojiPresentationAndEmojiComponent
      | EmojiStatus::EmojiPresentationAndModifierAndEmojiComponent => true,
      EmojiStatus::EmojiOther
      | EmojiStatus::EmojiModifierBase
      | EmojiStatus::EmojiOtherAndEmojiComponent => grapheme
         .chars()
         .skip(1)
         .any(|c| matches!(c, VARIATION_SELECTOR | KEYCAP | ZERO_WIDTH_JOINER)),
      _ => false,
   }
}
