use std::{fmt, path::PathBuf};

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

// === Draft types ===

/// Catalog entry for a single commit emoji.
///
/// The zero value (all fields empty) stands for "no emoji".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Emoji {
   /// Literal emoji grapheme, e.g. "🐛"
   #[serde(rename = "emoji")]
   pub character: String,

   /// `:name:` alias, e.g. ":bug:"
   #[serde(rename = "code")]
   pub shortcode: String,

   /// Short identifier, e.g. "bug"
   pub name: String,

   /// Human readable meaning, searched alongside the shortcode
   #[serde(default)]
   pub description: String,
}

/// One complete, independently editable commit draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DraftSnapshot {
   pub amend:   bool,
   pub emoji:   Emoji,
   pub summary: String,
   pub body:    String,
}

impl DraftSnapshot {
   /// Whether the draft carries anything worth preserving.
   ///
   /// Only the emoji name counts for the emoji; an entry without a name never
   /// came from the catalog.
   pub fn has_content(&self) -> bool {
      !self.summary.is_empty() || !self.body.is_empty() || !self.emoji.name.is_empty()
   }
}

/// Where the session's seed draft came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Origin {
   /// Direct CLI invocation; the seed is the decomposed HEAD message
   #[default]
   Cli,
   /// Editor invoked through a git hook; the seed is the message file
   MessageFile,
}

// === Picker entries ===

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Author {
   pub name:  String,
   pub email: String,
}

impl Author {
   /// Parse `Name <email>`; a bare string becomes the name.
   pub fn parse(raw: &str) -> Self {
      let raw = raw.trim();
      match (raw.rfind('<'), raw.rfind('>')) {
         (Some(open), Some(close)) if open < close => Self {
            name:  raw[..open].trim().to_string(),
            email: raw[open + 1..close].trim().to_string(),
         },
         _ => Self { name: raw.to_string(), email: String::new() },
      }
   }
}

impl fmt::Display for Author {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      if self.email.is_empty() {
         write!(f, "{}", self.name)
      } else {
         write!(f, "{} <{}>", self.name, self.email)
      }
   }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
   pub name:        String,
   #[serde(default)]
   pub description: String,
}

impl Theme {
   pub fn new(name: &str, description: &str) -> Self {
      Self { name: name.to_string(), description: description.to_string() }
   }
}

/// Built-in themes offered by the theme picker
pub fn default_themes() -> Vec<Theme> {
   vec![
      Theme::new("default", "Terminal palette, no overrides"),
      Theme::new("dracula", "Dark purple theme"),
      Theme::new("gruvbox", "Retro groove warm dark"),
      Theme::new("nord", "Arctic north-bluish palette"),
      Theme::new("solarized-dark", "Precision colors, dark background"),
      Theme::new("solarized-light", "Precision colors, light background"),
      Theme::new("monokai", "Vivid contrast dark"),
      Theme::new("one-dark", "Atom inspired dark"),
   ]
}

/// How the emoji is written into the assembled commit message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmojiFormat {
   /// Literal emoji, e.g. "🐛 fixed crash"
   #[default]
   Character,
   /// Shortcode, e.g. ":bug: fixed crash"
   Shortcode,
}

impl EmojiFormat {
   pub fn parse(raw: &str) -> Option<Self> {
      match raw.trim().to_ascii_lowercase().as_str() {
         "character" | "char" | "emoji" | "unicode" => Some(Self::Character),
         "shortcode" | "code" | "text" => Some(Self::Shortcode),
         _ => None,
      }
   }
}

// CLI Args
#[derive(Parser, Debug)]
#[command(author, version, about = "Compose emoji-prefixed git commit messages", long_about = None)]
pub struct Args {
   /// Directory to run git commands in
   #[arg(long, default_value = ".")]
   pub dir: String,

   /// Amend the HEAD commit instead of creating a new one
   #[arg(long, short = 'a')]
   pub amend: bool,

   /// Edit a commit message file in place (used by the prepare-commit-msg
   /// hook)
   #[arg(long)]
   pub message_file: Option<PathBuf>,

   /// Commit source passed to the hook by git ("message", "commit", ...)
   #[arg(long, requires = "message_file")]
   pub hook_source: Option<String>,

   /// Emoji to prefix: literal emoji, :shortcode:, or a search term
   #[arg(long, short = 'e')]
   pub emoji: Option<String>,

   /// Summary line (without emoji)
   #[arg(long, short = 'm')]
   pub summary: Option<String>,

   /// Commit body
   #[arg(long, short = 'b')]
   pub body: Option<String>,

   /// Add a Co-authored-by trailer for the best matching repository author
   #[arg(long)]
   pub co_author: Vec<String>,

   /// Add Signed-off-by trailer
   #[arg(long, short = 's')]
   pub signoff: bool,

   /// GPG sign the commit (equivalent to git commit -S)
   #[arg(long, short = 'S')]
   pub sign: bool,

   /// Emoji format for the assembled message
   #[arg(long, value_enum)]
   pub format: Option<EmojiFormat>,

   /// Restore the draft saved by a previous --save
   #[arg(long)]
   pub restore: bool,

   /// Import a snapshot file into the live draft
   #[arg(long, conflicts_with = "restore")]
   pub load: Option<PathBuf>,

   /// Save the draft instead of committing
   #[arg(long, conflicts_with = "message_file")]
   pub save: bool,

   /// Preview without committing
   #[arg(long)]
   pub dry_run: bool,

   /// Copy the message to clipboard
   #[arg(long)]
   pub copy: bool,

   /// Rank the emoji catalog against a term and print the results
   #[arg(long, conflicts_with_all = ["find_author", "find_theme"])]
   pub find_emoji: Option<String>,

   /// Rank repository authors against a term and print the results
   #[arg(long, conflicts_with = "find_theme")]
   pub find_author: Option<String>,

   /// Rank available themes against a term and print the results
   #[arg(long)]
   pub find_theme: Option<String>,

   /// Install the prepare-commit-msg hook into the repository
   #[arg(long, conflicts_with = "uninstall_hook")]
   pub install_hook: bool,

   /// Remove the prepare-commit-msg hook installed by --install-hook
   #[arg(long)]
   pub uninstall_hook: bool,

   /// Overwrite an existing hook
   #[arg(long, requires = "install_hook")]
   pub force: bool,

   /// Path to config file (default: ~/.config/emoji-commit/config.toml)
   #[arg(long)]
   pub config: Option<PathBuf>,
}

impl Default for Args {
   fn default() -> Self {
      Self {
         dir:            ".".to_string(),
         amend:          false,
         message_file:   None,
         hook_source:    None,
         emoji:          None,
         summary:        None,
         body:           None,
         co_author:      vec![],
         signoff:        false,
         sign:           false,
         format:         None,
         restore:        false,
         load:           None,
         save:           false,
         dry_run:        false,
         copy:           false,
         find_emoji:     None,
         find_author:    None,
         find_theme:     None,
         install_hook:   false,
         uninstall_hook: false,
         force:          false,
         config:         None,
      }
   }
}

impl Args {
   pub const fn origin(&self) -> Origin {
      if self.message_file.is_some() {
         Origin::MessageFile
      } else {
         Origin::Cli
      }
   }

   /// Amend state requested by the flags or implied by the hook source.
   pub fn wants_amend(&self) -> bool {
      self.amend || self.hook_source.as_deref() == Some("commit")
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_has_content_empty() {
      assert!(!DraftSnapshot::default().has_content());
      assert!(!DraftSnapshot { amend: true, ..Default::default() }.has_content());
   }

   #[test]
   fn test_has_content_ignores_nameless_emoji() {
      let draft = DraftSnapshot {
         emoji: Emoji { character: "🐛".to_string(), ..Default::default() },
         ..Default::default()
      };
      assert!(!draft.has_content());

      let named = DraftSnapshot {
         emoji: Emoji { name: "bug".to_string(), ..Default::default() },
         ..Default::default()
      };
      assert!(named.has_content());
   }

   #[test]
   fn test_author_parse() {
      assert_eq!(Author::parse("Jane Doe <jane@example.com>"), Author {
         name:  "Jane Doe".to_string(),
         email: "jane@example.com".to_string(),
      });
      assert_eq!(Author::parse("  solo  "), Author {
         name:  "solo".to_string(),
         email: String::new(),
      });
   }

   #[test]
   fn test_author_display() {
      let author = Author::parse("Jane Doe <jane@example.com>");
      assert_eq!(author.to_string(), "Jane Doe <jane@example.com>");
      assert_eq!(Author::parse("solo").to_string(), "solo");
   }

   #[test]
   fn test_emoji_format_parse() {
      assert_eq!(EmojiFormat::parse("Shortcode"), Some(EmojiFormat::Shortcode));
      assert_eq!(EmojiFormat::parse("emoji"), Some(EmojiFormat::Character));
      assert_eq!(EmojiFormat::parse("bogus"), None);
   }

   #[test]
   fn test_args_origin_and_amend() {
      let args = Args::default();
      assert_eq!(args.origin(), Origin::Cli);
      assert!(!args.wants_amend());

      let hook = Args {
         message_file: Some(PathBuf::from(".git/COMMIT_EDITMSG")),
         hook_source: Some("commit".to_string()),
         ..Default::default()
      };
      assert_eq!(hook.origin(), Origin::MessageFile);
      assert!(hook.wants_amend());
   }
}
