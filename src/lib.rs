//! Emoji commit message composer library
//!
//! This library decomposes existing commit messages into emoji, summary and
//! body, keeps separate drafts for new and amended commits, and ranks picker
//! entries (emoji, authors, themes) against a typed filter.
pub mod config;
pub mod decompose;
pub mod emoji;
pub mod error;
pub mod fuzzy;
pub mod git;
pub mod hook;
pub mod message;
pub mod session;
pub mod snapshot;
pub mod style;
pub mod types;

// Re-export commonly used types
pub use config::ComposerConfig;
pub use emoji::EmojiCatalog;
pub use error::{ComposerError, Result};
pub use fuzzy::{Searchable, rank};
pub use session::SessionStore;
pub use types::{Author, DraftSnapshot, Emoji, EmojiFormat, Origin, Theme};
