use std::path::PathBuf;

use arboard::Clipboard;
use clap::Parser;
use emoji_commit::*;
use error::{ComposerError, Result};
use message::{append_footers, build_footers, format_commit_message, read_message_file, write_message_file};
use snapshot::{SavedSnapshot, snapshot_path};
use style::icons;
use types::Args;

/// Apply CLI overrides to config
fn apply_cli_overrides(config: &mut ComposerConfig, args: &Args) {
   if let Some(format) = args.format {
      config.emoji_format = format;
   }
   if args.signoff {
      config.signoff = true;
   }
   if args.sign {
      config.gpg_sign = true;
   }
}

/// Load config from args or default
fn load_config_from_args(args: &Args) -> Result<ComposerConfig> {
   if let Some(ref config_path) = args.config {
      ComposerConfig::from_file(config_path)
   } else {
      ComposerConfig::load()
   }
}

/// Message text a session was seeded from, with the draft decomposed from it
struct SourceMessage {
   text:  String,
   draft: DraftSnapshot,
}

/// Build the seed draft and start the session
fn start_session(args: &Args, catalog: &EmojiCatalog) -> Result<(SessionStore, Option<SourceMessage>)> {
   let origin = args.origin();
   let amend = args.wants_amend();

   let source = if let Some(ref path) = args.message_file {
      let text = read_message_file(path)?;
      let draft = decompose::decompose(&text, catalog, amend);
      Some(SourceMessage { text, draft })
   } else {
      match git::head_message(&args.dir)? {
         Some(text) => {
            let draft = decompose::decompose(&text, catalog, true);
            Some(SourceMessage { text, draft })
         },
         None if amend => {
            return Err(ComposerError::GitError("Nothing to amend: HEAD has no commits".to_string()));
         },
         None => None,
      }
   };

   let seed = source
      .as_ref()
      .map(|source| source.draft.clone())
      .unwrap_or_default();
   Ok((SessionStore::new(origin, amend, seed), source))
}

/// Assemble the final message.
///
/// An unedited draft whose source does not fit the emoji/summary/body layout
/// keeps the source text, so amending never drops lines.
fn compose_message(
   draft: &DraftSnapshot,
   source: Option<&SourceMessage>,
   footers: &[String],
   format: EmojiFormat,
) -> String {
   match source {
      Some(source) if source.draft == *draft && !message::reassembles(&source.draft, &source.text) => {
         style::warn("Message does not fit the emoji/summary/body layout, keeping it as written");
         append_footers(&source.text, footers)
      },
      _ => format_commit_message(draft, footers, format),
   }
}

fn resolve_snapshot_path(args: &Args, config: &ComposerConfig) -> Result<PathBuf> {
   let git_dir = git::git_dir(&args.dir)?;
   Ok(snapshot_path(&git_dir, &config.snapshot_file))
}

/// Import `--load` or offer the saved draft from `--restore`
fn load_snapshots(session: &mut SessionStore, args: &Args, config: &ComposerConfig) -> Result<()> {
   if let Some(ref path) = args.load {
      let saved = SavedSnapshot::load(path)?.ok_or_else(|| ComposerError::SnapshotError {
         path:   path.clone(),
         reason: "file does not exist".to_string(),
      })?;
      session.load_snapshot(&saved.to_draft());
      style::print_info(&format!("Loaded draft from {}", path.display()));
   }

   if args.restore {
      let path = resolve_snapshot_path(args, config)?;
      match SavedSnapshot::load(&path)? {
         Some(saved) if session.try_load(&saved.to_draft()) => {
            let mode = if session.amend() { "amend" } else { "new commit" };
            style::print_info(&format!("Restored saved {mode} draft"));
         },
         Some(_) => style::warn("Saved draft is empty, nothing restored"),
         None => style::warn("No saved draft to restore"),
      }
   }
   Ok(())
}

/// Resolve each --co-author term to a repository author
fn resolve_co_authors(args: &Args, config: &ComposerConfig) -> Result<Vec<Author>> {
   if args.co_author.is_empty() {
      return Ok(Vec::new());
   }

   let known = git::recent_authors(&args.dir, config.author_history)?;
   let mut resolved = Vec::new();
   for term in &args.co_author {
      let explicit = Author::parse(term);
      if !explicit.email.is_empty() {
         resolved.push(explicit);
         continue;
      }
      match rank(term, &known).first() {
         Some(&idx) => resolved.push(known[idx].clone()),
         None => style::warn(&format!("No author matches {term:?}, skipping")),
      }
   }
   Ok(resolved)
}

/// Apply --emoji/--summary/--body to the live draft
fn apply_edits(session: &mut SessionStore, args: &Args, catalog: &EmojiCatalog) -> Result<()> {
   if let Some(ref term) = args.emoji {
      let emoji = catalog
         .resolve(term)
         .ok_or_else(|| ComposerError::Other(format!("No emoji matches {term:?}")))?;
      session.set_emoji(emoji.clone());
   }
   if let Some(ref summary) = args.summary {
      session.set_summary(summary.trim());
   }
   if let Some(ref body) = args.body {
      session.set_body(body.trim_end());
   }
   Ok(())
}

/// Print the top `limit` ranked entries
fn print_ranked<T: Searchable>(term: &str, items: &[T], limit: usize, render: impl Fn(&T) -> String) {
   let ranked = rank(term, items);
   if ranked.is_empty() {
      style::warn(&format!("Nothing matches {term:?}"));
      return;
   }
   for idx in ranked.into_iter().take(limit) {
      println!("{}", render(&items[idx]));
   }
}

/// Handle --find-emoji/--find-author/--find-theme. Returns true if one ran.
fn run_finders(args: &Args, config: &ComposerConfig, catalog: &EmojiCatalog) -> Result<bool> {
   if let Some(ref term) = args.find_emoji {
      print_ranked(term, catalog.entries(), config.search_limit, |e| {
         format!("{} {} {}", e.character, style::shortcode(&e.shortcode), style::dim(&e.description))
      });
      return Ok(true);
   }
   if let Some(ref term) = args.find_author {
      let authors = git::recent_authors(&args.dir, config.author_history)?;
      print_ranked(term, &authors, config.search_limit, ToString::to_string);
      return Ok(true);
   }
   if let Some(ref term) = args.find_theme {
      print_ranked(term, &config.themes, config.search_limit, |t| {
         let marker = if t.name == config.theme { icons::ARROW } else { " " };
         format!("{marker} {} {}", style::bold(&t.name), style::dim(&t.description))
      });
      return Ok(true);
   }
   Ok(false)
}

fn run_hook_command(args: &Args) -> Result<()> {
   let git_dir = git::git_dir(&args.dir)?;
   if args.install_hook {
      let path = hook::install_hook(&git_dir, args.force)?;
      println!("{} Installed hook at {}", style::success(icons::SUCCESS), path.display());
   } else if hook::uninstall_hook(&git_dir)? {
      println!("{} Removed prepare-commit-msg hook", style::success(icons::SUCCESS));
   } else {
      style::warn("No hook installed");
   }
   Ok(())
}

/// Copy text to clipboard
fn copy_to_clipboard(text: &str) -> Result<()> {
   let mut clipboard = Clipboard::new()?;
   clipboard.set_text(text)?;
   Ok(())
}

fn run(args: &Args) -> Result<()> {
   let mut config = load_config_from_args(args)?;
   apply_cli_overrides(&mut config, args);

   if args.install_hook || args.uninstall_hook {
      return run_hook_command(args);
   }

   let catalog = config.catalog()?;
   if run_finders(args, &config, &catalog)? {
      return Ok(());
   }

   let (mut session, source) = start_session(args, &catalog)?;
   load_snapshots(&mut session, args, &config)?;
   apply_edits(&mut session, args, &catalog)?;

   let co_authors = resolve_co_authors(args, &config)?;
   let signer = if config.signoff {
      Some(git::user_identity(&args.dir)?)
   } else {
      None
   };
   let footers = build_footers(&co_authors, signer.as_ref());

   let draft = session.snapshot();
   let formatted_message = compose_message(&draft, source.as_ref(), &footers, config.emoji_format);
   let title = if draft.amend { "Amend Commit" } else { "New Commit" };
   eprintln!("{}", style::boxed_message(title, &formatted_message, style::term_width()));

   if args.copy {
      match copy_to_clipboard(&formatted_message) {
         Ok(()) => style::print_info(&format!("{} Copied to clipboard", icons::CLIPBOARD)),
         Err(e) => style::warn(&format!("Failed to copy to clipboard: {e}")),
      }
   }

   if let Some(ref path) = args.message_file {
      write_message_file(path, &formatted_message)?;
      return Ok(());
   }

   let snapshot_file = resolve_snapshot_path(args, &config)?;
   if args.save {
      SavedSnapshot::from_draft(&draft, &footers.join("\n"), signer).save(&snapshot_file)?;
      println!("{} Saved draft to {}", style::success(icons::SAVE), snapshot_file.display());
      return Ok(());
   }

   if draft.summary.is_empty() {
      return Err(ComposerError::Other(
         "Summary is empty, nothing to commit (use --summary or --save)".to_string(),
      ));
   }

   git::git_commit(&formatted_message, draft.amend, args.dry_run, &args.dir, config.gpg_sign)?;
   if !args.dry_run {
      SavedSnapshot::clear(&snapshot_file)?;
      println!("{} Committed", style::success(icons::SUCCESS));
   }
   Ok(())
}

fn main() {
   env_logger::Builder::from_env(env_logger::Env::default().filter_or("EMC_LOG", "warn"))
      .format_timestamp(None)
      .init();

   let args = Args::parse();
   if let Err(e) = run(&args) {
      eprintln!("{} {}", style::error(icons::ERROR), style::error(&e.to_string()));
      std::process::exit(1);
   }
}
