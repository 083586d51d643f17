//! Dual-slot draft store behind the amend toggle.
//!
//! A session keeps two drafts: one for the "new commit" state and one for the
//! "amend HEAD" state. The slot whose `amend` flag matches the live toggle is
//! `current` and is bound to the editor fields; the other waits in
//! `previous`. Switching modes captures what the user typed into `current`
//! before the slots trade places, so neither draft is lost.
use std::mem;

use crate::types::{DraftSnapshot, Emoji, Origin};

/// The editor-bound copy of the active draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftFields {
   pub emoji:   Emoji,
   pub summary: String,
   pub body:    String,
}

impl DraftFields {
   fn clear(&mut self) {
      *self = Self::default();
   }

   fn restore(&mut self, snapshot: &DraftSnapshot) {
      self.emoji = snapshot.emoji.clone();
      self.summary = snapshot.summary.clone();
      self.body = snapshot.body.clone();
   }
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
   origin:   Origin,
   amend:    bool,
   current:  DraftSnapshot,
   previous: DraftSnapshot,
   live:     DraftFields,
}

impl SessionStore {
   /// Start a session from its seed draft.
   ///
   /// When amending, the seed is the amend draft. Otherwise the seed is
   /// parked as the amend draft, and a message file seed additionally fills
   /// the visible draft since git already put that text in front of the user.
   pub fn new(origin: Origin, amend: bool, seed: DraftSnapshot) -> Self {
      let mut store = Self { origin, amend, ..Default::default() };

      if amend {
         store.current = seed;
      } else {
         if origin == Origin::MessageFile {
            store.current = seed.clone();
         }
         store.previous = seed;
      }
      store.current.amend = amend;
      store.previous.amend = !amend;
      store.live.restore(&store.current);

      log::debug!(
         "session start: origin={origin:?} amend={amend} current_has_content={} \
          previous_has_content={}",
         store.current.has_content(),
         store.previous.has_content()
      );
      store
   }

   /// Offer a draft to the session, e.g. one restored from disk.
   ///
   /// Returns whether the draft was taken. Amend drafts go to the amend slot
   /// first; otherwise any draft with content goes to a non-amend slot. A
   /// swap happens only when the matching slot is not the live one.
   pub fn try_load(&mut self, incoming: &DraftSnapshot) -> bool {
      let rule = if self.current.amend && incoming.amend {
         1
      } else if self.previous.amend && incoming.amend {
         self.swap_slots();
         2
      } else if incoming.has_content() && !self.current.amend {
         3
      } else if incoming.has_content() && !self.previous.amend {
         self.swap_slots();
         4
      } else {
         log::debug!("try_load: nothing to do (incoming amend={})", incoming.amend);
         return false;
      };

      log::debug!("try_load: rule {rule} loaded draft (amend={})", incoming.amend);
      self.load_snapshot(incoming);
      true
   }

   /// Trade the two slots, keeping the live edits of the outgoing draft.
   pub fn swap_slots(&mut self) {
      self.capture();
      self.live.clear();
      mem::swap(&mut self.current, &mut self.previous);
      self.live.restore(&self.current);
      self.amend = self.current.amend;
      log::debug!("swapped slots: amend={}", self.amend);
   }

   /// Replace the live fields with `snapshot`; slot assignment is untouched.
   pub fn load_snapshot(&mut self, snapshot: &DraftSnapshot) {
      self.live.clear();
      self.live.restore(snapshot);
   }

   /// Flip between the new-commit and amend drafts.
   pub fn toggle_amend(&mut self) {
      self.swap_slots();
   }

   fn capture(&mut self) {
      self.current.amend = self.amend;
      self.current.emoji = self.live.emoji.clone();
      self.current.summary = self.live.summary.clone();
      self.current.body = self.live.body.clone();
   }

   /// The live draft as a standalone value.
   pub fn snapshot(&self) -> DraftSnapshot {
      DraftSnapshot {
         amend:   self.amend,
         emoji:   self.live.emoji.clone(),
         summary: self.live.summary.clone(),
         body:    self.live.body.clone(),
      }
   }

   pub const fn origin(&self) -> Origin {
      self.origin
   }

   pub const fn amend(&self) -> bool {
      self.amend
   }

   pub const fn emoji(&self) -> &Emoji {
      &self.live.emoji
   }

   pub fn summary(&self) -> &str {
      &self.live.summary
   }

   pub fn body(&self) -> &str {
      &self.live.body
   }

   pub const fn live(&self) -> &DraftFields {
      &self.live
   }

   pub fn set_emoji(&mut self, emoji: Emoji) {
      self.live.emoji = emoji;
   }

   pub fn set_summary(&mut self, summary: impl Into<String>) {
      self.live.summary = summary.into();
   }

   pub fn set_body(&mut self, body: impl Into<String>) {
      self.live.body = body.into();
   }

   /// Live slot as of the last capture (live edits are not reflected).
   pub const fn current_slot(&self) -> &DraftSnapshot {
      &self.current
   }

   pub const fn previous_slot(&self) -> &DraftSnapshot {
      &self.previous
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   fn emoji(name: &str) -> Emoji {
      Emoji {
         character:   String::new(),
         shortcode:   format!(":{name}:"),
         name:        name.to_string(),
         description: String::new(),
      }
   }

   fn draft(amend: bool, summary: &str) -> DraftSnapshot {
      DraftSnapshot { amend, summary: summary.to_string(), ..Default::default() }
   }

   fn head_seed() -> DraftSnapshot {
      DraftSnapshot {
         amend:   true,
         emoji:   emoji("bug"),
         summary: "fixed crash".to_string(),
         body:    "details".to_string(),
      }
   }

   // === new ===

   #[test]
   fn test_new_amend_binds_seed() {
      let store = SessionStore::new(Origin::Cli, true, head_seed());
      assert!(store.amend());
      assert_eq!(store.summary(), "fixed crash");
      assert_eq!(store.body(), "details");
      assert_eq!(store.emoji().name, "bug");
      assert!(store.current_slot().amend);
      assert!(!store.previous_slot().amend);
      assert!(!store.previous_slot().has_content());
   }

   #[test]
   fn test_new_cli_without_amend_parks_seed() {
      let store = SessionStore::new(Origin::Cli, false, head_seed());
      assert!(!store.amend());
      assert_eq!(store.summary(), "");
      assert_eq!(store.live(), &DraftFields::default());
      assert_eq!(store.previous_slot().summary, "fixed crash");
      assert!(store.previous_slot().amend);
   }

   #[test]
   fn test_new_message_file_without_amend_fills_both() {
      let seed = draft(false, "from hook");
      let store = SessionStore::new(Origin::MessageFile, false, seed);
      assert_eq!(store.summary(), "from hook");
      assert!(!store.current_slot().amend);
      assert_eq!(store.previous_slot().summary, "from hook");
      assert!(store.previous_slot().amend);
   }

   // === swap_slots ===

   #[test]
   fn test_swap_twice_restores() {
      let store = SessionStore::new(Origin::Cli, true, head_seed());
      let mut swapped = store.clone();
      swapped.swap_slots();
      swapped.swap_slots();
      assert_eq!(swapped.current_slot(), store.current_slot());
      assert_eq!(swapped.previous_slot(), store.previous_slot());
      assert_eq!(swapped.live(), store.live());
      assert_eq!(swapped.amend(), store.amend());
   }

   #[test]
   fn test_swap_preserves_live_edits() {
      let mut store = SessionStore::new(Origin::Cli, false, head_seed());
      store.set_summary("new work");
      store.set_body("typed body");

      store.toggle_amend();
      assert!(store.amend());
      assert_eq!(store.summary(), "fixed crash");

      store.set_summary("fixed crash harder");
      store.toggle_amend();
      assert!(!store.amend());
      assert_eq!(store.summary(), "new work");
      assert_eq!(store.body(), "typed body");

      store.toggle_amend();
      assert_eq!(store.summary(), "fixed crash harder");
   }

   #[test]
   fn test_swap_keeps_amend_invariant() {
      let mut store = SessionStore::new(Origin::Cli, false, head_seed());
      for _ in 0..3 {
         store.swap_slots();
         assert_eq!(store.current_slot().amend, store.amend());
         assert_ne!(store.previous_slot().amend, store.amend());
      }
   }

   // === try_load ===

   #[test]
   fn test_try_load_rule1_amend_into_current() {
      let mut store = SessionStore::new(Origin::Cli, true, head_seed());
      let previous = store.previous_slot().clone();

      assert!(store.try_load(&draft(true, "restored amend")));
      assert!(store.amend());
      assert_eq!(store.summary(), "restored amend");
      assert_eq!(store.previous_slot(), &previous);
   }

   #[test]
   fn test_try_load_rule2_amend_swaps_in() {
      let mut store = SessionStore::new(Origin::Cli, false, head_seed());
      store.set_summary("unsaved new work");

      assert!(store.try_load(&draft(true, "restored amend")));
      assert!(store.amend());
      assert_eq!(store.summary(), "restored amend");
      assert_eq!(store.previous_slot().summary, "unsaved new work");
      assert!(!store.previous_slot().amend);
   }

   #[test]
   fn test_try_load_rule3_content_into_new_draft() {
      let mut store = SessionStore::new(Origin::Cli, false, head_seed());

      assert!(store.try_load(&draft(false, "restored new")));
      assert!(!store.amend());
      assert_eq!(store.summary(), "restored new");
      assert_eq!(store.previous_slot().summary, "fixed crash");
   }

   #[test]
   fn test_try_load_rule4_content_swaps_to_new_draft() {
      let mut store = SessionStore::new(Origin::Cli, true, head_seed());
      store.set_body("edited amend body");

      let incoming = DraftSnapshot { emoji: emoji("sparkles"), ..Default::default() };
      assert!(store.try_load(&incoming));
      assert!(!store.amend());
      assert_eq!(store.emoji().name, "sparkles");
      assert_eq!(store.summary(), "");
      assert_eq!(store.previous_slot().body, "edited amend body");
      assert!(store.previous_slot().amend);
   }

   #[test]
   fn test_try_load_empty_is_noop() {
      let mut store = SessionStore::new(Origin::Cli, false, DraftSnapshot::default());
      // Force both slots to non-amend to reach rule 5 with no amend slot at all
      store.previous.amend = false;
      let before = store.clone();

      assert!(!store.try_load(&DraftSnapshot::default()));
      assert_eq!(store.current_slot(), before.current_slot());
      assert_eq!(store.previous_slot(), before.previous_slot());
      assert_eq!(store.live(), before.live());
   }

   #[test]
   fn test_try_load_empty_non_amend_with_amend_slots() {
      let mut store = SessionStore::new(Origin::Cli, true, head_seed());
      assert!(!store.try_load(&DraftSnapshot::default()));
      assert_eq!(store.summary(), "fixed crash");
   }

   #[test]
   fn test_try_load_nameless_emoji_is_empty() {
      let mut store = SessionStore::new(Origin::Cli, true, head_seed());
      let incoming = DraftSnapshot {
         emoji: Emoji { character: "🐛".to_string(), ..Default::default() },
         ..Default::default()
      };
      assert!(!store.try_load(&incoming));
   }

   // === load_snapshot ===

   #[test]
   fn test_load_snapshot_replaces_live_only() {
      let mut store = SessionStore::new(Origin::Cli, true, head_seed());
      let current = store.current_slot().clone();
      let previous = store.previous_slot().clone();

      store.load_snapshot(&DraftSnapshot {
         amend:   false,
         emoji:   Emoji::default(),
         summary: "imported".to_string(),
         body:    String::new(),
      });

      assert_eq!(store.summary(), "imported");
      assert_eq!(store.body(), "");
      assert_eq!(store.emoji(), &Emoji::default());
      assert!(store.amend());
      assert_eq!(store.current_slot(), &current);
      assert_eq!(store.previous_slot(), &previous);
   }

   #[test]
   fn test_snapshot_reflects_live() {
      let mut store = SessionStore::new(Origin::Cli, false, head_seed());
      store.set_emoji(emoji("memo"));
      store.set_summary("documented config");
      let snap = store.snapshot();
      assert!(!snap.amend);
      assert_eq!(snap.emoji.name, "memo");
      assert_eq!(snap.summary, "documented config");
   }
}
