//! Fuzzy ranking for the emoji, author and theme pickers.
//!
//! Every picker entry exposes one or more search terms through
//! [`Searchable`]. [`rank`] scores each term against the typed filter with the
//! [`nucleo`] matcher and returns entry indices, best match first, each index
//! at most once.
//!
//! Filters shorter than [`MIN_TERM_LEN`] characters do not narrow the list: a
//! one or two character fuzzy pattern matches nearly everything, so the
//! original order is kept instead.
use std::cell::RefCell;

use indexmap::IndexSet;
use nucleo::{
   Config, Matcher,
   pattern::{Atom, AtomKind, CaseMatching, Normalization},
};

use crate::types::{Author, Emoji, Theme};

/// Shortest filter that actually reorders a list.
pub const MIN_TERM_LEN: usize = 3;

/// An entry that can be matched by the pickers.
pub trait Searchable {
   /// Independently matchable strings, in priority order.
   fn terms(&self) -> Vec<&str>;
}

impl Searchable for Emoji {
   fn terms(&self) -> Vec<&str> {
      vec![self.description.as_str(), self.shortcode.as_str()]
   }
}

impl Searchable for Author {
   fn terms(&self) -> Vec<&str> {
      vec![self.name.as_str(), self.email.as_str()]
   }
}

impl Searchable for Theme {
   fn terms(&self) -> Vec<&str> {
      vec![self.name.as_str(), self.description.as_str()]
   }
}

impl Searchable for String {
   fn terms(&self) -> Vec<&str> {
      vec![self.as_str()]
   }
}

impl<T: AsRef<str>> Searchable for [T] {
   fn terms(&self) -> Vec<&str> {
      self.iter().map(|term| term.as_ref()).collect()
   }
}

impl<T: AsRef<str>> Searchable for Vec<T> {
   fn terms(&self) -> Vec<&str> {
      self.as_slice().terms()
   }
}

/// One search term tagged with the entry it belongs to.
struct Candidate<'a> {
   index: usize,
   term:  &'a str,
}

impl AsRef<str> for Candidate<'_> {
   fn as_ref(&self) -> &str {
      self.term
   }
}

thread_local! {
   static MATCHER: RefCell<Matcher> = RefCell::new(Matcher::new(Config::DEFAULT));
}

/// Rank `items` against `term` using a thread-local matcher.
pub fn rank<T: Searchable>(term: &str, items: &[T]) -> Vec<usize> {
   MATCHER.with(|matcher| rank_with(&mut matcher.borrow_mut(), term, items))
}

/// Rank using a caller-provided matcher.
pub fn rank_with<T: Searchable>(matcher: &mut Matcher, term: &str, items: &[T]) -> Vec<usize> {
   if items.is_empty() {
      return Vec::new();
   }
   if term.chars().count() < MIN_TERM_LEN {
      return (0..items.len()).collect();
   }

   let candidates = items.iter().enumerate().flat_map(|(index, item)| {
      item
         .terms()
         .into_iter()
         .map(move |term| Candidate { index, term })
   });

   let pattern = Atom::new(term, CaseMatching::Ignore, Normalization::Smart, AtomKind::Fuzzy, false);
   // match_list sorts stably by descending score
   let scored = pattern.match_list(candidates, matcher);
   log::trace!("rank {term:?}: {} of {} entries matched a term", scored.len(), items.len());

   let ranked: IndexSet<usize> = scored
      .into_iter()
      .map(|(candidate, _score)| candidate.index)
      .collect();
   ranked.into_iter().collect()
}
