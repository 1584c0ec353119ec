use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use log::{debug, info};
use thiserror::Error;

use super::id_prefix::{IdPrefix, IdPrefixErr};
use super::{LEXICAL_ENTRY_TAG, PROGRESS_INTERVAL};
use crate::xml_tree::{Element, XmlTreeErr};

const LEMMA_TAG: &str = "Lemma";
const SENSE_TAG: &str = "Sense";

/// Word forms with more spaces than this are phrases, not lemmas.
pub const MAX_WORD_SPACES: usize = 2;

/// Senses of one word form, keyed by part of speech.
pub type WordSenses = BTreeMap<String, Vec<String>>;
pub type Words = BTreeMap<String, WordSenses>;

#[derive(Error, Debug)]
pub enum LexicalEntryErr {
  #[error("{0}")]
  XmlTreeErr(#[from] XmlTreeErr),
  #[error("{0}")]
  IdPrefixErr(#[from] IdPrefixErr),
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("{0} is invalid merge policy")]
pub struct InvalidMergePolicyErr(pub String);

pub trait MergeSenses {
  /// Combines the senses already stored for a (word, part of speech) pair
  /// with the senses of a later entry for the same pair.
  fn merge(&self, existing: &mut Vec<String>, incoming: Vec<String>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
  /// The later entry replaces the earlier senses.
  Overwrite,
  /// Senses of the later entry not seen yet are appended.
  Union,
}

impl Default for MergePolicy {
  fn default() -> MergePolicy {
    MergePolicy::Overwrite
  }
}

impl FromStr for MergePolicy {
  type Err = InvalidMergePolicyErr;
  fn from_str(s: &str) -> Result<MergePolicy, InvalidMergePolicyErr> {
    match s {
      "overwrite" => Ok(MergePolicy::Overwrite),
      "union" => Ok(MergePolicy::Union),
      _ => Err(InvalidMergePolicyErr(s.to_string())),
    }
  }
}

impl MergeSenses for MergePolicy {
  fn merge(&self, existing: &mut Vec<String>, incoming: Vec<String>) {
    match self {
      MergePolicy::Overwrite => *existing = incoming,
      MergePolicy::Union => {
        for id in incoming {
          if !existing.contains(&id) {
            existing.push(id);
          }
        }
      }
    }
  }
}

#[derive(Debug, Default)]
pub struct LexicalEntries {
  pub words: Words,
  pub pos_tags: BTreeSet<String>,
  /// Entries examined, skipped ones included.
  pub processed: usize,
  /// Entries dropped for an over-long word form.
  pub skipped: usize,
  /// Entries whose word form had already been stored.
  pub repeated: usize,
}

pub fn is_overlong(word: &str) -> bool {
  word.matches(' ').count() > MAX_WORD_SPACES
}

pub struct LexicalEntryExtractor<'a, M: MergeSenses = MergePolicy> {
  prefix: &'a IdPrefix,
  merge: M,
}

impl<'a> LexicalEntryExtractor<'a> {
  pub fn new(prefix: &'a IdPrefix) -> LexicalEntryExtractor<'a> {
    LexicalEntryExtractor::with_merge(prefix, MergePolicy::default())
  }
}

impl<'a, M: MergeSenses> LexicalEntryExtractor<'a, M> {
  pub fn with_merge(prefix: &'a IdPrefix, merge: M) -> LexicalEntryExtractor<'a, M> {
    LexicalEntryExtractor { prefix, merge }
  }

  pub fn extract(&self, lexicon: &Element) -> Result<LexicalEntries, LexicalEntryErr> {
    info!("reading the lexical entries...");
    let mut entries = LexicalEntries::default();
    for (i, entry) in lexicon.find_all(LEXICAL_ENTRY_TAG).enumerate() {
      if i % PROGRESS_INTERVAL == 0 {
        info!("processed {} lexical entries...", i);
      }
      entries.processed += 1;
      self.add_entry(entry, &mut entries)?;
    }
    info!(
      "{} words, {} part of speech tags",
      entries.words.len(),
      entries.pos_tags.len()
    );
    Ok(entries)
  }

  fn add_entry(&self, entry: &Element, entries: &mut LexicalEntries) -> Result<(), LexicalEntryErr> {
    let lemma = entry.required_child(LEMMA_TAG)?;
    let word = lemma.get("writtenForm").unwrap_or("").trim();
    if is_overlong(word) {
      entries.skipped += 1;
      return Ok(());
    }
    let pos = lemma.get("partOfSpeech").unwrap_or("");
    entries.pos_tags.insert(pos.to_string());

    let mut senses = vec![];
    for sense in entry.find_all(SENSE_TAG) {
      senses.push(self.prefix.strip(sense.required_attr("synset")?)?);
    }
    if word.is_empty() || senses.is_empty() {
      return Ok(());
    }

    match entries.words.get_mut(word) {
      Some(by_pos) => {
        entries.repeated += 1;
        debug!("repeated word form: {}", word);
        match by_pos.get_mut(pos) {
          Some(existing) => self.merge.merge(existing, senses),
          None => {
            by_pos.insert(pos.to_string(), senses);
          }
        }
      }
      None => {
        let mut by_pos = WordSenses::new();
        by_pos.insert(pos.to_string(), senses);
        entries.words.insert(word.to_string(), by_pos);
      }
    }
    Ok(())
  }
}
