pub mod converter;
pub mod document;
pub mod gloss;
pub mod id_prefix;
pub mod lexical_entry;
pub mod synset;

/// A progress notice is logged every this many records.
pub const PROGRESS_INTERVAL: usize = 10_000;

pub const LEXICON_TAG: &str = "Lexicon";
pub const SYNSET_TAG: &str = "Synset";
pub const LEXICAL_ENTRY_TAG: &str = "LexicalEntry";
