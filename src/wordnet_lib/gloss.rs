//! Definitions and examples ("glosses") of a synset.
//!
//! Sources pad synsets with placeholder glosses: empty elements, a lone
//! headword, a single code such as `-`. Only glosses made of more than one
//! space-separated token are kept.

use crate::xml_tree::Element;

/// True when `text`, once trimmed, still contains an ASCII space.
///
/// Only U+0020 separates tokens: hyphenated compounds (`well-known`) and
/// words joined by tabs or other whitespace count as a single token, while
/// punctuation separated by a space (`- -`) counts as two.
pub fn is_multi_token(text: &str) -> bool {
  text.trim().contains(' ')
}

/// Trimmed text of every element that passes [`is_multi_token`], in order,
/// keeping at most `limit` of them. Elements without text read as empty.
pub fn collect_glosses<'a, I>(elements: I, limit: Option<usize>) -> Vec<String>
where
  I: Iterator<Item = &'a Element>,
{
  let glosses = elements
    .map(|element| element.text().unwrap_or("").trim())
    .filter(|text| is_multi_token(text))
    .map(str::to_string);
  match limit {
    Some(limit) => glosses.take(limit).collect(),
    None => glosses.collect(),
  }
}
