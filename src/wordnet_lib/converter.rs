use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Error as IOError};
use std::path::PathBuf;

use log::{info, warn};
use thiserror::Error;

use super::document::{DocumentErr, WordNetDocument};
use super::id_prefix::IdPrefix;
use super::lexical_entry::{LexicalEntryErr, LexicalEntryExtractor, MergePolicy};
use super::synset::{SynsetErr, SynsetExtractor};
use super::LEXICON_TAG;
use crate::xml_tree::{Element, XmlTreeErr};

#[derive(Error, Debug)]
pub enum ConverterErr {
  #[error("{0}")]
  IOError(#[from] IOError),
  #[error("{0}")]
  XmlTreeErr(#[from] XmlTreeErr),
  #[error("{0}")]
  SynsetErr(#[from] SynsetErr),
  #[error("{0}")]
  LexicalEntryErr(#[from] LexicalEntryErr),
  #[error("{0}")]
  DocumentErr(#[from] DocumentErr),
}

/// One corpus to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
  pub input: PathBuf,
  pub output: PathBuf,
  pub prefix: IdPrefix,
  pub merge_policy: MergePolicy,
}

impl Conversion {
  pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>, S: Into<String>>(
    input: P,
    output: Q,
    prefix: S,
  ) -> Conversion {
    Conversion {
      input: input.into(),
      output: output.into(),
      prefix: IdPrefix::new(prefix),
      merge_policy: MergePolicy::default(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionStats {
  pub synsets: usize,
  pub words: usize,
  pub pos_tags: usize,
  pub lexical_entries: usize,
  pub skipped_entries: usize,
  pub repeated_words: usize,
}

/// Builds the whole document from a parsed tree. The first `Lexicon`
/// below `root` is read.
pub fn build_document(
  root: &Element,
  prefix: &IdPrefix,
  merge_policy: MergePolicy,
) -> Result<(WordNetDocument, ConversionStats), ConverterErr> {
  let lexicon = root
    .find_descendant(LEXICON_TAG)
    .ok_or_else(|| XmlTreeErr::MissingElementErr {
      parent: root.tag.clone(),
      child: LEXICON_TAG.to_string(),
    })?;
  let synsets = SynsetExtractor::new(prefix).extract(lexicon)?;
  let entries = LexicalEntryExtractor::with_merge(prefix, merge_policy).extract(lexicon)?;
  if synsets.is_empty() && entries.words.is_empty() {
    warn!("no synsets and no words in <{}>", LEXICON_TAG);
  }
  let stats = ConversionStats {
    synsets: synsets.len(),
    words: entries.words.len(),
    pos_tags: entries.pos_tags.len(),
    lexical_entries: entries.processed,
    skipped_entries: entries.skipped,
    repeated_words: entries.repeated,
  };
  Ok((
    WordNetDocument::new(entries.pos_tags, synsets, entries.words),
    stats,
  ))
}

/// Converts one corpus. The output file is created only once the whole
/// document has been built, so a failed run leaves no output behind.
pub fn convert(conversion: &Conversion) -> Result<ConversionStats, ConverterErr> {
  info!("reading {}...", conversion.input.display());
  let root = Element::from_path(&conversion.input)?;
  let (document, stats) = build_document(&root, &conversion.prefix, conversion.merge_policy)?;
  drop(root);

  if let Some(dir) = conversion.output.parent() {
    if !dir.as_os_str().is_empty() && !dir.exists() {
      create_dir_all(dir)?;
    }
  }
  info!("writing {}...", conversion.output.display());
  let mut writer = BufWriter::new(File::create(&conversion.output)?);
  document.write_json(&mut writer)?;
  info!(
    "JSON file written successfully: {} ({} synsets, {} words, {} skipped entries, {} repeated words)",
    conversion.output.display(),
    stats.synsets,
    stats.words,
    stats.skipped_entries,
    stats.repeated_words
  );
  Ok(stats)
}

/// Runs every conversion in order, stopping at the first failure.
pub fn convert_all(conversions: &[Conversion]) -> Result<Vec<ConversionStats>, ConverterErr> {
  conversions.iter().map(convert).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::env::temp_dir;
  use std::fs::remove_dir_all;
  use std::path::Path;

  fn sample_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src/resources/test/sample_lmf.xml")
  }

  fn test_dir(name: &str) -> PathBuf {
    let dir = temp_dir().join(format!("wnconv_converter_{}", name));
    if dir.exists() {
      remove_dir_all(&dir).unwrap();
    }
    dir
  }

  #[test]
  fn test_build_document_from_sample() {
    let root = Element::from_path(sample_path()).unwrap();
    let (document, stats) =
      build_document(&root, &IdPrefix::new("oewn-"), MergePolicy::Overwrite).unwrap();

    let act = &document.synsets["00001740-n"];
    assert_eq!(vec!["an act"], act.defs);
    assert!(act.ex.is_empty());
    assert!(act.syns.is_empty());
    assert!(act.ants.is_empty());

    let good = &document.synsets["01123148-a"];
    assert_eq!(vec!["01125429-a"], good.ants);
    assert_eq!(vec!["01123879-s"], good.syns);
    assert_eq!(2, good.ex.len());

    assert_eq!(vec!["00002000-n"], document.words["dog"]["n"]);
    assert_eq!(vec!["01123148-a"], document.words["good"]["a"]);
    assert!(!document.words.contains_key("a b c d"));
    for word in document.words.keys() {
      assert!(word.matches(' ').count() <= 2);
    }
    for record in document.synsets.values() {
      assert!(record.ex.len() <= 2);
      assert!(record.defs.iter().chain(record.ex.iter()).all(|g| g.contains(' ')));
    }

    assert_eq!(
      vec!["a", "n", "s"],
      document.pos_tags.iter().map(String::as_str).collect::<Vec<&str>>()
    );
    assert_eq!(5, stats.lexical_entries);
    assert_eq!(1, stats.skipped_entries);
    assert_eq!(1, stats.repeated_words);
  }

  #[test]
  fn test_build_document_without_lexicon() {
    let root = Element::parse("<LexicalResource/>").unwrap();
    assert!(matches!(
      build_document(&root, &IdPrefix::new("oewn-"), MergePolicy::Overwrite),
      Err(ConverterErr::XmlTreeErr(XmlTreeErr::MissingElementErr { .. }))
    ));
  }

  #[test]
  fn test_convert() {
    let dir = test_dir("convert");
    let output = dir.join("out/en.json");
    let stats = convert(&Conversion::new(sample_path(), &output, "oewn-")).unwrap();
    assert_eq!(4, stats.synsets);

    let document = WordNetDocument::from_json(File::open(&output).unwrap()).unwrap();
    assert_eq!(stats.synsets, document.synsets.len());
    assert_eq!(stats.words, document.words.len());
    remove_dir_all(&dir).unwrap();
  }

  #[test]
  fn test_convert_is_repeatable() {
    let dir = test_dir("repeatable");
    let first = dir.join("first.json");
    let second = dir.join("second.json");
    convert_all(&[
      Conversion::new(sample_path(), &first, "oewn-"),
      Conversion::new(sample_path(), &second, "oewn-"),
    ])
    .unwrap();
    assert_eq!(
      std::fs::read(&first).unwrap(),
      std::fs::read(&second).unwrap()
    );
    remove_dir_all(&dir).unwrap();
  }

  #[test]
  fn test_failed_convert_writes_nothing() {
    let dir = test_dir("failed");
    let output = dir.join("lv.json");
    let result = convert(&Conversion::new(
      sample_path(),
      &output,
      "wordnet_lv-tezaurs_2025_2-",
    ));
    assert!(matches!(result, Err(ConverterErr::SynsetErr(_))));
    assert!(!output.exists());
  }

  #[test]
  fn test_convert_missing_input() {
    let dir = test_dir("missing");
    let result = convert(&Conversion::new(
      dir.join("nothing.xml"),
      dir.join("nothing.json"),
      "oewn-",
    ));
    assert!(matches!(
      result,
      Err(ConverterErr::XmlTreeErr(XmlTreeErr::IOError(_)))
    ));
  }
}
