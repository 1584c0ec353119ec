use std::collections::BTreeSet;
use std::io::{Error as IOError, Read, Write};

use serde::{Deserialize, Serialize};
use serde_json::error::Error as SerdeError;
use thiserror::Error;

use super::lexical_entry::Words;
use super::synset::Synsets;

#[derive(Error, Debug)]
pub enum DocumentErr {
  #[error("{0}")]
  IOError(#[from] IOError),
  #[error("{0}")]
  SerdeError(#[from] SerdeError),
}

/// The JSON lookup document of one corpus.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WordNetDocument {
  pub pos_tags: BTreeSet<String>,
  pub synsets: Synsets,
  pub words: Words,
}

impl WordNetDocument {
  pub fn new(pos_tags: BTreeSet<String>, synsets: Synsets, words: Words) -> WordNetDocument {
    WordNetDocument {
      pos_tags,
      synsets,
      words,
    }
  }
  /// Writes indented JSON. Non-ASCII text is written as is.
  pub fn write_json<W: Write>(&self, writer: &mut W) -> Result<(), DocumentErr> {
    serde_json::to_writer_pretty(&mut *writer, self)?;
    writer.flush()?;
    Ok(())
  }
  pub fn to_json_string(&self) -> Result<String, DocumentErr> {
    Ok(serde_json::to_string_pretty(self)?)
  }
  pub fn from_json<R: Read>(reader: R) -> Result<WordNetDocument, DocumentErr> {
    Ok(serde_json::from_reader(reader)?)
  }
}
