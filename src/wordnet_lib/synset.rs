use std::collections::BTreeMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::gloss::collect_glosses;
use super::id_prefix::{IdPrefix, IdPrefixErr};
use super::{PROGRESS_INTERVAL, SYNSET_TAG};
use crate::xml_tree::{Element, XmlTreeErr};

const DEFINITION_TAG: &str = "Definition";
const EXAMPLE_TAG: &str = "Example";
const RELATION_TAG: &str = "SynsetRelation";
const SIMILAR_REL_TYPE: &str = "similar";
const ANTONYM_REL_TYPE: &str = "antonym";

/// Examples kept per synset.
pub const EXAMPLE_LIMIT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SynsetRecord {
  pub defs: Vec<String>,
  pub ex: Vec<String>,
  pub syns: Vec<String>,
  pub ants: Vec<String>,
}

pub type Synsets = BTreeMap<String, SynsetRecord>;

#[derive(Error, Debug)]
pub enum SynsetErr {
  #[error("{0}")]
  XmlTreeErr(#[from] XmlTreeErr),
  #[error("{0}")]
  IdPrefixErr(#[from] IdPrefixErr),
}

pub struct SynsetExtractor<'a> {
  prefix: &'a IdPrefix,
}

impl<'a> SynsetExtractor<'a> {
  pub fn new(prefix: &'a IdPrefix) -> SynsetExtractor<'a> {
    SynsetExtractor { prefix }
  }

  /// Reads every `Synset` under `lexicon`. A repeated id replaces the
  /// record read before it.
  pub fn extract(&self, lexicon: &Element) -> Result<Synsets, SynsetErr> {
    info!("reading the synsets...");
    let mut synsets = Synsets::new();
    for (i, synset) in lexicon.find_all(SYNSET_TAG).enumerate() {
      if i % PROGRESS_INTERVAL == 0 {
        info!("processed {} synsets...", i);
      }
      let (id, record) = self.extract_synset(synset)?;
      if synsets.insert(id, record).is_some() {
        debug!("duplicated synset at position {}", i);
      }
    }
    info!("{} synsets", synsets.len());
    Ok(synsets)
  }

  pub fn extract_synset(&self, synset: &Element) -> Result<(String, SynsetRecord), SynsetErr> {
    let id = self.prefix.strip(synset.required_attr("id")?)?;
    let record = SynsetRecord {
      defs: collect_glosses(synset.find_all(DEFINITION_TAG), None),
      ex: collect_glosses(synset.find_all(EXAMPLE_TAG), Some(EXAMPLE_LIMIT)),
      syns: self.relation_targets(synset, SIMILAR_REL_TYPE)?,
      ants: self.relation_targets(synset, ANTONYM_REL_TYPE)?,
    };
    Ok((id, record))
  }

  fn relation_targets(&self, synset: &Element, rel_type: &str) -> Result<Vec<String>, SynsetErr> {
    synset
      .find_all(RELATION_TAG)
      .filter(|relation| relation.get("relType") == Some(rel_type))
      .map(|relation| -> Result<String, SynsetErr> {
        Ok(self.prefix.strip(relation.required_attr("target")?)?)
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn extract(xml: &str) -> Result<Synsets, SynsetErr> {
    let lexicon = Element::parse(xml).unwrap();
    SynsetExtractor::new(&IdPrefix::new("oewn-")).extract(&lexicon)
  }

  #[test]
  fn test_extract_synset() {
    let synsets = extract(
      r#"<Lexicon>
        <Synset id="oewn-00001740-n">
          <Definition> an act </Definition>
          <Example>go</Example>
        </Synset>
      </Lexicon>"#,
    )
    .unwrap();
    assert_eq!(1, synsets.len());
    assert_eq!(
      SynsetRecord {
        defs: vec![String::from("an act")],
        ex: vec![],
        syns: vec![],
        ants: vec![],
      },
      synsets["00001740-n"]
    );
  }

  #[test]
  fn test_extract_relations() {
    let synsets = extract(
      r#"<Lexicon>
        <Synset id="oewn-00002-a">
          <SynsetRelation relType="similar" target="oewn-00003-s"/>
          <SynsetRelation relType="hypernym" target="oewn-00009-a"/>
          <SynsetRelation relType="antonym" target="oewn-00004-a"/>
          <SynsetRelation relType="similar" target="oewn-00005-s"/>
          <SynsetRelation target="oewn-00006-s"/>
        </Synset>
      </Lexicon>"#,
    )
    .unwrap();
    let record = &synsets["00002-a"];
    assert_eq!(vec!["00003-s", "00005-s"], record.syns);
    assert_eq!(vec!["00004-a"], record.ants);
  }

  #[test]
  fn test_examples_are_capped() {
    let synsets = extract(
      r#"<Lexicon>
        <Synset id="oewn-1-v">
          <Definition>first definition here</Definition>
          <Definition>placeholder</Definition>
          <Definition>second definition here</Definition>
          <Example>one example</Example>
          <Example>x</Example>
          <Example>two examples</Example>
          <Example>three examples</Example>
        </Synset>
      </Lexicon>"#,
    )
    .unwrap();
    let record = &synsets["1-v"];
    assert_eq!(
      vec!["first definition here", "second definition here"],
      record.defs
    );
    assert_eq!(vec!["one example", "two examples"], record.ex);
  }

  #[test]
  fn test_duplicated_id_keeps_last() {
    let synsets = extract(
      r#"<Lexicon>
        <Synset id="oewn-1-n"><Definition>the first one</Definition></Synset>
        <Synset id="oewn-1-n"><Definition>the second one</Definition></Synset>
      </Lexicon>"#,
    )
    .unwrap();
    assert_eq!(1, synsets.len());
    assert_eq!(vec!["the second one"], synsets["1-n"].defs);
  }

  #[test]
  fn test_missing_id() {
    assert!(matches!(
      extract("<Lexicon><Synset/></Lexicon>"),
      Err(SynsetErr::XmlTreeErr(XmlTreeErr::MissingAttributeErr { .. }))
    ));
  }

  #[test]
  fn test_prefix_mismatch() {
    assert!(matches!(
      extract(r#"<Lexicon><Synset id="omw-1-n"/></Lexicon>"#),
      Err(SynsetErr::IdPrefixErr(_))
    ));
    assert!(matches!(
      extract(
        r#"<Lexicon><Synset id="oewn-1-n"><SynsetRelation relType="antonym" target="x-2-n"/></Synset></Lexicon>"#
      ),
      Err(SynsetErr::IdPrefixErr(_))
    ));
  }

  #[test]
  fn test_missing_relation_target() {
    assert!(extract(
      r#"<Lexicon><Synset id="oewn-1-n"><SynsetRelation relType="similar"/></Synset></Lexicon>"#
    )
    .is_err());
  }

  #[test]
  fn test_empty_lexicon() {
    assert!(extract("<Lexicon/>").unwrap().is_empty());
  }
}
