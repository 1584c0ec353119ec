//! ```
//! use wnconv::prelude::*;
//!
//! let root = Element::parse(r#"
//! <LexicalResource>
//!   <Lexicon id="oewn">
//!     <LexicalEntry id="oewn-dog-n">
//!       <Lemma writtenForm="dog" partOfSpeech="n"/>
//!       <Sense id="oewn-dog__1.05.00__" synset="oewn-02086723-n"/>
//!     </LexicalEntry>
//!     <Synset id="oewn-02086723-n">
//!       <Definition>a member of the genus Canis</Definition>
//!       <Example>the dog barked all night</Example>
//!     </Synset>
//!   </Lexicon>
//! </LexicalResource>"#).unwrap();
//!
//! let (document, _) = build_document(&root, &IdPrefix::new("oewn-"), MergePolicy::Overwrite).unwrap();
//!
//! println!("{:?}", document.words["dog"]["n"]);
//! // => ["02086723-n"]
//! println!("{:?}", document.synsets["02086723-n"].defs);
//! // => ["a member of the genus Canis"]
//!
//! // Writing a whole corpus to disk
//! // let stats = convert(&Conversion::new("en.xml", "en.json", "oewn-")).unwrap();
//! ```

pub mod config;
pub mod debug_tree;
pub mod resources;
pub mod wordnet_lib;
pub mod xml_tree;

pub mod prelude {
  pub use crate::wordnet_lib::converter::{build_document, convert, Conversion};
  pub use crate::wordnet_lib::document::WordNetDocument;
  pub use crate::wordnet_lib::id_prefix::IdPrefix;
  pub use crate::wordnet_lib::lexical_entry::MergePolicy;
  pub use crate::xml_tree::Element;
}
