use std::io::{Result as IOResult, Write};

use crate::xml_tree::Element;

pub const DEFAULT_MAX_CHILDREN: usize = 7;

/// Writes an indented outline of `element`, one line per element:
/// tabs for depth, tag, own text (or `-`), attributes.
/// Only the first `max_children` children of every element are visited.
pub fn dump<W: Write>(element: &Element, max_children: usize, writer: &mut W) -> IOResult<()> {
  dump_at(element, 0, max_children, writer)
}

pub fn dump_to_string(element: &Element, max_children: usize) -> String {
  let mut buf = vec![];
  // writing into a Vec cannot fail
  let _ = dump(element, max_children, &mut buf);
  String::from_utf8_lossy(&buf).into_owned()
}

fn dump_at<W: Write>(
  element: &Element,
  depth: usize,
  max_children: usize,
  writer: &mut W,
) -> IOResult<()> {
  writeln!(
    writer,
    "{}{}\t{}\t{}",
    "\t".repeat(depth),
    element.tag,
    describe_text(element),
    describe_attributes(element)
  )?;
  for child in element.children.iter().take(max_children) {
    dump_at(child, depth + 1, max_children, writer)?;
  }
  Ok(())
}

fn describe_text(element: &Element) -> String {
  match element.text().map(str::trim) {
    Some(text) if !text.is_empty() => text.replace('\n', " "),
    _ => String::from("-"),
  }
}

fn describe_attributes(element: &Element) -> String {
  let attributes: Vec<String> = element
    .attributes
    .iter()
    .map(|(key, value)| format!("{}={:?}", key, value))
    .collect();
  format!("{{{}}}", attributes.join(", "))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_dump() {
    let root = Element::parse(
      r#"<Lexicon id="oewn"><Synset id="s1"><Definition>a thing</Definition></Synset></Lexicon>"#,
    )
    .unwrap();
    assert_eq!(
      "Lexicon\t-\t{id=\"oewn\"}\n\tSynset\t-\t{id=\"s1\"}\n\t\tDefinition\ta thing\t{}\n",
      dump_to_string(&root, DEFAULT_MAX_CHILDREN)
    );
  }

  #[test]
  fn test_dump_limits_children() {
    let root = Element::parse("<a><b/><b/><b/><b/></a>").unwrap();
    let dumped = dump_to_string(&root, 2);
    assert_eq!(3, dumped.lines().count());
    assert_eq!(4, dump_to_string(&root, 3).lines().count());
  }

  #[test]
  fn test_dump_is_repeatable() {
    let root = Element::parse("<a><b><c/></b></a>").unwrap();
    assert_eq!(
      dump_to_string(&root, DEFAULT_MAX_CHILDREN),
      dump_to_string(&root, DEFAULT_MAX_CHILDREN)
    );
    assert_eq!(
      "a\t-\t{}\n\tb\t-\t{}\n\t\tc\t-\t{}\n",
      dump_to_string(&root, DEFAULT_MAX_CHILDREN)
    );
  }
}
