use std::fs::File;
use std::io::{BufReader, Error as IOError, Read};
use std::path::Path;

use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum XmlTreeErr {
  #[error("{0}")]
  IOError(#[from] IOError),
  #[error("{0}")]
  ParseError(#[from] quick_xml::Error),
  #[error("{0}")]
  AttrError(#[from] AttrError),
  #[error("malformed document: {0}")]
  MalformedErr(String),
  #[error("<{element}> has no `{attribute}` attribute")]
  MissingAttributeErr { element: String, attribute: String },
  #[error("<{parent}> has no <{child}> element")]
  MissingElementErr { parent: String, child: String },
}

/// An owned XML element. The whole document is held in memory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
  pub tag: String,
  pub attributes: Vec<(String, String)>,
  pub children: Vec<Element>,
  text: Option<String>,
}

impl Element {
  pub fn new<S: Into<String>>(tag: S) -> Element {
    Element {
      tag: tag.into(),
      ..Default::default()
    }
  }

  pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Element, XmlTreeErr> {
    let mut buf = String::new();
    BufReader::new(File::open(path)?).read_to_string(&mut buf)?;
    Element::parse(&buf)
  }

  /// Parses a complete document and returns its root element.
  pub fn parse(xml: &str) -> Result<Element, XmlTreeErr> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = vec![];
    let mut root: Option<Element> = None;
    loop {
      match reader.read_event()? {
        Event::Start(start) => {
          if root.is_some() {
            return Err(XmlTreeErr::MalformedErr(String::from(
              "element after the root element",
            )));
          }
          stack.push(Element::from_start(&start)?);
        }
        Event::Empty(start) => {
          let element = Element::from_start(&start)?;
          close_element(&mut stack, &mut root, element)?;
        }
        Event::End(end) => {
          let element = stack.pop().ok_or_else(|| {
            XmlTreeErr::MalformedErr(format!(
              "unexpected </{}>",
              String::from_utf8_lossy(end.name().as_ref())
            ))
          })?;
          close_element(&mut stack, &mut root, element)?;
        }
        Event::Text(text) => {
          if let Some(parent) = stack.last_mut() {
            parent.append_text(&text.unescape()?);
          }
        }
        Event::CData(data) => {
          if let Some(parent) = stack.last_mut() {
            parent.append_text(&String::from_utf8_lossy(&data.into_inner()));
          }
        }
        Event::Eof => break,
        _ => (),
      }
    }
    if let Some(open) = stack.last() {
      return Err(XmlTreeErr::MalformedErr(format!("unclosed <{}>", open.tag)));
    }
    root.ok_or_else(|| XmlTreeErr::MalformedErr(String::from("no root element")))
  }

  fn from_start(start: &BytesStart) -> Result<Element, XmlTreeErr> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes() {
      let attr = attr?;
      let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
      let value = attr.unescape_value()?.into_owned();
      element.attributes.push((key, value));
    }
    Ok(element)
  }

  // only text ahead of the first child counts as the element's own text
  fn append_text(&mut self, text: &str) {
    if self.children.is_empty() {
      self.text.get_or_insert_with(String::new).push_str(text);
    }
  }

  pub fn with_attr<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Element {
    self.attributes.push((key.into(), value.into()));
    self
  }

  pub fn with_text<S: Into<String>>(mut self, text: S) -> Element {
    self.text = Some(text.into());
    self
  }

  pub fn with_child(mut self, child: Element) -> Element {
    self.children.push(child);
    self
  }

  pub fn text(&self) -> Option<&str> {
    self.text.as_deref()
  }

  pub fn get(&self, attribute: &str) -> Option<&str> {
    self
      .attributes
      .iter()
      .find(|(key, _)| key == attribute)
      .map(|(_, value)| value.as_str())
  }

  pub fn required_attr(&self, attribute: &str) -> Result<&str, XmlTreeErr> {
    self
      .get(attribute)
      .ok_or_else(|| XmlTreeErr::MissingAttributeErr {
        element: self.tag.clone(),
        attribute: attribute.to_string(),
      })
  }

  pub fn find(&self, tag: &str) -> Option<&Element> {
    self.children.iter().find(|child| child.tag == tag)
  }

  pub fn required_child(&self, tag: &str) -> Result<&Element, XmlTreeErr> {
    self.find(tag).ok_or_else(|| XmlTreeErr::MissingElementErr {
      parent: self.tag.clone(),
      child: tag.to_string(),
    })
  }

  pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
    self.children.iter().filter(move |child| child.tag == tag)
  }

  /// Depth-first search below this element, first match in document order.
  pub fn find_descendant(&self, tag: &str) -> Option<&Element> {
    self.children.iter().find_map(|child| {
      if child.tag == tag {
        Some(child)
      } else {
        child.find_descendant(tag)
      }
    })
  }
}

fn close_element(
  stack: &mut Vec<Element>,
  root: &mut Option<Element>,
  element: Element,
) -> Result<(), XmlTreeErr> {
  match stack.last_mut() {
    Some(parent) => parent.children.push(element),
    None if root.is_none() => *root = Some(element),
    None => {
      return Err(XmlTreeErr::MalformedErr(String::from(
        "multiple root elements",
      )))
    }
  }
  Ok(())
}
