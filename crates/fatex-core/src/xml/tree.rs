//! Document tree built from quick-xml events, plus path-based field lookup.
//!
//! Every element keeps its children as an ordered list, so a repeating group
//! with exactly one member is still a one-element list - callers never see
//! the bare-scalar-vs-list ambiguity of naive tree-to-object conversion.
//! Element text is kept verbatim: some business markers carry significant
//! trailing whitespace.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::DocumentError;

/// One named node of the parsed document. Names are local names: any
/// namespace prefix is stripped, so lookups work for both `FatturaElettronica`
/// and `p:FatturaElettronica` roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Local name of this element.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw text content, untrimmed. Meaningful only for scalar elements.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// A scalar element carries a value and no nested elements.
    pub fn is_scalar(&self) -> bool {
        self.children.is_empty()
    }

    /// All direct children with the given local name, in document order.
    pub fn children_named<'a>(
        &'a self,
        name: &str,
    ) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// The unique direct child with the given name. Absence is `None`;
    /// more than one match is a shape error, since the caller asked for a
    /// non-repeating node.
    fn single(&self, name: &str, path: &[&str]) -> Result<Option<&Element>, DocumentError> {
        let mut matches = self.children_named(name);
        let first = matches.next();
        if matches.next().is_some() {
            return Err(DocumentError::UnexpectedShape {
                path: path.join("/"),
                expected: "a single element",
            });
        }
        Ok(first)
    }

    /// Walk a path of nested element names starting below this element.
    /// Returns `None` as soon as any segment is absent; errors if a segment
    /// that should be unique repeats.
    pub fn at<'a>(&'a self, path: &[&str]) -> Result<Option<&'a Element>, DocumentError> {
        let mut current = self;
        for (i, segment) in path.iter().enumerate() {
            match current.single(segment, &path[..=i])? {
                Some(child) => current = child,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Resilient scalar lookup: the value at `path`, or `default` if any
    /// segment of the path is absent. A path that resolves to a group where
    /// a scalar was expected is a hard error, never defaulted.
    pub fn scalar_or(&self, path: &[&str], default: &str) -> Result<String, DocumentError> {
        match self.at(path)? {
            Some(el) if el.is_scalar() => Ok(el.text.clone()),
            Some(_) => Err(DocumentError::UnexpectedShape {
                path: path.join("/"),
                expected: "a scalar value",
            }),
            None => Ok(default.to_string()),
        }
    }
}

fn local_name(qname: &[u8]) -> Result<String, DocumentError> {
    let name = std::str::from_utf8(qname)
        .map_err(|e| DocumentError::Encoding(e.to_string()))?;
    Ok(name.rsplit(':').next().unwrap_or(name).to_string())
}

fn attach(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), DocumentError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err(DocumentError::Malformed(
            "multiple root elements".to_string(),
        ))
    }
}

/// Parse a UTF-8 XML document into its root [`Element`].
///
/// Attributes are dropped: the invoice shape carries all data as element
/// text. Comments, processing instructions, and the XML declaration are
/// skipped.
pub fn parse_document(input: &str) -> Result<Element, DocumentError> {
    let mut reader = Reader::from_str(input);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                stack.push(Element::new(local_name(e.name().as_ref())?));
            }
            Ok(Event::Empty(ref e)) => {
                let element = Element::new(local_name(e.name().as_ref())?);
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack.pop().ok_or_else(|| {
                    DocumentError::Malformed("unmatched closing tag".to_string())
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(ref e)) => {
                if let Some(current) = stack.last_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| DocumentError::Malformed(err.to_string()))?;
                    current.text.push_str(&text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(current) = stack.last_mut() {
                    let text = std::str::from_utf8(e)
                        .map_err(|err| DocumentError::Encoding(err.to_string()))?;
                    current.text.push_str(text);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(e.into()),
        }
    }

    if !stack.is_empty() {
        return Err(DocumentError::Malformed(
            "unclosed element at end of input".to_string(),
        ));
    }

    root.ok_or(DocumentError::NoRoot)
}
