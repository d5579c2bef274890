//! Shared quick-xml plumbing for the IMS feeds.
//!
//! Both feeds describe a day as a `<TimeUnitData>` block holding a `<Date>`
//! followed by `<Element>` name/value pairs:
//!
//! ```xml
//! <TimeUnitData>
//!   <Date>2025-12-04</Date>
//!   <Element>
//!     <ElementName>Maximum temperature</ElementName>
//!     <ElementValue>27</ElementValue>
//!   </Element>
//! </TimeUnitData>
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use forecast_common::time::parse_date;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::warn;

use crate::error::{ParseError, Result};

/// One `<TimeUnitData>` block.
#[derive(Debug, Clone, PartialEq)]
pub struct DayElements {
    pub date: NaiveDate,
    pub elements: BTreeMap<String, String>,
}

impl DayElements {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.elements
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Parse an element value, logging and discarding values that do not parse.
    pub fn number<T: FromStr>(&self, name: &str) -> Option<T> {
        let raw = self.get(name)?;
        match raw.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(element = name, value = raw, date = %self.date, "Unparseable element value");
                None
            }
        }
    }
}

/// A parsing event with the path of open element names leading to it.
pub(crate) enum Node<'p> {
    Open(&'p [String]),
    Text(&'p [String], &'p str),
    Close(&'p [String]),
}

/// Innermost element name of a path.
pub(crate) fn tag(path: &[String]) -> &str {
    path.last().map(String::as_str).unwrap_or("")
}

/// Name of the element enclosing the innermost one.
pub(crate) fn parent(path: &[String]) -> &str {
    path.len()
        .checked_sub(2)
        .and_then(|i| path.get(i))
        .map(String::as_str)
        .unwrap_or("")
}

/// Stream a document through `visit`, tracking the open element path.
pub(crate) fn walk<F>(xml: &str, mut visit: F) -> Result<()>
where
    F: FnMut(Node<'_>) -> Result<()>,
{
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut path: Vec<String> = Vec::new();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(source) => {
                return Err(ParseError::Xml {
                    position: reader.buffer_position(),
                    source,
                })
            }
        };

        match event {
            Event::Start(e) => {
                path.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                visit(Node::Open(&path))?;
            }
            Event::Empty(e) => {
                path.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                visit(Node::Open(&path))?;
                visit(Node::Close(&path))?;
                path.pop();
            }
            Event::End(_) => {
                visit(Node::Close(&path))?;
                path.pop();
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(|source| ParseError::Xml {
                    position: reader.buffer_position(),
                    source,
                })?;
                visit(Node::Text(&path, text.as_ref()))?;
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                visit(Node::Text(&path, &text))?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(())
}

/// Accumulates one `<TimeUnitData>` block while it is being read.
#[derive(Debug, Default)]
pub(crate) struct DayCollector {
    date: Option<NaiveDate>,
    elements: BTreeMap<String, String>,
    pending_name: Option<String>,
    pending_value: Option<String>,
}

impl DayCollector {
    pub(crate) fn text(&mut self, tag: &str, text: &str) -> Result<()> {
        match tag {
            "Date" => self.date = Some(parse_date(text)?),
            "ElementName" => self.pending_name = Some(text.trim().to_string()),
            "ElementValue" => self.pending_value = Some(text.to_string()),
            _ => {}
        }
        Ok(())
    }

    pub(crate) fn open_element(&mut self) {
        self.pending_name = None;
        self.pending_value = None;
    }

    pub(crate) fn close_element(&mut self) {
        if let (Some(name), Some(value)) = (self.pending_name.take(), self.pending_value.take()) {
            self.elements.insert(name, value);
        }
    }

    pub(crate) fn finish(self) -> Option<DayElements> {
        match self.date {
            Some(date) => Some(DayElements {
                date,
                elements: self.elements,
            }),
            None => {
                warn!(
                    elements = self.elements.len(),
                    "Skipping <TimeUnitData> without a <Date>"
                );
                None
            }
        }
    }
}
