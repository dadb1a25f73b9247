//! In-memory configuration built from parse events.
//!
//! [`ConfigDocument`] is an [`EventSink`] that keeps what it is told:
//! sections in first-declaration order, entries in declaration order
//! within each section.
//!
//! - The default section (empty name) always exists and comes first.
//! - A section declared twice is resumed; later entries append to it.
//! - An entry name repeated within a section replaces the earlier value
//!   in place.
//!
//! # Example
//!
//! ```
//! use blacknot_config::ConfigDocument;
//!
//! let doc = ConfigDocument::parse(b"debug = \"yes\"\n[net]\nhost = \"localhost\"\n").unwrap();
//! assert_eq!(doc.get_str("", "debug"), Some("yes"));
//! assert_eq!(doc.get_str("net", "host"), Some("localhost"));
//! assert_eq!(doc.get("net", "port"), None);
//! ```

use std::collections::HashMap;
use std::io::Read;
use std::ops::ControlFlow;
use std::path::Path;

use crate::error::ParseError;
use crate::event::EventSink;
use crate::limits::Limits;
use crate::parser::Parser;
use crate::position::Position;
use crate::source::{CharSource, FileSource, ReaderSource, SliceSource};

/// One `name = "value"` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: String,
    value: Vec<u8>,
    position: Position,
}

impl Entry {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unescaped value bytes. Values are copied verbatim from the
    /// input and need not be UTF-8.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// The value as text, if it is valid UTF-8.
    pub fn value_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.value).ok()
    }

    /// Where the entry's name starts (of the last declaration that set it).
    pub fn position(&self) -> Position {
        self.position
    }
}

/// A named group of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<Entry>,
    /// Entry name -> index into `entries`
    index: HashMap<String, usize>,
}

impl Section {
    fn new(name: String) -> Self {
        Self {
            name,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Section name; empty for the default section.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.index.get(name).map(|&idx| &self.entries[idx])
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entry(name).map(Entry::value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn set(&mut self, name: &str, value: &[u8], position: Position) {
        match self.index.get(name) {
            Some(&idx) => {
                let entry = &mut self.entries[idx];
                entry.value.clear();
                entry.value.extend_from_slice(value);
                entry.position = position;
            }
            None => {
                self.index.insert(name.to_owned(), self.entries.len());
                self.entries.push(Entry {
                    name: name.to_owned(),
                    value: value.to_vec(),
                    position,
                });
            }
        }
    }
}

/// A parsed configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    /// `sections[0]` is the default section
    sections: Vec<Section>,
    /// Section name -> index into `sections`
    index: HashMap<String, usize>,
}

impl ConfigDocument {
    /// An empty document holding only the default section.
    pub fn new() -> Self {
        Self {
            sections: vec![Section::new(String::new())],
            index: HashMap::from([(String::new(), 0)]),
        }
    }

    /// Parse an in-memory buffer.
    pub fn parse(input: &[u8]) -> Result<Self, ParseError> {
        Self::parse_with_limits(input, Limits::default())
    }

    pub fn parse_with_limits(input: &[u8], limits: Limits) -> Result<Self, ParseError> {
        Self::from_source(SliceSource::new(input), limits)
    }

    /// Parse everything a reader yields.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ParseError> {
        Self::from_reader_with_limits(reader, Limits::default())
    }

    pub fn from_reader_with_limits<R: Read>(reader: R, limits: Limits) -> Result<Self, ParseError> {
        Self::from_source(ReaderSource::new(reader), limits)
    }

    /// Parse a file. A missing or unreadable file is [`ParseError::Start`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        Self::load_with_limits(path, Limits::default())
    }

    pub fn load_with_limits(path: impl AsRef<Path>, limits: Limits) -> Result<Self, ParseError> {
        Self::from_source(FileSource::new(path), limits)
    }

    /// Parse from any character source.
    pub fn from_source<S: CharSource>(source: S, limits: Limits) -> Result<Self, ParseError> {
        let mut parser = Parser::with_limits(source, Self::new(), limits);
        parser.parse()?;
        Ok(parser.into_sink())
    }

    /// The default (unnamed) section.
    pub fn default_section(&self) -> &Section {
        &self.sections[0]
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.index.get(name).map(|&idx| &self.sections[idx])
    }

    /// All sections, default section first.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Value of `name` in `section` (`""` for the default section).
    pub fn get(&self, section: &str, name: &str) -> Option<&[u8]> {
        self.section(section)?.get(name)
    }

    pub fn get_str(&self, section: &str, name: &str) -> Option<&str> {
        self.section(section)?.entry(name)?.value_str()
    }

    /// Total number of entries across all sections.
    pub fn len(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Section::is_empty)
    }

    fn section_mut(&mut self, name: &str) -> &mut Section {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                let idx = self.sections.len();
                self.index.insert(name.to_owned(), idx);
                self.sections.push(Section::new(name.to_owned()));
                idx
            }
        };
        &mut self.sections[idx]
    }
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Names are ASCII by construction, so the lossy conversion never alters them.
fn ascii(name: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(name)
}

impl EventSink for ConfigDocument {
    fn new_section(&mut self, name: &[u8], _position: Position) -> ControlFlow<()> {
        self.section_mut(&ascii(name));
        ControlFlow::Continue(())
    }

    fn new_entry(
        &mut self,
        section: &[u8],
        name: &[u8],
        value: &[u8],
        position: Position,
    ) -> ControlFlow<()> {
        self.section_mut(&ascii(section)).set(&ascii(name), value, position);
        ControlFlow::Continue(())
    }
}
