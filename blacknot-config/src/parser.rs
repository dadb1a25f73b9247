//! The grammar engine.
//!
//! A single-pass recognizer driven by one byte of lookahead:
//!
//! ```text
//! document := (ws | section | comment | entry)*
//! section  := '[' ws* name ws* ']'
//! comment  := '#' (any but '\n')* ('\n' | EOI)
//! entry    := name ws* '=' ws* '"' (escape | any but '"' or '\')* '"'
//! escape   := '\' ('\' | '"')
//! name     := [A-Za-z] [A-Za-z0-9_]*
//! ```
//!
//! Every recognizer returns `Result` and unwinds on the first failure;
//! there is no resynchronization. The position counters are updated in
//! exactly one place, [`Parser::bump`], so every diagnostic reports the
//! byte that was about to be processed.

use std::ops::ControlFlow;

use tracing::{debug, trace, warn};

use crate::buffer::TokenBuffer;
use crate::class::{is_name_continuer, is_name_starter, is_whitespace};
use crate::error::{ErrorKind, ParseError, SyntaxError};
use crate::event::{Event, EventSink, FnSink};
use crate::limits::Limits;
use crate::position::Position;
use crate::source::{CharSource, SliceSource};

/// Which token buffer a name or value byte goes into.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Section,
    Name,
    Value,
}

/// Streaming parser over a character source, reporting to an event sink.
///
/// All state is owned by the instance and `parse` takes `&mut self`, so
/// one instance runs at most one parse at a time. The token buffers are
/// reserved at construction (see [`TokenBuffer`]) and reused across parses.
#[derive(Debug)]
pub struct Parser<S, K> {
    source: S,
    sink: K,
    limits: Limits,
    position: Position,
    /// Section in effect for new entries (empty = default section)
    current_section: TokenBuffer,
    /// Section header being read; swapped into `current_section` on success
    section: TokenBuffer,
    name: TokenBuffer,
    value: TokenBuffer,
}

impl<S: CharSource, K: EventSink> Parser<S, K> {
    /// Create a parser with the default [`Limits`].
    pub fn new(source: S, sink: K) -> Self {
        Self::with_limits(source, sink, Limits::default())
    }

    pub fn with_limits(source: S, sink: K, limits: Limits) -> Self {
        Self {
            source,
            sink,
            limits,
            position: Position::START,
            current_section: TokenBuffer::new(limits.section_name),
            section: TokenBuffer::new(limits.section_name),
            name: TokenBuffer::new(limits.name),
            value: TokenBuffer::new(limits.value),
        }
    }

    /// Parse the whole input, reporting events to the sink.
    ///
    /// On a grammar violation the sink receives exactly one `error` call
    /// and the same error is returned. Source failures and sink vetoes
    /// are returned without an `error` call. The source's `end` runs even
    /// when parsing failed; its own failure is only reported if parsing
    /// succeeded.
    pub fn parse(&mut self) -> Result<(), ParseError> {
        self.source.start().map_err(ParseError::Start)?;

        self.position = Position::START;
        self.current_section.clear();
        debug!("config parse started");

        let outcome = self.run();
        match &outcome {
            Ok(()) => debug!(bytes = self.position.byte, "config parse finished"),
            Err(ParseError::Syntax(error)) => {
                debug!(
                    kind = ?error.kind,
                    line = error.position.line,
                    column = error.position.column,
                    byte = error.position.byte,
                    "config syntax error"
                );
                self.sink.error(error);
            }
            Err(ParseError::Aborted) => warn!(bytes = self.position.byte, "config parse vetoed by sink"),
            Err(error) => debug!(%error, "config parse failed"),
        }

        let finished = self.source.end().map_err(ParseError::Finish);
        outcome.and(finished)
    }

    /// Top-level loop: dispatch on one byte of lookahead.
    fn run(&mut self) -> Result<(), ParseError> {
        self.bump()?;
        while !self.source.eoi() {
            self.skip_whitespace()?;
            let Some(c) = self.current() else { break };
            match c {
                b'[' => self.section_header()?,
                b'#' => self.comment()?,
                c if is_name_starter(c) => self.name_value_pair(c)?,
                _ => return Err(self.fail(ErrorKind::IllegalChar)),
            }
        }
        Ok(())
    }

    /// Consume the current byte. Returns `false` at end of input, leaving
    /// the position on the last byte read.
    #[inline]
    fn bump(&mut self) -> Result<bool, ParseError> {
        if !self.source.pop().map_err(ParseError::Read)? {
            return Ok(false);
        }
        self.position.advance(self.source.curr() == Some(b'\n'));
        Ok(true)
    }

    #[inline]
    fn current(&self) -> Option<u8> {
        if self.source.eoi() {
            None
        } else {
            self.source.curr()
        }
    }

    fn skip_whitespace(&mut self) -> Result<(), ParseError> {
        while self.current().is_some_and(is_whitespace) {
            if !self.bump()? {
                break;
            }
        }
        Ok(())
    }

    #[inline]
    fn fail(&self, kind: ErrorKind) -> ParseError {
        ParseError::Syntax(SyntaxError::new(kind, self.position))
    }

    fn push(&mut self, slot: Slot, b: u8) -> Result<(), ParseError> {
        let buffer = match slot {
            Slot::Section => &mut self.section,
            Slot::Name => &mut self.name,
            Slot::Value => &mut self.value,
        };
        if buffer.push(b).is_err() {
            return Err(self.fail(ErrorKind::SizeViolation));
        }
        Ok(())
    }

    /// Read a name whose starter `first` is the current byte. Stops on
    /// the first non-continuer, which becomes current.
    fn read_name(&mut self, slot: Slot, first: u8) -> Result<(), ParseError> {
        self.push(slot, first)?;
        while self.bump()? {
            match self.current() {
                Some(c) if is_name_continuer(c) => self.push(slot, c)?,
                _ => break,
            }
        }
        Ok(())
    }

    /// `[` ws* name ws* `]`
    fn section_header(&mut self) -> Result<(), ParseError> {
        let start = self.position;
        self.bump()?;
        self.skip_whitespace()?;

        let first = match self.current() {
            Some(c) if is_name_starter(c) => c,
            _ => return Err(self.fail(ErrorKind::NameExpected)),
        };
        self.section.clear();
        self.read_name(Slot::Section, first)?;

        self.skip_whitespace()?;
        if self.current() != Some(b']') {
            return Err(self.fail(ErrorKind::BracketExpected));
        }

        std::mem::swap(&mut self.current_section, &mut self.section);
        trace!(
            section = %String::from_utf8_lossy(self.current_section.as_bytes()),
            line = start.line,
            "section"
        );
        if self.sink.new_section(self.current_section.as_bytes(), start).is_break() {
            return Err(ParseError::Aborted);
        }

        self.bump()?;
        Ok(())
    }

    /// `#` up to and including the next newline. End of input ends the
    /// comment without error.
    fn comment(&mut self) -> Result<(), ParseError> {
        loop {
            if !self.bump()? {
                return Ok(());
            }
            if self.current() == Some(b'\n') {
                break;
            }
        }
        self.bump()?;
        Ok(())
    }

    /// name ws* `=` ws* `"` value `"`
    fn name_value_pair(&mut self, first: u8) -> Result<(), ParseError> {
        let start = self.position;
        self.name.clear();
        self.read_name(Slot::Name, first)?;

        self.skip_whitespace()?;
        if self.current() != Some(b'=') {
            return Err(self.fail(ErrorKind::EqualSignExpected));
        }
        self.bump()?;
        self.skip_whitespace()?;

        if self.current() != Some(b'"') {
            return Err(self.fail(ErrorKind::DoubleQuoteExpected));
        }
        self.read_value()?;

        trace!(
            name = %String::from_utf8_lossy(self.name.as_bytes()),
            len = self.value.len(),
            line = start.line,
            "entry"
        );
        let flow = self.sink.new_entry(
            self.current_section.as_bytes(),
            self.name.as_bytes(),
            self.value.as_bytes(),
            start,
        );
        if flow.is_break() {
            return Err(ParseError::Aborted);
        }
        Ok(())
    }

    /// Quoted value; the opening `"` is current. Consumes the closing `"`.
    fn read_value(&mut self) -> Result<(), ParseError> {
        self.value.clear();
        let mut escaped = false;
        loop {
            if !self.bump()? {
                return Err(self.fail(ErrorKind::DoubleQuoteExpected));
            }
            let Some(c) = self.current() else {
                return Err(self.fail(ErrorKind::DoubleQuoteExpected));
            };
            if escaped {
                if c != b'\\' && c != b'"' {
                    return Err(self.fail(ErrorKind::IllegalChar));
                }
                self.push(Slot::Value, c)?;
                escaped = false;
            } else {
                match c {
                    b'\\' => escaped = true,
                    b'"' => break,
                    _ => self.push(Slot::Value, c)?,
                }
            }
        }
        self.bump()?;
        Ok(())
    }
}

impl<S, K> Parser<S, K> {
    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Position of the byte being processed, or where the last parse stopped.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Name of the section in effect (empty for the default section).
    pub fn current_section(&self) -> &[u8] {
        self.current_section.as_bytes()
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }
}

/// Parse an in-memory buffer into `sink` with the default limits.
pub fn parse_bytes<K: EventSink>(input: &[u8], sink: K) -> Result<(), ParseError> {
    Parser::new(SliceSource::new(input), sink).parse()
}

/// Parse an in-memory buffer, calling `on_event` for every event.
///
/// ```
/// use std::ops::ControlFlow;
/// use blacknot_config::{parse_with, Event};
///
/// let mut names = Vec::new();
/// parse_with(b"a = \"1\"\nb = \"2\"\n", |event| {
///     if let Event::Entry { name, .. } = event {
///         names.push(name.to_vec());
///     }
///     ControlFlow::Continue(())
/// })
/// .unwrap();
/// assert_eq!(names, [b"a".to_vec(), b"b".to_vec()]);
/// ```
pub fn parse_with<F>(input: &[u8], on_event: F) -> Result<(), ParseError>
where
    F: FnMut(Event<'_>) -> ControlFlow<()>,
{
    parse_bytes(input, FnSink(on_event))
}
