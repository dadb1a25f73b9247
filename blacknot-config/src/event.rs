//! Parser events - what the grammar engine reports to its embedder.
//!
//! Events are delivered through [`EventSink`] as they are recognized,
//! with no accumulation. Byte slices borrow the parser's token buffers
//! and are only valid for the duration of the call.
//!
//! For `[net]\nhost = "localhost"\n` a sink sees:
//! ```text
//! new_section("net")
//! new_entry(section: "net", name: "host", value: "localhost")
//! ```

use std::ops::ControlFlow;

use crate::error::SyntaxError;
use crate::position::Position;

/// Receiver of parse events.
///
/// Returning `ControlFlow::Break(())` from `new_section` or `new_entry`
/// vetoes the event and aborts the parse with
/// [`ParseError::Aborted`](crate::ParseError::Aborted). Every method has
/// an accepting default.
pub trait EventSink {
    /// A section header `[name]` completed. `position` is that of the `[`.
    fn new_section(&mut self, name: &[u8], position: Position) -> ControlFlow<()> {
        let _ = (name, position);
        ControlFlow::Continue(())
    }

    /// A `name = "value"` entry completed. `section` is empty before the
    /// first header. `value` is unescaped. `position` is that of the
    /// first byte of the name.
    fn new_entry(
        &mut self,
        section: &[u8],
        name: &[u8],
        value: &[u8],
        position: Position,
    ) -> ControlFlow<()> {
        let _ = (section, name, value, position);
        ControlFlow::Continue(())
    }

    /// The input violated the grammar. Called at most once per parse,
    /// right before `parse` returns the same error.
    fn error(&mut self, error: &SyntaxError) {
        let _ = error;
    }
}

impl<K: EventSink + ?Sized> EventSink for &mut K {
    fn new_section(&mut self, name: &[u8], position: Position) -> ControlFlow<()> {
        (**self).new_section(name, position)
    }

    fn new_entry(
        &mut self,
        section: &[u8],
        name: &[u8],
        value: &[u8],
        position: Position,
    ) -> ControlFlow<()> {
        (**self).new_entry(section, name, value, position)
    }

    fn error(&mut self, error: &SyntaxError) {
        (**self).error(error)
    }
}

/// A single parse event, for closure-based consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// Section header: `[name]`
    Section { name: &'a [u8], position: Position },

    /// Entry: `name = "value"`
    Entry {
        section: &'a [u8],
        name: &'a [u8],
        value: &'a [u8],
        position: Position,
    },

    /// Grammar violation (always the last event of a parse)
    Error(SyntaxError),
}

impl Event<'_> {
    /// Position of the token (or of the failure).
    pub fn position(&self) -> Position {
        match self {
            Event::Section { position, .. } => *position,
            Event::Entry { position, .. } => *position,
            Event::Error(error) => error.position,
        }
    }

    /// Check if this is an error event.
    pub fn is_error(&self) -> bool {
        matches!(self, Event::Error(_))
    }
}

/// Adapts a closure into an [`EventSink`].
///
/// The closure's answer to an `Error` event is ignored; errors always
/// end the parse.
#[derive(Debug, Clone)]
pub struct FnSink<F>(pub F);

impl<F> EventSink for FnSink<F>
where
    F: FnMut(Event<'_>) -> ControlFlow<()>,
{
    fn new_section(&mut self, name: &[u8], position: Position) -> ControlFlow<()> {
        (self.0)(Event::Section { name, position })
    }

    fn new_entry(
        &mut self,
        section: &[u8],
        name: &[u8],
        value: &[u8],
        position: Position,
    ) -> ControlFlow<()> {
        (self.0)(Event::Entry {
            section,
            name,
            value,
            position,
        })
    }

    fn error(&mut self, error: &SyntaxError) {
        let _ = (self.0)(Event::Error(*error));
    }
}
