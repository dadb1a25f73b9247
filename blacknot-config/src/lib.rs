//! Blacknot Config Parser
//!
//! Streaming, single-pass parser for the Blacknot INI-style configuration
//! format. Pulls one byte at a time from a character source and reports
//! sections, entries and errors to an event sink. No AST is built.
//!
//! ```text
//! # comment
//! [network]
//! host = "localhost"
//! motd = "say \"hi\" \\ bye"
//! ```
//!
//! # Architecture
//!
//! - **parser.rs** - The grammar engine (section, comment, name-value recognizers)
//! - **source.rs** - `CharSource` trait and slice/reader/file sources
//! - **event.rs** - `EventSink` trait, `Event` enum, closure adapter
//! - **document.rs** - `ConfigDocument`, a sink that keeps the parsed config
//! - **buffer.rs** - Fixed-capacity token buffers
//! - **class.rs** - ASCII character classes
//! - **position.rs** - Line/column/byte positions
//! - **limits.rs** - Token buffer capacities
//! - **error.rs** - Error kinds and `ParseError`

pub mod buffer;
pub mod class;
pub mod document;
pub mod error;
pub mod event;
pub mod limits;
pub mod parser;
pub mod position;
pub mod source;

pub use buffer::{Overflow, TokenBuffer};
pub use document::{ConfigDocument, Entry, Section};
pub use error::{ErrorKind, ParseError, SyntaxError};
pub use event::{Event, EventSink, FnSink};
pub use limits::Limits;
pub use parser::{parse_bytes, parse_with, Parser};
pub use position::Position;
pub use source::{CharSource, FileSource, ReaderSource, SliceSource};
