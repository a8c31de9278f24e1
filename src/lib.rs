//! # releve
//!
//! Table extraction for semi-structured bank-statement documents.
//!
//! Statements carry no table markup, only positioned text runs. This
//! library turns a layout engine's span dump into a labeled table: it
//! finds the header row from configurable keywords, statistically infers
//! column boundaries from where body-row words sit, separates the
//! balance-carry-forward "anchor" row from ordinary transactions, bounds
//! the table against trailing free text, and keeps column assignment
//! stable across pages that never repeat the header row.
//!
//! ## Quick Start
//!
//! ```no_run
//! use releve::{parse_file, render, JsonFormat};
//!
//! fn main() -> releve::Result<()> {
//!     // Parse a layout dump exported by the document-layout engine
//!     let statement = parse_file("statement.json")?;
//!
//!     for page in &statement.pages {
//!         println!("page {}: {} words", page.number, page.word_count());
//!     }
//!
//!     let json = render::to_json(&statement, JsonFormat::Pretty)?;
//!     println!("{json}");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Column inference without gridlines**: boundaries come from the
//!   statistical distribution of word positions in body rows
//! - **Anchor-row handling**: carry-forward balances are labeled apart
//!   from transactions, with a credit-column proximity override
//! - **Cross-page stability**: column ranges from the first header-bearing
//!   page classify every later page
//! - **Configurable layouts**: keywords, patterns, symbol sets, and every
//!   threshold are injectable through [`StatementConfig`]

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use config::StatementConfig;
pub use error::{Error, Result};
pub use model::{
    AnnotatedWord, Annotation, ColumnRange, HeaderGroups, HeaderOccurrence, PageBundle, Rgb,
    RowKey, Statement, Word, WordKind,
};
pub use parser::{PageParser, StatementParser};
pub use render::JsonFormat;
pub use source::{BBox, LayoutDump, RawBlock, RawLine, RawPage, RawSpan, StatementSource};

use std::path::Path;

/// Parse a layout dump file and return the extracted statement.
///
/// # Example
///
/// ```no_run
/// use releve::parse_file;
///
/// let statement = parse_file("statement.json").unwrap();
/// println!("Pages: {}", statement.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Statement> {
    let dump = LayoutDump::open(path)?;
    StatementParser::new().parse(&dump)
}

/// Parse a layout dump file with a custom layout configuration.
pub fn parse_file_with_config<P: AsRef<Path>>(
    path: P,
    config: StatementConfig,
) -> Result<Statement> {
    let dump = LayoutDump::open(path)?;
    StatementParser::with_config(config).parse(&dump)
}

/// Parse a layout dump from JSON bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Statement> {
    let dump = LayoutDump::from_slice(data)?;
    StatementParser::new().parse(&dump)
}

/// Parse a layout dump from a JSON string.
pub fn parse_str(data: &str) -> Result<Statement> {
    let dump = LayoutDump::from_str(data)?;
    StatementParser::new().parse(&dump)
}

/// Parse any [`StatementSource`] with a custom configuration.
pub fn parse_source<S: StatementSource + ?Sized>(
    source: &S,
    config: StatementConfig,
) -> Result<Statement> {
    StatementParser::with_config(config).parse(source)
}
