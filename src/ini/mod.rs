//! INI-style configuration parsing.
//!
//! # Data Flow
//! ```text
//! raw file contents
//!     → parser.rs (line scanner: headers, options, continuations)
//!     → interpolate.rs (%(name)s references against section + DEFAULT)
//!     → ConfigDocument (ordered, resolved, read-only)
//! ```
//!
//! # Design Decisions
//! - A document is built per read and never mutated afterwards
//! - Option names are lowercased; section names are kept verbatim
//! - `[DEFAULT]` options are inherited by every section
//! - Any malformed line fails the whole parse (no partial documents)

pub mod document;
pub mod interpolate;
pub mod parser;

pub use document::{ConfigDocument, Section};
pub use parser::{parse, ParseError};
