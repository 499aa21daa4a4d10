//! Config Core Parser
//!
//! Streaming parser and layout-preserving writer for sectioned config files:
//!
//! ```text
//! # comment
//! [section]
//! key=value   # trailing comment
//! ```
//!
//! # Architecture
//!
//! - **charclass.rs** - Byte classes for names and values
//! - **diagnostic.rs** - Per-session diagnostics log
//! - **document.rs** - Sections, pairs, comments and the file-order index
//! - **scanner.rs** - Incremental state machine fed with byte buffers
//! - **writer.rs** - Index replay back to bytes / disk
//! - **access.rs** - Typed getters and setters
//! - **options.rs** - Read buffer size and write strategy
//!
//! # Example
//!
//! ```
//! use cfgfile_core::Document;
//!
//! let mut doc = Document::parse(b"[server]\nport=8080 # default\n").unwrap();
//! assert_eq!(doc.get_int("server", "port", 80), 8080);
//!
//! doc.set_int("server", "port", 9090).unwrap();
//! assert_eq!(doc.render(), b"[server]\nport=9090 # default\n".to_vec());
//! ```

pub mod access;
pub mod charclass;
pub mod diagnostic;
pub mod document;
pub mod error;
pub mod options;
pub mod scanner;
pub mod writer;

pub use diagnostic::{Diagnostic, DiagnosticCode, Diagnostics, Position, Severity};
pub use document::{Comment, CommentId, Document, IndexEntry, Item, KeyValue, KeyValueId, Section, SectionId};
pub use error::{Error, Result};
pub use options::{Options, WriteMode, DEFAULT_CHUNK_SIZE};
pub use scanner::Scanner;
