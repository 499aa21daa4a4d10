//! Diagnostics log for a parse session.
//!
//! Every condition the scanner reports is recorded as a [`Diagnostic`]
//! (severity, code, line/character) in a [`Diagnostics`] value owned by the
//! session. Errors abort the parse; warnings are recorded and parsing
//! continues. Callers read the log back most-recent-first.

use std::fmt;

/// Severity of a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

/// Diagnostic codes.
///
/// A fixed enum instead of a formatted String: the message text is
/// produced on demand from the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DiagnosticCode {
    /// `]` with no open section name
    UnmatchedBracket = 0,
    /// `[]`
    EmptySection,
    /// Blank, `=` or a second word inside a section name or key
    InvalidChar,
    /// `=` with no key before it
    EmptyKey,
    /// Section name or key still open at a line terminator
    SplitToken,
    /// Byte outside the common class inside a section name
    InvalidSectionChar,
    /// Byte outside the common class inside a key
    InvalidKeyChar,
    /// Byte outside the value class inside a value
    InvalidValueChar,
    /// `#` inside a section name or key
    CommentNotAllowed,
    /// Key-value pair before the first section header
    KeyOutsideSection,
}

impl DiagnosticCode {
    /// Get a human-readable message for this code.
    pub fn message(self) -> &'static str {
        match self {
            Self::UnmatchedBracket => "']' without corresponding '['",
            Self::EmptySection => "Empty section",
            Self::InvalidChar => "Invalid character",
            Self::EmptyKey => "'=' without a key before",
            Self::SplitToken => "Can't exist a section or key striped into one or more lines",
            Self::InvalidSectionChar => "Invalid section char",
            Self::InvalidKeyChar => "Invalid key char",
            Self::InvalidValueChar => "Invalid value char",
            Self::CommentNotAllowed => "No comment allowed here",
            Self::KeyOutsideSection => "Key-value pair outside of any section",
        }
    }

    /// Severity the scanner reports this code with.
    pub fn severity(self) -> Severity {
        match self {
            Self::EmptySection => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// 1-based line and character of a byte in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    #[inline]
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A single log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub position: Position,
}

impl Diagnostic {
    /// Record `code` at `position` with the code's default severity.
    pub fn new(code: DiagnosticCode, position: Position) -> Self {
        Self {
            severity: code.severity(),
            code,
            position,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} at line {}, character {}",
            self.severity.label(),
            self.code.message(),
            self.position.line,
            self.position.character
        )
    }
}

/// Ordered diagnostics log, owned by one parse session.
///
/// Records are stored in arrival order; [`Diagnostics::iter`] walks them
/// most-recent-first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => tracing::warn!(
                line = diagnostic.position.line,
                character = diagnostic.position.character,
                code = ?diagnostic.code,
                "config warning"
            ),
            _ => tracing::debug!(
                line = diagnostic.position.line,
                character = diagnostic.position.character,
                code = ?diagnostic.code,
                severity = diagnostic.severity.label(),
                "config diagnostic"
            ),
        }
        self.records.push(diagnostic);
    }

    /// Records, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter().rev()
    }

    /// The most recent record.
    pub fn latest(&self) -> Option<&Diagnostic> {
        self.records.last()
    }

    /// The most recent error record.
    pub fn latest_error(&self) -> Option<&Diagnostic> {
        self.iter().find(|d| d.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.records.iter().any(Diagnostic::is_error)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.latest_error().or_else(|| self.latest()) {
            Some(d) => d.fmt(f),
            None => f.write_str("no diagnostics"),
        }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::iter::Rev<std::slice::Iter<'a, Diagnostic>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter().rev()
    }
}
