//! Incremental scanner: byte buffers in, document mutations out.
//!
//! Input arrives in buffers of arbitrary size. A section name, key, value
//! or comment may straddle any number of buffer boundaries; the open
//! fragment is flushed into a per-token accumulator at the end of each
//! buffer and its *partial* flag is set, so the closing action appends to
//! the accumulator instead of starting fresh.
//!
//! ```text
//!   feed(chunk) ──▶ step(byte) ──▶ Document::push_*
//!        │              │
//!        │              └──▶ Diagnostics (error ⇒ abort, warning ⇒ continue)
//!        └── end of chunk: flush open token, mark partial
//! ```
//!
//! Tokens may cross buffer boundaries but never a line terminator.

use std::fs::OpenOptions;
use std::io::{self, Read};
use std::path::Path;

use memchr::memchr;

use crate::charclass::{decode_latin1, is_common_char, is_value_char};
use crate::diagnostic::{Diagnostic, DiagnosticCode, Diagnostics, Position};
use crate::document::{Backing, Document};
use crate::error::{Error, Result};
use crate::options::Options;

/// Token kinds that accumulate bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Section,
    Key,
    Value,
    Comment,
}

/// Per-token "first fragment already flushed" flags.
#[derive(Debug, Default)]
struct Partials {
    section: bool,
    key: bool,
    value: bool,
    comment: bool,
}

impl Partials {
    fn flag_mut(&mut self, token: Token) -> &mut bool {
        match token {
            Token::Section => &mut self.section,
            Token::Key => &mut self.key,
            Token::Value => &mut self.value,
            Token::Comment => &mut self.comment,
        }
    }
}

/// Transient state of one parse session.
#[derive(Debug)]
struct ScanState {
    line: u32,
    character: u32,

    in_section: bool,
    in_key: bool,
    /// Key ended by a blank; `in_key` stays set until `=`.
    key_closed: bool,
    /// `=` seen on this line; a value (possibly empty) is pending.
    equal: bool,
    /// First value byte seen.
    in_value: bool,
    in_comment: bool,

    /// Start of the open token within the current chunk.
    begin: Option<usize>,
    partial: Partials,

    section_buf: Vec<u8>,
    key_buf: Vec<u8>,
    value_buf: Vec<u8>,
    comment_buf: Vec<u8>,

    /// Completed key waiting for its value.
    key: Vec<u8>,
    /// Blanks seen since the last non-blank byte on this line. They are
    /// the lead of a comment if `#` follows, and the trailing part to cut
    /// from an open value.
    blank_run: Vec<u8>,
    /// Blanks that preceded the `#` of the open comment.
    comment_lead: Vec<u8>,
}

impl ScanState {
    fn new() -> Self {
        Self {
            line: 1,
            character: 1,
            in_section: false,
            in_key: false,
            key_closed: false,
            equal: false,
            in_value: false,
            in_comment: false,
            begin: None,
            partial: Partials::default(),
            section_buf: Vec::new(),
            key_buf: Vec::new(),
            value_buf: Vec::new(),
            comment_buf: Vec::new(),
            key: Vec::new(),
            blank_run: Vec::new(),
            comment_lead: Vec::new(),
        }
    }

    #[inline]
    fn position(&self) -> Position {
        Position::new(self.line, self.character)
    }

    /// The token currently collecting bytes, if any.
    fn open_token(&self) -> Option<Token> {
        if self.in_comment {
            Some(Token::Comment)
        } else if self.in_section {
            Some(Token::Section)
        } else if self.in_value {
            Some(Token::Value)
        } else if self.in_key && !self.key_closed {
            Some(Token::Key)
        } else {
            None
        }
    }

    fn buffer_mut(&mut self, token: Token) -> &mut Vec<u8> {
        match token {
            Token::Section => &mut self.section_buf,
            Token::Key => &mut self.key_buf,
            Token::Value => &mut self.value_buf,
            Token::Comment => &mut self.comment_buf,
        }
    }

    /// Open `token` at `begin` in the current chunk.
    fn open(&mut self, token: Token, begin: usize) {
        self.begin = Some(begin);
        *self.partial.flag_mut(token) = false;
        self.buffer_mut(token).clear();
    }

    /// Close `token` at `end` (exclusive) and return its full bytes.
    fn take(&mut self, token: Token, chunk: &[u8], end: usize) -> Vec<u8> {
        let fragment = match self.begin.take() {
            Some(begin) if begin < end => &chunk[begin..end],
            _ => &[][..],
        };
        let partial = std::mem::take(self.partial.flag_mut(token));
        let buf = self.buffer_mut(token);
        if !partial {
            buf.clear();
        }
        buf.extend_from_slice(fragment);
        std::mem::take(buf)
    }

    /// Called at the start of every chunk.
    fn resume(&mut self) {
        self.begin = self.open_token().map(|_| 0);
    }

    /// Called at the end of every chunk: flush the open fragment.
    fn suspend(&mut self, chunk: &[u8]) {
        if let Some(token) = self.open_token() {
            let begin = self.begin.unwrap_or(chunk.len()).min(chunk.len());
            let partial = std::mem::replace(self.partial.flag_mut(token), true);
            let buf = self.buffer_mut(token);
            if !partial {
                buf.clear();
            }
            buf.extend_from_slice(&chunk[begin..]);
        }
        self.begin = None;
    }

    fn end_line(&mut self) {
        self.line += 1;
        // Incremented to 1 after the byte is processed.
        self.character = 0;
        self.equal = false;
        self.blank_run.clear();
    }
}

/// Incremental parser for one config source.
///
/// Once `=` has been seen on a line, `[` and `]` are value bytes rather
/// than section delimiters, so `r=[2]` reads as a value. A plain state
/// table would open a section on any `[` outside a comment and reject
/// such lines; this scanner deliberately departs from that.
///
/// ```
/// use cfgfile_core::Scanner;
///
/// let mut scanner = Scanner::new();
/// scanner.feed(b"[sec").unwrap();
/// scanner.feed(b"tion]\nkey=val\n").unwrap();
/// let doc = scanner.finish().unwrap();
/// assert_eq!(doc.sections()[0].name(), "section");
/// ```
#[derive(Debug)]
pub struct Scanner {
    doc: Document,
    diagnostics: Diagnostics,
    state: ScanState,
    aborted: Option<Diagnostic>,
    bytes: u64,
    chunks: u64,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            doc: Document::new(),
            diagnostics: Diagnostics::new(),
            state: ScanState::new(),
            aborted: None,
            bytes: 0,
            chunks: 0,
        }
    }

    /// Log so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Position of the next byte to be scanned.
    pub fn position(&self) -> Position {
        self.state.position()
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }

    /// Scan one buffer.
    ///
    /// Returns the fatal diagnostic if the input is malformed. The parse
    /// cannot be resumed after that: every later call returns the same
    /// diagnostic.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<(), Diagnostic> {
        if let Some(fatal) = self.aborted {
            return Err(fatal);
        }
        self.chunks += 1;
        self.bytes += chunk.len() as u64;
        self.state.resume();

        let mut i = 0;
        while i < chunk.len() {
            if self.state.in_comment && chunk[i] != b'\n' {
                // Comment bodies are literal; skip straight to the terminator.
                let rest = &chunk[i..];
                let skip = memchr(b'\n', rest).unwrap_or(rest.len());
                self.state.character += skip as u32;
                i += skip;
                continue;
            }
            if let Err(code) = self.step(chunk, i) {
                return Err(self.abort(code));
            }
            self.state.character += 1;
            i += 1;
        }

        self.state.suspend(chunk);
        Ok(())
    }

    /// End of input. Closes a pending value or comment on an unterminated
    /// last line and hands over the document.
    pub fn finish(mut self) -> Result<Document> {
        if self.aborted.is_none() {
            if let Err(code) = self.close_input() {
                self.abort(code);
            }
        }
        if self.aborted.is_some() {
            return Err(Error::Syntax(self.diagnostics));
        }

        let mut doc = self.doc;
        doc.set_line_count(self.state.line - 1);
        tracing::debug!(
            bytes = self.bytes,
            chunks = self.chunks,
            sections = doc.sections().len(),
            entries = doc.index().len(),
            warnings = self.diagnostics.len(),
            "parsed config"
        );
        doc.set_diagnostics(self.diagnostics);
        Ok(doc)
    }

    fn abort(&mut self, code: DiagnosticCode) -> Diagnostic {
        let fatal = Diagnostic::new(code, self.state.position());
        self.diagnostics.push(fatal);
        self.aborted = Some(fatal);
        // Partially built sections are discarded.
        self.doc = Document::new();
        fatal
    }

    fn warn(&mut self, code: DiagnosticCode) {
        self.diagnostics.push(Diagnostic::new(code, self.state.position()));
    }

    fn close_input(&mut self) -> Result<(), DiagnosticCode> {
        let st = &self.state;
        let (in_comment, in_token, equal) = (st.in_comment, st.in_section || st.in_key, st.equal);
        if in_comment {
            self.close_comment(&[], 0);
        } else if in_token {
            return Err(DiagnosticCode::SplitToken);
        } else if equal {
            self.close_value(&[], 0, false)?;
        }
        Ok(())
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    fn step(&mut self, chunk: &[u8], i: usize) -> Result<(), DiagnosticCode> {
        let b = chunk[i];
        if self.state.in_comment {
            // Only the terminator reaches here.
            self.close_comment(chunk, i);
            self.state.end_line();
            return Ok(());
        }

        match b {
            b'[' | b']' | b'=' if self.state.equal => self.value_byte(i, b),
            b'[' => {
                let st = &mut self.state;
                if st.in_section {
                    return Err(DiagnosticCode::InvalidSectionChar);
                }
                if st.in_key {
                    return Err(DiagnosticCode::InvalidKeyChar);
                }
                st.in_section = true;
                st.blank_run.clear();
                st.open(Token::Section, i + 1);
                Ok(())
            }
            b']' => {
                if !self.state.in_section {
                    return Err(DiagnosticCode::UnmatchedBracket);
                }
                let name = self.state.take(Token::Section, chunk, i);
                if name.is_empty() {
                    self.warn(DiagnosticCode::EmptySection);
                }
                let st = &mut self.state;
                st.in_section = false;
                st.in_key = false;
                st.key_closed = false;
                st.in_value = false;
                let line = st.line;
                self.doc.push_section(decode_latin1(&name), line);
                Ok(())
            }
            b'#' => {
                let st = &mut self.state;
                if st.in_section || st.in_key {
                    return Err(DiagnosticCode::CommentNotAllowed);
                }
                if st.equal {
                    self.close_value(chunk, i, true)?;
                }
                let st = &mut self.state;
                st.comment_lead = std::mem::take(&mut st.blank_run);
                st.in_comment = true;
                st.open(Token::Comment, i + 1);
                Ok(())
            }
            b' ' | b'\t' => {
                let st = &mut self.state;
                if st.in_section {
                    return Err(DiagnosticCode::InvalidChar);
                }
                if st.in_key {
                    if !st.key_closed {
                        st.key = st.take(Token::Key, chunk, i);
                        st.key_closed = true;
                    }
                } else {
                    st.blank_run.push(b);
                }
                Ok(())
            }
            b'=' => {
                let st = &mut self.state;
                if st.in_section {
                    return Err(DiagnosticCode::InvalidChar);
                }
                if !st.in_key {
                    return Err(DiagnosticCode::EmptyKey);
                }
                if !st.key_closed {
                    st.key = st.take(Token::Key, chunk, i);
                }
                st.in_key = false;
                st.key_closed = false;
                st.equal = true;
                st.blank_run.clear();
                Ok(())
            }
            b'\n' => {
                let st = &self.state;
                if st.in_section || st.in_key {
                    return Err(DiagnosticCode::SplitToken);
                }
                if st.equal {
                    self.close_value(chunk, i, false)?;
                }
                self.state.end_line();
                Ok(())
            }
            _ => {
                if self.state.in_section {
                    if !is_common_char(b) {
                        return Err(DiagnosticCode::InvalidSectionChar);
                    }
                    Ok(())
                } else if self.state.equal {
                    self.value_byte(i, b)
                } else {
                    self.key_byte(i, b)
                }
            }
        }
    }

    fn value_byte(&mut self, i: usize, b: u8) -> Result<(), DiagnosticCode> {
        if !is_value_char(b) {
            return Err(DiagnosticCode::InvalidValueChar);
        }
        let st = &mut self.state;
        if !st.in_value {
            st.in_value = true;
            st.open(Token::Value, i);
        }
        // A real char after blanks: they were not trailing.
        st.blank_run.clear();
        Ok(())
    }

    fn key_byte(&mut self, i: usize, b: u8) -> Result<(), DiagnosticCode> {
        if !is_common_char(b) {
            return Err(DiagnosticCode::InvalidKeyChar);
        }
        if self.state.in_key {
            if self.state.key_closed {
                return Err(DiagnosticCode::InvalidChar);
            }
            return Ok(());
        }
        if self.doc.sections().is_empty() {
            return Err(DiagnosticCode::KeyOutsideSection);
        }
        let st = &mut self.state;
        st.in_key = true;
        st.key_closed = false;
        st.blank_run.clear();
        st.open(Token::Key, i);
        Ok(())
    }

    /// Close the pending value at `end` and record the pair.
    ///
    /// Before a comment, trailing blanks are cut from the value; they stay
    /// in `blank_run` and become the comment's lead.
    fn close_value(&mut self, chunk: &[u8], end: usize, before_comment: bool) -> Result<(), DiagnosticCode> {
        let st = &mut self.state;
        let mut value = if st.in_value {
            st.take(Token::Value, chunk, end)
        } else {
            Vec::new()
        };
        if before_comment && st.in_value {
            let keep = value.len().saturating_sub(st.blank_run.len());
            value.truncate(keep);
        }
        let key = std::mem::take(&mut st.key);
        st.in_value = false;
        st.equal = false;
        let line = st.line;
        self.doc
            .push_keyvalue(decode_latin1(&key), decode_latin1(&value), line)
            .map(|_| ())
            .ok_or(DiagnosticCode::KeyOutsideSection)
    }

    fn close_comment(&mut self, chunk: &[u8], end: usize) {
        let st = &mut self.state;
        let text = st.take(Token::Comment, chunk, end);
        let lead = std::mem::take(&mut st.comment_lead);
        st.in_comment = false;
        let line = st.line;
        self.doc.push_comment(lead, text, line);
    }
}

// ============================================================================
// Reading entry points
// ============================================================================

impl Document {
    /// Parse a complete in-memory config.
    pub fn parse(input: &[u8]) -> Result<Document> {
        Self::parse_chunks(std::iter::once(input))
    }

    /// Parse input delivered as a sequence of buffers.
    pub fn parse_chunks<'a, I>(chunks: I) -> Result<Document>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut scanner = Scanner::new();
        for chunk in chunks {
            if scanner.feed(chunk).is_err() {
                break;
            }
        }
        scanner.finish()
    }

    /// Parse everything `reader` yields, `options.chunk_size` bytes at a time.
    pub fn read_from<R: Read>(mut reader: R, options: &Options) -> Result<Document> {
        let mut buf = vec![0u8; options.effective_chunk_size()];
        let mut scanner = Scanner::new();
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Stream(e)),
            };
            if scanner.feed(&buf[..n]).is_err() {
                break;
            }
        }
        scanner.finish()
    }

    /// Open and parse a config file with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Document> {
        Self::open_with(path, &Options::default())
    }

    /// Open and parse a config file. The document keeps the file handle
    /// until it is closed or dropped.
    pub fn open_with(path: impl AsRef<Path>, options: &Options) -> Result<Document> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .read(true)
            .write(options.writable)
            .open(path)
            .map_err(|e| Error::io(path, e))?;

        let mut doc = match Self::read_from(&mut file, options) {
            Err(Error::Stream(e)) => return Err(Error::io(path, e)),
            other => other?,
        };
        tracing::debug!(path = %path.display(), "opened config");
        doc.backing = Some(Backing {
            path: path.to_path_buf(),
            file: Some(file),
            write_mode: options.write_mode,
            writable: options.writable,
        });
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Item;

    fn codes(err: &Error) -> Vec<DiagnosticCode> {
        err.diagnostics()
            .map(|log| log.iter().map(|d| d.code).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_simple_document() {
        let doc = Document::parse(b"[a]\nx=1\ny=two words\n").unwrap();
        assert_eq!(doc.sections().len(), 1);
        let a = doc.find_section("a").unwrap();
        let pairs: Vec<(&str, &str)> = doc.keyvalues(a).map(|kv| (kv.key(), kv.value())).collect();
        assert_eq!(pairs, vec![("x", "1"), ("y", "two words")]);
        assert_eq!(doc.line_count(), 3);
    }

    #[test]
    fn test_inline_comment_splits_trailing_blanks() {
        let doc = Document::parse(b"[a]\nx=1 \t #inline\n").unwrap();
        let kv = doc.get_keyvalue(doc.find("a", "x").unwrap()).unwrap();
        assert_eq!(kv.value(), "1");
        let comment = &doc.comments()[0];
        assert_eq!(comment.text(), "inline");
        assert_eq!(comment.lead(), b" \t ");
        assert_eq!(doc.index()[1].line, doc.index()[2].line);
    }

    #[test]
    fn test_partial_flags_across_chunks() {
        let mut scanner = Scanner::new();
        scanner.feed(b"[se").unwrap();
        assert!(scanner.state.partial.section);
        scanner.feed(b"ct").unwrap();
        assert!(scanner.state.partial.section);
        scanner.feed(b"ion]\nke").unwrap();
        assert!(!scanner.state.partial.section);
        assert!(scanner.state.partial.key);
        scanner.feed(b"y=va").unwrap();
        assert!(scanner.state.partial.value);
        scanner.feed(b"l #co").unwrap();
        assert!(scanner.state.partial.comment);
        scanner.feed(b"mment\n").unwrap();
        let doc = scanner.finish().unwrap();

        assert_eq!(doc.sections()[0].name(), "section");
        let kv = doc.get_keyvalue(doc.find("section", "key").unwrap()).unwrap();
        assert_eq!(kv.value(), "val");
        assert_eq!(doc.comments()[0].text(), "comment");
        assert_eq!(doc.comments()[0].lead(), b" ");
    }

    #[test]
    fn trailing_blanks_split_across_chunks() {
        let doc = Document::parse_chunks([&b"[a]\nx=1 "[..], &b" "[..], &b"#c\n"[..]]).unwrap();
        let kv = doc.get_keyvalue(doc.find("a", "x").unwrap()).unwrap();
        assert_eq!(kv.value(), "1");
        assert_eq!(doc.comments()[0].lead(), b"  ");
    }

    #[test]
    fn value_keeps_trailing_blanks_at_line_end() {
        let doc = Document::parse(b"[a]\nx=1  \n").unwrap();
        assert_eq!(doc.get_keyvalue(doc.find("a", "x").unwrap()).unwrap().value(), "1  ");
    }

    #[test]
    fn test_empty_value() {
        let doc = Document::parse(b"[a]\nx=\ny= #note\n").unwrap();
        let x = doc.get_keyvalue(doc.find("a", "x").unwrap()).unwrap();
        assert_eq!(x.value(), "");
        let y = doc.get_keyvalue(doc.find("a", "y").unwrap()).unwrap();
        assert_eq!(y.value(), "");
        assert_eq!(doc.comments()[0].text(), "note");
    }

    #[test]
    fn test_value_punctuation() {
        let doc = Document::parse(b"[a]\nurl=http://h/p?q=1&r=[2]\n").unwrap();
        let kv = doc.get_keyvalue(doc.find("a", "url").unwrap()).unwrap();
        assert_eq!(kv.value(), "http://h/p?q=1&r=[2]");
    }

    #[test]
    fn blank_closes_key() {
        let doc = Document::parse(b"[a]\nkey  =  v\n").unwrap();
        let kv = doc.get_keyvalue(doc.find("a", "key").unwrap()).unwrap();
        assert_eq!(kv.value(), "v");
    }

    #[test]
    fn test_empty_section_warns() {
        let doc = Document::parse(b"[]\nx=1\n").unwrap();
        assert_eq!(doc.sections()[0].name(), "");
        let warning = doc.diagnostics().latest().unwrap();
        assert_eq!(warning.code, DiagnosticCode::EmptySection);
        assert_eq!(warning.position, Position::new(1, 2));
        assert!(!doc.diagnostics().has_errors());
    }

    #[test]
    fn test_fatal_errors() {
        let cases: &[(&[u8], DiagnosticCode, Position)] = &[
            (b"]abc[", DiagnosticCode::UnmatchedBracket, Position::new(1, 1)),
            (b"[a b]\n", DiagnosticCode::InvalidChar, Position::new(1, 3)),
            (b"[a=b]\n", DiagnosticCode::InvalidChar, Position::new(1, 3)),
            (b"[a-b]\n", DiagnosticCode::InvalidSectionChar, Position::new(1, 3)),
            (b"[a#]\n", DiagnosticCode::CommentNotAllowed, Position::new(1, 3)),
            (b"[a]\n=1\n", DiagnosticCode::EmptyKey, Position::new(2, 1)),
            (b"[a]\nk#\n", DiagnosticCode::CommentNotAllowed, Position::new(2, 2)),
            (b"[a]\nk-y=1\n", DiagnosticCode::InvalidKeyChar, Position::new(2, 2)),
            (b"[a]\nk=\x01\n", DiagnosticCode::InvalidValueChar, Position::new(2, 3)),
            (b"[a]\nkey\n", DiagnosticCode::SplitToken, Position::new(2, 4)),
            (b"[abc\n]\n", DiagnosticCode::SplitToken, Position::new(1, 5)),
            (b"[a]\nk v=1\n", DiagnosticCode::InvalidChar, Position::new(2, 3)),
            (b"x=1\n", DiagnosticCode::KeyOutsideSection, Position::new(1, 1)),
            (b"[a]\r\n", DiagnosticCode::InvalidKeyChar, Position::new(1, 4)),
        ];
        for (input, code, position) in cases {
            let err = Document::parse(input).unwrap_err();
            let fatal = err.diagnostics().unwrap().latest_error().copied().unwrap();
            assert_eq!(fatal.code, *code, "input {:?}", String::from_utf8_lossy(input));
            assert_eq!(fatal.position, *position, "input {:?}", String::from_utf8_lossy(input));
        }
    }

    #[test]
    fn abort_is_permanent() {
        let mut scanner = Scanner::new();
        scanner.feed(b"[a]\n").unwrap();
        let first = scanner.feed(b"]").unwrap_err();
        assert!(scanner.is_aborted());
        assert_eq!(scanner.feed(b"[b]\n").unwrap_err(), first);
        assert_eq!(scanner.diagnostics().len(), 1);
        let err = scanner.finish().unwrap_err();
        assert_eq!(codes(&err), vec![DiagnosticCode::UnmatchedBracket]);
    }

    #[test]
    fn unterminated_last_line() {
        let doc = Document::parse(b"[a]\nx=1").unwrap();
        assert_eq!(doc.get_keyvalue(doc.find("a", "x").unwrap()).unwrap().value(), "1");
        assert_eq!(doc.line_count(), 1);

        let doc = Document::parse(b"[a]\n#tail").unwrap();
        assert_eq!(doc.comments()[0].text(), "tail");

        let err = Document::parse(b"[a]\nkey").unwrap_err();
        assert_eq!(codes(&err), vec![DiagnosticCode::SplitToken]);
    }

    #[test]
    fn comments_before_sections() {
        let doc = Document::parse(b"# top\n\n[a]\n").unwrap();
        assert_eq!(doc.comments().len(), 1);
        assert_eq!(doc.index()[0].line, 1);
        assert!(matches!(doc.index()[0].item, Item::Comment(_)));
        assert_eq!(doc.index()[1].line, 3);
    }

    #[test]
    fn comment_bytes_are_literal() {
        let doc = Document::parse("#[]=\u{e9} ] [\n[a]\n".as_bytes()).unwrap();
        assert_eq!(doc.comments()[0].text(), "[]=\u{e9} ] [");
    }

    #[test]
    fn character_counter_after_comment() {
        let err = Document::parse(b"#abc\n[a]\n k#\n").unwrap_err();
        let fatal = err.diagnostics().unwrap().latest_error().copied().unwrap();
        assert_eq!(fatal.position, Position::new(3, 3));
    }

    #[test]
    fn read_from_small_chunks() {
        let input: &[u8] = b"[a]\nx=1 #c\n\n[b]\ny=2\n";
        let doc = Document::read_from(input, &Options::new().chunk_size(3)).unwrap();
        assert_eq!(doc, Document::parse(input).unwrap());
    }
}
