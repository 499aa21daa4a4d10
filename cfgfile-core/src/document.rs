//! Document model for parsed config files.
//!
//! Sections, key-value pairs and comments live in flat arenas and are
//! addressed by small index handles. The [`IndexEntry`] sequence records
//! every completed item in file order together with its source line; the
//! writer replays it to reproduce the original layout, while the arenas
//! serve lookups.
//!
//! The model is append-only while parsing. Afterwards only values can
//! change (see the accessor methods in [`crate::access`]).

use std::borrow::Cow;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::diagnostic::Diagnostics;
use crate::options::WriteMode;

// ============================================================================
// Handles
// ============================================================================

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            fn new(index: usize) -> Self {
                $name(index as u32)
            }

            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

handle!(
    /// Index into the document's section arena.
    SectionId
);
handle!(
    /// Index into the document's key-value arena.
    KeyValueId
);
handle!(
    /// Index into the document's comment arena.
    CommentId
);

// ============================================================================
// Nodes
// ============================================================================

/// A `[name]` header and the pairs that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<KeyValueId>,
}

impl Section {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handles of the section's pairs, in file order.
    pub fn entries(&self) -> &[KeyValueId] {
        &self.entries
    }
}

/// A `key=value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    key: String,
    value: String,
    section: SectionId,
}

impl KeyValue {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The section that owns this pair.
    pub fn section(&self) -> SectionId {
        self.section
    }

    pub(crate) fn set_value(&mut self, value: String) {
        self.value = value;
    }
}

/// A `#` comment, either on its own line or trailing an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    lead: Vec<u8>,
    text: Vec<u8>,
}

impl Comment {
    /// Text after `#`, lossily decoded.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }

    /// Raw bytes after `#`.
    pub fn text_bytes(&self) -> &[u8] {
        &self.text
    }

    /// Blanks that preceded `#` on its line.
    pub fn lead(&self) -> &[u8] {
        &self.lead
    }
}

/// What an index entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    Section(SectionId),
    KeyValue(KeyValueId),
    Comment(CommentId),
}

/// One completed item and the source line it was completed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub line: u32,
    pub item: Item,
}

/// File the document was read from and will be written back to.
#[derive(Debug)]
pub(crate) struct Backing {
    pub(crate) path: PathBuf,
    pub(crate) file: Option<File>,
    pub(crate) write_mode: WriteMode,
    pub(crate) writable: bool,
}

// ============================================================================
// Document
// ============================================================================

/// A parsed config file.
#[derive(Debug, Default)]
pub struct Document {
    sections: Vec<Section>,
    keyvalues: Vec<KeyValue>,
    comments: Vec<Comment>,
    index: Vec<IndexEntry>,
    /// Number of line terminators consumed.
    line_count: u32,
    diagnostics: Diagnostics,
    pub(crate) backing: Option<Backing>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    // ---- scanner-facing appends -------------------------------------------

    pub(crate) fn push_section(&mut self, name: String, line: u32) -> SectionId {
        let id = SectionId::new(self.sections.len());
        tracing::trace!(line, name = %name, "section");
        self.sections.push(Section {
            name,
            entries: Vec::new(),
        });
        self.push_index(line, Item::Section(id));
        id
    }

    /// Append a pair to the most recent section. Returns `None` when no
    /// section exists yet.
    pub(crate) fn push_keyvalue(&mut self, key: String, value: String, line: u32) -> Option<KeyValueId> {
        let section_idx = self.sections.len().checked_sub(1)?;
        let section = SectionId::new(section_idx);
        let id = KeyValueId::new(self.keyvalues.len());
        tracing::trace!(line, key = %key, "key-value");
        self.keyvalues.push(KeyValue {
            key,
            value,
            section,
        });
        self.sections[section_idx].entries.push(id);
        self.push_index(line, Item::KeyValue(id));
        Some(id)
    }

    pub(crate) fn push_comment(&mut self, lead: Vec<u8>, text: Vec<u8>, line: u32) -> CommentId {
        let id = CommentId::new(self.comments.len());
        tracing::trace!(line, "comment");
        self.comments.push(Comment { lead, text });
        self.push_index(line, Item::Comment(id));
        id
    }

    fn push_index(&mut self, line: u32, item: Item) {
        self.index.push(IndexEntry { line, item });
    }

    pub(crate) fn set_line_count(&mut self, lines: u32) {
        self.line_count = lines;
    }

    pub(crate) fn set_diagnostics(&mut self, diagnostics: Diagnostics) {
        self.diagnostics = diagnostics;
    }

    pub(crate) fn keyvalue_mut(&mut self, id: KeyValueId) -> &mut KeyValue {
        &mut self.keyvalues[id.index()]
    }

    // ---- queries ------------------------------------------------------------

    /// Sections in file order. Repeated names are separate sections.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// First section named `name`.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.find_section(name).map(|id| &self.sections[id.index()])
    }

    pub fn find_section(&self, name: &str) -> Option<SectionId> {
        self.sections
            .iter()
            .position(|s| s.name == name)
            .map(SectionId::new)
    }

    /// Pairs of a section, in file order.
    pub fn keyvalues(&self, section: SectionId) -> impl Iterator<Item = &KeyValue> + '_ {
        self.sections
            .get(section.index())
            .into_iter()
            .flat_map(|s| s.entries.iter())
            .map(|id| &self.keyvalues[id.index()])
    }

    /// Locate `key` under `section`.
    ///
    /// Sections sharing the name are searched in file order and the first
    /// matching key wins.
    pub fn find(&self, section: &str, key: &str) -> Option<KeyValueId> {
        self.sections
            .iter()
            .filter(|s| s.name == section)
            .flat_map(|s| s.entries.iter().copied())
            .find(|id| self.keyvalues[id.index()].key == key)
    }

    pub fn get_section(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id.index())
    }

    pub fn get_keyvalue(&self, id: KeyValueId) -> Option<&KeyValue> {
        self.keyvalues.get(id.index())
    }

    pub fn get_comment(&self, id: CommentId) -> Option<&Comment> {
        self.comments.get(id.index())
    }

    /// All comments in file order, including those before the first section.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Serialization order.
    pub fn index(&self) -> &[IndexEntry] {
        &self.index
    }

    /// Number of complete (terminated) lines read.
    pub fn line_count(&self) -> u32 {
        self.line_count
    }

    /// Warnings recorded while parsing.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Path of the backing file, if opened from one.
    pub fn path(&self) -> Option<&Path> {
        self.backing.as_ref().map(|b| b.path.as_path())
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Structural equality: diagnostics and the backing file are ignored.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.sections == other.sections
            && self.keyvalues == other.keyvalues
            && self.comments == other.comments
            && self.index == other.index
            && self.line_count == other.line_count
    }
}
