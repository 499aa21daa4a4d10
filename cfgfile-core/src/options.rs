//! Options for reading and writing config files.

/// Default read buffer size in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// How [`crate::Document::save`] replaces the file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Close the handle, reopen the same path truncated and rewrite it.
    ///
    /// A crash or I/O error between the truncation and the last write
    /// leaves a short or empty file behind.
    #[default]
    Truncate,
    /// Write a temporary file in the same directory and rename it over
    /// the original once it is complete.
    AtomicReplace,
}

/// Options for opening a config file.
#[derive(Debug, Clone)]
pub struct Options {
    /// Size of each buffer handed to the scanner (default: 1024)
    pub chunk_size: usize,

    /// Replacement strategy used by `save` (default: truncate in place)
    pub write_mode: WriteMode,

    /// Keep the file open for reading and writing (default: true).
    /// When false the file is opened read-only and reopened on save.
    pub writable: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            write_mode: WriteMode::Truncate,
            writable: true,
        }
    }
}

impl Options {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the read buffer size. Zero is treated as one.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    /// Set the replacement strategy for `save`.
    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }

    /// Open the backing file read-only.
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    pub(crate) fn effective_chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }
}
