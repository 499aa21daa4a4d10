//! Layout-preserving writer.
//!
//! Replays the document index in order. Entries that were completed on the
//! same source line are rendered on one output line, concatenated in index
//! order (an item followed by its trailing comment). Blank lines between
//! lines, before the first entry and after the last one are reproduced
//! from the stored line numbers, so an unmodified document renders back to
//! its canonical source byte for byte.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::charclass::encode_latin1;
use crate::document::{Document, Item};
use crate::error::{Error, Result};
use crate::options::WriteMode;

impl Document {
    /// Render the document into a byte buffer.
    pub fn render(&self) -> Vec<u8> {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_layout(&mut out);
        out
    }

    /// Render the document into `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        self.write_layout(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn write_layout<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let mut prev_line = 0u32;
        let mut entries = self.index().iter().peekable();

        while let Some(first) = entries.next() {
            let line = first.line;
            write_blank_lines(w, line.saturating_sub(prev_line).saturating_sub(1))?;
            self.write_item(w, first.item)?;
            while let Some(next) = entries.next_if(|e| e.line == line) {
                self.write_item(w, next.item)?;
            }
            w.write_all(b"\n")?;
            prev_line = line;
        }

        write_blank_lines(w, self.line_count().saturating_sub(prev_line))
    }

    fn write_item<W: Write>(&self, w: &mut W, item: Item) -> io::Result<()> {
        match item {
            Item::Section(id) => {
                if let Some(section) = self.get_section(id) {
                    w.write_all(b"[")?;
                    w.write_all(section.name().as_bytes())?;
                    w.write_all(b"]")?;
                }
            }
            Item::KeyValue(id) => {
                if let Some(kv) = self.get_keyvalue(id) {
                    w.write_all(kv.key().as_bytes())?;
                    w.write_all(b"=")?;
                    write_text(w, kv.value())?;
                }
            }
            Item::Comment(id) => {
                if let Some(comment) = self.get_comment(id) {
                    w.write_all(comment.lead())?;
                    w.write_all(b"#")?;
                    w.write_all(comment.text_bytes())?;
                }
            }
        }
        Ok(())
    }

    /// Write the document back to the file it was opened from, using the
    /// write mode it was opened with.
    ///
    /// In [`WriteMode::Truncate`] the file is closed, truncated and
    /// rewritten in place; an interruption in between loses data.
    pub fn save(&mut self) -> Result<()> {
        let bytes = self.render();
        let backing = self.backing.as_mut().ok_or(Error::NoSource)?;
        // The old handle must be closed before the path is rewritten.
        drop(backing.file.take());
        let file = write_file(&backing.path, &bytes, backing.write_mode)
            .map_err(|e| Error::io(&backing.path, e))?;
        backing.file = Some(file);
        backing.writable = true;
        tracing::debug!(
            path = %backing.path.display(),
            bytes = bytes.len(),
            mode = ?backing.write_mode,
            "saved config"
        );
        Ok(())
    }

    /// Write the document to `path`. The backing file is not changed.
    pub fn save_as(&self, path: impl AsRef<Path>, mode: WriteMode) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.render();
        write_file(path, &bytes, mode).map_err(|e| Error::io(path, e))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), mode = ?mode, "wrote config");
        Ok(())
    }

    /// Release the document and its backing file handle, syncing the file
    /// to disk first if it was open for writing.
    pub fn close(mut self) -> Result<()> {
        if let Some(backing) = self.backing.take() {
            if let (Some(file), true) = (&backing.file, backing.writable) {
                file.sync_all().map_err(|e| Error::io(&backing.path, e))?;
            }
        }
        Ok(())
    }
}

fn write_blank_lines<W: Write>(w: &mut W, count: u32) -> io::Result<()> {
    for _ in 0..count {
        w.write_all(b"\n")?;
    }
    Ok(())
}

/// Values hold one char per source byte; write them back the same way.
fn write_text<W: Write>(w: &mut W, text: &str) -> io::Result<()> {
    match encode_latin1(text) {
        Some(bytes) => w.write_all(&bytes),
        None => w.write_all(text.as_bytes()),
    }
}

fn write_file(path: &Path, bytes: &[u8], mode: WriteMode) -> io::Result<File> {
    match mode {
        WriteMode::Truncate => {
            let mut file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)?;
            file.write_all(bytes)?;
            file.flush()?;
            Ok(file)
        }
        WriteMode::AtomicReplace => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let mut tmp = NamedTempFile::new_in(dir)?;
            tmp.write_all(bytes)?;
            tmp.as_file().sync_all()?;
            tmp.persist(path).map_err(|e| e.error)
        }
    }
}
