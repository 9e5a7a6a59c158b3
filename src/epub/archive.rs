//! In-memory view of an EPUB's ZIP container.

use std::collections::HashMap;
use std::io::{Cursor, Read};

use percent_encoding::percent_decode_str;
use zip::ZipArchive;

use crate::error::Result;

/// Every file in the archive, decompressed once and never mutated.
///
/// Paths are stored as written in the archive (forward-slash separated).
/// Lookups try the exact path first and fall back to a case-insensitive
/// scan in archive order.
#[derive(Debug, Default)]
pub struct Container {
    entries: Vec<(String, Vec<u8>)>,
    /// Maps exact path -> position in `entries`.
    index: HashMap<String, usize>,
}

impl Container {
    /// Decompress every file entry of a ZIP archive.
    ///
    /// Fails with [`Error::ContainerFormat`](crate::Error::ContainerFormat)
    /// if the bytes are not a ZIP archive. Individual entries that cannot be
    /// decompressed (unsupported method, encryption, corrupt data) are
    /// skipped with a warning.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(data))?;
        let mut container = Self {
            entries: Vec::with_capacity(archive.len()),
            index: HashMap::with_capacity(archive.len()),
        };

        for i in 0..archive.len() {
            let mut file = match archive.by_index(i) {
                Ok(file) => file,
                Err(e) => {
                    log::warn!("skipping archive entry {i}: {e}");
                    continue;
                }
            };

            if file.is_dir() {
                continue;
            }

            let name = file.name().to_string();
            let mut contents = Vec::new();
            if let Err(e) = file.read_to_end(&mut contents) {
                log::warn!("skipping unreadable archive entry {name}: {e}");
                continue;
            }

            container.insert(name, contents);
        }

        Ok(container)
    }

    /// Add an entry. A repeated path keeps its original position and takes
    /// the newer contents.
    fn insert(&mut self, name: String, contents: Vec<u8>) {
        match self.index.get(&name) {
            Some(&i) => self.entries[i].1 = contents,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, contents));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Paths of all entries in archive order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Look up a file by path, exact match first, then case-insensitively.
    ///
    /// Absence is not an error; callers decide whether it is fatal.
    pub fn find(&self, path: &str) -> Option<&[u8]> {
        if let Some(&i) = self.index.get(path) {
            return Some(&self.entries[i].1);
        }

        let wanted = path.to_lowercase();
        self.entries
            .iter()
            .find(|(name, _)| name.to_lowercase() == wanted)
            .map(|(_, contents)| contents.as_slice())
    }

    /// Like [`find`](Self::find), additionally trying the percent-decoded
    /// path (`chapter%201.xhtml` -> `chapter 1.xhtml`).
    pub fn find_href(&self, path: &str) -> Option<&[u8]> {
        self.find(path).or_else(|| {
            let decoded = percent_decode_str(path).decode_utf8().ok()?;
            if decoded == path {
                return None;
            }
            self.find(&decoded)
        })
    }
}

/// Directory part of a path, including the trailing slash.
///
/// `"OEBPS/content.opf"` gives `"OEBPS/"`; a bare file name gives `""`.
pub fn base_dir(path: &str) -> &str {
    path.rfind('/').map_or("", |i| &path[..=i])
}

/// Resolve a manifest href against the package document's directory.
///
/// Drops any `#fragment`, collapses `.` and `..` segments, and treats an
/// href starting with `/` as relative to the container root.
pub fn join_href(base: &str, href: &str) -> String {
    let href = href.split('#').next().unwrap_or(href);
    let base = if href.starts_with('/') { "" } else { base };

    let mut segments: Vec<&str> = Vec::new();
    for segment in base.split('/').chain(href.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    segments.join("/")
}
