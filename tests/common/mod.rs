//! Shared helpers for assembling EPUB archives in memory.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

/// Builds a ZIP archive entry by entry.
#[derive(Default)]
pub struct EpubBuilder {
    entries: Vec<(String, Vec<u8>)>,
    stored: bool,
}

impl EpubBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a mimetype and the standard container.xml pointing at
    /// `OEBPS/content.opf`.
    pub fn standard() -> Self {
        Self::new()
            .file("mimetype", "application/epub+zip")
            .file("META-INF/container.xml", CONTAINER_XML)
    }

    pub fn file(mut self, path: &str, content: impl AsRef<[u8]>) -> Self {
        self.entries.push((path.to_string(), content.as_ref().to_vec()));
        self
    }

    /// Write entries uncompressed, so their bytes appear verbatim in the
    /// archive.
    pub fn stored(mut self) -> Self {
        self.stored = true;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let mut options = SimpleFileOptions::default();
        if self.stored {
            options = options.compression_method(CompressionMethod::Stored);
        }
        for (path, content) in self.entries {
            zip.start_file(path, options).expect("start zip entry");
            zip.write_all(&content).expect("write zip entry");
        }
        zip.finish().expect("finish zip").into_inner()
    }
}

/// A package document with the given title element, manifest items and
/// spine idrefs.
pub fn opf(title: &str, items: &[(&str, &str)], spine: &[&str]) -> String {
    let manifest: String = items
        .iter()
        .map(|(id, href)| {
            format!(r#"    <item id="{id}" href="{href}" media-type="application/xhtml+xml"/>"#)
                + "\n"
        })
        .collect();
    let itemrefs: String = spine
        .iter()
        .map(|idref| format!(r#"    <itemref idref="{idref}"/>"#) + "\n")
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    {title}
  </metadata>
  <manifest>
{manifest}  </manifest>
  <spine>
{itemrefs}  </spine>
</package>"#
    )
}

/// A minimal XHTML chapter with the given body markup.
pub fn chapter(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml">
<head><style>p {{ margin: 0; }}</style></head>
<body>{body}</body>
</html>"#
    )
}
