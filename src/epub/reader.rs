use std::path::Path;

use crate::book::ParsedEpub;
use crate::error::{Error, Result};
use crate::markup::html_to_text;
use crate::util::{decode_text, title_from_file_name};

use super::archive::{Container, base_dir, join_href};
use super::parser::{CONTAINER_PATH, parse_container_xml, parse_opf};

/// Separator placed between chapter texts.
const CHAPTER_SEPARATOR: &str = "\n\n";

/// Read an EPUB file from disk and extract its text.
///
/// The file name (without `.epub`) becomes the title if the package
/// declares none.
///
/// # Example
///
/// ```no_run
/// use speedread::read_epub;
///
/// let book = read_epub("path/to/book.epub")?;
/// println!("Title: {}", book.title);
/// # Ok::<(), speedread::Error>(())
/// ```
pub fn read_epub<P: AsRef<Path>>(path: P) -> Result<ParsedEpub> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    parse_epub(&data, &file_name)
}

/// Extract the title and reading-order text of an in-memory EPUB.
///
/// `file_name` is only used as the title fallback.
///
/// Fails if the bytes are not a ZIP archive, if `META-INF/container.xml`
/// is missing or names no package document, or if the package document
/// cannot be found. Chapters that are missing from the archive or contain
/// no text are skipped; a book with no readable chapters yields empty
/// content rather than an error.
///
/// # Example
///
/// ```no_run
/// use speedread::parse_epub;
///
/// let data: Vec<u8> = std::fs::read("book.epub")?;
/// let book = parse_epub(&data, "book.epub")?;
/// println!("{}", book.content);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_epub(data: &[u8], file_name: &str) -> Result<ParsedEpub> {
    // 1. Decompress the archive
    let container = Container::from_bytes(data)?;
    log::debug!("read {} archive entries", container.len());

    // 2. Find the OPF path from container.xml
    let descriptor = container
        .find(CONTAINER_PATH)
        .ok_or_else(|| Error::InvalidContainer(format!("missing {CONTAINER_PATH}")))?;
    let opf_path = parse_container_xml(&decode_text(descriptor)).ok_or_else(|| {
        Error::InvalidContainer(format!("cannot find rootfile path in {CONTAINER_PATH}"))
    })?;
    log::debug!("package document at {opf_path}");

    // 3. Parse the OPF file
    let opf_bytes = container
        .find_href(&opf_path)
        .ok_or_else(|| Error::InvalidPackage(format!("missing package document {opf_path}")))?;
    let package = parse_opf(&decode_text(opf_bytes));
    log::debug!("spine lists {} content documents", package.spine_items.len());

    // 4. Extract text from each spine item
    let base = base_dir(&opf_path);
    let chapters: Vec<String> = package
        .spine_items
        .iter()
        .filter_map(|href| extract_chapter(&container, base, href))
        .collect();
    log::debug!("extracted {} chapters", chapters.len());

    let title = if package.title.is_empty() {
        title_from_file_name(file_name)
    } else {
        package.title
    };

    Ok(ParsedEpub {
        title,
        content: chapters.join(CHAPTER_SEPARATOR),
    })
}

/// Text of one spine document, or `None` if it is missing or blank.
fn extract_chapter(container: &Container, base: &str, href: &str) -> Option<String> {
    let path = join_href(base, href);
    let Some(bytes) = container.find_href(&path) else {
        log::warn!("spine item {path} not found in archive");
        return None;
    };

    let text = html_to_text(&decode_text(bytes));
    let text = text.trim();
    if text.is_empty() {
        log::debug!("spine item {path} has no text");
        return None;
    }

    Some(text.to_string())
}
