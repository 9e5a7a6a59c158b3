//! EPUB extraction tests.
//!
//! Every archive is assembled in memory so each test states exactly the
//! structure it exercises.

mod common;

use std::io::Write;

use common::{EpubBuilder, chapter, opf};
use speedread::{Error, parse_epub, read_epub};

const DC_TITLE: &str = "<dc:title>Short Works</dc:title>";

fn two_chapter_book() -> Vec<u8> {
    EpubBuilder::standard()
        .file(
            "OEBPS/content.opf",
            opf(DC_TITLE, &[("c1", "ch1.xhtml"), ("c2", "ch2.xhtml")], &["c1", "c2"]),
        )
        .file("OEBPS/ch1.xhtml", chapter("<h1>One</h1><p>First &amp; best.</p>"))
        .file("OEBPS/ch2.xhtml", chapter("<p>Second</p>"))
        .build()
}

// ============================================================================
// Happy Path
// ============================================================================

#[test]
fn test_chapters_joined_in_spine_order() {
    let book = parse_epub(&two_chapter_book(), "book.epub").expect("parse");

    assert_eq!(book.title, "Short Works");
    assert_eq!(book.content, "One\nFirst & best.\n\nSecond");
}

#[test]
fn test_spine_order_not_manifest_order() {
    let data = EpubBuilder::standard()
        .file(
            "OEBPS/content.opf",
            opf(DC_TITLE, &[("a", "a.xhtml"), ("b", "b.xhtml")], &["b", "a"]),
        )
        .file("OEBPS/a.xhtml", chapter("<p>Alpha</p>"))
        .file("OEBPS/b.xhtml", chapter("<p>Beta</p>"))
        .build();

    let book = parse_epub(&data, "book.epub").expect("parse");
    assert_eq!(book.content, "Beta\n\nAlpha");
}

#[test]
fn test_manifest_attribute_order() {
    let package = r#"<package><metadata><dc:title>T</dc:title></metadata>
<manifest>
  <item href="a.xhtml" media-type="application/xhtml+xml" id="a"/>
  <item media-type="application/xhtml+xml" id="b" href="b.xhtml"/>
</manifest>
<spine><itemref idref="a"/><itemref idref="b"/></spine></package>"#;
    let data = EpubBuilder::standard()
        .file("OEBPS/content.opf", package)
        .file("OEBPS/a.xhtml", chapter("<p>Alpha</p>"))
        .file("OEBPS/b.xhtml", chapter("<p>Beta</p>"))
        .build();

    let book = parse_epub(&data, "book.epub").expect("parse");
    assert_eq!(book.content, "Alpha\n\nBeta");
}

#[test]
fn test_plain_title_fallback() {
    let data = EpubBuilder::standard()
        .file("OEBPS/content.opf", opf("<title>Plain Title</title>", &[], &[]))
        .build();

    let book = parse_epub(&data, "book.epub").expect("parse");
    assert_eq!(book.title, "Plain Title");
}

#[test]
fn test_file_name_title_fallback() {
    let data = EpubBuilder::standard()
        .file("OEBPS/content.opf", opf("<dc:title/>", &[], &[]))
        .build();

    let book = parse_epub(&data, "My Book.EPUB").expect("parse");
    assert_eq!(book.title, "My Book");
    assert_eq!(book.content, "");
}

#[test]
fn test_no_readable_chapters_is_not_an_error() {
    let data = EpubBuilder::standard()
        .file(
            "OEBPS/content.opf",
            opf(DC_TITLE, &[("c1", "ch1.xhtml")], &["c1"]),
        )
        .file("OEBPS/ch1.xhtml", chapter("<script>var x = 1;</script>  "))
        .build();

    let book = parse_epub(&data, "book.epub").expect("parse");
    assert_eq!(book.content, "");
}

// ============================================================================
// Path Resolution
// ============================================================================

#[test]
fn test_case_insensitive_paths() {
    let data = EpubBuilder::new()
        .file("META-INF/container.xml", common::CONTAINER_XML)
        .file(
            "oebps/Content.OPF",
            opf(DC_TITLE, &[("c1", "Text/Ch1.xhtml")], &["c1"]),
        )
        .file("OEBPS/text/ch1.XHTML", chapter("<p>Found</p>"))
        .build();

    let book = parse_epub(&data, "book.epub").expect("parse");
    assert_eq!(book.content, "Found");
}

#[test]
fn test_package_at_archive_root() {
    let container = r#"<container><rootfiles><rootfile full-path="content.opf"/></rootfiles></container>"#;
    let data = EpubBuilder::new()
        .file("META-INF/container.xml", container)
        .file("content.opf", opf(DC_TITLE, &[("c1", "ch1.html")], &["c1"]))
        .file("ch1.html", "<p>Root level</p>")
        .build();

    let book = parse_epub(&data, "book.epub").expect("parse");
    assert_eq!(book.content, "Root level");
}

#[test]
fn test_relative_and_encoded_hrefs() {
    let data = EpubBuilder::standard()
        .file(
            "OEBPS/content.opf",
            opf(
                DC_TITLE,
                &[("c1", "../Text/ch1.xhtml#start"), ("c2", "chapter%202.xhtml")],
                &["c1", "c2"],
            ),
        )
        .file("Text/ch1.xhtml", chapter("<p>Up one</p>"))
        .file("OEBPS/chapter 2.xhtml", chapter("<p>Spaced</p>"))
        .build();

    let book = parse_epub(&data, "book.epub").expect("parse");
    assert_eq!(book.content, "Up one\n\nSpaced");
}

// ============================================================================
// Skipped Spine Items
// ============================================================================

#[test]
fn test_missing_idref_and_file_skipped() {
    let data = EpubBuilder::standard()
        .file(
            "OEBPS/content.opf",
            opf(
                DC_TITLE,
                &[("c1", "ch1.xhtml"), ("gone", "gone.xhtml")],
                &["nope", "c1", "gone"],
            ),
        )
        .file("OEBPS/ch1.xhtml", chapter("<p>Only</p>"))
        .build();

    let book = parse_epub(&data, "book.epub").expect("parse");
    assert_eq!(book.content, "Only");
}

#[test]
fn test_non_content_spine_items_skipped() {
    let data = EpubBuilder::standard()
        .file(
            "OEBPS/content.opf",
            opf(
                DC_TITLE,
                &[("cover", "cover.jpg"), ("toc", "toc.ncx"), ("c1", "ch1.xhtml")],
                &["cover", "toc", "c1"],
            ),
        )
        .file("OEBPS/cover.jpg", b"\xFF\xD8\xFF")
        .file("OEBPS/toc.ncx", "<ncx><text>Table</text></ncx>")
        .file("OEBPS/ch1.xhtml", chapter("<p>Body</p>"))
        .build();

    let book = parse_epub(&data, "book.epub").expect("parse");
    assert_eq!(book.content, "Body");
}

#[test]
fn test_blank_chapter_skipped() {
    let data = EpubBuilder::standard()
        .file(
            "OEBPS/content.opf",
            opf(
                DC_TITLE,
                &[("c1", "ch1.xhtml"), ("blank", "blank.xhtml"), ("c2", "ch2.xhtml")],
                &["c1", "blank", "c2"],
            ),
        )
        .file("OEBPS/ch1.xhtml", chapter("<p>A</p>"))
        .file("OEBPS/blank.xhtml", chapter("<div>  <br/>  </div>"))
        .file("OEBPS/ch2.xhtml", chapter("<p>B</p>"))
        .build();

    let book = parse_epub(&data, "book.epub").expect("parse");
    assert_eq!(book.content, "A\n\nB");
}

#[test]
fn test_corrupt_chapter_skipped() {
    let mut data = EpubBuilder::standard()
        .file(
            "OEBPS/content.opf",
            opf(
                DC_TITLE,
                &[("c1", "ch1.xhtml"), ("c2", "ch2.xhtml"), ("c3", "ch3.xhtml")],
                &["c1", "c2", "c3"],
            ),
        )
        .file("OEBPS/ch1.xhtml", chapter("<p>Before</p>"))
        .file("OEBPS/ch2.xhtml", chapter("<p>Garbled middle</p>"))
        .file("OEBPS/ch3.xhtml", chapter("<p>After</p>"))
        .stored()
        .build();

    let needle = b"Garbled middle";
    let pos = data
        .windows(needle.len())
        .position(|window| window == needle)
        .expect("stored chapter bytes");
    data[pos] ^= 0x20;

    let book = parse_epub(&data, "book.epub").expect("parse");
    assert_eq!(book.content, "Before\n\nAfter");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_not_a_zip() {
    let result = parse_epub(b"definitely not a zip archive", "book.epub");
    assert!(matches!(result, Err(Error::ContainerFormat(_))));
}

#[test]
fn test_missing_container_xml() {
    let data = EpubBuilder::new()
        .file("OEBPS/content.opf", opf(DC_TITLE, &[], &[]))
        .build();

    let result = parse_epub(&data, "book.epub");
    assert!(matches!(result, Err(Error::InvalidContainer(_))));
}

#[test]
fn test_container_without_rootfile() {
    let data = EpubBuilder::new()
        .file("META-INF/container.xml", "<container><rootfiles/></container>")
        .build();

    let result = parse_epub(&data, "book.epub");
    assert!(matches!(result, Err(Error::InvalidContainer(_))));
}

#[test]
fn test_missing_package_document() {
    let data = EpubBuilder::standard().build();

    let err = parse_epub(&data, "book.epub").expect_err("missing opf");
    assert!(matches!(err, Error::InvalidPackage(_)));
    assert!(err.to_string().contains("OEBPS/content.opf"));
}

// ============================================================================
// Reading From Disk
// ============================================================================

#[test]
fn test_read_epub_from_path() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("Untitled Draft.epub");
    let data = EpubBuilder::standard()
        .file(
            "OEBPS/content.opf",
            opf("", &[("c1", "ch1.xhtml")], &["c1"]),
        )
        .file("OEBPS/ch1.xhtml", chapter("<p>Draft text</p>"))
        .build();
    std::fs::File::create(&path)
        .and_then(|mut file| file.write_all(&data))
        .expect("write epub");

    let book = read_epub(&path).expect("read");
    assert_eq!(book.title, "Untitled Draft");
    assert_eq!(book.content, "Draft text");
}

#[test]
fn test_read_epub_missing_file() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let result = read_epub(dir.path().join("absent.epub"));
    assert!(matches!(result, Err(Error::Io(_))));
}
