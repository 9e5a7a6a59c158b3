//! EPUB container, package and chapter handling.

pub mod archive;
pub mod parser;
mod reader;

pub use archive::Container;
pub use parser::{Package, parse_container_xml, parse_opf};
pub use reader::{parse_epub, read_epub};
