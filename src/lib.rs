//! # speedread
//!
//! Extract the readable text of an EPUB and present it for speed reading.
//!
//! ## Features
//!
//! - Tolerant EPUB parsing: broken markup, odd attribute order and
//!   case-mismatched archive paths are all accepted
//! - Chapter text in spine order with block structure kept as line breaks
//! - RSVP sessions (one word at a time, punctuation-aware pacing)
//! - Bionic reading segments
//!
//! ## Quick Start
//!
//! ```no_run
//! use speedread::{read_epub, RsvpSession};
//!
//! let book = read_epub("input.epub")?;
//! println!("{}", book.title);
//!
//! let mut session = RsvpSession::with_wpm(450);
//! session.load_text(&book.content, 0);
//! let mut tick = session.play();
//! while let Some(current) = tick {
//!     println!("{}", current.word());
//!     std::thread::sleep(current.delay());
//!     tick = session.advance(&current);
//! }
//! # Ok::<(), speedread::Error>(())
//! ```
//!
//! ## Converting markup
//!
//! ```
//! use speedread::markup::html_to_text;
//!
//! let text = html_to_text("<p>Fish &amp; chips</p><p>Peas</p>");
//! assert_eq!(text, "Fish & chips\nPeas");
//! ```

pub mod book;
pub mod epub;
mod error;
pub mod markup;
pub mod session;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use book::ParsedEpub;
pub use epub::{parse_epub, read_epub};
pub use error::{Error, Result};
pub use session::{ReaderConfig, ReadingMode, RsvpSession, Tick};
