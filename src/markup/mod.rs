//! Markup handling: a tolerant tokenizer, entity decoding and
//! markup-to-text conversion.

mod entities;
mod text;
pub mod tokenizer;

pub use entities::decode_entities;
pub use text::{html_to_text, normalize_whitespace, strip_markup};
