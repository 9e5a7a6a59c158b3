//! WASM bindings for reading EPUBs in the browser.
//!
//! This module exposes text extraction to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::ParsedEpub;
use crate::session::bionic;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Extracted EPUB text.
#[wasm_bindgen]
pub struct EpubText {
    inner: ParsedEpub,
}

#[wasm_bindgen]
impl EpubText {
    #[wasm_bindgen(getter)]
    pub fn title(&self) -> String {
        self.inner.title.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn content(&self) -> String {
        self.inner.content.clone()
    }

    #[wasm_bindgen(getter, js_name = wordCount)]
    pub fn word_count(&self) -> usize {
        self.inner.words().count()
    }
}

/// Extract title and text from raw EPUB bytes.
///
/// `file_name` supplies the title when the book declares none.
#[wasm_bindgen(js_name = parseEpub)]
pub fn parse_epub(data: &[u8], file_name: &str) -> Result<EpubText, JsValue> {
    let inner = crate::parse_epub(data, file_name).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(EpubText { inner })
}

/// Convert markup to normalized plain text.
#[wasm_bindgen(js_name = htmlToText)]
pub fn html_to_text(html: &str) -> String {
    crate::markup::html_to_text(html)
}

/// Length of the emphasized prefix of `word`, in UTF-16 code units so it
/// can be passed straight to `String.prototype.slice`.
#[wasm_bindgen(js_name = bionicSplit)]
pub fn bionic_split(word: &str, fixation_percent: u8) -> usize {
    let percent = bionic::clamp_fixation(fixation_percent);
    bionic::transform_word(word, percent)
        .bold
        .encode_utf16()
        .count()
}
