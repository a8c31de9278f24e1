//! Word extraction from raw layout blocks.
//!
//! Converts the layout engine's block/line/span tree into word records.
//! The word's top (and row key) comes from the line bounding box, not the
//! span's own box, so every span on a visual line shares one row key.

use crate::error::{Error, Result};
use crate::model::{Rgb, Word};
use crate::source::{RawBlock, RawLine, RawPage, RawSpan};

/// Extract word records from a raw page. Malformed spans are logged and
/// skipped; extraction never fails for the page as a whole.
pub fn extract_words(page: &RawPage) -> Vec<Word> {
    let mut words = Vec::new();
    for block in &page.blocks {
        let RawBlock::Text { lines } = block else {
            continue;
        };
        for line in lines {
            for span in &line.spans {
                match word_from_span(span, line) {
                    Ok(word) => words.push(word),
                    Err(err) => log::warn!("skipping span: {err}"),
                }
            }
        }
    }
    words
}

fn word_from_span(span: &RawSpan, line: &RawLine) -> Result<Word> {
    let text = span
        .text
        .as_ref()
        .ok_or_else(|| Error::MalformedSpan("missing text".to_string()))?;
    let bbox = span
        .bbox
        .ok_or_else(|| Error::MalformedSpan(format!("missing bbox for {text:?}")))?;
    let font = span
        .font
        .as_ref()
        .ok_or_else(|| Error::MalformedSpan(format!("missing font for {text:?}")))?;
    let size = span
        .size
        .ok_or_else(|| Error::MalformedSpan(format!("missing size for {text:?}")))?;
    let color = span
        .color
        .ok_or_else(|| Error::MalformedSpan(format!("missing color for {text:?}")))?;

    Ok(Word {
        text: text.clone(),
        left: bbox.x0,
        top: line.bbox.y0,
        width: bbox.x1 - bbox.x0,
        height: bbox.y1 - line.bbox.y0,
        font: font.clone(),
        size,
        color: Rgb::from_packed(color),
        line_top: line.bbox.y0,
    })
}
