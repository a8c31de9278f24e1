//! Column boundary estimation.
//!
//! There are no gridlines in the source, so column geometry is inferred
//! from where body-row words actually sit: multi-word rows below the
//! header contribute their i-th word's left edge to ordinal slot i, slot
//! averages become column centers, and centers are paired with headers
//! sorted by x.

use std::collections::BTreeMap;

use crate::config::StatementConfig;
use crate::model::{Annotation, ColumnRange, RowKey, Word, WordKind};

use super::headers::HeaderScan;

/// Estimate column ranges from the body rows of a page.
///
/// Returns `None` when the page has no headers or no row qualifies.
pub fn estimate_columns(
    words: &[Word],
    scan: &HeaderScan,
    annotations: &[Option<Annotation>],
    page_width: f32,
    config: &StatementConfig,
) -> Option<Vec<ColumnRange>> {
    let baseline = scan.baseline_y()?;
    let zone_y = baseline + config.header_row_height;

    // Body rows below the header zone, headers excluded. BTreeMap keeps
    // row iteration deterministic.
    let mut rows: BTreeMap<RowKey, Vec<&Word>> = BTreeMap::new();
    for (idx, word) in words.iter().enumerate() {
        let is_header = matches!(
            annotations.get(idx).and_then(|a| a.as_ref()),
            Some(a) if a.kind == WordKind::Header
        );
        if word.line_top > zone_y && !is_header {
            rows.entry(word.row_key()).or_default().push(word);
        }
    }

    // Bucket the i-th word of each qualifying row into ordinal slot i.
    let mut slots: Vec<Vec<f32>> = Vec::new();
    for row in rows.values_mut() {
        if row.len() < config.min_row_words {
            continue;
        }
        row.sort_by(|a, b| a.left.partial_cmp(&b.left).unwrap_or(std::cmp::Ordering::Equal));
        for (i, word) in row.iter().enumerate() {
            if slots.len() <= i {
                slots.push(Vec::new());
            }
            slots[i].push(word.left);
        }
    }

    let centers: Vec<f32> = slots
        .iter()
        .filter(|positions| !positions.is_empty())
        .map(|positions| positions.iter().sum::<f32>() / positions.len() as f32)
        .collect();
    if centers.is_empty() {
        return None;
    }

    let sorted_headers = scan.sorted_by_x();
    let ranges: Vec<ColumnRange> = centers
        .iter()
        .enumerate()
        .map(|(i, &center)| {
            let label = slot_label(i, &sorted_headers, config);
            let start_x = center - config.column_pad;
            let end_x = if i + 1 < centers.len() {
                centers[i + 1] - config.column_pad
            } else {
                page_width
            };
            ColumnRange::new(label, start_x, end_x)
        })
        .collect();

    for (i, range) in ranges.iter().enumerate() {
        log::debug!(
            "column {}: '{}' from {:.1} to {:.1}",
            i,
            range.header,
            range.start_x,
            range.end_x
        );
    }
    Some(ranges)
}

/// Label for ordinal slot `i`: the i-th header by ascending x, then the
/// fallback label list, then a synthesized name.
fn slot_label(
    i: usize,
    sorted_headers: &[&crate::model::HeaderOccurrence],
    config: &StatementConfig,
) -> String {
    if let Some(header) = sorted_headers.get(i) {
        return header.text.clone();
    }
    config
        .fallback_labels
        .get(i)
        .cloned()
        .unwrap_or_else(|| format!("Column_{}", i + 1))
}
