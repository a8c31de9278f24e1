//! Row classification.
//!
//! Labels every word on a page: balance-marker anchor values (phase A),
//! the anchor row around the expected baseline offset (phase B), and
//! ordinary table words between the anchor row and the computed table end
//! (phase C). Classification writes into an annotation map keyed by word
//! index; the extracted words themselves stay untouched.

use crate::config::StatementConfig;
use crate::model::{Annotation, ColumnRange, RowKey, Word, WordKind};

use super::headers::HeaderScan;

/// Anchor label used when a balance marker identifies the value.
const ANCHOR_VALUE_LABEL: &str = "Anchor Value";

/// Label for non-numeric anchor-row words.
const ANCHOR_LABEL: &str = "Anchor";

/// Word indices of anchor-row words, gathered during classification.
#[derive(Debug, Clone, Default)]
pub struct ClassifyOutcome {
    /// Indices of words flagged as anchors
    pub anchors: Vec<usize>,
    /// Indices of words flagged as anchor values
    pub anchor_values: Vec<usize>,
}

/// Classifies the words of one page.
pub struct RowClassifier<'a> {
    config: &'a StatementConfig,
}

impl<'a> RowClassifier<'a> {
    /// Create a classifier over a layout configuration.
    pub fn new(config: &'a StatementConfig) -> Self {
        Self { config }
    }

    /// Classify `words`, writing into `annotations` (header entries are
    /// already present from detection).
    ///
    /// `ranges` are the externally supplied or locally estimated column
    /// ranges; when absent they are rebuilt from header positions. A page
    /// with neither headers nor ranges degrades: no classification, no
    /// error.
    pub fn classify(
        &self,
        words: &[Word],
        scan: &HeaderScan,
        ranges: Option<&[ColumnRange]>,
        page_width: f32,
        annotations: &mut [Option<Annotation>],
    ) -> ClassifyOutcome {
        let mut outcome = ClassifyOutcome::default();

        let baseline = scan.baseline_y();
        let resolved: Vec<ColumnRange> = match ranges {
            Some(r) if !r.is_empty() => r.to_vec(),
            _ => header_fallback_ranges(scan, page_width),
        };
        if baseline.is_none() && resolved.is_empty() {
            log::debug!("no headers and no column ranges; page left unclassified");
            return outcome;
        }

        self.detect_marker_values(words, annotations, &mut outcome);

        // Anchor phases need the header baseline; continuation pages
        // classified with cached ranges start their table at the page top.
        let table_zone_y = match baseline {
            Some(baseline) => {
                let anchor_y = baseline + self.config.anchor_offset;
                self.detect_anchor_row(words, anchor_y, scan, &resolved, annotations, &mut outcome);
                anchor_y + self.config.anchor_tolerance
            }
            None => 0.0,
        };

        let table_end_y = self.find_table_end(words, table_zone_y);
        self.detect_table_words(words, table_zone_y, table_end_y, &resolved, annotations);

        outcome
    }

    /// Phase A: rows carrying a balance marker contribute their
    /// currency-looking tokens as anchor values.
    fn detect_marker_values(
        &self,
        words: &[Word],
        annotations: &mut [Option<Annotation>],
        outcome: &mut ClassifyOutcome,
    ) {
        for marker in words.iter().filter(|w| self.config.balance_marker.is_match(&w.text)) {
            for (idx, other) in words.iter().enumerate() {
                if other.row_key() != marker.row_key()
                    || !self.config.is_currency_like(&other.text)
                {
                    continue;
                }
                if annotations[idx].is_some() {
                    continue;
                }
                log::debug!(
                    "anchor value '{}' for marker '{}' at x {:.1}",
                    other.text,
                    marker.text,
                    other.left
                );
                annotations[idx] = Some(Annotation::new(WordKind::AnchorValue, ANCHOR_VALUE_LABEL));
                outcome.anchor_values.push(idx);
            }
        }
    }

    /// Phase B: the vertical band around the expected anchor row.
    fn detect_anchor_row(
        &self,
        words: &[Word],
        anchor_y: f32,
        scan: &HeaderScan,
        ranges: &[ColumnRange],
        annotations: &mut [Option<Annotation>],
        outcome: &mut ClassifyOutcome,
    ) {
        let tolerance = self.config.anchor_tolerance;
        let credit_x = self
            .config
            .credit_header
            .as_deref()
            .and_then(|label| scan.header_x(label));

        for (idx, word) in words.iter().enumerate() {
            if (word.line_top - anchor_y).abs() > tolerance {
                continue;
            }
            if matches!(annotations[idx], Some(ref a) if a.kind == WordKind::Header) {
                continue;
            }

            if self.config.is_currency_like(&word.text) {
                let mut column = column_for(ranges, word.left)
                    .map(|r| r.header.clone())
                    .unwrap_or_else(|| ANCHOR_VALUE_LABEL.to_string());

                // Right-padded balance figures sit past the column start;
                // proximity to the credit header wins over the interval.
                if let Some(credit_x) = credit_x {
                    if let Some(credit) = self.config.credit_header.as_deref() {
                        if (word.left - credit_x).abs() < self.config.credit_proximity
                            && column != credit
                        {
                            log::debug!(
                                "forcing '{}' into '{credit}' (x {:.1} near header {credit_x:.1})",
                                word.text,
                                word.left
                            );
                            column = credit.to_string();
                        }
                    }
                }

                let label = format!("{ANCHOR_VALUE_LABEL} ({column})");
                let already_value = matches!(
                    annotations[idx],
                    Some(ref a) if a.kind == WordKind::AnchorValue
                );
                annotations[idx] = Some(Annotation::with_column(
                    WordKind::AnchorValue,
                    label,
                    column,
                ));
                // Marker detection may already hold this index.
                if !already_value {
                    outcome.anchor_values.push(idx);
                }
            } else {
                annotations[idx] = Some(Annotation::new(WordKind::Anchor, ANCHOR_LABEL));
                outcome.anchors.push(idx);
            }
        }
    }

    /// Phase C: table words between the anchor row and the table end.
    fn detect_table_words(
        &self,
        words: &[Word],
        table_zone_y: f32,
        table_end_y: f32,
        ranges: &[ColumnRange],
        annotations: &mut [Option<Annotation>],
    ) {
        for (idx, word) in words.iter().enumerate() {
            if word.line_top <= table_zone_y || word.line_top >= table_end_y {
                continue;
            }
            if annotations[idx].is_some() {
                continue;
            }
            let column = match column_for(ranges, word.left) {
                Some(range) => range.header.clone(),
                None => continue,
            };
            annotations[idx] = Some(Annotation::with_column(
                WordKind::TableWord,
                column.clone(),
                column,
            ));
        }
    }

    /// Bound the table: walk distinct row positions downward, collecting
    /// table-like rows, and stop at the first non-table-like row after the
    /// table has started.
    fn find_table_end(&self, words: &[Word], table_zone_y: f32) -> f32 {
        let mut row_keys: Vec<RowKey> = words.iter().map(|w| w.row_key()).collect();
        row_keys.sort();
        row_keys.dedup();

        let mut last_table_row: Option<f32> = None;
        for key in row_keys {
            let row_y = key.value();
            if row_y < table_zone_y {
                continue;
            }
            let table_like = words
                .iter()
                .filter(|w| w.row_key() == key)
                .any(|w| self.config.is_table_like(&w.text));

            if table_like {
                last_table_row = Some(row_y);
            } else if last_table_row.is_some() {
                break;
            }
        }

        match last_table_row {
            Some(last) => last + self.config.table_margin,
            None => table_zone_y + self.config.table_fallback_extent,
        }
    }
}

/// Point-in-interval lookup with a nearest-boundary fallback for words
/// that fit no interval cleanly.
pub fn column_for(ranges: &[ColumnRange], x: f32) -> Option<&ColumnRange> {
    if let Some(range) = ranges.iter().find(|r| r.contains(x)) {
        return Some(range);
    }
    let closest = ranges.iter().min_by(|a, b| {
        (x - a.start_x)
            .abs()
            .partial_cmp(&(x - b.start_x).abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    })?;
    log::debug!(
        "x {x:.1} fits no column; falling back to nearest '{}'",
        closest.header
    );
    Some(closest)
}

/// Column ranges rebuilt from header positions alone, used when no body
/// rows qualified for estimation: each range starts at its header's x,
/// the last one extends to the page width.
fn header_fallback_ranges(scan: &HeaderScan, page_width: f32) -> Vec<ColumnRange> {
    let sorted = scan.sorted_by_x();
    sorted
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let end_x = match sorted.get(i + 1) {
                Some(next) => next.x,
                None => page_width,
            };
            ColumnRange::new(header.text.clone(), header.x, end_x)
        })
        .collect()
}
