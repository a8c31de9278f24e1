//! Header keyword detection.

use crate::config::StatementConfig;
use crate::model::{Annotation, HeaderGroups, HeaderOccurrence, Word, WordKind};

/// The header occurrences found on one page.
#[derive(Debug, Clone, Default)]
pub struct HeaderScan {
    /// One entry per matched header word, in extraction order.
    pub positions: Vec<HeaderOccurrence>,
    /// Occurrences grouped by keyword, keys in first-seen order.
    pub groups: HeaderGroups,
}

impl HeaderScan {
    /// Whether no header keyword matched on the page.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Header baseline: the minimum top among occurrences.
    pub fn baseline_y(&self) -> Option<f32> {
        self.positions
            .iter()
            .map(|h| h.y)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// X position of the first occurrence of `label`, if present.
    pub fn header_x(&self, label: &str) -> Option<f32> {
        self.positions.iter().find(|h| h.text == label).map(|h| h.x)
    }

    /// Occurrences sorted by ascending x.
    pub fn sorted_by_x(&self) -> Vec<&HeaderOccurrence> {
        let mut sorted: Vec<&HeaderOccurrence> = self.positions.iter().collect();
        sorted.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
        sorted
    }
}

/// Scan words for exact header keyword matches. Matches are annotated as
/// headers and recorded as occurrences in their keyword's group.
pub fn detect_headers(
    words: &[Word],
    config: &StatementConfig,
    annotations: &mut [Option<Annotation>],
) -> HeaderScan {
    let mut scan = HeaderScan::default();

    for (idx, word) in words.iter().enumerate() {
        let Some(keyword) = config.header_keywords.iter().find(|k| **k == word.text) else {
            continue;
        };

        let occurrence = HeaderOccurrence::from_word(word);
        scan.positions.push(occurrence.clone());
        scan.groups.push(keyword, occurrence);
        annotations[idx] = Some(Annotation::new(WordKind::Header, keyword.clone()));
    }

    if !scan.is_empty() {
        log::debug!(
            "detected {} header occurrences across {} groups",
            scan.positions.len(),
            scan.groups.len()
        );
    }
    scan
}
