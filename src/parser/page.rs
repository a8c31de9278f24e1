//! Page assembly: runs the per-page pipeline and builds the bundle.

use crate::config::StatementConfig;
use crate::model::{AnnotatedWord, ColumnRange, PageBundle, WordKind};
use crate::source::RawPage;

use super::classify::RowClassifier;
use super::columns::estimate_columns;
use super::extract::extract_words;
use super::headers::detect_headers;

/// What a pass-1 probe learned about a page.
#[derive(Debug, Clone, Default)]
pub struct ColumnProbe {
    /// Whether any header keyword matched on the page
    pub has_headers: bool,
    /// Column ranges estimated from the page's body rows
    pub ranges: Option<Vec<ColumnRange>>,
}

/// Parses a single page into a [`PageBundle`].
pub struct PageParser<'a> {
    config: &'a StatementConfig,
}

impl<'a> PageParser<'a> {
    /// Create a page parser over a layout configuration.
    pub fn new(config: &'a StatementConfig) -> Self {
        Self { config }
    }

    /// Run extraction, header detection, column resolution, and
    /// classification for one page.
    ///
    /// When `global_ranges` is absent the page estimates its own column
    /// ranges from its body rows.
    pub fn parse(
        &self,
        number: u32,
        raw: &RawPage,
        global_ranges: Option<&[ColumnRange]>,
    ) -> PageBundle {
        let words = extract_words(raw);
        let mut annotations = vec![None; words.len()];
        let scan = detect_headers(&words, self.config, &mut annotations);

        let local_ranges = if global_ranges.is_none() {
            estimate_columns(&words, &scan, &annotations, raw.width, self.config)
        } else {
            None
        };
        let ranges = global_ranges.or(local_ranges.as_deref());

        let outcome = RowClassifier::new(self.config).classify(
            &words,
            &scan,
            ranges,
            raw.width,
            &mut annotations,
        );

        let mut annotated: Vec<AnnotatedWord> = words
            .iter()
            .zip(annotations.iter())
            .map(|(word, annotation)| AnnotatedWord::new(word, annotation.as_ref()))
            .collect();

        // A header word's token is its group's latest occurrence, not the
        // generic word snapshot.
        for (idx, annotation) in annotations.iter().enumerate() {
            let Some(annotation) = annotation else {
                continue;
            };
            if annotation.kind != WordKind::Header {
                continue;
            }
            if let Some(last) = scan.groups.get(&annotation.label).and_then(|occs| occs.last()) {
                annotated[idx].token = serde_json::to_value(last).ok();
            }
        }

        let collect = |indices: &[usize]| -> Vec<AnnotatedWord> {
            indices.iter().map(|&idx| annotated[idx].clone()).collect()
        };

        PageBundle {
            number,
            width: raw.width,
            height: raw.height,
            anchors: collect(&outcome.anchors),
            anchor_values: collect(&outcome.anchor_values),
            words: annotated,
            header_groups: scan.groups,
        }
    }

    /// Pass-1 probe: header detection and column estimation only, without
    /// classifying or assembling the page.
    pub fn probe(&self, raw: &RawPage) -> ColumnProbe {
        let words = extract_words(raw);
        let mut annotations = vec![None; words.len()];
        let scan = detect_headers(&words, self.config, &mut annotations);
        if scan.is_empty() {
            return ColumnProbe::default();
        }
        ColumnProbe {
            has_headers: true,
            ranges: estimate_columns(&words, &scan, &annotations, raw.width, self.config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{BBox, RawBlock, RawLine, RawSpan};

    fn span(text: &str, x0: f32, y0: f32, x1: f32, y1: f32) -> RawSpan {
        RawSpan {
            text: Some(text.to_string()),
            bbox: Some(BBox::new(x0, y0, x1, y1)),
            font: Some("Helvetica".to_string()),
            size: Some(10.0),
            color: Some(0),
        }
    }

    fn line(y: f32, spans: Vec<RawSpan>) -> RawLine {
        RawLine {
            bbox: BBox::new(40.0, y, 560.0, y + 12.0),
            spans,
        }
    }

    fn statement_page() -> RawPage {
        RawPage {
            width: 600.0,
            height: 800.0,
            blocks: vec![RawBlock::Text {
                lines: vec![
                    line(
                        100.0,
                        vec![
                            span("Date", 50.0, 101.0, 80.0, 111.0),
                            span("Date de Valeur", 120.0, 101.0, 190.0, 111.0),
                            span("Opération", 220.0, 101.0, 280.0, 111.0),
                            span("Débit", 380.0, 101.0, 420.0, 111.0),
                            span("Crédit", 470.0, 101.0, 510.0, 111.0),
                        ],
                    ),
                    line(
                        120.0,
                        vec![
                            span("ANCIEN SOLDE CRÉDITEUR", 50.0, 121.0, 230.0, 131.0),
                            span("1 500,00€", 460.0, 121.0, 520.0, 131.0),
                        ],
                    ),
                    line(
                        130.0,
                        vec![
                            span("01/02/2024", 50.0, 131.0, 105.0, 141.0),
                            span("01/02/2024", 120.0, 131.0, 175.0, 141.0),
                            span("Paiement CB", 220.0, 131.0, 300.0, 141.0),
                            span("12,50€", 380.0, 131.0, 420.0, 141.0),
                        ],
                    ),
                    line(
                        150.0,
                        vec![
                            span("03/02/2024", 50.0, 151.0, 105.0, 161.0),
                            span("03/02/2024", 120.0, 151.0, 175.0, 161.0),
                            span("Prélèvement EDF", 220.0, 151.0, 320.0, 161.0),
                            span("45,00€", 385.0, 151.0, 425.0, 161.0),
                        ],
                    ),
                    line(180.0, vec![span("Fin de relevé", 220.0, 181.0, 300.0, 191.0)]),
                ],
            }],
        }
    }

    #[test]
    fn test_parse_assembles_bundle() {
        let config = StatementConfig::default();
        let parser = PageParser::new(&config);
        let bundle = parser.parse(1, &statement_page(), None);

        assert_eq!(bundle.number, 1);
        assert_eq!(bundle.width, 600.0);
        assert!(bundle.has_headers());
        assert_eq!(bundle.header_groups.len(), 5);
        assert_eq!(bundle.word_count(), 16);
        assert_eq!(bundle.anchors.len(), 1);
        assert_eq!(bundle.anchor_values.len(), 1);
        assert_eq!(bundle.anchor_values[0].word.text, "1 500,00€");
        assert_eq!(bundle.table_words().count(), 8);
    }

    #[test]
    fn test_header_token_is_group_occurrence() {
        let config = StatementConfig::default();
        let parser = PageParser::new(&config);
        let bundle = parser.parse(1, &statement_page(), None);

        let header = bundle.words.iter().find(|w| w.word.text == "Date").unwrap();
        assert!(header.is_header);
        let token = header.token.as_ref().unwrap();
        assert_eq!(token["text"], "Date");
        assert_eq!(token["x"], 50.0);
        assert_eq!(token["y"], 100.0);
        assert_eq!(token["width"], 30.0);
        assert_eq!(token["color"], "rgb(0,0,0)");
        // Occurrence shape, not the word snapshot.
        assert!(token.get("left").is_none());
        assert!(token.get("is_header").is_none());
    }

    #[test]
    fn test_repeated_header_token_uses_latest_occurrence() {
        let config = StatementConfig::default();
        let parser = PageParser::new(&config);
        let raw = RawPage {
            width: 600.0,
            height: 800.0,
            blocks: vec![RawBlock::Text {
                lines: vec![line(
                    100.0,
                    vec![
                        span("Date", 50.0, 101.0, 80.0, 111.0),
                        span("Date", 120.0, 101.0, 150.0, 111.0),
                    ],
                )],
            }],
        };
        let bundle = parser.parse(1, &raw, None);

        // Both occurrences share the group's last entry as their token.
        for header in bundle.words.iter().filter(|w| w.is_header) {
            assert_eq!(header.token.as_ref().unwrap()["x"], 120.0);
        }
    }

    #[test]
    fn test_probe_reports_headers_and_ranges() {
        let config = StatementConfig::default();
        let parser = PageParser::new(&config);
        let probe = parser.probe(&statement_page());

        assert!(probe.has_headers);
        let ranges = probe.ranges.unwrap();
        assert_eq!(ranges.len(), 4);
        assert_eq!(ranges[3].header, "Débit");
    }

    #[test]
    fn test_probe_headerless_page() {
        let config = StatementConfig::default();
        let parser = PageParser::new(&config);
        let raw = RawPage {
            width: 600.0,
            height: 800.0,
            blocks: vec![RawBlock::Text {
                lines: vec![line(60.0, vec![span("05/02/2024", 50.0, 61.0, 105.0, 71.0)])],
            }],
        };
        let probe = parser.probe(&raw);
        assert!(!probe.has_headers);
        assert!(probe.ranges.is_none());
    }
}
