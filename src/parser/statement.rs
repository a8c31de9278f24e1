//! Document orchestration: the two-pass parse over all pages.

use crate::config::StatementConfig;
use crate::error::Result;
use crate::model::{ColumnRange, Statement};
use crate::source::StatementSource;

use super::page::PageParser;

/// Parses a whole statement document.
///
/// Pass 1 probes pages in order until one produces header occurrences and
/// caches that page's estimated column ranges as the document-global
/// standard. Pass 2 re-parses every page from the start with the cached
/// ranges, so continuation pages without a repeated header row keep the
/// same column geometry as the first tabular page.
pub struct StatementParser {
    config: StatementConfig,
}

impl StatementParser {
    /// Create a parser with the default layout configuration.
    pub fn new() -> Self {
        Self {
            config: StatementConfig::default(),
        }
    }

    /// Create a parser with a custom layout configuration.
    pub fn with_config(config: StatementConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &StatementConfig {
        &self.config
    }

    /// Parse every page of `source` into a [`Statement`].
    ///
    /// Pages are processed one at a time in order; the source handle is
    /// rewound between passes, never reopened.
    pub fn parse<S: StatementSource + ?Sized>(&self, source: &S) -> Result<Statement> {
        let page_parser = PageParser::new(&self.config);
        let page_count = source.page_count();

        // Pass 1: find the column standard.
        let mut global_ranges: Option<Vec<ColumnRange>> = None;
        for index in 0..page_count {
            let raw = source.page(index)?;
            let probe = page_parser.probe(raw);
            if probe.has_headers {
                log::debug!("global column ranges taken from page {}", index + 1);
                global_ranges = probe.ranges;
                break;
            }
        }

        // Pass 2: parse every page with the cached standard.
        let mut statement = Statement::new();
        for index in 0..page_count {
            let raw = source.page(index)?;
            let bundle = page_parser.parse((index + 1) as u32, raw, global_ranges.as_deref());
            statement.header_groups.merge_from(&bundle.header_groups);
            statement.pages.push(bundle);
        }
        statement.column_ranges = global_ranges;

        Ok(statement)
    }
}

impl Default for StatementParser {
    fn default() -> Self {
        Self::new()
    }
}
