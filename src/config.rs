//! Statement layout configuration.
//!
//! Every keyword list, pattern, offset, and threshold the pipeline uses is
//! carried here so that differently formatted statements can be parsed
//! without code changes. The defaults describe the French retail-bank
//! layout the library was originally built for.

use regex::Regex;

/// Configuration for a statement layout.
#[derive(Debug, Clone)]
pub struct StatementConfig {
    /// Column-title tokens expected in the header row, in layout order.
    pub header_keywords: Vec<String>,

    /// Labels used when body rows expose more columns than named headers.
    pub fallback_labels: Vec<String>,

    /// Header keyword of the credit column, used for the anchor-value
    /// proximity override. `None` disables the override.
    pub credit_header: Option<String>,

    /// Pattern identifying a balance-carry-forward marker word.
    pub balance_marker: Regex,

    /// Currency and digit-grouping symbols recognized in amounts.
    pub currency_symbols: Vec<char>,

    /// Vertical distance from the header baseline to the start of the
    /// column-estimation zone.
    pub header_row_height: f32,

    /// Horizontal padding subtracted from averaged column centers when
    /// building column ranges.
    pub column_pad: f32,

    /// Vertical distance from the header baseline to the anchor row.
    pub anchor_offset: f32,

    /// Half-height of the vertical band that captures the anchor row.
    pub anchor_tolerance: f32,

    /// Maximum horizontal distance from the credit header under which an
    /// anchor value is forced into the credit column.
    pub credit_proximity: f32,

    /// Margin added below the last table-like row when bounding the table.
    pub table_margin: f32,

    /// Table extent assumed when no table-like row is found at all.
    pub table_fallback_extent: f32,

    /// Minimum words per row for the row to contribute to column
    /// estimation.
    pub min_row_words: usize,
}

impl StatementConfig {
    /// Create a configuration with the default French statement layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header keyword list.
    pub fn with_header_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the overflow column labels.
    pub fn with_fallback_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Set the credit column header, or disable the override with `None`.
    pub fn with_credit_header(mut self, header: Option<String>) -> Self {
        self.credit_header = header;
        self
    }

    /// Set the balance-marker pattern.
    pub fn with_balance_marker(mut self, pattern: Regex) -> Self {
        self.balance_marker = pattern;
        self
    }

    /// Set the currency symbol set.
    pub fn with_currency_symbols<I: IntoIterator<Item = char>>(mut self, symbols: I) -> Self {
        self.currency_symbols = symbols.into_iter().collect();
        self
    }

    /// Set the header-row height offset.
    pub fn with_header_row_height(mut self, height: f32) -> Self {
        self.header_row_height = height;
        self
    }

    /// Set the column-boundary pad.
    pub fn with_column_pad(mut self, pad: f32) -> Self {
        self.column_pad = pad;
        self
    }

    /// Set the anchor-row offset below the header baseline.
    pub fn with_anchor_offset(mut self, offset: f32) -> Self {
        self.anchor_offset = offset;
        self
    }

    /// Set the anchor-band tolerance.
    pub fn with_anchor_tolerance(mut self, tolerance: f32) -> Self {
        self.anchor_tolerance = tolerance;
        self
    }

    /// Set the credit-column proximity threshold.
    pub fn with_credit_proximity(mut self, proximity: f32) -> Self {
        self.credit_proximity = proximity;
        self
    }

    /// Set the table-end row margin.
    pub fn with_table_margin(mut self, margin: f32) -> Self {
        self.table_margin = margin;
        self
    }

    /// Set the fallback table extent.
    pub fn with_table_fallback_extent(mut self, extent: f32) -> Self {
        self.table_fallback_extent = extent;
        self
    }

    /// Set the minimum word count for estimation rows.
    pub fn with_min_row_words(mut self, count: usize) -> Self {
        self.min_row_words = count;
        self
    }

    /// Whether `text` reads like an amount: at least one digit plus a
    /// currency or grouping symbol.
    pub fn is_currency_like(&self, text: &str) -> bool {
        text.chars().any(|c| c.is_ascii_digit())
            && text.chars().any(|c| self.currency_symbols.contains(&c))
    }

    /// Whether `text` reads like table data (dates, amounts, references).
    pub fn is_table_like(&self, text: &str) -> bool {
        text.chars().any(|c| {
            c.is_ascii_digit()
                || c == '/'
                || c == '.'
                || c == ','
                || self.currency_symbols.contains(&c)
        })
    }
}

impl Default for StatementConfig {
    fn default() -> Self {
        let keywords = ["Date", "Date de Valeur", "Opération", "Débit", "Crédit"];
        let mut fallback: Vec<String> = keywords.iter().map(|s| s.to_string()).collect();
        fallback.push("Extra".to_string());

        Self {
            header_keywords: keywords.iter().map(|s| s.to_string()).collect(),
            fallback_labels: fallback,
            credit_header: Some("Crédit".to_string()),
            balance_marker: Regex::new("SOLDE").unwrap(),
            currency_symbols: vec!['€', ','],
            header_row_height: 25.0,
            column_pad: 15.0,
            anchor_offset: 20.0,
            anchor_tolerance: 5.0,
            credit_proximity: 50.0,
            table_margin: 10.0,
            table_fallback_extent: 100.0,
            min_row_words: 3,
        }
    }
}
