use std::path::PathBuf;

/// One data line: raw field text in file order. No trimming, no type
/// coercion; a ragged line keeps whatever field count it had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow(pub Vec<String>);

impl ReportRow {
    pub fn fields(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for ReportRow {
    fn from(fields: Vec<String>) -> Self {
        Self(fields)
    }
}

/// A report after parsing: source metadata plus rows in file order.
/// Reports are time series, so insertion order is meaningful. Never
/// mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReport {
    pub source: PathBuf,
    pub skipped_lines: usize,
    pub header: Option<ReportRow>,
    pub rows: Vec<ReportRow>,
}
