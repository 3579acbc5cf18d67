/// How one column's synthetic value is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRule {
    /// Constant text, e.g. the cycle tag.
    Literal(String),
    /// Uniform integer between inclusive bounds, rendered as decimal text.
    IntRange { min: i64, max: i64 },
    /// Uniform pick from a fixed category set.
    OneOf(Vec<String>),
    /// Component of the row's shared calendar date.
    DatePart(DatePart),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    /// Zero-padded day + abbreviated month + full year, e.g. `05Sep2017`.
    Stamp,
    /// Full weekday name, e.g. `Sunday`.
    Weekday,
    Day,
    Month,
    Year,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: String,
    pub rule: GenerationRule,
}

/// Ordered column layout of a report. Column order is significant and
/// fixed for the lifetime of a schema instance; comparison and generation
/// both preserve it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSchema {
    columns: Vec<ColumnSpec>,
}

impl ReportSchema {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Column names joined by `,`, with no trailing delimiter.
    pub fn header_line(&self) -> String {
        let names: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        names.join(",")
    }

    pub fn rule_for(&self, name: &str) -> Option<&GenerationRule> {
        self.columns.iter().find(|c| c.name == name).map(|c| &c.rule)
    }
}
