use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairStatus {
    Match,
    NoMatch,
    /// At least one file of the pair could not be read; nothing logged.
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairOutcome {
    pub index: usize,
    pub first: String,
    pub second: String,
    pub status: PairStatus,
    pub logged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareRunReport {
    pub schema_version: String,
    pub tool_version: String,
    pub generated_at: String,
    pub list_path: String,
    pub log_path: String,
    pub matched: usize,
    pub mismatched: usize,
    pub invalid: usize,
    pub notes: Vec<String>,
    pub outcomes: Vec<PairOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateReport {
    pub schema_version: String,
    pub tool_version: String,
    pub generated_at: String,
    pub path: String,
    pub rows: u64,
}
