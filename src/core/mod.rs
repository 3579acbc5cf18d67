mod outcome;
mod profile;
mod report;
mod schema;

pub use outcome::{CompareRunReport, GenerateReport, PairOutcome, PairStatus};
pub use profile::{REPORT_DELIMITER, ReportProfile};
pub use report::{ParsedReport, ReportRow};
pub use schema::{ColumnSpec, DatePart, GenerationRule, ReportSchema};
