use crate::core::ParsedReport;

/// Byte-for-byte structural equality of the two row sequences: equal row
/// count, equal field count per row, identical field text. No numeric
/// normalization, no trimming, no case folding; row order matters, so a
/// permutation of identical rows is not a match.
pub fn reports_match(a: &ParsedReport, b: &ParsedReport) -> bool {
    a.rows == b.rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ReportRow;
    use std::path::PathBuf;

    fn report(rows: &[&[&str]]) -> ParsedReport {
        ParsedReport {
            source: PathBuf::from("test.csv"),
            skipped_lines: 18,
            header: None,
            rows: rows
                .iter()
                .map(|fields| ReportRow(fields.iter().map(|s| (*s).to_string()).collect()))
                .collect(),
        }
    }

    #[test]
    fn identical_reports_match() {
        let a = report(&[&["1", "x"], &["2", "y"]]);
        let b = report(&[&["1", "x"], &["2", "y"]]);
        assert!(reports_match(&a, &b));
    }

    #[test]
    fn one_altered_field_is_a_mismatch() {
        let a = report(&[&["1", "x"], &["2", "y"]]);
        let b = report(&[&["1", "x"], &["2", "Y"]]);
        assert!(!reports_match(&a, &b));
    }

    #[test]
    fn different_row_counts_mismatch_without_error() {
        let a = report(&[&["1", "x"]]);
        let b = report(&[&["1", "x"], &["2", "y"]]);
        assert!(!reports_match(&a, &b));
    }

    #[test]
    fn row_permutations_do_not_match() {
        let a = report(&[&["1", "x"], &["2", "y"]]);
        let b = report(&[&["2", "y"], &["1", "x"]]);
        assert!(!reports_match(&a, &b));
    }

    #[test]
    fn whitespace_differences_are_significant() {
        let a = report(&[&["1", "x"]]);
        let b = report(&[&["1", "x "]]);
        assert!(!reports_match(&a, &b));
    }
}
