use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::{ParsedReport, ReportRow};

/// How to read one delimited report file.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub delimiter: u8,
    /// Records with a 0-based index below this are the preamble block and
    /// are discarded unconditionally.
    pub skip_lines: usize,
    /// When set, the record at the skip index is captured as the header
    /// and excluded from the data rows.
    pub has_header: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            skip_lines: 0,
            has_header: true,
        }
    }
}

/// Reads a report file. An unreadable file is an error value, never a
/// panic; the engine turns it into a per-pair "invalid" outcome.
pub fn parse_report(path: &Path, opts: ParseOptions) -> Result<ParsedReport> {
    let file = File::open(path)
        .with_context(|| format!("unable to open report: {}", path.display()))?;
    let (header, rows) = parse_reader(file, opts)
        .with_context(|| format!("unable to read report: {}", path.display()))?;
    Ok(ParsedReport {
        source: path.to_path_buf(),
        skipped_lines: opts.skip_lines,
        header,
        rows,
    })
}

/// Delimiter-splits every record, skipping the preamble block. Row order
/// in the result equals record order in the input; ragged records are
/// kept verbatim and fields are never trimmed or coerced.
pub fn parse_reader<R: Read>(
    reader: R,
    opts: ParseOptions,
) -> Result<(Option<ReportRow>, Vec<ReportRow>)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(opts.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut header = None;
    let mut rows = Vec::new();
    for (idx, record) in csv_reader.records().enumerate() {
        let record = record.with_context(|| format!("malformed record at line {}", idx + 1))?;
        if idx < opts.skip_lines {
            continue;
        }
        let row = ReportRow(record.iter().map(str::to_string).collect());
        if opts.has_header && idx == opts.skip_lines {
            header = Some(row);
        } else {
            rows.push(row);
        }
    }

    Ok((header, rows))
}
