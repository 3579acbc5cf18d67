use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::compare;
use crate::config::{self, PairEntry};
use crate::core::{
    CompareRunReport, GenerateReport, PairOutcome, PairStatus, REPORT_DELIMITER, ReportProfile,
};
use crate::generate;
use crate::logs;
use crate::parser::{self, ParseOptions};

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub show_progress: bool,
}

#[derive(Debug, Clone)]
pub struct Engine {
    profile: ReportProfile,
    opts: EngineOptions,
}

#[derive(Debug, Clone)]
pub struct CompareRequest {
    pub list_path: PathBuf,
    pub log_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub rows: u64,
    pub dest: PathBuf,
    pub seed: Option<u64>,
}

impl Engine {
    pub fn new(profile: ReportProfile, opts: EngineOptions) -> Self {
        Self { profile, opts }
    }

    pub fn profile(&self) -> &ReportProfile {
        &self.profile
    }

    /// Sequential comparison run over the pair list. A pair whose files
    /// cannot be read is recorded as invalid, left out of the log, and
    /// the run moves on to the next entry; only an unreadable or
    /// malformed list (or a log write failure) aborts the run.
    pub fn compare_pairs(&self, req: &CompareRequest) -> Result<CompareRunReport> {
        let entries = config::load_pair_list(&req.list_path)?;

        let progress_enabled = self.opts.show_progress && std::io::stderr().is_terminal();
        let pb = if progress_enabled && !entries.is_empty() {
            let pb = indicatif::ProgressBar::new(entries.len() as u64);
            pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
            Some(pb)
        } else {
            None
        };

        let parse_opts = ParseOptions {
            delimiter: REPORT_DELIMITER,
            skip_lines: self.profile.preamble_len(),
            has_header: true,
        };

        let mut outcomes = Vec::with_capacity(entries.len());
        let mut notes = Vec::new();
        for (idx, entry) in entries.iter().enumerate() {
            let outcome = compare_pair(idx, entry, parse_opts, &req.log_path, &mut notes)?;
            outcomes.push(outcome);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        let matched = outcomes
            .iter()
            .filter(|o| o.status == PairStatus::Match)
            .count();
        let mismatched = outcomes
            .iter()
            .filter(|o| o.status == PairStatus::NoMatch)
            .count();
        let invalid = outcomes
            .iter()
            .filter(|o| o.status == PairStatus::Invalid)
            .count();

        Ok(CompareRunReport {
            schema_version: "1.0".to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: generated_at(),
            list_path: req.list_path.display().to_string(),
            log_path: req.log_path.display().to_string(),
            matched,
            mismatched,
            invalid,
            notes,
            outcomes,
        })
    }

    pub fn generate(&self, req: &GenerateRequest) -> Result<GenerateReport> {
        let mut rng: StdRng = match req.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let progress_enabled = self.opts.show_progress && std::io::stderr().is_terminal();
        let path = generate::generate_to_path(
            &req.dest,
            req.rows,
            &self.profile,
            &mut rng,
            progress_enabled,
        )?;
        Ok(GenerateReport {
            schema_version: "1.0".to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: generated_at(),
            path: path.display().to_string(),
            rows: req.rows,
        })
    }
}

fn compare_pair(
    index: usize,
    entry: &PairEntry,
    parse_opts: ParseOptions,
    log_path: &Path,
    notes: &mut Vec<String>,
) -> Result<PairOutcome> {
    // the second file is only read when the first one was readable
    let parsed = parser::parse_report(Path::new(&entry.first), parse_opts).and_then(|first| {
        let second = parser::parse_report(Path::new(&entry.second), parse_opts)?;
        Ok((first, second))
    });

    let (first, second) = match parsed {
        Ok(pair) => pair,
        Err(err) => {
            notes.push(format!(
                "at least one file is invalid: {} | {} ({err:#})",
                entry.first, entry.second
            ));
            return Ok(PairOutcome {
                index,
                first: entry.first.clone(),
                second: entry.second.clone(),
                status: PairStatus::Invalid,
                logged: false,
            });
        }
    };

    let matched = compare::reports_match(&first, &second);
    logs::append_outcome(log_path, &entry.first, &entry.second, matched)?;
    Ok(PairOutcome {
        index,
        first: entry.first.clone(),
        second: entry.second.clone(),
        status: if matched {
            PairStatus::Match
        } else {
            PairStatus::NoMatch
        },
        logged: true,
    })
}

fn generated_at() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}
