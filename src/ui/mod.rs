use anyhow::Error;
use std::io::{self, Write};
use unicode_width::UnicodeWidthChar;

use crate::core::{CompareRunReport, GenerateReport, PairStatus};

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub color: bool,
    pub stdin_is_tty: bool,
    pub stdout_is_tty: bool,
    pub stderr_is_tty: bool,
    pub quiet: bool,
    pub verbose: bool,
}

pub fn eprintln_error(err: &Error) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "error:");
    let _ = writeln!(stderr, "  {err}");

    let mut causes = err.chain().skip(1).peekable();
    if causes.peek().is_some() {
        let _ = writeln!(stderr, "caused by:");
        for cause in causes {
            let _ = writeln!(stderr, "  - {cause}");
        }
    }

    let _ = writeln!(stderr, "next:");
    let _ = writeln!(stderr, "  - rerun with `--verbose` for more detail");
    let _ = writeln!(
        stderr,
        "  - see `ddrs --help` for the available commands and options"
    );
}

pub fn print_compare_summary(report: &CompareRunReport, cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }

    let mut out = io::stdout().lock();
    let _ = writeln!(
        out,
        "summary: pairs={} matched={} mismatched={} invalid={}",
        report.outcomes.len(),
        report.matched,
        report.mismatched,
        report.invalid
    );
    for note in &report.notes {
        let _ = writeln!(out, "- {note}");
    }

    if report.outcomes.is_empty() {
        let _ = writeln!(out, "nothing to compare: the list is empty");
        return;
    }

    let _ = writeln!(out);
    print_outcomes_table(&mut out, report, cfg.color);

    let _ = writeln!(out);
    let _ = writeln!(out, "log: {}", report.log_path);
}

pub fn print_generate_summary(report: &GenerateReport, cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }

    let mut out = io::stdout().lock();
    let _ = writeln!(out, "generated {} ({} rows)", report.path, report.rows);
}

fn print_outcomes_table(out: &mut dyn Write, report: &CompareRunReport, color: bool) {
    let label_index = "#";
    let label_result = "RESULT";
    let label_pair = "PAIR";

    let index_w = report
        .outcomes
        .iter()
        .map(|o| visible_width_ansi(&format!("{:02}", o.index)))
        .max()
        .unwrap_or(0)
        .max(visible_width_ansi(label_index));
    let result_w = report
        .outcomes
        .iter()
        .map(|o| visible_width_ansi(status_label(o.status)))
        .max()
        .unwrap_or(0)
        .max(visible_width_ansi(label_result));

    let _ = writeln!(
        out,
        "{}  {}  {}",
        pad_start_display(label_index, index_w),
        pad_end_display(label_result, result_w),
        label_pair
    );
    let _ = writeln!(
        out,
        "{}  {}  {}",
        "-".repeat(index_w),
        "-".repeat(result_w),
        "-".repeat(visible_width_ansi(label_pair).max(4))
    );

    for outcome in &report.outcomes {
        let idx = pad_start_display(&format!("{:02}", outcome.index), index_w);
        let result = pad_end_ansi(&format_status(outcome.status, color), result_w);
        let _ = writeln!(out, "{idx}  {result}  {} | {}", outcome.first, outcome.second);
    }
}

fn status_label(status: PairStatus) -> &'static str {
    match status {
        PairStatus::Match => "match",
        PairStatus::NoMatch => "no match",
        PairStatus::Invalid => "invalid",
    }
}

fn format_status(status: PairStatus, color: bool) -> String {
    let s = status_label(status);
    if !color {
        return s.to_string();
    }

    let code = match status {
        PairStatus::Match => "32",
        PairStatus::NoMatch => "31",
        PairStatus::Invalid => "33",
    };
    format!("\x1b[{code}m{s}\x1b[0m")
}

fn pad_end_ansi(s: &str, width: usize) -> String {
    let w = visible_width_ansi(s);
    if w >= width {
        return s.to_string();
    }
    format!("{s}{}", " ".repeat(width - w))
}

fn pad_end_display(s: &str, width: usize) -> String {
    let w = visible_width_ansi(s);
    if w >= width {
        return s.to_string();
    }
    format!("{s}{}", " ".repeat(width - w))
}

fn pad_start_display(s: &str, width: usize) -> String {
    let w = visible_width_ansi(s);
    if w >= width {
        return s.to_string();
    }
    format!("{}{}", " ".repeat(width - w), s)
}

fn visible_width_ansi(s: &str) -> usize {
    let mut width: usize = 0;
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            if chars.peek() == Some(&'[') {
                let _ = chars.next();
                for ch2 in chars.by_ref() {
                    if ch2 == 'm' {
                        break;
                    }
                }
                continue;
            }
        }
        width = width.saturating_add(UnicodeWidthChar::width(ch).unwrap_or(0));
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_sequences_have_no_visible_width() {
        let colored = format_status(PairStatus::Match, true);
        assert_eq!(visible_width_ansi(&colored), "match".len());
        assert_eq!(visible_width_ansi("no match"), 8);
    }

    #[test]
    fn no_color_status_is_the_bare_label() {
        assert_eq!(format_status(PairStatus::NoMatch, false), "no match");
        assert_eq!(format_status(PairStatus::Invalid, false), "invalid");
    }
}
