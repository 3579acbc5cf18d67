use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use rand::Rng;
use time::macros::format_description;
use time::{Date, Month};

use crate::core::{DatePart, GenerationRule, ReportProfile};

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Writes a complete report to the sink: the preamble verbatim, the
/// header line, then `rows` random data rows. Fields are joined by `,`
/// with no trailing delimiter; each row ends with a single line break.
/// On failure the sink is left wherever the write stopped.
pub fn write_report<W, R>(
    out: &mut W,
    rows: u64,
    profile: &ReportProfile,
    rng: &mut R,
) -> Result<()>
where
    W: Write,
    R: Rng + ?Sized,
{
    write_report_with(out, rows, profile, rng, || {})
}

/// Same as [`write_report`], invoking `on_row` after each data row.
pub fn write_report_with<W, R>(
    out: &mut W,
    rows: u64,
    profile: &ReportProfile,
    rng: &mut R,
    mut on_row: impl FnMut(),
) -> Result<()>
where
    W: Write,
    R: Rng + ?Sized,
{
    for line in &profile.preamble {
        writeln!(out, "{line}").context("write preamble")?;
    }
    writeln!(out, "{}", profile.schema.header_line()).context("write header line")?;

    for _ in 0..rows {
        let line = render_row(profile, rng)?;
        writeln!(out, "{line}").context("write data row")?;
        on_row();
    }

    Ok(())
}

/// Creates or truncates the destination (with the `.csv` suffix
/// appended) and writes a full report into it. Partial output is left in
/// place on failure; there is no rollback.
pub fn generate_to_path<R: Rng + ?Sized>(
    dest: &Path,
    rows: u64,
    profile: &ReportProfile,
    rng: &mut R,
    show_progress: bool,
) -> Result<PathBuf> {
    let path = with_csv_suffix(dest);
    let file = File::create(&path)
        .with_context(|| format!("unable to create report: {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let pb = if show_progress && rows > 0 {
        let pb = indicatif::ProgressBar::new(rows);
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        Some(pb)
    } else {
        None
    };

    let written = match &pb {
        Some(pb) => write_report_with(&mut out, rows, profile, rng, || pb.inc(1)),
        None => write_report(&mut out, rows, profile, rng),
    };
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    written.with_context(|| format!("unable to write report: {}", path.display()))?;

    out.flush()
        .with_context(|| format!("unable to write report: {}", path.display()))?;
    Ok(path)
}

/// Destinations are named without an extension; the suffix is always
/// appended rather than replacing one.
fn with_csv_suffix(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".csv");
    PathBuf::from(name)
}

/// One data row: a shared random date for the row, then every column in
/// schema order through its generation rule.
fn render_row<R: Rng + ?Sized>(profile: &ReportProfile, rng: &mut R) -> Result<String> {
    let date = random_report_date(profile.data_year(), rng)?;
    let mut fields = Vec::with_capacity(profile.schema.len());
    for column in profile.schema.columns() {
        fields.push(render_field(&column.rule, date, rng)?);
    }
    Ok(fields.join(","))
}

fn random_report_date<R: Rng + ?Sized>(year: i32, rng: &mut R) -> Result<Date> {
    let month = MONTHS[rng.random_range(0..MONTHS.len())];
    let day = rng.random_range(1..=month.length(year));
    Date::from_calendar_date(year, month, day)
        .with_context(|| format!("invalid synthetic date: {year} {month:?} {day}"))
}

fn render_field<R: Rng + ?Sized>(rule: &GenerationRule, date: Date, rng: &mut R) -> Result<String> {
    match rule {
        GenerationRule::Literal(text) => Ok(text.clone()),
        GenerationRule::IntRange { min, max } => Ok(rng.random_range(*min..=*max).to_string()),
        GenerationRule::OneOf(choices) => {
            if choices.is_empty() {
                return Err(anyhow!("empty category set"));
            }
            Ok(choices[rng.random_range(0..choices.len())].clone())
        }
        GenerationRule::DatePart(part) => render_date_part(*part, date),
    }
}

fn render_date_part(part: DatePart, date: Date) -> Result<String> {
    match part {
        DatePart::Stamp => {
            let stamp = format_description!("[day][month repr:short][year]");
            date.format(&stamp).context("format date stamp")
        }
        DatePart::Weekday => Ok(date.weekday().to_string()),
        DatePart::Day => Ok(date.day().to_string()),
        DatePart::Month => Ok(u8::from(date.month()).to_string()),
        DatePart::Year => Ok(date.year().to_string()),
    }
}
