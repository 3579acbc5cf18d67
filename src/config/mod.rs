use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    pub ui: UiConfig,
    pub report: ReportConfig,
    pub compare: CompareConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UiConfig {
    pub color: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportConfig {
    pub cycle: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareConfig {
    pub list: String,
    pub log: String,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            ui: UiConfig { color: true },
            report: ReportConfig { cycle: 2018 },
            compare: CompareConfig {
                list: "ddr_config.txt".to_string(),
                log: "ddrs.log".to_string(),
            },
            config_path: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    ui: Option<RawUiConfig>,
    report: Option<RawReportConfig>,
    compare: Option<RawCompareConfig>,
}

#[derive(Debug, Deserialize)]
struct RawUiConfig {
    color: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawReportConfig {
    cycle: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct RawCompareConfig {
    list: Option<String>,
    log: Option<String>,
}

pub fn default_config_path(home_dir: &Path) -> PathBuf {
    home_dir.join(".config/ddrs/config.toml")
}

pub fn load(config_path: Option<&Path>, home_dir: &Path) -> Result<EffectiveConfig> {
    let mut cfg = EffectiveConfig::default();

    let path = config_path
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| default_config_path(home_dir));

    if path.exists() {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("unable to read config file: {}", path.display()))?;
        let raw: RawConfig = toml::from_str(&s).context("unable to parse config file (TOML)")?;
        apply_raw_config(&mut cfg, raw);
        cfg.config_path = Some(path.display().to_string());
    }

    apply_env_overrides(&mut cfg)?;

    Ok(cfg)
}

fn apply_raw_config(cfg: &mut EffectiveConfig, raw: RawConfig) {
    if let Some(ui) = raw.ui {
        if let Some(color) = ui.color {
            cfg.ui.color = color;
        }
    }

    if let Some(report) = raw.report {
        if let Some(cycle) = report.cycle {
            cfg.report.cycle = cycle;
        }
    }

    if let Some(compare) = raw.compare {
        if let Some(list) = compare.list {
            cfg.compare.list = list;
        }
        if let Some(log) = compare.log {
            cfg.compare.log = log;
        }
    }
}

fn apply_env_overrides(cfg: &mut EffectiveConfig) -> Result<()> {
    if let Ok(v) = std::env::var("DDRS_UI_COLOR") {
        cfg.ui.color = parse_bool(&v).with_context(|| "DDRS_UI_COLOR")?;
    }
    if let Ok(v) = std::env::var("DDRS_REPORT_CYCLE") {
        cfg.report.cycle = v
            .trim()
            .parse::<i32>()
            .with_context(|| "DDRS_REPORT_CYCLE")?;
    }
    if let Ok(v) = std::env::var("DDRS_COMPARE_LIST") {
        let v = v.trim();
        if !v.is_empty() {
            cfg.compare.list = v.to_string();
        }
    }
    if let Ok(v) = std::env::var("DDRS_COMPARE_LOG") {
        let v = v.trim();
        if !v.is_empty() {
            cfg.compare.log = v.to_string();
        }
    }

    Ok(())
}

fn parse_bool(s: &str) -> Result<bool> {
    let s = s.trim().to_ascii_lowercase();
    match s.as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow::anyhow!(
            "invalid boolean: {s} (use true|false|1|0|yes|no|on|off)"
        )),
    }
}

/// One line of the run-configuration file: two filenames assembled by
/// fragment concatenation, `(f0+f1, f2+f3)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairEntry {
    pub first: String,
    pub second: String,
}

/// Reads the pipe-delimited comparison list: no header line, exactly
/// four fields per line. Unreadable or malformed lists are fatal to the
/// whole run.
pub fn load_pair_list(path: &Path) -> Result<Vec<PairEntry>> {
    let file = File::open(path)
        .with_context(|| format!("unable to open comparison list: {}", path.display()))?;
    read_pair_list(file)
        .with_context(|| format!("unable to read comparison list: {}", path.display()))
}

pub fn read_pair_list<R: Read>(reader: R) -> Result<Vec<PairEntry>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut entries = Vec::new();
    for (idx, record) in csv_reader.records().enumerate() {
        let record = record.with_context(|| format!("malformed entry at line {}", idx + 1))?;
        if record.len() != 4 {
            bail!(
                "entry at line {} has {} fields, expected 4",
                idx + 1,
                record.len()
            );
        }
        entries.push(PairEntry {
            first: format!("{}{}", &record[0], &record[1]),
            second: format!("{}{}", &record[2], &record[3]),
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn pair_entry_concatenates_fragments() {
        let entries = read_pair_list(Cursor::new("a|b|c|d\n")).expect("read");
        assert_eq!(
            entries,
            vec![PairEntry {
                first: "ab".to_string(),
                second: "cd".to_string(),
            }]
        );
    }

    #[test]
    fn pair_entries_keep_list_order() {
        let entries =
            read_pair_list(Cursor::new("data/|jan.csv|data/|feb.csv\nx|1|y|2\n")).expect("read");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].first, "data/jan.csv");
        assert_eq!(entries[0].second, "data/feb.csv");
        assert_eq!(entries[1].first, "x1");
    }

    #[test]
    fn wrong_field_count_names_the_line() {
        let err = read_pair_list(Cursor::new("a|b|c|d\na|b|c\n")).expect_err("malformed");
        assert!(err.to_string().contains("line 2"));
        assert!(err.to_string().contains("expected 4"));
    }

    #[test]
    fn toml_overlays_the_defaults() {
        let raw: RawConfig = toml::from_str(
            r#"
[report]
cycle = 2019

[compare]
log = "audit.log"
"#,
        )
        .expect("toml");
        let mut cfg = EffectiveConfig::default();
        apply_raw_config(&mut cfg, raw);
        assert_eq!(cfg.report.cycle, 2019);
        assert_eq!(cfg.compare.log, "audit.log");
        assert_eq!(cfg.compare.list, "ddr_config.txt");
        assert!(cfg.ui.color);
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(parse_bool(" on ").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }
}
