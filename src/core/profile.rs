use super::{ColumnSpec, DatePart, GenerationRule, ReportSchema};

/// Field delimiter used by report files.
pub const REPORT_DELIMITER: u8 = b',';

/// Upper bound shared by the count-style columns.
const COUNT_MAX: i64 = 10_000;

/// Process-wide, read-only description of one reporting deployment: the
/// admissions cycle, the domicile buckets, the preamble text, and the
/// column schema with its generation rules. Built once at startup and
/// shared by reference; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportProfile {
    pub cycle: i32,
    pub domicile_groups: Vec<String>,
    pub preamble: Vec<String>,
    pub schema: ReportSchema,
}

impl ReportProfile {
    pub fn for_cycle(cycle: i32) -> Self {
        let domicile_groups: Vec<String> = ["1.ALL", "2.UK", "3.EU", "4.OV"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        let schema = build_schema(cycle, &domicile_groups);
        Self {
            cycle,
            preamble: reference_preamble(cycle),
            domicile_groups,
            schema,
        }
    }

    /// Number of non-tabular lines before the header line.
    pub fn preamble_len(&self) -> usize {
        self.preamble.len()
    }

    /// Reports for a cycle carry dates from the preceding calendar year.
    pub fn data_year(&self) -> i32 {
        self.cycle - 1
    }
}

fn build_schema(cycle: i32, domicile_groups: &[String]) -> ReportSchema {
    let count = GenerationRule::IntRange {
        min: 1,
        max: COUNT_MAX,
    };
    ReportSchema::new(vec![
        ColumnSpec {
            name: "Cycle".to_string(),
            rule: GenerationRule::Literal(cycle.to_string()),
        },
        ColumnSpec {
            name: "Date".to_string(),
            rule: GenerationRule::DatePart(DatePart::Stamp),
        },
        ColumnSpec {
            name: "Day_of_the_week".to_string(),
            rule: GenerationRule::DatePart(DatePart::Weekday),
        },
        ColumnSpec {
            name: "Day".to_string(),
            rule: GenerationRule::DatePart(DatePart::Day),
        },
        ColumnSpec {
            name: "Month".to_string(),
            rule: GenerationRule::DatePart(DatePart::Month),
        },
        ColumnSpec {
            name: "Year".to_string(),
            rule: GenerationRule::DatePart(DatePart::Year),
        },
        ColumnSpec {
            name: "Domicile_Group".to_string(),
            rule: GenerationRule::OneOf(domicile_groups.to_vec()),
        },
        ColumnSpec {
            name: "New_apps".to_string(),
            rule: count.clone(),
        },
        ColumnSpec {
            name: "7-Day Moving Ave".to_string(),
            rule: count.clone(),
        },
        ColumnSpec {
            name: "Days to Deadline".to_string(),
            rule: count.clone(),
        },
        ColumnSpec {
            name: "Working Days to Deadline".to_string(),
            rule: count.clone(),
        },
        ColumnSpec {
            name: "Days Since Cycle Opened".to_string(),
            rule: count,
        },
        ColumnSpec {
            name: "Bank Holiday".to_string(),
            rule: GenerationRule::IntRange { min: 0, max: 1 },
        },
    ])
}

/// The fixed banner block every report carries before its header line.
/// The line count here is what parsers must skip.
fn reference_preamble(cycle: i32) -> Vec<String> {
    vec![
        "\"---------------------------------------------------\"".to_string(),
        "\"UCAS Analysis and Insights - Daily Domicile Report\"".to_string(),
        "\"---------------------------------------------------\"".to_string(),
        "\"This data file should be used in conjunction with ...\"".to_string(),
        "\"File: filename\"".to_string(),
        format!("\"Cycle: {cycle}\""),
        "\"Reporting coverage: 6 Sep 2017 - 18 Feb 18\"".to_string(),
        "\"Applicant coverage: 18 year old applicants\"".to_string(),
        "\"Analysis class: Domicile\"".to_string(),
        "\"---------------------------------------------------\"".to_string(),
        "The 'Days to Deadline' variable Lorem ipsum dolor sit amet, consectetur adipiscing elit,"
            .to_string(),
        "The ' 7-Day Moving Average' variable sed do eiusmod tempor incididunt ut labore et dolore magna aliqua."
            .to_string(),
        "Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat."
            .to_string(),
        "Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. "
            .to_string(),
        "Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum."
            .to_string(),
        "Data lines are comma delimited.".to_string(),
        "Data follows - 9999 lines in total".to_string(),
        "---------------------------------------------------".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_profile_has_thirteen_columns() {
        let profile = ReportProfile::for_cycle(2018);
        assert_eq!(profile.schema.len(), 13);
        assert!(profile.schema.header_line().starts_with("Cycle,Date,"));
        assert!(profile.schema.header_line().ends_with(",Bank Holiday"));
    }

    #[test]
    fn preamble_is_eighteen_lines_and_names_the_cycle() {
        let profile = ReportProfile::for_cycle(2018);
        assert_eq!(profile.preamble_len(), 18);
        assert!(profile.preamble.contains(&"\"Cycle: 2018\"".to_string()));
    }

    #[test]
    fn data_year_precedes_the_cycle() {
        assert_eq!(ReportProfile::for_cycle(2018).data_year(), 2017);
    }

    #[test]
    fn cycle_tag_and_domiciles_feed_the_rules() {
        let profile = ReportProfile::for_cycle(2018);
        assert_eq!(
            profile.schema.rule_for("Cycle"),
            Some(&GenerationRule::Literal("2018".to_string()))
        );
        assert_eq!(
            profile.schema.rule_for("Bank Holiday"),
            Some(&GenerationRule::IntRange { min: 0, max: 1 })
        );
        match profile.schema.rule_for("Domicile_Group") {
            Some(GenerationRule::OneOf(groups)) => {
                assert_eq!(groups, &profile.domicile_groups);
                assert_eq!(groups.len(), 4);
            }
            other => panic!("unexpected rule: {other:?}"),
        }
    }
}
