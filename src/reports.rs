use std::collections::HashSet;

use crate::table::ConsumerTable;

/// Rendered in place of empty or missing cells.
pub const NOT_AVAILABLE: &str = "Not Available";

pub const SECTION_ACCOUNT: &str = "Account Information";
pub const SECTION_PERSONAL: &str = "Personal Information";
pub const SECTION_METER: &str = "Meter Information";
pub const SECTION_OTHER: &str = "Other Details";

const ACCOUNT_COLUMNS: &[&str] = &["ACCT_ID", "SUBSTATION", "FEEDER", "SUPPLY_TYPE"];

const PERSONAL_KEYWORDS: &[&str] = &[
    "NAME", "DOB", "GENDER", "CONTACT", "FATHER", "MOBILE", "ADDR", "CITY", "STATE", "PIN",
    "POSTAL",
];

const METER_COLUMNS: &[&str] = &[
    "SERIAL_NBR",
    "Jan_meter_read_remark",
    "MTR_MAKE",
    "MTR_NO_RECORDED",
    "CLOSING_READING",
];

/// One consumer's row, grouped into named sections. Built fresh per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub sections: Vec<ReportSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub title: &'static str,
    pub fields: Vec<(String, String)>,
}

fn is_personal(column: &str) -> bool {
    let upper = column.to_uppercase();
    PERSONAL_KEYWORDS.iter().any(|kw| upper.contains(kw))
}

/// Column-to-section assignment, derived from the column set alone.
/// Account and Meter keep their fixed list order (absent names skipped);
/// Personal and Other follow table order. The first three lists are
/// evaluated independently of one another; only Other subtracts their union.
pub fn section_columns(table: &ConsumerTable) -> Vec<(&'static str, Vec<String>)> {
    let account: Vec<String> = ACCOUNT_COLUMNS
        .iter()
        .filter(|col| table.column_index(col).is_some())
        .map(|col| col.to_string())
        .collect();

    let personal: Vec<String> = table
        .columns()
        .iter()
        .filter(|col| is_personal(col))
        .cloned()
        .collect();

    let meter: Vec<String> = METER_COLUMNS
        .iter()
        .filter(|col| table.column_index(col).is_some())
        .map(|col| col.to_string())
        .collect();

    let mut used: HashSet<&str> = HashSet::new();
    used.extend(ACCOUNT_COLUMNS);
    used.extend(METER_COLUMNS);
    used.extend(personal.iter().map(|c| c.as_str()));

    let other: Vec<String> = table
        .columns()
        .iter()
        .filter(|col| !used.contains(col.as_str()))
        .cloned()
        .collect();

    vec![
        (SECTION_ACCOUNT, account),
        (SECTION_PERSONAL, personal),
        (SECTION_METER, meter),
        (SECTION_OTHER, other),
    ]
}

/// Sectioned report for the consumer whose `ACCT_ID` equals `id`, or `None`
/// when no row matches. The first matching row wins when identifiers repeat.
/// Sections that resolve zero columns are omitted.
pub fn build_report(table: &ConsumerTable, id: &str) -> Option<Report> {
    let row = table.find(id)?;
    let mut sections = Vec::new();
    for (title, columns) in section_columns(table) {
        let fields: Vec<(String, String)> = columns
            .into_iter()
            .filter_map(|col| {
                let idx = table.column_index(&col)?;
                let value = &row[idx];
                let display = if value.is_empty() {
                    NOT_AVAILABLE.to_string()
                } else {
                    value.clone()
                };
                Some((col, display))
            })
            .collect();
        if !fields.is_empty() {
            sections.push(ReportSection { title, fields });
        }
    }
    Some(Report { sections })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: &[&[&str]]) -> ConsumerTable {
        ConsumerTable::new(
            columns.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    fn section<'a>(report: &'a Report, title: &str) -> Option<&'a ReportSection> {
        report.sections.iter().find(|s| s.title == title)
    }

    #[test]
    fn test_scenario_full_report() {
        let t = table(
            &["ACCT_ID", "NAME", "SERIAL_NBR", "SUBSTATION"],
            &[&["123", "", "S1", "Sub1"]],
        );
        let report = build_report(&t, "123").unwrap();

        assert_eq!(
            section(&report, SECTION_ACCOUNT).unwrap().fields,
            vec![
                ("ACCT_ID".to_string(), "123".to_string()),
                ("SUBSTATION".to_string(), "Sub1".to_string()),
            ]
        );
        assert_eq!(
            section(&report, SECTION_PERSONAL).unwrap().fields,
            vec![("NAME".to_string(), NOT_AVAILABLE.to_string())]
        );
        assert_eq!(
            section(&report, SECTION_METER).unwrap().fields,
            vec![("SERIAL_NBR".to_string(), "S1".to_string())]
        );
        // Every column was claimed by a named section.
        assert!(section(&report, SECTION_OTHER).is_none());
    }

    #[test]
    fn test_missing_id_is_none() {
        let t = table(&["ACCT_ID"], &[&["1"]]);
        assert_eq!(build_report(&t, "999"), None);
    }

    #[test]
    fn test_first_row_wins_on_duplicate_ids() {
        let t = table(
            &["ACCT_ID", "NAME"],
            &[&["7", "First"], &["7", "Second"]],
        );
        let report = build_report(&t, "7").unwrap();
        assert_eq!(
            section(&report, SECTION_PERSONAL).unwrap().fields[0].1,
            "First"
        );
    }

    #[test]
    fn test_idempotent() {
        let t = table(
            &["ACCT_ID", "NAME", "TARIFF"],
            &[&["1", "Asha", ""]],
        );
        assert_eq!(build_report(&t, "1"), build_report(&t, "1"));
    }

    #[test]
    fn test_personal_keywords_match_case_insensitively() {
        let t = table(
            &["ACCT_ID", "father_name", "Mobile_No", "dob"],
            &[&["1", "Ram", "9999", "1990-01-01"]],
        );
        let report = build_report(&t, "1").unwrap();
        let personal = section(&report, SECTION_PERSONAL).unwrap();
        let names: Vec<&str> = personal.fields.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(names, vec!["father_name", "Mobile_No", "dob"]);
    }

    #[test]
    fn test_substation_is_account_not_personal() {
        // "SUBSTATION" contains no personal keyword ("STATE" does not occur).
        let t = table(&["ACCT_ID", "SUBSTATION"], &[&["1", "Sub1"]]);
        let report = build_report(&t, "1").unwrap();
        assert!(section(&report, SECTION_PERSONAL).is_none());
        assert_eq!(
            section(&report, SECTION_ACCOUNT).unwrap().fields.len(),
            2
        );
    }

    #[test]
    fn test_unclaimed_columns_land_in_other_details() {
        let t = table(
            &["ACCT_ID", "TARIFF", "ARREARS"],
            &[&["1", "LT-1", "250"]],
        );
        let report = build_report(&t, "1").unwrap();
        assert_eq!(
            section(&report, SECTION_OTHER).unwrap().fields,
            vec![
                ("TARIFF".to_string(), "LT-1".to_string()),
                ("ARREARS".to_string(), "250".to_string()),
            ]
        );
    }

    #[test]
    fn test_every_column_in_exactly_one_section() {
        let t = table(
            &[
                "ACCT_ID",
                "NAME",
                "MOBILE",
                "SERIAL_NBR",
                "MTR_MAKE",
                "SUBSTATION",
                "TARIFF",
            ],
            &[&["1", "A", "9", "S", "M", "Sub", "LT"]],
        );
        let mut seen = Vec::new();
        for (_, columns) in section_columns(&t) {
            seen.extend(columns);
        }
        seen.sort();
        let mut expected: Vec<String> =
            t.columns().iter().cloned().collect();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let t = table(&["ACCT_ID"], &[&["1"]]);
        let report = build_report(&t, "1").unwrap();
        let titles: Vec<&str> = report.sections.iter().map(|s| s.title).collect();
        assert_eq!(titles, vec![SECTION_ACCOUNT]);
    }

    #[test]
    fn test_empty_cells_render_sentinel_everywhere() {
        let t = table(
            &["ACCT_ID", "FEEDER", "CLOSING_READING", "TARIFF"],
            &[&["1", "", "", ""]],
        );
        let report = build_report(&t, "1").unwrap();
        for sec in &report.sections {
            for (col, value) in &sec.fields {
                if col != "ACCT_ID" {
                    assert_eq!(value, NOT_AVAILABLE, "column {col}");
                }
            }
        }
    }

    #[test]
    fn test_meter_section_keeps_fixed_list_order() {
        let t = table(
            &["ACCT_ID", "CLOSING_READING", "SERIAL_NBR", "MTR_MAKE"],
            &[&["1", "100", "S1", "GENUS"]],
        );
        let report = build_report(&t, "1").unwrap();
        let names: Vec<&str> = section(&report, SECTION_METER)
            .unwrap()
            .fields
            .iter()
            .map(|(c, _)| c.as_str())
            .collect();
        assert_eq!(names, vec!["SERIAL_NBR", "MTR_MAKE", "CLOSING_READING"]);
    }
}
