// src/sheets/directives.rs
// Reserved submission fields that steer where and how a record is written.

use super::record::{Record, Value};

pub const EXCLUDE_FIELD: &str = "e_gs_exclude";
pub const ORDER_FIELD: &str = "e_gs_order";
pub const SHEET_NAME_FIELD: &str = "e_gs_SheetName";
/// Fallback sheet name source. Unlike the reserved fields it stays a data column.
pub const FORM_NAME_FIELD: &str = "form_name";
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Field names that never become columns.
pub const RESERVED_FIELDS: [&str; 3] = [EXCLUDE_FIELD, ORDER_FIELD, SHEET_NAME_FIELD];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_FIELDS.contains(&name)
}

/// Directives read from one submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Directives {
    pub sheet_name: String,
    /// Columns to place first, in this order.
    pub order: Vec<String>,
    /// Columns to drop from the sheet.
    pub exclude: Vec<String>,
}

impl Directives {
    /// Read directives from the raw (unflattened) record. Never fails: anything
    /// unusable degrades to "no directive".
    pub fn extract(record: &Record, default_sheet: &str) -> Self {
        let sheet_name = sheet_name_from(record.get(SHEET_NAME_FIELD))
            .or_else(|| sheet_name_from(record.get(FORM_NAME_FIELD)))
            .unwrap_or_else(|| default_sheet.to_string());

        Self {
            sheet_name,
            order: parse_column_list(record.get(ORDER_FIELD)),
            exclude: parse_column_list(record.get(EXCLUDE_FIELD)),
        }
    }
}

fn sheet_name_from(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Split a comma-separated column list, trimming each entry.
///
/// Non-string and empty values yield an empty list. Blank entries are kept,
/// so `"a, "` also names the blank-header column.
pub fn parse_column_list(value: Option<&Value>) -> Vec<String> {
    let Some(text) = value.and_then(Value::as_str).filter(|t| !t.is_empty()) else {
        return Vec::new();
    };
    text.split(',').map(|item| item.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::record::record_from_json;

    #[test]
    fn test_sheet_name_precedence() {
        let record = record_from_json(
            br#"{"e_gs_SheetName": "Leads", "form_name": "contact"}"#,
        )
        .unwrap();
        assert_eq!(Directives::extract(&record, DEFAULT_SHEET_NAME).sheet_name, "Leads");

        let record = record_from_json(br#"{"form_name": "contact"}"#).unwrap();
        assert_eq!(Directives::extract(&record, DEFAULT_SHEET_NAME).sheet_name, "contact");

        let record = record_from_json(br#"{"a": "1"}"#).unwrap();
        assert_eq!(Directives::extract(&record, DEFAULT_SHEET_NAME).sheet_name, "Sheet1");
    }

    #[test]
    fn test_empty_sheet_name_falls_through() {
        let record = record_from_json(
            br#"{"e_gs_SheetName": "", "form_name": "signup"}"#,
        )
        .unwrap();
        assert_eq!(Directives::extract(&record, DEFAULT_SHEET_NAME).sheet_name, "signup");

        let record = record_from_json(br#"{"e_gs_SheetName": null, "form_name": ""}"#).unwrap();
        assert_eq!(Directives::extract(&record, "Inbox").sheet_name, "Inbox");
    }

    #[test]
    fn test_numeric_sheet_name() {
        let record = record_from_json(br#"{"e_gs_SheetName": 2024}"#).unwrap();
        assert_eq!(Directives::extract(&record, DEFAULT_SHEET_NAME).sheet_name, "2024");
    }

    #[test]
    fn test_order_and_exclude_lists_are_trimmed() {
        let record = record_from_json(
            br#"{"e_gs_order": " email , name ,date", "e_gs_exclude": "secret,  ,token "}"#,
        )
        .unwrap();
        let directives = Directives::extract(&record, DEFAULT_SHEET_NAME);
        assert_eq!(directives.order, vec!["email", "name", "date"]);
        assert_eq!(directives.exclude, vec!["secret", "", "token"]);
    }

    #[test]
    fn test_non_string_lists_degrade_to_empty() {
        let record = record_from_json(
            br#"{"e_gs_order": ["a", "b"], "e_gs_exclude": 5}"#,
        )
        .unwrap();
        let directives = Directives::extract(&record, DEFAULT_SHEET_NAME);
        assert!(directives.order.is_empty());
        assert!(directives.exclude.is_empty());
        assert!(parse_column_list(None).is_empty());
        assert!(parse_column_list(Some(&Value::from(""))).is_empty());
    }

    #[test]
    fn test_trailing_comma_names_blank_column() {
        assert_eq!(parse_column_list(Some(&Value::from("a, "))), vec!["a", ""]);
        assert_eq!(parse_column_list(Some(&Value::from(" "))), vec![""]);
    }

    #[test]
    fn test_reserved_names() {
        assert!(is_reserved("e_gs_order"));
        assert!(is_reserved("e_gs_exclude"));
        assert!(is_reserved("e_gs_SheetName"));
        assert!(!is_reserved("form_name"));
        assert!(!is_reserved("e_gs_sheetname"));
    }
}
