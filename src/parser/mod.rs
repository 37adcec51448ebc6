//! Parsing of Lighthouse report JSON into typed values.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Error returned when a byte buffer cannot be decoded as a Lighthouse
/// report at all. Field-level anomalies never produce this — see the
/// lenient decoders on [`ScoreDisplayMode`] and [`DisplayValue`].
#[derive(Debug, Error)]
#[error("not a valid Lighthouse report: {0}")]
pub struct ParseError(#[from] serde_json::Error);

/// Decode one Lighthouse report from its JSON bytes.
pub fn parse(data: &[u8]) -> Result<Report, ParseError> {
    Ok(serde_json::from_slice(data)?)
}

/// Root of a parsed Lighthouse report.
///
/// Audits and categories are keyed by their ids. BTreeMap keeps iteration
/// sorted, so everything derived from a report renders the same way on
/// every run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Report {
    pub fetch_time: Option<DateTime<Utc>>,
    pub lighthouse_version: String,
    pub final_url: String,
    pub requested_url: String,
    pub audits: BTreeMap<String, Audit>,
    pub categories: BTreeMap<String, Category>,
}

/// One individual check within a report.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Audit {
    pub id: String,
    pub title: String,
    pub description: String,
    pub score: Option<f64>,
    pub score_display_mode: ScoreDisplayMode,
    pub raw_value: RawValue,
    pub display_value: DisplayValue,
}

/// A named group of audits with an aggregate score.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub title: String,
    pub score: Option<f64>,
    pub audit_refs: Vec<AuditRef>,
}

/// A category's ordered pointer to one audit plus its weight there.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuditRef {
    pub id: String,
    pub weight: i64,
    pub group: Option<String>,
}

impl Report {
    /// Look up an audit by id.
    pub fn audit(&self, id: &str) -> Option<&Audit> {
        self.audits.get(id)
    }
}

impl Audit {
    /// Score as a number, with null/missing behaving as zero.
    pub fn score_or_zero(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }
}

impl Category {
    /// Score as a number, with null/missing behaving as zero.
    pub fn score_or_zero(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }
}

/// How an audit's score is meant to be displayed.
///
/// Unknown or non-string values decode to `NotApplicable` instead of
/// failing; reports from newer Lighthouse versions stay parseable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoreDisplayMode {
    #[default]
    NotApplicable,
    Binary,
    Informative,
    Manual,
    Numeric,
}

impl<'de> Deserialize<'de> for ScoreDisplayMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value.as_str() {
            Some("binary") => ScoreDisplayMode::Binary,
            Some("informative") => ScoreDisplayMode::Informative,
            Some("manual") => ScoreDisplayMode::Manual,
            Some("numeric") => ScoreDisplayMode::Numeric,
            _ => ScoreDisplayMode::NotApplicable,
        })
    }
}

/// Human-facing display string of an audit.
///
/// Lighthouse emits this field in several shapes. A `[format, number]`
/// array collapses to the number with two fractional digits — the format
/// string is discarded. An array of any other shape becomes the literal
/// `"ERROR"`. Empty strings and absent values are absent. Everything that
/// is neither a string nor an array passes through as raw JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayValue(Option<String>);

impl DisplayValue {
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or_default())
    }
}

impl<'de> Deserialize<'de> for DisplayValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde_json::Value;

        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Array(items) => {
                let format = items.first().and_then(Value::as_str);
                let number = items.get(1).and_then(Value::as_f64);
                match (format, number) {
                    (Some(_), Some(n)) => DisplayValue(Some(format!("{:.2}", n))),
                    _ => DisplayValue(Some("ERROR".to_string())),
                }
            }
            Value::String(s) if s.is_empty() => DisplayValue(None),
            Value::String(s) => DisplayValue(Some(s)),
            Value::Null => DisplayValue(None),
            other => DisplayValue(Some(other.to_string())),
        })
    }
}

/// Untyped passthrough of an audit's `rawValue` field. Never interpreted,
/// only carried.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RawValue {
    #[default]
    Absent,
    String(String),
    Number(f64),
    Other(serde_json::Value),
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde_json::Value;

        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Null => RawValue::Absent,
            Value::String(s) => RawValue::String(s),
            Value::Number(n) => match n.as_f64() {
                Some(f) => RawValue::Number(f),
                None => RawValue::Other(Value::Number(n)),
            },
            other => RawValue::Other(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audit_from(json: &str) -> Audit {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parse_minimal_report() {
        let report = parse(
            br#"{
                "lighthouseVersion": "3.2.1",
                "requestedUrl": "https://example.com/",
                "finalUrl": "https://example.com/",
                "fetchTime": "2019-05-02T08:53:46.285Z",
                "audits": {},
                "categories": {}
            }"#,
        )
        .unwrap();

        assert_eq!(report.lighthouse_version, "3.2.1");
        assert_eq!(report.final_url, "https://example.com/");
        assert!(report.fetch_time.is_some());
        assert!(report.audits.is_empty());
    }

    #[test]
    fn parse_rejects_invalid_json() {
        assert!(parse(b"{not json").is_err());
        assert!(parse(b"[1, 2, 3]").is_err());
    }

    #[test]
    fn parse_tolerates_missing_fields() {
        let report = parse(br#"{"audits": {"x": {"id": "x"}}}"#).unwrap();
        let audit = report.audit("x").unwrap();
        assert_eq!(audit.score, None);
        assert_eq!(audit.score_display_mode, ScoreDisplayMode::NotApplicable);
        assert!(audit.display_value.is_empty());
        assert_eq!(audit.raw_value, RawValue::Absent);
    }

    #[test]
    fn score_display_mode_known_literals() {
        let audit = audit_from(r#"{"scoreDisplayMode": "numeric"}"#);
        assert_eq!(audit.score_display_mode, ScoreDisplayMode::Numeric);

        let audit = audit_from(r#"{"scoreDisplayMode": "binary"}"#);
        assert_eq!(audit.score_display_mode, ScoreDisplayMode::Binary);

        let audit = audit_from(r#"{"scoreDisplayMode": "manual"}"#);
        assert_eq!(audit.score_display_mode, ScoreDisplayMode::Manual);

        let audit = audit_from(r#"{"scoreDisplayMode": "informative"}"#);
        assert_eq!(audit.score_display_mode, ScoreDisplayMode::Informative);
    }

    #[test]
    fn score_display_mode_unknown_falls_back() {
        let audit = audit_from(r#"{"scoreDisplayMode": "brand-new-mode"}"#);
        assert_eq!(audit.score_display_mode, ScoreDisplayMode::NotApplicable);

        // Not even a string: still not an error.
        let audit = audit_from(r#"{"scoreDisplayMode": 42}"#);
        assert_eq!(audit.score_display_mode, ScoreDisplayMode::NotApplicable);
    }

    #[test]
    fn display_value_array_collapses_to_two_decimals() {
        let audit =
            audit_from(r#"{"displayValue": ["%d%% legible", 95.06061966771442]}"#);
        assert_eq!(audit.display_value.as_str(), Some("95.06"));
    }

    #[test]
    fn display_value_malformed_array_is_error_sentinel() {
        let audit = audit_from(r#"{"displayValue": [1, 2, 3]}"#);
        assert_eq!(audit.display_value.as_str(), Some("ERROR"));

        let audit = audit_from(r#"{"displayValue": ["a", "b"]}"#);
        assert_eq!(audit.display_value.as_str(), Some("ERROR"));

        let audit = audit_from(r#"{"displayValue": []}"#);
        assert_eq!(audit.display_value.as_str(), Some("ERROR"));
    }

    #[test]
    fn display_value_string_passthrough() {
        let audit = audit_from(r#"{"displayValue": "Potential savings of 120 KB"}"#);
        assert_eq!(
            audit.display_value.as_str(),
            Some("Potential savings of 120 KB")
        );
    }

    #[test]
    fn display_value_empty_is_absent() {
        let audit = audit_from(r#"{"displayValue": ""}"#);
        assert!(audit.display_value.is_empty());

        let audit = audit_from(r#"{"displayValue": null}"#);
        assert!(audit.display_value.is_empty());
    }

    #[test]
    fn display_value_other_shapes_keep_raw_text() {
        let audit = audit_from(r#"{"displayValue": 120}"#);
        assert_eq!(audit.display_value.as_str(), Some("120"));
    }

    #[test]
    fn raw_value_variants() {
        let audit = audit_from(r#"{"rawValue": 1.5}"#);
        assert_eq!(audit.raw_value, RawValue::Number(1.5));

        let audit = audit_from(r#"{"rawValue": "fast"}"#);
        assert_eq!(audit.raw_value, RawValue::String("fast".to_string()));

        let audit = audit_from(r#"{"rawValue": {"items": []}}"#);
        assert!(matches!(audit.raw_value, RawValue::Other(_)));
    }

    #[test]
    fn null_score_behaves_as_zero() {
        let audit = audit_from(r#"{"score": null}"#);
        assert_eq!(audit.score, None);
        assert_eq!(audit.score_or_zero(), 0.0);
    }

    #[test]
    fn categories_keep_audit_ref_order() {
        let report = parse(
            br#"{
                "categories": {
                    "performance": {
                        "id": "performance",
                        "title": "Performance",
                        "score": 0.91,
                        "auditRefs": [
                            {"id": "z-audit", "weight": 3},
                            {"id": "a-audit", "weight": 1, "group": "metrics"}
                        ]
                    }
                }
            }"#,
        )
        .unwrap();

        let refs = &report.categories["performance"].audit_refs;
        assert_eq!(refs[0].id, "z-audit");
        assert_eq!(refs[0].weight, 3);
        assert_eq!(refs[1].id, "a-audit");
        assert_eq!(refs[1].group.as_deref(), Some("metrics"));
    }
}
