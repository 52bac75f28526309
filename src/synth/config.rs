use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::assignments::AssignmentOrder;
use super::error::SynthError;
use super::exams::MarkScale;

pub const DEFAULT_EXAM_RECORD_LIMIT: usize = 50;
pub const DEFAULT_ASSIGNMENT_LIMIT: usize = 30;

/// Reference dates outside this window are rejected; generation offsets them by
/// days and months and must stay inside chrono's range.
const EARLIEST_REFERENCE_YEAR: i32 = 1970;
const LATEST_REFERENCE_YEAR: i32 = 2100;

/// Inclusive students-per-batch range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetConfig {
    pub seed: Option<u64>,
    #[serde(serialize_with = "serialize_date")]
    pub reference_date: NaiveDate,
    pub exam_record_limit: usize,
    pub assignment_limit: usize,
    pub assignment_order: AssignmentOrder,
    pub mark_scale: MarkScale,
    /// Overrides the capacity-based batch size rule for every batch.
    pub students_per_batch: Option<SizeRange>,
}

fn serialize_date<S>(d: &NaiveDate, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_str(&d.format("%Y-%m-%d").to_string())
}

pub fn default_reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 20).unwrap_or_default()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            seed: None,
            reference_date: default_reference_date(),
            exam_record_limit: DEFAULT_EXAM_RECORD_LIMIT,
            assignment_limit: DEFAULT_ASSIGNMENT_LIMIT,
            assignment_order: AssignmentOrder::Generated,
            mark_scale: MarkScale::Raw,
            students_per_batch: None,
        }
    }
}

fn bad(message: impl Into<String>) -> SynthError {
    SynthError::new("bad_params", message)
}

fn parse_usize(
    obj: &serde_json::Map<String, serde_json::Value>,
    key: &str,
    max: usize,
) -> Result<Option<usize>, SynthError> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => {
            let Some(n) = v.as_u64() else {
                return Err(bad(format!("{} must be a non-negative integer", key)));
            };
            if n as usize > max {
                return Err(bad(format!("{} must be at most {}", key, max)));
            }
            Ok(Some(n as usize))
        }
    }
}

/// Parses the `config` object of a `dataset.generate` request. Missing keys keep
/// their defaults.
pub fn parse_dataset_config(raw: Option<&serde_json::Value>) -> Result<DatasetConfig, SynthError> {
    let mut cfg = DatasetConfig::default();
    let Some(raw) = raw else {
        return Ok(cfg);
    };
    if raw.is_null() {
        return Ok(cfg);
    }
    let Some(obj) = raw.as_object() else {
        return Err(bad("config must be an object"));
    };

    cfg.seed = match obj.get("seed") {
        None => None,
        Some(v) if v.is_null() => None,
        Some(v) => match (v.as_u64(), v.as_str()) {
            (Some(n), _) => Some(n),
            // Seeds beyond 2^53 survive JSON only as strings.
            (None, Some(s)) => Some(
                s.trim()
                    .parse::<u64>()
                    .map_err(|_| bad("seed must be an unsigned integer"))?,
            ),
            _ => return Err(bad("seed must be an unsigned integer")),
        },
    };

    if let Some(v) = obj.get("referenceDate").filter(|v| !v.is_null()) {
        let Some(s) = v.as_str() else {
            return Err(bad("referenceDate must be a YYYY-MM-DD string"));
        };
        let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| bad("referenceDate must be a YYYY-MM-DD string"))?;
        if !(EARLIEST_REFERENCE_YEAR..=LATEST_REFERENCE_YEAR).contains(&date.year()) {
            return Err(bad(format!(
                "referenceDate must fall between {} and {}",
                EARLIEST_REFERENCE_YEAR, LATEST_REFERENCE_YEAR
            ))
            .with_details(serde_json::json!({ "referenceDate": s })));
        }
        cfg.reference_date = date;
    }

    if let Some(n) = parse_usize(obj, "examRecordLimit", 1000)? {
        cfg.exam_record_limit = n;
    }
    if let Some(n) = parse_usize(obj, "assignmentLimit", 1000)? {
        cfg.assignment_limit = n;
    }

    if let Some(v) = obj.get("assignmentOrder").filter(|v| !v.is_null()) {
        cfg.assignment_order = match v.as_str() {
            Some("generated") => AssignmentOrder::Generated,
            Some("recentFirst") => AssignmentOrder::RecentFirst,
            _ => return Err(bad("assignmentOrder must be generated or recentFirst")),
        };
    }

    if let Some(v) = obj.get("markScale").filter(|v| !v.is_null()) {
        cfg.mark_scale = match v.as_str() {
            Some("raw") => MarkScale::Raw,
            Some("percentOfTotal") => MarkScale::PercentOfTotal,
            _ => return Err(bad("markScale must be raw or percentOfTotal")),
        };
    }

    if let Some(v) = obj.get("studentsPerBatch").filter(|v| !v.is_null()) {
        let Some(range) = v.as_object() else {
            return Err(bad("studentsPerBatch must be an object with min and max"));
        };
        let min = range.get("min").and_then(|x| x.as_u64());
        let max = range.get("max").and_then(|x| x.as_u64());
        let (Some(min), Some(max)) = (min, max) else {
            return Err(bad(
                "studentsPerBatch.min and studentsPerBatch.max are required",
            ));
        };
        if min > max || max > 500 {
            return Err(bad("studentsPerBatch must satisfy min <= max <= 500")
                .with_details(serde_json::json!({ "min": min, "max": max })));
        }
        cfg.students_per_batch = Some(SizeRange {
            min: min as u32,
            max: max as u32,
        });
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_config_uses_defaults() {
        let cfg = parse_dataset_config(None).expect("defaults");
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.exam_record_limit, 50);
        assert_eq!(cfg.assignment_limit, 30);
        assert_eq!(cfg.assignment_order, AssignmentOrder::Generated);
        assert_eq!(cfg.reference_date, default_reference_date());
        assert_eq!(cfg.mark_scale, MarkScale::Raw);
    }

    #[test]
    fn parses_every_key() {
        let raw = json!({
            "seed": "18446744073709551615",
            "referenceDate": "2024-11-30",
            "examRecordLimit": 10,
            "assignmentLimit": 5,
            "assignmentOrder": "recentFirst",
            "markScale": "percentOfTotal",
            "studentsPerBatch": { "min": 2, "max": 4 }
        });
        let cfg = parse_dataset_config(Some(&raw)).expect("parse");
        assert_eq!(cfg.seed, Some(u64::MAX));
        assert_eq!(cfg.reference_date.to_string(), "2024-11-30");
        assert_eq!(cfg.exam_record_limit, 10);
        assert_eq!(cfg.assignment_limit, 5);
        assert_eq!(cfg.assignment_order, AssignmentOrder::RecentFirst);
        assert_eq!(cfg.mark_scale, MarkScale::PercentOfTotal);
        assert_eq!(cfg.students_per_batch, Some(SizeRange { min: 2, max: 4 }));
    }

    #[test]
    fn rejects_bad_values() {
        for raw in [
            json!([]),
            json!({ "seed": -1 }),
            json!({ "referenceDate": "20/12/2024" }),
            json!({ "assignmentOrder": "random" }),
            json!({ "studentsPerBatch": { "min": 9, "max": 3 } }),
            json!({ "examRecordLimit": "ten" }),
            json!({ "markScale": "curved" }),
            json!({ "referenceDate": "+262142-12-31" }),
            json!({ "referenceDate": "1969-12-31" }),
            json!({ "referenceDate": "2101-01-01" }),
        ] {
            let e = parse_dataset_config(Some(&raw)).expect_err("should fail");
            assert_eq!(e.code, "bad_params", "{}", raw);
        }
    }

    #[test]
    fn reference_date_window_is_inclusive() {
        for s in ["1970-01-01", "2100-12-31"] {
            let cfg = parse_dataset_config(Some(&json!({ "referenceDate": s }))).expect(s);
            assert_eq!(cfg.reference_date.to_string(), s);
        }
    }
}
