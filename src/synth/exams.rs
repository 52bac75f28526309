use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::catalog::CATALOG_YEAR;
use super::model::{Batch, ExamRecord, ExamType};
use super::rng::{int_between, RandomSource};
use crate::stats::round_off_1_decimal;

pub const EXAM_SUBJECTS_PER_BATCH: usize = 3;

/// Letter grade for a percentage.
pub fn grade_for_percentage(pct: f64) -> &'static str {
    if pct >= 90.0 {
        "A+"
    } else if pct >= 80.0 {
        "A"
    } else if pct >= 70.0 {
        "B+"
    } else if pct >= 60.0 {
        "B"
    } else if pct >= 50.0 {
        "C"
    } else {
        "D"
    }
}

/// Month (1-12) of occurrence `k` out of `n` spread over the year.
/// A single occurrence lands in December, two in June and December.
pub fn occurrence_month(k: u32, n: u32) -> u32 {
    if n == 0 {
        return 1;
    }
    (((k + 1) * 12) / n).clamp(1, 12)
}

/// How a student's ability draw becomes marks on a paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkScale {
    /// The draw is a raw mark clamped to the paper's total, so 20- and 25-mark
    /// papers saturate at full marks.
    #[default]
    Raw,
    /// The draw is a percentage of the paper's total.
    PercentOfTotal,
}

pub fn base_ability(index: usize) -> i64 {
    60 + (index % 30) as i64
}

pub fn marks_for(scale: MarkScale, draw: i64, total: u32) -> u32 {
    match scale {
        MarkScale::Raw => draw.clamp(0, total as i64) as u32,
        MarkScale::PercentOfTotal => ((total as f64) * (draw as f64) / 100.0)
            .round()
            .clamp(0.0, total as f64) as u32,
    }
}

pub fn generate_exam_records(
    rng: &mut dyn RandomSource,
    batch: &Batch,
    index: usize,
    limit: usize,
    scale: MarkScale,
) -> Vec<ExamRecord> {
    let ability = base_ability(index);
    let subjects: Vec<&String> = batch.subjects.iter().take(EXAM_SUBJECTS_PER_BATCH).collect();
    let mut out: Vec<ExamRecord> = Vec::new();

    for exam_type in ExamType::ALL {
        let n = exam_type.occurrences();
        let total = exam_type.total_marks();
        for k in 0..n {
            let month = occurrence_month(k, n);
            for subject in &subjects {
                let day = int_between(rng, 1, 28) as u32;
                let date = NaiveDate::from_ymd_opt(CATALOG_YEAR, month, day)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();

                let marks = marks_for(scale, ability + int_between(rng, -10, 10), total);
                let percentage = round_off_1_decimal(100.0 * marks as f64 / total as f64);
                let exam_name = if n == 1 {
                    exam_type.label().to_string()
                } else {
                    format!("{} {}", exam_type.label(), k + 1)
                };

                out.push(ExamRecord {
                    id: String::new(),
                    exam_name,
                    exam_type,
                    subject: (*subject).clone(),
                    date,
                    marks_obtained: marks,
                    total_marks: total,
                    percentage,
                    grade: grade_for_percentage(percentage).to_string(),
                    rank: int_between(rng, 1, 25) as u32,
                });
            }
        }
    }

    out.sort_by(|a, b| b.date.cmp(&a.date));
    out.truncate(limit);
    for (i, r) in out.iter_mut().enumerate() {
        r.id = format!("ex-{}-{}", index + 1, i + 1);
    }
    out
}
