use chrono::{Duration, NaiveDate};

use super::catalog::TIME_SLOTS;
use super::model::{AttendanceRecord, AttendanceStatus, AttendanceSummary, Batch};
use super::rng::{chance, float_between, int_between, pick, RandomSource};
use crate::stats::{percent, round_off_1_decimal};

pub const ATTENDANCE_DAYS: i64 = 7;

pub fn generate_attendance_records(
    rng: &mut dyn RandomSource,
    batch: &Batch,
    reference_date: NaiveDate,
) -> Vec<AttendanceRecord> {
    let mut out: Vec<AttendanceRecord> = Vec::new();
    for back in 0..ATTENDANCE_DAYS {
        let date = (reference_date - Duration::days(back))
            .format("%Y-%m-%d")
            .to_string();
        let classes = int_between(rng, 1, 3);
        for _ in 0..classes {
            let subject = pick(rng, &batch.subjects).clone();
            let time_slot = pick(rng, TIME_SLOTS).to_string();
            let status = if chance(rng, 0.85) {
                AttendanceStatus::Present
            } else if chance(rng, 0.5) {
                AttendanceStatus::Absent
            } else {
                AttendanceStatus::Late
            };
            out.push(AttendanceRecord {
                date: date.clone(),
                subject,
                time_slot,
                status,
            });
        }
    }
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

/// Term-level totals shown on the student card. Not derived from the weekly sample.
pub fn generate_attendance_summary(rng: &mut dyn RandomSource) -> AttendanceSummary {
    let total_classes = int_between(rng, 90, 120) as u32;
    let rate = float_between(rng, 0.75, 0.98);
    let attended = ((total_classes as f64) * rate).round() as u32;
    AttendanceSummary {
        total_classes,
        attended,
        percentage: round_off_1_decimal(percent(attended as f64, total_classes as f64)),
    }
}
