use chrono::NaiveDate;

use super::assignments::generate_assignments;
use super::attendance::{generate_attendance_records, generate_attendance_summary};
use super::catalog::{
    birth_year_for_grade, CATALOG_YEAR, CITIES, FEMALE_FIRST_NAMES, LAST_NAMES, MALE_FIRST_NAMES,
    STREETS,
};
use super::config::DatasetConfig;
use super::exams::generate_exam_records;
use super::model::{Batch, ExamRecord, Gender, Student, SubjectScore};
use super::payments::{fee_snapshot, generate_payment_history};
use super::rng::{chance, int_between, pick, RandomSource};
use crate::stats::{mean, round_off_1_decimal};

const WEAK_SUBJECT_BELOW: f64 = 60.0;

fn phone_number(rng: &mut dyn RandomSource) -> String {
    format!("+91 9{:09}", int_between(rng, 0, 999_999_999))
}

/// Mean percentage per subject, in batch subject order.
pub fn subject_scores(subjects: &[String], records: &[ExamRecord]) -> Vec<SubjectScore> {
    subjects
        .iter()
        .filter_map(|s| {
            mean(
                records
                    .iter()
                    .filter(|r| &r.subject == s)
                    .map(|r| r.percentage),
            )
            .map(|avg| SubjectScore {
                subject: s.clone(),
                average: round_off_1_decimal(avg),
            })
        })
        .collect()
}

/// Up to two subjects at or above the overall score, best first.
pub fn strengths(scores: &[SubjectScore], overall: f64) -> Vec<String> {
    let mut above: Vec<&SubjectScore> = scores.iter().filter(|s| s.average >= overall).collect();
    above.sort_by(|a, b| b.average.total_cmp(&a.average));
    above.into_iter().take(2).map(|s| s.subject.clone()).collect()
}

pub fn weaknesses(scores: &[SubjectScore]) -> Vec<String> {
    scores
        .iter()
        .min_by(|a, b| a.average.total_cmp(&b.average))
        .filter(|s| s.average < WEAK_SUBJECT_BELOW)
        .map(|s| vec![s.subject.clone()])
        .unwrap_or_default()
}

pub fn generate_student(
    rng: &mut dyn RandomSource,
    index: usize,
    batch: &Batch,
    config: &DatasetConfig,
) -> Student {
    let gender = if chance(rng, 0.5) {
        Gender::Male
    } else {
        Gender::Female
    };
    let first_name = match gender {
        Gender::Male => pick(rng, MALE_FIRST_NAMES),
        Gender::Female => pick(rng, FEMALE_FIRST_NAMES),
    }
    .to_string();
    let last_name = pick(rng, LAST_NAMES).to_string();
    let parent_first = pick(rng, MALE_FIRST_NAMES).to_string();

    let birth_month = int_between(rng, 1, 12) as u32;
    let birth_day = int_between(rng, 1, 28) as u32;
    let date_of_birth =
        NaiveDate::from_ymd_opt(birth_year_for_grade(batch.grade), birth_month, birth_day)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();

    let house = int_between(rng, 1, 250);
    let street = pick(rng, STREETS).to_string();
    let city = pick(rng, CITIES).to_string();
    let phone = phone_number(rng);
    let parent_phone = phone_number(rng);
    let admission_date = format!("{}-04-{:02}", CATALOG_YEAR, int_between(rng, 1, 15));

    let exam_records = generate_exam_records(
        rng,
        batch,
        index,
        config.exam_record_limit,
        config.mark_scale,
    );
    let assignments = generate_assignments(
        rng,
        batch,
        index,
        config.assignment_limit,
        config.assignment_order,
    );
    let attendance_records = generate_attendance_records(rng, batch, config.reference_date);
    let attendance = generate_attendance_summary(rng);
    let payment_history = generate_payment_history(rng, batch.monthly_fee, batch.fee_type, index);
    let fee = fee_snapshot(batch.fee_type, batch.monthly_fee, &payment_history);

    let scores = subject_scores(&batch.subjects, &exam_records);
    let overall_score =
        round_off_1_decimal(mean(exam_records.iter().map(|r| r.percentage)).unwrap_or(0.0));
    let strengths = strengths(&scores, overall_score);
    let weaknesses = weaknesses(&scores);

    Student {
        id: format!("STU{:04}", index + 1),
        roll_no: (index + 1) as u32,
        name: format!("{} {}", first_name, last_name),
        email: format!(
            "{}.{}{}@student.brightpath.edu",
            first_name.to_ascii_lowercase(),
            last_name.to_ascii_lowercase(),
            index + 1
        ),
        parent_name: format!("{} {}", parent_first, last_name),
        first_name,
        last_name,
        gender,
        date_of_birth,
        address: format!("{}, {}", house, street),
        city,
        phone,
        parent_phone,
        admission_date,
        batch_id: batch.id.clone(),
        batch: batch.name.clone(),
        grade: batch.grade,
        fee,
        attendance,
        attendance_records,
        exam_records,
        assignments,
        payment_history,
        overall_score,
        subject_scores: scores,
        strengths,
        weaknesses,
        rank: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::batches::generate_batches;
    use crate::synth::model::{FeeType, PaymentStatus};
    use crate::synth::rng::{ConstantRandom, SeededRandom};

    #[test]
    fn constant_source_yields_pinned_student() {
        let batch = &generate_batches()[0];
        let config = DatasetConfig::default();
        let a = generate_student(&mut ConstantRandom(0.5), 0, batch, &config);
        let b = generate_student(&mut ConstantRandom(0.5), 0, batch, &config);

        // 0.5 fails the 50% gender draw and lands mid-pool everywhere.
        assert_eq!(a.gender, Gender::Female);
        assert_eq!(a.name, "Kavya Mehta");
        assert_eq!(a.name, b.name);
        assert_eq!(a.id, "STU0001");
        assert_eq!(a.batch_id, "b1");
        assert_eq!(a.batch, "Grade 6-A");
        assert_eq!(a.date_of_birth, "2013-07-15");
        // 44 of the 50 latest papers are short ones saturated at full marks; the
        // six mid-term and final papers score 60.
        assert_eq!(a.overall_score, 95.2);
        assert_eq!(a.payment_history.len(), 12);
        assert!(a
            .payment_history
            .iter()
            .zip(b.payment_history.iter())
            .all(|(x, y)| x.date == y.date && x.amount == y.amount && x.status == y.status));
        assert!(a
            .payment_history
            .iter()
            .all(|p| p.amount == 2500 && p.status == PaymentStatus::Paid));
    }

    #[test]
    fn student_collections_respect_caps() {
        let batches = generate_batches();
        let config = DatasetConfig::default();
        let mut rng = SeededRandom::new(21);
        for (i, batch) in batches.iter().enumerate() {
            let s = generate_student(&mut rng, i, batch, &config);
            assert!(s.exam_records.len() <= 50);
            assert!(s.assignments.len() <= 30);
            let expected = match batch.fee_type {
                FeeType::Monthly => 12,
                FeeType::Yearly => 1,
            };
            assert_eq!(s.payment_history.len(), expected);
            assert_eq!(s.fee.fee_type, batch.fee_type);
            assert!(s.strengths.len() <= 2);
        }
    }

    #[test]
    fn strengths_and_weaknesses_follow_scores() {
        let scores = vec![
            SubjectScore {
                subject: "Mathematics".into(),
                average: 82.0,
            },
            SubjectScore {
                subject: "Science".into(),
                average: 55.0,
            },
            SubjectScore {
                subject: "English".into(),
                average: 71.0,
            },
        ];
        assert_eq!(strengths(&scores, 69.3), vec!["Mathematics", "English"]);
        assert_eq!(weaknesses(&scores), vec!["Science"]);
        assert!(weaknesses(&scores[..1]).is_empty());
    }
}
