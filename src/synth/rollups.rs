//! Dashboard rollups derived once from the assembled roster.
//!
//! Counts, averages and top performers are computed from the records. Fields
//! documented as cosmetic are independent random decoration and do not
//! reconcile with any underlying exam or attendance data.

use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

use super::catalog::CATALOG_YEAR;
use super::model::{
    AssignmentLibraryEntry, Batch, BatchAnalytics, MaterialKind, MaterialLibraryEntry, Student,
    Teacher, TeacherActivity,
};
use super::rng::{float_between, int_between, pick, RandomSource};
use crate::stats::{mean, round_off_1_decimal};

pub const TOP_PERFORMERS: usize = 3;

fn students_by_batch(students: &[Student]) -> HashMap<&str, Vec<&Student>> {
    let mut map: HashMap<&str, Vec<&Student>> = HashMap::new();
    for s in students {
        map.entry(s.batch_id.as_str()).or_default().push(s);
    }
    map
}

pub fn teacher_activity(
    rng: &mut dyn RandomSource,
    teachers: &[Teacher],
    batches: &[Batch],
    students: &[Student],
    reference_date: NaiveDate,
) -> Vec<TeacherActivity> {
    let by_batch = students_by_batch(students);
    teachers
        .iter()
        .map(|t| {
            let own: Vec<&Batch> = batches.iter().filter(|b| b.teacher_id == t.id).collect();
            let student_count: usize = own
                .iter()
                .map(|b| by_batch.get(b.id.as_str()).map(|v| v.len()).unwrap_or(0))
                .sum();
            // Cosmetic.
            let classes_this_week = int_between(rng, 0, 6) as u32 * own.len().max(1) as u32;
            let assignments_graded = int_between(rng, 0, student_count.max(10) as i64) as u32;
            let avg_student_score = round_off_1_decimal(float_between(rng, 65.0, 90.0));
            let attendance_marked = round_off_1_decimal(float_between(rng, 80.0, 100.0));
            let last_active = reference_date - Duration::days(int_between(rng, 0, 6));
            TeacherActivity {
                teacher_id: t.id.clone(),
                teacher: t.name.clone(),
                batch_count: own.len(),
                student_count,
                classes_this_week,
                assignments_graded,
                avg_student_score,
                attendance_marked,
                last_active: last_active.format("%Y-%m-%d").to_string(),
            }
        })
        .collect()
}

pub fn batch_analytics(
    rng: &mut dyn RandomSource,
    batches: &[Batch],
    students: &[Student],
) -> Vec<BatchAnalytics> {
    let by_batch = students_by_batch(students);
    batches
        .iter()
        .map(|b| {
            let members: &[&Student] = by_batch
                .get(b.id.as_str())
                .map(|v| v.as_slice())
                .unwrap_or(&[]);
            let average_attendance =
                mean(members.iter().map(|s| s.attendance.percentage)).unwrap_or(0.0);
            let average_marks = mean(members.iter().map(|s| s.overall_score)).unwrap_or(0.0);
            let mut ranked: Vec<&&Student> = members.iter().collect();
            ranked.sort_by_key(|s| s.rank);
            let top_performers = ranked
                .into_iter()
                .take(TOP_PERFORMERS)
                .map(|s| s.name.clone())
                .collect();
            BatchAnalytics {
                batch_id: b.id.clone(),
                batch: b.name.clone(),
                student_count: members.len(),
                capacity: b.capacity,
                average_attendance: round_off_1_decimal(average_attendance),
                average_marks: round_off_1_decimal(average_marks),
                top_performers,
                // Cosmetic.
                pass_percentage: round_off_1_decimal(float_between(rng, 75.0, 100.0)),
                improvement: round_off_1_decimal(float_between(rng, -5.0, 15.0)),
            }
        })
        .collect()
}

pub fn assignment_library(
    rng: &mut dyn RandomSource,
    batches: &[Batch],
    students: &[Student],
    reference_date: NaiveDate,
) -> Vec<AssignmentLibraryEntry> {
    let by_batch = students_by_batch(students);
    let mut out: Vec<AssignmentLibraryEntry> = Vec::new();
    for b in batches {
        let total_students = by_batch.get(b.id.as_str()).map(|v| v.len()).unwrap_or(0);
        for subject in &b.subjects {
            let chapter = int_between(rng, 1, 12);
            let due = reference_date + Duration::days(int_between(rng, 3, 21));
            out.push(AssignmentLibraryEntry {
                id: format!("lib-{}-{}", b.id, out.len() + 1),
                title: format!("{} - Chapter {} Practice Set", subject, chapter),
                subject: subject.clone(),
                batch_id: b.id.clone(),
                batch: b.name.clone(),
                created_by: b.teacher.clone(),
                due_date: due.format("%Y-%m-%d").to_string(),
                max_marks: 20,
                total_students,
                submissions: int_between(rng, 0, total_students as i64) as usize,
            });
        }
    }
    out
}

const MATERIAL_BANDS: [(&str, &[u8]); 2] = [
    ("Grades 6-10", &[6, 7, 8, 9, 10]),
    ("Grades 11-12", &[11, 12]),
];

pub fn material_library(
    rng: &mut dyn RandomSource,
    batches: &[Batch],
) -> Vec<MaterialLibraryEntry> {
    let kinds = [MaterialKind::Pdf, MaterialKind::Video, MaterialKind::Notes];
    let mut out: Vec<MaterialLibraryEntry> = Vec::new();
    for (band_label, grades) in MATERIAL_BANDS {
        let mut subjects: Vec<&String> = Vec::new();
        for b in batches.iter().filter(|b| grades.contains(&b.grade)) {
            for s in &b.subjects {
                if !subjects.contains(&s) {
                    subjects.push(s);
                }
            }
        }
        for subject in subjects {
            let kind = *pick(rng, &kinds);
            let title = match kind {
                MaterialKind::Pdf => format!("{} Reference Book ({})", subject, band_label),
                MaterialKind::Video => format!("{} Video Lectures ({})", subject, band_label),
                MaterialKind::Notes => format!("{} Revision Notes ({})", subject, band_label),
            };
            let size_kb = match kind {
                MaterialKind::Video => int_between(rng, 50_000, 400_000),
                _ => int_between(rng, 200, 8_000),
            } as u32;
            let uploaded_on = format!(
                "{}-{:02}-{:02}",
                CATALOG_YEAR,
                int_between(rng, 1, 12),
                int_between(rng, 1, 28)
            );
            out.push(MaterialLibraryEntry {
                id: format!("mat-{}", out.len() + 1),
                title,
                subject: subject.clone(),
                grades: grades.to_vec(),
                kind,
                size_kb,
                downloads: int_between(rng, 10, 600) as u32,
                uploaded_on,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::batches::generate_batches;
    use crate::synth::config::{default_reference_date, DatasetConfig};
    use crate::synth::roster::assemble_roster;
    use crate::synth::rng::SeededRandom;
    use crate::synth::teachers::generate_teachers;

    #[test]
    fn analytics_counts_match_roster() {
        let batches = generate_batches();
        let mut rng = SeededRandom::new(12);
        let roster = assemble_roster(&mut rng, &batches, &DatasetConfig::default());
        let teachers = generate_teachers(&mut rng, &batches);

        let analytics = batch_analytics(&mut rng, &batches, &roster);
        assert_eq!(analytics.len(), batches.len());
        let total: usize = analytics.iter().map(|a| a.student_count).sum();
        assert_eq!(total, roster.len());
        for a in &analytics {
            assert!(a.top_performers.len() <= TOP_PERFORMERS);
            let best = roster
                .iter()
                .find(|s| s.batch_id == a.batch_id && s.rank == 1)
                .expect("rank 1 student");
            assert_eq!(a.top_performers[0], best.name);
        }

        let activity =
            teacher_activity(&mut rng, &teachers, &batches, &roster, default_reference_date());
        let taught: usize = activity.iter().map(|a| a.student_count).sum();
        assert_eq!(taught, roster.len());
    }

    #[test]
    fn library_submissions_never_exceed_class_size() {
        let batches = generate_batches();
        let mut rng = SeededRandom::new(13);
        let roster = assemble_roster(&mut rng, &batches, &DatasetConfig::default());
        let lib = assignment_library(&mut rng, &batches, &roster, default_reference_date());
        let subject_slots: usize = batches.iter().map(|b| b.subjects.len()).sum();
        assert_eq!(lib.len(), subject_slots);
        assert!(lib.iter().all(|e| e.submissions <= e.total_students));
    }

    #[test]
    fn materials_cover_each_band_subject_once() {
        let batches = generate_batches();
        let mats = material_library(&mut SeededRandom::new(14), &batches);
        // 5 junior subjects, then 8 distinct senior science/commerce subjects.
        assert_eq!(mats.len(), 13);
        assert!(mats.iter().take(5).all(|m| m.grades == vec![6, 7, 8, 9, 10]));
    }
}
