use chrono::{Duration, NaiveDate};

use super::catalog::{ROOMS, TIME_SLOTS};
use super::model::{Batch, ExamType, ScheduledExam, Teacher, TeacherStatus};
use super::rng::{chance, int_between, pick, RandomSource};

struct TeacherSpec {
    id: &'static str,
    name: &'static str,
    subjects: &'static [&'static str],
    qualification: &'static str,
    salary_band: (i64, i64),
}

#[rustfmt::skip]
const TEACHER_TABLE: [TeacherSpec; 11] = [
    TeacherSpec { id: "t1", name: "Rajesh Kumar", subjects: &["Mathematics", "Science"], qualification: "M.Sc. Mathematics, B.Ed.", salary_band: (35_000, 45_000) },
    TeacherSpec { id: "t2", name: "Sunita Sharma", subjects: &["English", "Hindi"], qualification: "M.A. English, B.Ed.", salary_band: (32_000, 42_000) },
    TeacherSpec { id: "t3", name: "Anil Verma", subjects: &["Science", "Mathematics"], qualification: "M.Sc. Physics, B.Ed.", salary_band: (35_000, 45_000) },
    TeacherSpec { id: "t4", name: "Priya Nair", subjects: &["Social Studies", "English"], qualification: "M.A. History, B.Ed.", salary_band: (30_000, 40_000) },
    TeacherSpec { id: "t5", name: "Vikram Singh", subjects: &["Mathematics"], qualification: "M.Sc. Mathematics", salary_band: (38_000, 48_000) },
    TeacherSpec { id: "t6", name: "Kavita Joshi", subjects: &["Science"], qualification: "M.Sc. Chemistry, B.Ed.", salary_band: (38_000, 48_000) },
    TeacherSpec { id: "t7", name: "Deepak Mehta", subjects: &["Physics", "Mathematics"], qualification: "Ph.D. Physics", salary_band: (55_000, 70_000) },
    TeacherSpec { id: "t8", name: "Neha Gupta", subjects: &["Chemistry", "Biology"], qualification: "M.Sc. Chemistry", salary_band: (45_000, 58_000) },
    TeacherSpec { id: "t9", name: "Sanjay Agarwal", subjects: &["Accountancy", "Economics"], qualification: "M.Com., CA", salary_band: (50_000, 65_000) },
    TeacherSpec { id: "t10", name: "Ritu Kapoor", subjects: &["Business Studies", "Economics"], qualification: "MBA, M.Com.", salary_band: (45_000, 60_000) },
    TeacherSpec { id: "t11", name: "Arvind Rao", subjects: &["Biology"], qualification: "M.Sc. Botany, B.Ed.", salary_band: (35_000, 45_000) },
];

pub fn teacher_name(id: &str) -> Option<&'static str> {
    TEACHER_TABLE.iter().find(|t| t.id == id).map(|t| t.name)
}

fn email_for(name: &str) -> String {
    format!("{}@brightpath.edu", name.to_ascii_lowercase().replace(' ', "."))
}

pub fn generate_teachers(rng: &mut dyn RandomSource, batches: &[Batch]) -> Vec<Teacher> {
    TEACHER_TABLE
        .iter()
        .map(|t| {
            let assigned: Vec<String> = batches
                .iter()
                .filter(|b| b.teacher_id == t.id)
                .map(|b| b.name.clone())
                .collect();
            let experience_years = int_between(rng, 3, 20) as u32;
            let (lo, hi) = t.salary_band;
            let salary = (int_between(rng, lo / 500, hi / 500) * 500) as u32;
            let join_year = 2024 - int_between(rng, 1, experience_years.min(10) as i64);
            let join_month = int_between(rng, 1, 12);
            let phone = format!("+91 98{:08}", int_between(rng, 0, 99_999_999));
            // Unassigned staff are the ones on leave.
            let status = if assigned.is_empty() && chance(rng, 0.7) {
                TeacherStatus::OnLeave
            } else {
                TeacherStatus::Active
            };
            Teacher {
                id: t.id.to_string(),
                name: t.name.to_string(),
                email: email_for(t.name),
                phone,
                subjects: t.subjects.iter().map(|s| s.to_string()).collect(),
                qualification: t.qualification.to_string(),
                experience_years,
                salary,
                join_date: format!("{}-{:02}-01", join_year, join_month),
                batches: assigned,
                status,
            }
        })
        .collect()
}

pub const SCHEDULED_PER_BATCH: usize = 2;

pub fn generate_exam_schedule(
    rng: &mut dyn RandomSource,
    batches: &[Batch],
    reference_date: NaiveDate,
) -> Vec<ScheduledExam> {
    let mut out: Vec<ScheduledExam> = Vec::new();
    for batch in batches {
        for (i, subject) in batch.subjects.iter().take(SCHEDULED_PER_BATCH).enumerate() {
            let exam_type = if chance(rng, 0.5) {
                ExamType::UnitTest
            } else {
                ExamType::WeeklyTest
            };
            let date = reference_date + Duration::days(int_between(rng, 5, 40));
            let start_time = pick(rng, TIME_SLOTS)
                .split(" - ")
                .next()
                .unwrap_or_default()
                .to_string();
            let duration_minutes = match exam_type {
                ExamType::UnitTest => 90,
                _ => 45,
            };
            out.push(ScheduledExam {
                id: format!("sx-{}-{}", batch.id, i + 1),
                title: format!("{} {}", subject, exam_type.label()),
                exam_type,
                batch_id: batch.id.clone(),
                batch: batch.name.clone(),
                subject: subject.clone(),
                date: date.format("%Y-%m-%d").to_string(),
                start_time,
                duration_minutes,
                total_marks: exam_type.total_marks(),
                room: pick(rng, ROOMS).to_string(),
            });
        }
    }
    out.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.start_time.cmp(&b.start_time)));
    out
}
