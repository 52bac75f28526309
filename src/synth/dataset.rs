use serde::Serialize;
use std::collections::HashMap;

use super::batches::generate_batches;
use super::config::DatasetConfig;
use super::error::SynthError;
use super::model::{
    AssignmentLibraryEntry, Batch, BatchAnalytics, MaterialLibraryEntry, ScheduledExam, Student,
    Teacher, TeacherActivity,
};
use super::rng::{random_bytes, RandomSource};
use super::roster::assemble_roster;
use super::rollups::{assignment_library, batch_analytics, material_library, teacher_activity};
use super::teachers::{generate_exam_schedule, generate_teachers};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub id: String,
    pub seed: u64,
    pub config: DatasetConfig,
    pub batches: Vec<Batch>,
    pub students: Vec<Student>,
    pub teachers: Vec<Teacher>,
    pub exam_schedule: Vec<ScheduledExam>,
    pub teacher_activity: Vec<TeacherActivity>,
    pub batch_analytics: Vec<BatchAnalytics>,
    pub assignment_library: Vec<AssignmentLibraryEntry>,
    pub material_library: Vec<MaterialLibraryEntry>,
    #[serde(skip)]
    index: DatasetIndex,
}

/// Id lookup tables built once after assembly.
#[derive(Debug, Clone, Default)]
pub struct DatasetIndex {
    batch_by_id: HashMap<String, usize>,
    teacher_by_id: HashMap<String, usize>,
    student_by_id: HashMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetCounts {
    pub batches: usize,
    pub students: usize,
    pub teachers: usize,
    pub exam_schedule: usize,
    pub exam_records: usize,
    pub assignments: usize,
    pub attendance_records: usize,
    pub payments: usize,
}

fn index_unique<'a, I>(kind: &str, ids: I) -> Result<HashMap<String, usize>, SynthError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut map: HashMap<String, usize> = HashMap::new();
    for (i, id) in ids.into_iter().enumerate() {
        if map.insert(id.to_string(), i).is_some() {
            return Err(SynthError::new(
                "duplicate_id",
                format!("duplicate {} id {}", kind, id),
            ));
        }
    }
    Ok(map)
}

/// Builds the lookup tables and checks every cross reference: each student's
/// `batchId` resolves to exactly one batch carrying the same name, and each
/// batch's teacher exists.
pub fn build_index(
    batches: &[Batch],
    teachers: &[Teacher],
    students: &[Student],
) -> Result<DatasetIndex, SynthError> {
    let batch_by_id = index_unique("batch", batches.iter().map(|b| b.id.as_str()))?;
    let teacher_by_id = index_unique("teacher", teachers.iter().map(|t| t.id.as_str()))?;
    let student_by_id = index_unique("student", students.iter().map(|s| s.id.as_str()))?;

    for b in batches {
        if !teacher_by_id.contains_key(&b.teacher_id) {
            return Err(SynthError::new(
                "dangling_reference",
                format!("batch {} references unknown teacher {}", b.id, b.teacher_id),
            ));
        }
    }
    for s in students {
        let Some(&bi) = batch_by_id.get(&s.batch_id) else {
            return Err(SynthError::new(
                "dangling_reference",
                format!("student {} references unknown batch {}", s.id, s.batch_id),
            ));
        };
        if batches[bi].name != s.batch {
            return Err(SynthError::new(
                "dangling_reference",
                format!("student {} batch name does not match {}", s.id, s.batch_id),
            )
            .with_details(serde_json::json!({
                "student": s.batch,
                "batch": batches[bi].name,
            })));
        }
    }

    Ok(DatasetIndex {
        batch_by_id,
        teacher_by_id,
        student_by_id,
    })
}

/// Runs the whole synthesis pipeline once. The seed recorded on the dataset is
/// informational; the caller seeds `rng`.
pub fn generate_dataset(
    config: &DatasetConfig,
    seed: u64,
    rng: &mut dyn RandomSource,
) -> Result<Dataset, SynthError> {
    let id = uuid::Builder::from_random_bytes(random_bytes::<16>(rng))
        .into_uuid()
        .to_string();
    let batches = generate_batches();
    let students = assemble_roster(rng, &batches, config);
    let teachers = generate_teachers(rng, &batches);
    let exam_schedule = generate_exam_schedule(rng, &batches, config.reference_date);
    let teacher_activity =
        teacher_activity(rng, &teachers, &batches, &students, config.reference_date);
    let batch_analytics = batch_analytics(rng, &batches, &students);
    let assignment_library = assignment_library(rng, &batches, &students, config.reference_date);
    let material_library = material_library(rng, &batches);

    let index = build_index(&batches, &teachers, &students)?;

    Ok(Dataset {
        id,
        seed,
        config: config.clone(),
        batches,
        students,
        teachers,
        exam_schedule,
        teacher_activity,
        batch_analytics,
        assignment_library,
        material_library,
        index,
    })
}

impl Dataset {
    pub fn batch(&self, id: &str) -> Option<&Batch> {
        self.index.batch_by_id.get(id).map(|&i| &self.batches[i])
    }

    pub fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.index.teacher_by_id.get(id).map(|&i| &self.teachers[i])
    }

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.index.student_by_id.get(id).map(|&i| &self.students[i])
    }

    pub fn counts(&self) -> DatasetCounts {
        DatasetCounts {
            batches: self.batches.len(),
            students: self.students.len(),
            teachers: self.teachers.len(),
            exam_schedule: self.exam_schedule.len(),
            exam_records: self.students.iter().map(|s| s.exam_records.len()).sum(),
            assignments: self.students.iter().map(|s| s.assignments.len()).sum(),
            attendance_records: self
                .students
                .iter()
                .map(|s| s.attendance_records.len())
                .sum(),
            payments: self.students.iter().map(|s| s.payment_history.len()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::config::SizeRange;
    use crate::synth::model::FeeType;
    use crate::synth::rng::SeededRandom;

    fn small_config() -> DatasetConfig {
        DatasetConfig {
            students_per_batch: Some(SizeRange { min: 3, max: 5 }),
            ..DatasetConfig::default()
        }
    }

    #[test]
    fn dataset_references_resolve() {
        let ds = generate_dataset(&small_config(), 1, &mut SeededRandom::new(1)).expect("generate");
        for s in &ds.students {
            let b = ds.batch(&s.batch_id).expect("batch");
            assert_eq!(b.name, s.batch);
            assert_eq!(ds.student(&s.id).map(|x| x.id.as_str()), Some(s.id.as_str()));
            match b.fee_type {
                FeeType::Monthly => assert_eq!(s.payment_history.len(), 12),
                FeeType::Yearly => assert_eq!(s.payment_history.len(), 1),
            }
        }
        for b in &ds.batches {
            assert_eq!(
                ds.teacher(&b.teacher_id).map(|t| t.name.as_str()),
                Some(b.teacher.as_str())
            );
        }
        assert!(ds.batch("b99").is_none());
    }

    #[test]
    fn same_seed_same_dataset() {
        let a = generate_dataset(&small_config(), 5, &mut SeededRandom::new(5)).expect("a");
        let b = generate_dataset(&small_config(), 5, &mut SeededRandom::new(5)).expect("b");
        assert_eq!(a.id, b.id);
        assert_eq!(
            serde_json::to_string(&a).expect("json"),
            serde_json::to_string(&b).expect("json")
        );
    }

    #[test]
    fn mismatched_batch_name_is_rejected() {
        let mut ds =
            generate_dataset(&small_config(), 2, &mut SeededRandom::new(2)).expect("generate");
        ds.students[0].batch = "Grade 99-Z".to_string();
        let e = build_index(&ds.batches, &ds.teachers, &ds.students).expect_err("mismatch");
        assert_eq!(e.code, "dangling_reference");

        ds.students[0].batch_id = "b404".to_string();
        let e = build_index(&ds.batches, &ds.teachers, &ds.students).expect_err("dangling");
        assert_eq!(e.code, "dangling_reference");
    }

    #[test]
    fn counts_sum_nested_collections() {
        let ds = generate_dataset(&small_config(), 3, &mut SeededRandom::new(3)).expect("generate");
        let c = ds.counts();
        assert_eq!(c.batches, 15);
        assert_eq!(c.students, ds.students.len());
        assert_eq!(c.exam_records, ds.students.len() * 50);
        assert!(c.students >= 45 && c.students <= 75);
    }
}
