use super::config::{DatasetConfig, SizeRange};
use super::model::{Batch, Student};
use super::rng::{int_between, RandomSource};
use super::student::generate_student;

/// Batches planned for 30 seats run a little over; all others run 20-30.
pub fn batch_size_range(batch: &Batch, config: &DatasetConfig) -> SizeRange {
    if let Some(r) = config.students_per_batch {
        return r;
    }
    if batch.capacity == 30 {
        SizeRange { min: 25, max: 35 }
    } else {
        SizeRange { min: 20, max: 30 }
    }
}

/// Smallest and largest roster the batch list can produce.
pub fn roster_size_bounds(batches: &[Batch], config: &DatasetConfig) -> (usize, usize) {
    batches.iter().fold((0, 0), |(lo, hi), b| {
        let r = batch_size_range(b, config);
        (lo + r.min as usize, hi + r.max as usize)
    })
}

/// Ranks students 1..n by overall score, best first; ties keep roster order.
pub fn rank_students(students: &mut [Student]) {
    let mut order: Vec<usize> = (0..students.len()).collect();
    order.sort_by(|&a, &b| {
        students[b]
            .overall_score
            .total_cmp(&students[a].overall_score)
            .then_with(|| a.cmp(&b))
    });
    for (pos, idx) in order.into_iter().enumerate() {
        students[idx].rank = (pos + 1) as u32;
    }
}

pub fn assemble_roster(
    rng: &mut dyn RandomSource,
    batches: &[Batch],
    config: &DatasetConfig,
) -> Vec<Student> {
    let mut roster: Vec<Student> = Vec::new();
    for batch in batches {
        let range = batch_size_range(batch, config);
        let count = int_between(rng, range.min as i64, range.max as i64) as usize;
        let start = roster.len();
        for _ in 0..count {
            let index = roster.len();
            roster.push(generate_student(rng, index, batch, config));
        }
        rank_students(&mut roster[start..]);
        log::debug!("batch {} assembled with {} students", batch.id, count);
    }
    roster
}
