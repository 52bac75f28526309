use serde::{Deserialize, Serialize};

use super::catalog::CATALOG_YEAR;
use super::model::{Assignment, AssignmentStatus, Batch};
use super::rng::{chance, int_between, RandomSource};

pub const ASSIGNMENT_MAX_MARKS: u32 = 20;

/// Ordering applied before the assignment list is truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssignmentOrder {
    /// Month-major generation order. Truncation keeps the early months.
    #[default]
    Generated,
    /// Due date descending, so truncation keeps the latest months.
    RecentFirst,
}

pub fn generate_assignments(
    rng: &mut dyn RandomSource,
    batch: &Batch,
    index: usize,
    limit: usize,
    order: AssignmentOrder,
) -> Vec<Assignment> {
    let mut out: Vec<Assignment> = Vec::new();
    for month in 1..=12u32 {
        for subject in &batch.subjects {
            let status = if chance(rng, 0.8) {
                AssignmentStatus::Submitted
            } else if chance(rng, 0.5) {
                AssignmentStatus::Pending
            } else {
                AssignmentStatus::Overdue
            };
            let marks = if chance(rng, 0.2) {
                None
            } else {
                Some(int_between(rng, 8, ASSIGNMENT_MAX_MARKS as i64) as u32)
            };
            out.push(Assignment {
                id: String::new(),
                title: format!("{} - Chapter {} Assignment", subject, month),
                subject: subject.clone(),
                due_date: format!("{}-{:02}-15", CATALOG_YEAR, month),
                status,
                marks,
                max_marks: ASSIGNMENT_MAX_MARKS,
            });
        }
    }

    if order == AssignmentOrder::RecentFirst {
        out.sort_by(|a, b| b.due_date.cmp(&a.due_date));
    }
    out.truncate(limit);
    for (i, a) in out.iter_mut().enumerate() {
        a.id = format!("as-{}-{}", index + 1, i + 1);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::batches::generate_batches;
    use crate::synth::rng::{ConstantRandom, SeededRandom};

    #[test]
    fn generated_order_keeps_early_months() {
        let batch = &generate_batches()[0];
        let list = generate_assignments(
            &mut SeededRandom::new(3),
            batch,
            0,
            30,
            AssignmentOrder::Generated,
        );
        assert_eq!(list.len(), 30);
        assert_eq!(list[0].title, "Mathematics - Chapter 1 Assignment");
        assert_eq!(list[0].due_date, "2024-01-15");
        // Five subjects per month: the last kept entry belongs to June.
        assert!(list[29].due_date.starts_with("2024-06"));
    }

    #[test]
    fn recent_first_keeps_late_months() {
        let batch = &generate_batches()[0];
        let list = generate_assignments(
            &mut SeededRandom::new(3),
            batch,
            0,
            30,
            AssignmentOrder::RecentFirst,
        );
        assert_eq!(list.len(), 30);
        assert!(list[0].due_date.starts_with("2024-12"));
        assert!(list[29].due_date.starts_with("2024-07"));
    }

    #[test]
    fn constant_source_submits_with_marks() {
        let batch = &generate_batches()[0];
        let list = generate_assignments(
            &mut ConstantRandom(0.5),
            batch,
            0,
            30,
            AssignmentOrder::Generated,
        );
        for a in &list {
            assert_eq!(a.status, AssignmentStatus::Submitted);
            assert_eq!(a.marks, Some(14));
            assert!(a.marks.unwrap_or(0) <= a.max_marks);
        }
    }
}
