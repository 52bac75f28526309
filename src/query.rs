use serde::Serialize;

use crate::synth::model::{FeeStatus, FeeType, Gender, Student};
use crate::synth::SynthError;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudentSort {
    #[default]
    Id,
    Name,
    Rank,
    Score,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentQuery {
    pub search: Option<String>,
    pub batch_id: Option<String>,
    pub grade: Option<u8>,
    pub fee_status: Option<FeeStatus>,
    pub gender: Option<Gender>,
    pub sort: StudentSort,
    pub page: usize,
    pub page_size: usize,
}

impl Default for StudentQuery {
    fn default() -> Self {
        Self {
            search: None,
            batch_id: None,
            grade: None,
            fee_status: None,
            gender: None,
            sort: StudentSort::Id,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub batch_id: String,
    pub batch: String,
    pub grade: u8,
    pub phone: String,
    pub email: String,
    pub fee_type: FeeType,
    pub fee_status: FeeStatus,
    pub due_amount: u32,
    pub attendance_percentage: f64,
    pub overall_score: f64,
    pub rank: u32,
}

impl From<&Student> for StudentSummary {
    fn from(s: &Student) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            gender: s.gender,
            batch_id: s.batch_id.clone(),
            batch: s.batch.clone(),
            grade: s.grade,
            phone: s.phone.clone(),
            email: s.email.clone(),
            fee_type: s.fee.fee_type,
            fee_status: s.fee.status,
            due_amount: s.fee.due_amount,
            attendance_percentage: s.attendance.percentage,
            overall_score: s.overall_score,
            rank: s.rank,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

fn bad(message: impl Into<String>) -> SynthError {
    SynthError::new("bad_params", message)
}

fn opt_str(
    obj: &serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Result<Option<String>, SynthError> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => v
            .as_str()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(Some)
            .ok_or_else(|| bad(format!("{} must be a non-empty string", key))),
    }
}

fn opt_u64(
    obj: &serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Result<Option<u64>, SynthError> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => v
            .as_u64()
            .map(Some)
            .ok_or_else(|| bad(format!("{} must be a non-negative integer", key))),
    }
}

pub fn parse_student_query(raw: &serde_json::Value) -> Result<StudentQuery, SynthError> {
    let mut q = StudentQuery::default();
    if raw.is_null() {
        return Ok(q);
    }
    let Some(obj) = raw.as_object() else {
        return Err(bad("params must be an object"));
    };

    q.search = opt_str(obj, "search")?;
    q.batch_id = opt_str(obj, "batchId")?;
    q.grade = match opt_u64(obj, "grade")? {
        None => None,
        Some(g) if (6..=12).contains(&g) => Some(g as u8),
        Some(_) => return Err(bad("grade must be between 6 and 12")),
    };
    q.fee_status = match opt_str(obj, "feeStatus")?.as_deref() {
        None => None,
        Some("paid") => Some(FeeStatus::Paid),
        Some("partial") => Some(FeeStatus::Partial),
        Some("pending") => Some(FeeStatus::Pending),
        Some(_) => return Err(bad("feeStatus must be paid, partial or pending")),
    };
    q.gender = match opt_str(obj, "gender")?.as_deref() {
        None => None,
        Some("male") => Some(Gender::Male),
        Some("female") => Some(Gender::Female),
        Some(_) => return Err(bad("gender must be male or female")),
    };
    q.sort = match opt_str(obj, "sort")?.as_deref() {
        None | Some("id") => StudentSort::Id,
        Some("name") => StudentSort::Name,
        Some("rank") => StudentSort::Rank,
        Some("score") => StudentSort::Score,
        Some(_) => return Err(bad("sort must be id, name, rank or score")),
    };
    if let Some(p) = opt_u64(obj, "page")? {
        if p == 0 {
            return Err(bad("page is 1-based"));
        }
        q.page = p as usize;
    }
    if let Some(n) = opt_u64(obj, "pageSize")? {
        if n == 0 || n as usize > MAX_PAGE_SIZE {
            return Err(bad(format!("pageSize must be between 1 and {}", MAX_PAGE_SIZE)));
        }
        q.page_size = n as usize;
    }
    Ok(q)
}

fn matches(s: &Student, q: &StudentQuery, needle: Option<&str>) -> bool {
    if let Some(b) = &q.batch_id {
        if &s.batch_id != b {
            return false;
        }
    }
    if q.grade.is_some_and(|g| g != s.grade) {
        return false;
    }
    if q.fee_status.is_some_and(|f| f != s.fee.status) {
        return false;
    }
    if q.gender.is_some_and(|g| g != s.gender) {
        return false;
    }
    match needle {
        None => true,
        Some(n) => [&s.name, &s.id, &s.phone, &s.email]
            .iter()
            .any(|field| field.to_lowercase().contains(n)),
    }
}

pub fn query_students(students: &[Student], q: &StudentQuery) -> Page<StudentSummary> {
    let needle = q.search.as_ref().map(|s| s.to_lowercase());
    let mut hits: Vec<&Student> = students
        .iter()
        .filter(|s| matches(s, q, needle.as_deref()))
        .collect();

    match q.sort {
        StudentSort::Id => {}
        StudentSort::Name => {
            hits.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)))
        }
        StudentSort::Rank => hits.sort_by(|a, b| {
            a.rank
                .cmp(&b.rank)
                .then_with(|| a.batch_id.cmp(&b.batch_id))
                .then_with(|| a.id.cmp(&b.id))
        }),
        StudentSort::Score => hits.sort_by(|a, b| {
            b.overall_score
                .total_cmp(&a.overall_score)
                .then_with(|| a.id.cmp(&b.id))
        }),
    }

    let total = hits.len();
    let total_pages = total.div_ceil(q.page_size);
    let items = hits
        .into_iter()
        .skip((q.page - 1) * q.page_size)
        .take(q.page_size)
        .map(StudentSummary::from)
        .collect();

    Page {
        items,
        total,
        page: q.page,
        page_size: q.page_size,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::config::{DatasetConfig, SizeRange};
    use crate::synth::rng::SeededRandom;
    use crate::synth::{generate_dataset, Dataset};
    use serde_json::json;
    use std::collections::HashSet;

    fn dataset() -> Dataset {
        let cfg = DatasetConfig {
            students_per_batch: Some(SizeRange { min: 6, max: 8 }),
            ..DatasetConfig::default()
        };
        generate_dataset(&cfg, 77, &mut SeededRandom::new(77)).expect("generate")
    }

    #[test]
    fn pages_cover_filtered_set_exactly_once() {
        let ds = dataset();
        let mut q = parse_student_query(&json!({ "grade": 11, "pageSize": 7 })).expect("query");
        let first = query_students(&ds.students, &q);
        let expected = ds.students.iter().filter(|s| s.grade == 11).count();
        assert_eq!(first.total, expected);
        assert_eq!(first.total_pages, expected.div_ceil(7));

        let mut seen: HashSet<String> = HashSet::new();
        for page in 1..=first.total_pages {
            q.page = page;
            for item in query_students(&ds.students, &q).items {
                assert_eq!(item.grade, 11);
                assert!(seen.insert(item.id));
            }
        }
        assert_eq!(seen.len(), expected);
    }

    #[test]
    fn search_is_case_insensitive() {
        let ds = dataset();
        let target = &ds.students[3];
        let q = parse_student_query(&json!({ "search": target.name.to_uppercase() }))
            .expect("query");
        let page = query_students(&ds.students, &q);
        assert!(page.items.iter().any(|s| s.id == target.id));

        let q = parse_student_query(&json!({ "search": target.id.to_lowercase() })).expect("query");
        assert_eq!(query_students(&ds.students, &q).total, 1);
    }

    #[test]
    fn score_sort_is_descending() {
        let ds = dataset();
        let q = parse_student_query(&json!({ "sort": "score", "pageSize": 200, "batchId": "b3" }))
            .expect("query");
        let page = query_students(&ds.students, &q);
        assert!(page.items.iter().all(|s| s.batch_id == "b3"));
        for w in page.items.windows(2) {
            assert!(w[0].overall_score >= w[1].overall_score);
        }
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let ds = dataset();
        let q = parse_student_query(&json!({ "page": 999 })).expect("query");
        let page = query_students(&ds.students, &q);
        assert!(page.items.is_empty());
        assert_eq!(page.total, ds.students.len());
    }

    #[test]
    fn rejects_bad_query() {
        for raw in [
            json!({ "page": 0 }),
            json!({ "pageSize": 500 }),
            json!({ "grade": 3 }),
            json!({ "sort": "age" }),
            json!({ "feeStatus": "late" }),
            json!("students"),
        ] {
            assert!(parse_student_query(&raw).is_err(), "{}", raw);
        }
    }
}
