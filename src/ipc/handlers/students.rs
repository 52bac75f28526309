use crate::ipc::error::ok;
use crate::ipc::helpers::{get_required_str, require_dataset, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::query::{parse_student_query, query_students};
use crate::synth::model::Student;
use crate::synth::Dataset;
use serde_json::json;

fn find_student<'a>(
    ds: &'a Dataset,
    params: &serde_json::Value,
) -> Result<&'a Student, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    ds.student(&student_id).ok_or_else(|| HandlerErr {
        code: "not_found",
        message: format!("student not found: {}", student_id),
        details: Some(json!({ "studentId": student_id })),
    })
}

fn handle_students_list(
    state: &mut AppState,
    req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    let ds = require_dataset(state.dataset.as_ref())?;
    let query = parse_student_query(&req.params).map_err(|e| HandlerErr {
        code: "bad_params",
        message: e.message,
        details: e.details,
    })?;
    if let Some(id) = query.batch_id.as_deref() {
        if ds.batch(id).is_none() {
            return Err(HandlerErr::new("not_found", format!("batch not found: {}", id)));
        }
    }
    let page = query_students(&ds.students, &query);
    Ok(json!(page))
}

fn handle_students_get(
    state: &mut AppState,
    req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    let ds = require_dataset(state.dataset.as_ref())?;
    let student = find_student(ds, &req.params)?;
    Ok(json!({ "student": student }))
}

fn handle_students_records(
    state: &mut AppState,
    req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    let ds = require_dataset(state.dataset.as_ref())?;
    let student = find_student(ds, &req.params)?;
    let kind = get_required_str(&req.params, "kind")?;
    let records = match kind.as_str() {
        "exams" => json!(student.exam_records),
        "assignments" => json!(student.assignments),
        "attendance" => json!(student.attendance_records),
        "payments" => json!(student.payment_history),
        other => {
            return Err(HandlerErr {
                code: "bad_params",
                message: "kind must be exams, assignments, attendance or payments".to_string(),
                details: Some(json!({ "kind": other })),
            })
        }
    };
    Ok(json!({
        "studentId": student.id,
        "kind": kind,
        "records": records,
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "students.list" => handle_students_list(state, req),
        "students.get" => handle_students_get(state, req),
        "students.records" => handle_students_records(state, req),
        _ => return None,
    };
    Some(match result {
        Ok(v) => ok(&req.id, v),
        Err(e) => e.response(&req.id),
    })
}
