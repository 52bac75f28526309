use crate::ipc::error::ok;
use crate::ipc::helpers::{get_required_str, require_dataset, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::synth::model::ScheduledExam;
use serde_json::json;

fn handle_batches_list(
    state: &mut AppState,
    _req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    let ds = require_dataset(state.dataset.as_ref())?;
    Ok(json!({ "batches": ds.batches }))
}

fn handle_batches_get(
    state: &mut AppState,
    req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    let ds = require_dataset(state.dataset.as_ref())?;
    let batch_id = get_required_str(&req.params, "batchId")?;
    let Some(batch) = ds.batch(&batch_id) else {
        return Err(HandlerErr {
            code: "not_found",
            message: format!("batch not found: {}", batch_id),
            details: Some(json!({ "batchId": batch_id })),
        });
    };
    let student_count = ds.students.iter().filter(|s| s.batch_id == batch.id).count();
    let teacher = ds.teacher(&batch.teacher_id);
    Ok(json!({
        "batch": batch,
        "teacher": teacher,
        "studentCount": student_count,
    }))
}

fn handle_schedule_list(
    state: &mut AppState,
    req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    let ds = require_dataset(state.dataset.as_ref())?;
    let batch_id = req
        .params
        .get("batchId")
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if let Some(id) = batch_id.as_deref() {
        if ds.batch(id).is_none() {
            return Err(HandlerErr::new("not_found", format!("batch not found: {}", id)));
        }
    }
    let exams: Vec<&ScheduledExam> = ds
        .exam_schedule
        .iter()
        .filter(|e| batch_id.as_deref().map(|id| e.batch_id == id).unwrap_or(true))
        .collect();
    Ok(json!({ "exams": exams }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "batches.list" => handle_batches_list(state, req),
        "batches.get" => handle_batches_get(state, req),
        "schedule.list" => handle_schedule_list(state, req),
        _ => return None,
    };
    Some(match result {
        Ok(v) => ok(&req.id, v),
        Err(e) => e.response(&req.id),
    })
}
