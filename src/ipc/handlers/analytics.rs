use crate::ipc::error::ok;
use crate::ipc::helpers::{require_dataset, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::synth::model::AssignmentLibraryEntry;
use serde_json::json;

fn handle_teacher_activity(
    state: &mut AppState,
    _req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    let ds = require_dataset(state.dataset.as_ref())?;
    Ok(json!({ "rows": ds.teacher_activity }))
}

fn handle_batch_analytics(
    state: &mut AppState,
    _req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    let ds = require_dataset(state.dataset.as_ref())?;
    Ok(json!({ "rows": ds.batch_analytics }))
}

fn handle_assignment_library(
    state: &mut AppState,
    req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    let ds = require_dataset(state.dataset.as_ref())?;
    let subject = req.params.get("subject").and_then(|v| v.as_str());
    let entries: Vec<&AssignmentLibraryEntry> = ds
        .assignment_library
        .iter()
        .filter(|e| subject.map(|s| e.subject.eq_ignore_ascii_case(s)).unwrap_or(true))
        .collect();
    Ok(json!({ "entries": entries }))
}

fn handle_material_library(
    state: &mut AppState,
    _req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    let ds = require_dataset(state.dataset.as_ref())?;
    Ok(json!({ "entries": ds.material_library }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "analytics.teacherActivity" => handle_teacher_activity(state, req),
        "analytics.batches" => handle_batch_analytics(state, req),
        "library.assignments" => handle_assignment_library(state, req),
        "library.materials" => handle_material_library(state, req),
        _ => return None,
    };
    Some(match result {
        Ok(v) => ok(&req.id, v),
        Err(e) => e.response(&req.id),
    })
}
