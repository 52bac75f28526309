use crate::ipc::error::ok;
use crate::ipc::helpers::{require_dataset, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::synth::model::{Teacher, TeacherStatus};
use serde_json::json;

fn handle_teachers_list(
    state: &mut AppState,
    req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    let ds = require_dataset(state.dataset.as_ref())?;
    let status = match req.params.get("status").and_then(|v| v.as_str()) {
        None => None,
        Some("active") => Some(TeacherStatus::Active),
        Some("on_leave") => Some(TeacherStatus::OnLeave),
        Some(other) => {
            return Err(HandlerErr {
                code: "bad_params",
                message: "status must be active or on_leave".to_string(),
                details: Some(json!({ "status": other })),
            })
        }
    };
    let teachers: Vec<&Teacher> = ds
        .teachers
        .iter()
        .filter(|t| status.map(|s| t.status == s).unwrap_or(true))
        .collect();
    Ok(json!({ "teachers": teachers }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "teachers.list" => Some(match handle_teachers_list(state, req) {
            Ok(v) => ok(&req.id, v),
            Err(e) => e.response(&req.id),
        }),
        _ => None,
    }
}
