use crate::ipc::error::{err, ok};
use crate::ipc::helpers::require_dataset;
use crate::ipc::types::{AppState, Request};
use crate::snapshot;
use serde_json::json;
use std::path::PathBuf;

fn handle_dataset_export(state: &mut AppState, req: &Request) -> serde_json::Value {
    let out_path = match req.params.get("outPath").and_then(|v| v.as_str()) {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => return err(&req.id, "bad_params", "missing outPath", None),
    };
    let ds = match require_dataset(state.dataset.as_ref()) {
        Ok(ds) => ds,
        Err(e) => return e.response(&req.id),
    };

    let export = match snapshot::export_snapshot_bundle(ds, &PathBuf::from(&out_path)) {
        Ok(v) => v,
        Err(e) => {
            log::error!("snapshot export to {} failed: {:#}", out_path, e);
            return err(
                &req.id,
                "export_failed",
                format!("{:#}", e),
                Some(json!({ "path": out_path })),
            );
        }
    };
    log::info!("exported dataset {} to {}", ds.id, out_path);

    ok(
        &req.id,
        json!({
            "path": out_path,
            "bundleFormat": export.bundle_format,
            "bundleId": export.bundle_id,
            "entryCount": export.entry_count,
            "fingerprint": export.fingerprint,
        }),
    )
}

fn handle_dataset_verify_bundle(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let in_path = match req.params.get("inPath").and_then(|v| v.as_str()) {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => return err(&req.id, "bad_params", "missing inPath", None),
    };
    match snapshot::verify_snapshot_bundle(&PathBuf::from(&in_path)) {
        Ok(summary) => ok(&req.id, json!(summary)),
        Err(e) => err(
            &req.id,
            "bundle_invalid",
            format!("{:#}", e),
            Some(json!({ "path": in_path })),
        ),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "dataset.export" => Some(handle_dataset_export(state, req)),
        "dataset.verifyBundle" => Some(handle_dataset_verify_bundle(state, req)),
        _ => None,
    }
}
