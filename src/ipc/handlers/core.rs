use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{require_dataset, synth_err};
use crate::ipc::types::{AppState, Request};
use crate::snapshot;
use crate::synth::roster::roster_size_bounds;
use crate::synth::{self, rng, SeededRandom};
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "datasetId": state.dataset.as_ref().map(|d| d.id.clone()),
        }),
    )
}

fn summary_json(ds: &synth::Dataset) -> serde_json::Value {
    let (min, max) = roster_size_bounds(&ds.batches, &ds.config);
    json!({
        "datasetId": ds.id,
        "seed": ds.seed.to_string(),
        "config": ds.config,
        "counts": ds.counts(),
        "expectedStudents": { "min": min, "max": max },
    })
}

fn handle_dataset_generate(state: &mut AppState, req: &Request) -> serde_json::Value {
    let config = match synth::parse_dataset_config(req.params.get("config")) {
        Ok(c) => c,
        Err(e) => return synth_err(&req.id, e),
    };
    let seed = config.seed.unwrap_or_else(rng::fresh_seed);
    let mut source = SeededRandom::new(seed);

    let dataset = match synth::generate_dataset(&config, seed, &mut source) {
        Ok(d) => d,
        Err(e) => {
            log::error!("dataset generation failed: {}", e);
            return err(
                &req.id,
                "generation_failed",
                e.message,
                Some(json!({ "cause": e.code, "details": e.details })),
            );
        }
    };
    let fingerprint = match snapshot::dataset_fingerprint(&dataset) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "generation_failed", e.to_string(), None),
    };

    let counts = dataset.counts();
    log::info!(
        "generated dataset {} (seed {}): {} batches, {} students, {} teachers",
        dataset.id,
        seed,
        counts.batches,
        counts.students,
        counts.teachers
    );

    let mut result = summary_json(&dataset);
    result["fingerprint"] = json!(fingerprint);
    state.dataset = Some(dataset);
    ok(&req.id, result)
}

fn handle_dataset_summary(state: &mut AppState, req: &Request) -> serde_json::Value {
    match require_dataset(state.dataset.as_ref()) {
        Ok(ds) => ok(&req.id, summary_json(ds)),
        Err(e) => e.response(&req.id),
    }
}

fn handle_dataset_fingerprint(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ds = match require_dataset(state.dataset.as_ref()) {
        Ok(ds) => ds,
        Err(e) => return e.response(&req.id),
    };
    match snapshot::dataset_fingerprint(ds) {
        Ok(fp) => ok(
            &req.id,
            json!({ "datasetId": ds.id, "algorithm": "sha256", "fingerprint": fp }),
        ),
        Err(e) => err(&req.id, "export_failed", e.to_string(), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "dataset.generate" => Some(handle_dataset_generate(state, req)),
        "dataset.summary" => Some(handle_dataset_summary(state, req)),
        "dataset.fingerprint" => Some(handle_dataset_fingerprint(state, req)),
        _ => None,
    }
}
