use anyhow::{anyhow, Context};
use serde::Serialize;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::synth::Dataset;

const MANIFEST_ENTRY: &str = "manifest.json";
pub const BUNDLE_FORMAT_V1: &str = "coachd-dataset-v1";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub bundle_format: String,
    pub bundle_id: String,
    pub entry_count: usize,
    pub fingerprint: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifySummary {
    pub bundle_format: String,
    pub dataset_id: String,
    pub seed: String,
    pub entries_verified: usize,
    pub fingerprint: String,
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// SHA-256 of the dataset's canonical JSON. Same seed and config, same fingerprint.
pub fn dataset_fingerprint(dataset: &Dataset) -> anyhow::Result<String> {
    let bytes = serde_json::to_vec(dataset).context("failed to serialize dataset")?;
    Ok(sha256_hex(&bytes))
}

fn collection_entries(dataset: &Dataset) -> anyhow::Result<Vec<(&'static str, Vec<u8>)>> {
    use serde_json::to_vec_pretty as pretty;
    Ok(vec![
        ("data/batches.json", pretty(&dataset.batches)?),
        ("data/students.json", pretty(&dataset.students)?),
        ("data/teachers.json", pretty(&dataset.teachers)?),
        ("data/exam_schedule.json", pretty(&dataset.exam_schedule)?),
        ("data/teacher_activity.json", pretty(&dataset.teacher_activity)?),
        ("data/batch_analytics.json", pretty(&dataset.batch_analytics)?),
        ("data/assignment_library.json", pretty(&dataset.assignment_library)?),
        ("data/material_library.json", pretty(&dataset.material_library)?),
    ])
}

pub fn export_snapshot_bundle(dataset: &Dataset, out_path: &Path) -> anyhow::Result<ExportSummary> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.to_string_lossy()))?;
    }

    let entries = collection_entries(dataset).context("failed to serialize collections")?;
    let fingerprint = dataset_fingerprint(dataset)?;
    let bundle_id = uuid::Uuid::new_v4().to_string();

    let exported_at = chrono::Utc::now().to_rfc3339();
    let digests: serde_json::Map<String, serde_json::Value> = entries
        .iter()
        .map(|(name, bytes)| (name.to_string(), json!(sha256_hex(bytes))))
        .collect();
    let manifest = json!({
        "format": BUNDLE_FORMAT_V1,
        "version": 1,
        "appVersion": env!("CARGO_PKG_VERSION"),
        "bundleId": bundle_id,
        "exportedAt": exported_at,
        "datasetId": dataset.id,
        "seed": dataset.seed.to_string(),
        "config": dataset.config,
        "counts": dataset.counts(),
        "fingerprint": fingerprint,
        "entries": digests,
    });

    let out_file = File::create(out_path).with_context(|| {
        format!(
            "failed to create output file {}",
            out_path.to_string_lossy()
        )
    })?;
    let mut zip = ZipWriter::new(out_file);
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(MANIFEST_ENTRY, opts)
        .context("failed to start manifest entry")?;
    zip.write_all(
        serde_json::to_string_pretty(&manifest)
            .context("failed to serialize manifest")?
            .as_bytes(),
    )
    .context("failed to write manifest entry")?;

    for (name, bytes) in &entries {
        zip.start_file(*name, opts)
            .with_context(|| format!("failed to start entry {}", name))?;
        zip.write_all(bytes)
            .with_context(|| format!("failed to write entry {}", name))?;
    }

    zip.finish().context("failed to finalize zip bundle")?;

    Ok(ExportSummary {
        bundle_format: BUNDLE_FORMAT_V1.to_string(),
        bundle_id,
        entry_count: entries.len() + 1,
        fingerprint,
    })
}

/// Reopens a bundle and checks every listed entry against its manifest digest.
pub fn verify_snapshot_bundle(in_path: &Path) -> anyhow::Result<VerifySummary> {
    if !is_zip_file(in_path)? {
        return Err(anyhow!(
            "not a snapshot bundle: {}",
            in_path.to_string_lossy()
        ));
    }
    let in_file = File::open(in_path)
        .with_context(|| format!("failed to open bundle {}", in_path.to_string_lossy()))?;
    let mut archive = ZipArchive::new(in_file).context("invalid zip archive")?;

    let mut manifest_text = String::new();
    archive
        .by_name(MANIFEST_ENTRY)
        .context("bundle missing manifest.json")?
        .read_to_string(&mut manifest_text)
        .context("failed to read manifest.json")?;
    let manifest: serde_json::Value =
        serde_json::from_str(&manifest_text).context("manifest.json is invalid JSON")?;
    let format = manifest
        .get("format")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    if format != BUNDLE_FORMAT_V1 {
        return Err(anyhow!("unsupported bundle format: {}", format));
    }

    let entries = manifest
        .get("entries")
        .and_then(|v| v.as_object())
        .context("manifest has no entries table")?;
    for (name, expected) in entries {
        let expected = expected.as_str().unwrap_or("");
        let mut bytes = Vec::new();
        archive
            .by_name(name)
            .with_context(|| format!("bundle missing {}", name))?
            .read_to_end(&mut bytes)
            .with_context(|| format!("failed to read {}", name))?;
        let actual = sha256_hex(&bytes);
        if actual != expected {
            return Err(anyhow!(
                "digest mismatch for {}: expected {}, found {}",
                name,
                expected,
                actual
            ));
        }
    }

    let text = |key: &str| {
        manifest
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    };
    Ok(VerifySummary {
        bundle_format: format.to_string(),
        dataset_id: text("datasetId"),
        seed: text("seed"),
        entries_verified: entries.len(),
        fingerprint: text("fingerprint"),
    })
}

fn is_zip_file(path: &Path) -> anyhow::Result<bool> {
    let mut f = File::open(path)
        .with_context(|| format!("failed to open input file {}", path.to_string_lossy()))?;
    let mut sig = [0u8; 4];
    let read = f.read(&mut sig).context("failed to read file signature")?;
    if read < 4 {
        return Ok(false);
    }
    Ok(sig == [0x50, 0x4B, 0x03, 0x04])
}
