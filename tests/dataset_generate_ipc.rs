use serde_json::json;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_coachd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn coachd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

fn request_err(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> String {
    let payload = json!({ "id": id, "method": method, "params": params });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("ok").and_then(|v| v.as_bool()), Some(false), "{}", value);
    value["error"]["code"].as_str().unwrap_or("").to_string()
}

fn array<'a>(v: &'a serde_json::Value, key: &str) -> &'a Vec<serde_json::Value> {
    v.get(key).and_then(|x| x.as_array()).expect(key)
}

#[test]
fn default_generation_honours_roster_and_record_invariants() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let gen = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "dataset.generate",
        json!({ "config": { "seed": 20240101 } }),
    );
    assert_eq!(gen["seed"].as_str(), Some("20240101"));
    let students = gen["counts"]["students"].as_u64().expect("students") as usize;
    let min = gen["expectedStudents"]["min"].as_u64().expect("min") as usize;
    let max = gen["expectedStudents"]["max"].as_u64().expect("max") as usize;
    assert_eq!((min, max), (315, 465));
    assert!(students >= min && students <= max);

    let batches = request_ok(&mut stdin, &mut reader, "2", "batches.list", json!({}));
    let batches = array(&batches, "batches");
    assert_eq!(batches.len(), 15);
    let batch_names: HashMap<String, String> = batches
        .iter()
        .map(|b| {
            (
                b["id"].as_str().unwrap_or("").to_string(),
                b["name"].as_str().unwrap_or("").to_string(),
            )
        })
        .collect();

    let mut per_batch: HashMap<String, usize> = HashMap::new();
    let page = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "students.list",
        json!({ "pageSize": 200 }),
    );
    let total_pages = page["totalPages"].as_u64().expect("pages");
    for p in 1..=total_pages {
        let page = request_ok(
            &mut stdin,
            &mut reader,
            &format!("p{}", p),
            "students.list",
            json!({ "pageSize": 200, "page": p }),
        );
        for s in array(&page, "items") {
            let bid = s["batchId"].as_str().expect("batchId").to_string();
            assert_eq!(batch_names.get(&bid).map(|n| n.as_str()), s["batch"].as_str());
            *per_batch.entry(bid).or_default() += 1;
        }
    }
    assert_eq!(per_batch.values().sum::<usize>(), students);
    for n in per_batch.values() {
        assert!((20..=35).contains(n));
    }

    let full = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "students.get",
        json!({ "studentId": "STU0001" }),
    );
    let s = &full["student"];
    let exams = array(s, "examRecords");
    assert!(exams.len() <= 50);
    for w in exams.windows(2) {
        assert!(w[0]["date"].as_str() >= w[1]["date"].as_str());
    }
    for e in exams {
        let marks = e["marksObtained"].as_u64().expect("marks");
        let total = e["totalMarks"].as_u64().expect("total");
        assert!(marks <= total);
    }
    assert!(array(s, "assignments").len() <= 30);
    let expected_payments = match s["fee"]["feeType"].as_str() {
        Some("monthly") => 12,
        Some("yearly") => 1,
        other => panic!("unexpected fee type {:?}", other),
    };
    assert_eq!(array(s, "paymentHistory").len(), expected_payments);

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn same_seed_gives_same_fingerprint_across_processes() {
    let mut prints = Vec::new();
    for run in 0..2 {
        let (mut child, mut stdin, mut reader) = spawn_sidecar();
        let gen = request_ok(
            &mut stdin,
            &mut reader,
            &format!("g{}", run),
            "dataset.generate",
            json!({
                "config": { "seed": "987654321", "studentsPerBatch": { "min": 3, "max": 4 } }
            }),
        );
        let fp = request_ok(&mut stdin, &mut reader, "fp", "dataset.fingerprint", json!({}));
        assert_eq!(fp["fingerprint"], gen["fingerprint"]);
        prints.push((gen["datasetId"].clone(), fp["fingerprint"].clone()));
        drop(stdin);
        let _ = child.wait();
    }
    assert_eq!(prints[0], prints[1]);
}

#[test]
fn monthly_batch_payments_equal_the_monthly_fee() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "dataset.generate",
        json!({ "config": { "seed": 5, "studentsPerBatch": { "min": 2, "max": 2 } } }),
    );
    // b11 is the monthly 5000 science batch.
    let b11 = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "batches.get",
        json!({ "batchId": "b11" }),
    );
    assert_eq!(b11["batch"]["feeType"].as_str(), Some("monthly"));
    assert_eq!(b11["batch"]["monthlyFee"].as_u64(), Some(5000));
    assert_eq!(b11["studentCount"].as_u64(), Some(2));

    let page = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "students.list",
        json!({ "batchId": "b11" }),
    );
    for (i, s) in array(&page, "items").iter().enumerate() {
        let recs = request_ok(
            &mut stdin,
            &mut reader,
            &format!("r{}", i),
            "students.records",
            json!({ "studentId": s["id"], "kind": "payments" }),
        );
        let payments = array(&recs, "records");
        assert_eq!(payments.len(), 12);
        assert!(payments.iter().all(|p| p["amount"].as_u64() == Some(5000)));
    }

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn bad_config_and_missing_ids_are_rejected() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let code = request_err(
        &mut stdin,
        &mut reader,
        "1",
        "dataset.generate",
        json!({ "config": { "assignmentOrder": "shuffled" } }),
    );
    assert_eq!(code, "bad_params");
    // Out-of-range dates are refused up front; the process keeps serving.
    let code = request_err(
        &mut stdin,
        &mut reader,
        "1b",
        "dataset.generate",
        json!({ "config": { "referenceDate": "+262142-12-31" } }),
    );
    assert_eq!(code, "bad_params");

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "dataset.generate",
        json!({ "config": { "seed": 3, "studentsPerBatch": { "min": 1, "max": 1 } } }),
    );
    let code = request_err(
        &mut stdin,
        &mut reader,
        "3",
        "batches.get",
        json!({ "batchId": "b99" }),
    );
    assert_eq!(code, "not_found");
    let code = request_err(&mut stdin, &mut reader, "4", "students.get", json!({}));
    assert_eq!(code, "bad_params");
    let code = request_err(
        &mut stdin,
        &mut reader,
        "5",
        "students.records",
        json!({ "studentId": "STU0001", "kind": "grades" }),
    );
    assert_eq!(code, "bad_params");

    drop(stdin);
    let _ = child.wait();
}
