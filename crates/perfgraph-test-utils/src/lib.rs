//! Testing utilities for perfgraph workspace
//!
//! Shared fixtures, document builders and proptest strategies.

#![allow(missing_docs)]

use perfgraph_aggregate::{BenchmarkRecord, ModelCollection, RejectionTally};
use perfgraph_decode::{DecodedName, NameDecoder, Settings};
use proptest::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

pub const TREE_SETTINGS: &str = r#"{
    "Tree": {
        "argument_order": ["fanout", "PROPAGATION_MODE", "keys"],
        "model_name": "B-Tree",
        "label": "btree",
        "compare": ["Hash"],
        "yscale": "log"
    },
    "Hash": {
        "argument_order": ["fanout", "PROPAGATION_MODE", "keys"],
        "model_name": "Hash map",
        "method_name": {"find": "Lookup"}
    },
    "Legacy": {"ignore": true}
}"#;

pub fn settings(json: &str) -> Settings {
    Settings::from_json_str(json).unwrap()
}

pub fn tree_settings() -> Settings {
    settings(TREE_SETTINGS)
}

pub fn decode(settings: &Settings, name: &str) -> DecodedName {
    NameDecoder::new(settings).decode(name).unwrap()
}

pub fn records(entries: &[(&str, f64)]) -> Vec<BenchmarkRecord> {
    entries
        .iter()
        .map(|(name, value)| BenchmarkRecord::new(*name, *value))
        .collect()
}

pub fn collection_from_records(
    settings: &Settings,
    records: Vec<BenchmarkRecord>,
) -> ModelCollection {
    let decoder = NameDecoder::new(settings);
    ModelCollection::from_records(records, &decoder, &mut RejectionTally::default()).unwrap()
}

pub fn collection(settings: &Settings, entries: &[(&str, f64)]) -> ModelCollection {
    collection_from_records(settings, records(entries))
}

/// Google-Benchmark style document with one iteration row per entry
pub fn benchmark_document(entries: &[(&str, f64)]) -> String {
    let rows: Vec<serde_json::Value> = entries
        .iter()
        .map(|(name, value)| {
            serde_json::json!({
                "name": name,
                "run_name": name,
                "run_type": "iteration",
                "probes_per_second": value,
            })
        })
        .collect();
    serde_json::json!({ "benchmarks": rows }).to_string()
}

pub fn write_temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Well-formed names over a small key space, so keys collide often
pub fn record_strategy() -> impl Strategy<Value = BenchmarkRecord> {
    (
        prop_oneof![Just("Tree"), Just("Hash"), Just("Queue")],
        prop_oneof![Just("Lookup"), Just("Insert")],
        0..3i64,
        0..4i64,
        prop_oneof![Just(10i64), Just(100), Just(1000)],
        1..10_000u32,
    )
        .prop_map(|(model, method, fanout, mode, instance, value)| {
            BenchmarkRecord::new(
                format!("{model}/{method}/{fanout}/{mode}/{instance}"),
                f64::from(value),
            )
        })
}

pub fn records_strategy(max: usize) -> impl Strategy<Value = Vec<BenchmarkRecord>> {
    proptest::collection::vec(record_strategy(), 0..max)
}
