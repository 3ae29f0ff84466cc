//! CSV and SQLite round-trips, plus the checked-in generation config.

use floodrisk_core::{
    assembler::ScenarioDatasetAssembler,
    config::{GenerationConfig, GenerationMode},
    record::{FloodRecord, RECORD_COLUMNS},
    rng::SeededRng,
    store::DatasetStore,
    summary::DatasetSummary,
    table,
    ward::WardRegistry,
};

fn dataset(config: GenerationConfig, seed: u64) -> Vec<FloodRecord> {
    let registry = WardRegistry::delhi();
    ScenarioDatasetAssembler::new(&registry, config)
        .expect("valid config")
        .assemble(&mut SeededRng::new(seed))
        .expect("assemble")
}

fn small_scored() -> GenerationConfig {
    GenerationConfig { total_records: 250, ..GenerationConfig::default() }
}

#[test]
fn csv_header_matches_the_schema() {
    let records = dataset(small_scored(), 1);
    let mut buffer = Vec::new();
    table::write_csv(&records, &mut buffer).unwrap();

    let text = String::from_utf8(buffer).unwrap();
    let header = text.lines().next().unwrap();
    assert_eq!(header, RECORD_COLUMNS.join(","));
    assert_eq!(text.lines().count(), records.len() + 1);
}

#[test]
fn csv_round_trip_preserves_every_value() {
    let records = dataset(small_scored(), 2);
    let mut buffer = Vec::new();
    table::write_csv(&records, &mut buffer).unwrap();

    let restored = table::read_csv(buffer.as_slice()).unwrap();
    assert_eq!(restored, records);
    assert_eq!(
        DatasetSummary::from_records(&restored).label_counts,
        DatasetSummary::from_records(&records).label_counts
    );
}

#[test]
fn csv_file_round_trip() {
    let records = dataset(GenerationConfig::balanced(), 3);
    let path = std::env::temp_dir().join(format!("floodrisk-roundtrip-{}.csv", std::process::id()));

    table::write_csv_file(&records, &path).unwrap();
    let restored = table::read_csv_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(restored, records);
}

#[test]
fn csv_with_wrong_header_is_rejected() {
    let bogus = "cell_id,latitude\n1000,28.6\n";
    assert!(table::read_csv(bogus.as_bytes()).is_err());
}

#[test]
fn sqlite_round_trip() {
    let records = dataset(GenerationConfig::balanced(), 4);

    let mut store = DatasetStore::in_memory().unwrap();
    store.migrate().unwrap();
    store
        .insert_run("run-test", 4, GenerationMode::Balanced.as_str(), "0.1.0-test", "2026-01-01T00:00:00+00:00")
        .unwrap();
    store.insert_records("run-test", &records).unwrap();

    assert_eq!(store.record_count("run-test").unwrap(), 100);
    assert_eq!(store.label_counts("run-test").unwrap(), [35, 40, 25]);

    let loaded = store.load_records("run-test").unwrap();
    assert_eq!(loaded, records);
    assert_eq!(store.record_count("other-run").unwrap(), 0);
}

#[test]
fn sqlite_rejects_records_for_unknown_runs() {
    let records = dataset(GenerationConfig::balanced(), 5);
    let mut store = DatasetStore::in_memory().unwrap();
    store.migrate().unwrap();
    assert!(store.insert_records("missing-run", &records).is_err());
    assert_eq!(store.record_count("missing-run").unwrap(), 0);
}

#[test]
fn checked_in_config_matches_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/generation.json");
    let config = GenerationConfig::load(path).unwrap();
    let defaults = GenerationConfig::default();

    assert_eq!(config.seed, defaults.seed);
    assert_eq!(config.mode, defaults.mode);
    assert_eq!(config.total_records, defaults.total_records);
    assert_eq!(config.first_cell_id, defaults.first_cell_id);
    assert_eq!(config.scenario_weights.resolve().unwrap(), defaults.scenario_weights.resolve().unwrap());
    assert_eq!(config.target_counts().unwrap(), defaults.target_counts().unwrap());
}

#[test]
fn missing_config_file_reports_the_path() {
    let err = GenerationConfig::load("/nonexistent/generation.json").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/generation.json"));
}
