//! flood-gen: headless dataset generator and classifier for the flood risk core.
//!
//! Usage:
//!   flood-gen generate --seed 42 --total 1000 --out delhi_flood_data.csv --db run.db
//!   flood-gen generate --mode balanced --total 100 --config data/generation.json
//!   flood-gen verify --in delhi_flood_data.csv
//!   flood-gen classify --ward "Karol Bagh" --rain-24h 95 --river-level 204.5
//!   flood-gen monsoon --seed 7 --steps 40

use anyhow::{bail, Result};
use floodrisk_core::{
    assembler::ScenarioDatasetAssembler,
    config::{GenerationConfig, GenerationMode},
    defaults::{ClassificationRequest, WardDefaultsTable},
    monsoon::MonsoonSimulator,
    rng::SeededRng,
    serving::ServingContext,
    store::DatasetStore,
    summary::DatasetSummary,
    table,
    ward::WardRegistry,
};
use std::env;

/// Wards shown by the live outlook.
const OUTLOOK_WARDS: [&str; 8] = [
    "Karol Bagh",
    "Paharganj",
    "Lajpat Nagar",
    "Dwarka Sector 21",
    "Connaught Place",
    "Rohini Sector 8",
    "Vasant Kunj",
    "Mayur Vihar Phase 1",
];

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("generate") => generate(&args),
        Some("verify") => verify(&args),
        Some("classify") => classify(&args),
        Some("monsoon") => monsoon(&args),
        Some(other) => bail!("unknown command '{other}' (expected generate, verify, classify or monsoon)"),
        None => bail!("usage: flood-gen <generate|verify|classify|monsoon> [--flag value ...]"),
    }
}

// ── generate ───────────────────────────────────────────────────

fn generate(args: &[String]) -> Result<()> {
    let mut config = match str_arg(args, "--config") {
        Some(path) => GenerationConfig::load(path)?,
        None => GenerationConfig::default(),
    };
    if let Some(mode) = str_arg(args, "--mode") {
        config.mode = mode.parse::<GenerationMode>()?;
        if config.mode == GenerationMode::Balanced && opt_arg::<usize>(args, "--total")?.is_none() {
            config.total_records = GenerationConfig::balanced().total_records;
        }
    }
    config.seed = parse_arg(args, "--seed", config.seed)?;
    config.total_records = parse_arg(args, "--total", config.total_records)?;
    config.validate()?;

    let out = str_arg(args, "--out").unwrap_or("delhi_flood_data.csv");
    let db = str_arg(args, "--db");

    println!("flood-gen generate");
    println!("  seed:   {}", config.seed);
    println!("  mode:   {}", config.mode.as_str());
    println!("  total:  {}", config.total_records);
    println!("  out:    {out}");
    println!();

    let registry = WardRegistry::delhi();
    log::info!("registry holds {} wards", registry.len());
    let mut rng = SeededRng::new(config.seed);
    let seed = config.seed;
    let mode = config.mode;
    let assembler = ScenarioDatasetAssembler::new(&registry, config)?;
    let records = assembler.assemble(&mut rng)?;

    table::write_csv_file(&records, out)?;

    if let Some(db) = db {
        let mut store = DatasetStore::open(db)?;
        store.migrate()?;
        let run_id = format!("run-{seed}-{}", uuid::Uuid::new_v4());
        let started_at = chrono::Utc::now().to_rfc3339();
        store.insert_run(&run_id, seed, mode.as_str(), env!("CARGO_PKG_VERSION"), &started_at)?;
        store.insert_records(&run_id, &records)?;
        log::info!("run {run_id} started at {started_at}");
        println!("Stored run {run_id} in {db}");
    }

    print_summary(&DatasetSummary::from_records(&records));
    Ok(())
}

// ── verify ─────────────────────────────────────────────────────

fn verify(args: &[String]) -> Result<()> {
    let path = str_arg(args, "--in").unwrap_or("delhi_flood_data.csv");
    let records = table::read_csv_file(path)?;

    print_summary(&DatasetSummary::from_records(&records));

    let violations = DatasetSummary::violations(&records);
    if violations.is_empty() {
        println!("No range violations.");
        return Ok(());
    }
    for v in &violations {
        println!("  cell {}: {} = {}", v.cell_id, v.field, v.value);
    }
    bail!("{} range violations in {path}", violations.len())
}

// ── classify ───────────────────────────────────────────────────

fn classify(args: &[String]) -> Result<()> {
    let registry = WardRegistry::delhi();
    let context = match str_arg(args, "--data") {
        Some(path) => {
            let records = table::read_csv_file(path)?;
            ServingContext::new(registry, WardDefaultsTable::from_records(&records))
        }
        None => ServingContext::from_registry(registry),
    };

    let request = ClassificationRequest {
        ward_name:            str_arg(args, "--ward").map(str::to_string),
        rain_1h_mm:           opt_arg(args, "--rain-1h")?,
        rain_3h_mm:           opt_arg(args, "--rain-3h")?,
        rain_24h_mm:          opt_arg(args, "--rain-24h")?,
        rain_forecast_3h_mm:  opt_arg(args, "--forecast-3h")?,
        river_level_m:        opt_arg(args, "--river-level")?,
        distance_to_river_m:  opt_arg(args, "--distance")?,
        elevation_m:          opt_arg(args, "--elevation")?,
        slope_percent:        opt_arg(args, "--slope")?,
        impervious_ratio:     opt_arg(args, "--impervious")?,
        drain_density:        opt_arg(args, "--drain-density")?,
        drain_capacity_score: opt_arg(args, "--drain-capacity")?,
        drain_blockage_risk:  opt_arg(args, "--blockage")?,
        flooded_before:       opt_arg::<u8>(args, "--flooded-before")?.map(|v| v != 0),
        flood_frequency:      opt_arg(args, "--flood-frequency")?,
    };

    let response = context.classify(&request);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

// ── monsoon ────────────────────────────────────────────────────

fn monsoon(args: &[String]) -> Result<()> {
    let seed = parse_arg(args, "--seed", 42u64)?;
    let steps = parse_arg(args, "--steps", 40u64)?;

    let context = ServingContext::from_registry(WardRegistry::delhi());
    let mut simulator = MonsoonSimulator::new();
    let mut rng = SeededRng::new(seed);

    for _ in 0..steps {
        let conditions = simulator.step(&mut rng);
        let outlook = context.ward_outlook(&conditions, &OUTLOOK_WARDS, &mut rng);
        println!(
            "step {:>3} | {:<11} | rain24 {:>6.1} mm | rain3 {:>5.1} mm | river {:>7.2} m | blockage +{:.2} | safe {} warning {} danger {}",
            conditions.step,
            conditions.phase,
            conditions.rain_24h_mm,
            conditions.rain_3h_mm,
            conditions.river_level_m,
            conditions.drain_blockage_adjustment,
            outlook.counts[0],
            outlook.counts[1],
            outlook.counts[2],
        );
    }
    Ok(())
}

// ── helpers ────────────────────────────────────────────────────

fn print_summary(summary: &DatasetSummary) {
    println!("=== Dataset summary ===");
    print!("{summary}");
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> Result<T> {
    Ok(opt_arg(args, flag)?.unwrap_or(default))
}

/// The value after `flag`, if present. A value that does not parse is an error.
fn opt_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>> {
    match str_arg(args, flag) {
        Some(raw) => match raw.parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => bail!("invalid value '{raw}' for {flag}"),
        },
        None => Ok(None),
    }
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
