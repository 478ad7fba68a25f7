use std::env;
use std::fs;
use std::path::PathBuf;

use incentives::{ApiConfig, IncentivesClient};
use layers::{CountClassifier, ViewMode};
use regions::SelectedRegion;
use regions::search::resolve;
use regions::states::STATES_PLUS_DC;
use serde::Serialize;
use tools::import::{BoundaryKind, DEFAULT_DECIMALS, import_census};
use tools::{fetch_counts, layer_report, load_catalog, search_report, tier_rows};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    match cmd.as_str() {
        "layers" => cmd_layers(args),
        "classify" => cmd_classify(args),
        "search" => cmd_search(args),
        "import" => cmd_import(args),
        _ => Err(usage()),
    }
}

fn cmd_layers(args: Vec<String>) -> Result<(), String> {
    // atlas-map layers <states.json> <counties.json> [--select NAME] [--zoom Z] [--density]
    if args.len() < 2 {
        return Err(usage());
    }
    let catalog = load_catalog(&PathBuf::from(&args[0]), &PathBuf::from(&args[1]))?;

    let mut select: Option<String> = None;
    let mut zoom = 4.0;
    let mut view_mode = ViewMode::Coverage;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--select" => {
                i += 1;
                let name = args.get(i).ok_or("--select requires a value")?;
                select = Some(name.clone());
            }
            "--zoom" => {
                i += 1;
                let raw = args.get(i).ok_or("--zoom requires a value")?;
                zoom = raw.parse().map_err(|e| format!("invalid zoom {raw:?}: {e}"))?;
            }
            "--density" => view_mode = ViewMode::IncentiveDensity,
            s => return Err(format!("unknown arg: {s}\n\n{}", usage())),
        }
        i += 1;
    }

    let selected = match &select {
        Some(query) => {
            let region = resolve(&catalog, query).ok_or_else(|| format!("{query} not found"))?;
            Some(SelectedRegion::from(region))
        }
        None => None,
    };

    let styles = layer_report(selected.as_ref(), view_mode, zoom, &CountClassifier::new());
    print_json(&styles)
}

fn cmd_classify(args: Vec<String>) -> Result<(), String> {
    // atlas-map classify [STATE ...]   (API_URL and MAPTILER_API_KEY from the environment)
    let config = ApiConfig::from_env().map_err(|e| e.to_string())?;
    let client = IncentivesClient::new(&config);

    let states: Vec<&str> = if args.is_empty() {
        STATES_PLUS_DC.to_vec()
    } else {
        args.iter().map(String::as_str).collect()
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("tokio runtime: {e}"))?;
    let counts = runtime.block_on(fetch_counts(&client, &states));

    let failed: Vec<&str> = counts.failed().collect();
    if !failed.is_empty() {
        eprintln!("no count for: {}", failed.join(", "));
    }
    print_json(&tier_rows(&counts))
}

fn cmd_search(args: Vec<String>) -> Result<(), String> {
    // atlas-map search <states.json> <counties.json> <query>
    if args.len() < 3 {
        return Err(usage());
    }
    let catalog = load_catalog(&PathBuf::from(&args[0]), &PathBuf::from(&args[1]))?;
    let query = args[2..].join(" ");
    print_json(&search_report(&catalog, &query))
}

fn cmd_import(args: Vec<String>) -> Result<(), String> {
    // atlas-map import <states|counties> <census.geojson> <out.json> [--decimals N]
    if args.len() < 3 {
        return Err(usage());
    }
    let kind = BoundaryKind::parse(&args[0])
        .ok_or_else(|| format!("unknown boundary kind {:?}\n\n{}", args[0], usage()))?;
    let input = PathBuf::from(&args[1]);
    let output = PathBuf::from(&args[2]);

    let mut decimals = DEFAULT_DECIMALS;
    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--decimals" => {
                i += 1;
                let raw = args.get(i).ok_or("--decimals requires a value")?;
                decimals = raw
                    .parse()
                    .map_err(|e| format!("invalid decimals {raw:?}: {e}"))?;
            }
            s => return Err(format!("unknown arg: {s}\n\n{}", usage())),
        }
        i += 1;
    }

    let text = fs::read_to_string(&input).map_err(|e| format!("read {input:?}: {e}"))?;
    let raw: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| format!("parse {input:?}: {e}"))?;
    let converted = import_census(&raw, kind, decimals)?;
    let count = converted["features"].as_array().map_or(0, Vec::len);

    let encoded = serde_json::to_string(&converted).map_err(|e| format!("encode: {e}"))?;
    fs::write(&output, encoded).map_err(|e| format!("write {output:?}: {e}"))?;
    eprintln!("wrote {count} features to {}", output.display());
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| format!("encode: {e}"))?;
    println!("{text}");
    Ok(())
}

fn usage() -> String {
    [
        "usage:",
        "  atlas-map layers <states.json> <counties.json> [--select NAME] [--zoom Z] [--density]",
        "  atlas-map classify [STATE ...]",
        "  atlas-map search <states.json> <counties.json> <query>",
        "  atlas-map import <states|counties> <census.geojson> <out.json> [--decimals N]",
    ]
    .join("\n")
}
