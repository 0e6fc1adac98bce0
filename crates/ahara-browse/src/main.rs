mod cli;
mod dataset;
mod render;

use std::process::ExitCode;

use ahara_seeker::{count_by, Record, SelectionSet, Toggle};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::render::Report;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one browse request and returns what should be printed.
fn run(cli: &Cli) -> Result<String> {
    let dataset = cli.command.dataset();
    let args = cli.command.args();
    let records = dataset.load(cli.data.as_deref())?;

    let engine = dataset.engine();
    let query = args.to_query();
    debug!(?query, "built query");

    let result = engine
        .evaluate(&records, &query)
        .context("evaluating query")?;

    let facets = if args.facets.is_empty() {
        Vec::new()
    } else {
        let filtered = engine.matching(&records, &query);
        args.facets
            .iter()
            .map(|field| count_by(filtered.iter().copied(), field))
            .collect()
    };

    let (compare, ignored_compare) = compare_panel(&records, &args.compare);

    let report = Report {
        dataset: dataset.name(),
        query: &query,
        result,
        facets,
        compare,
        ignored_compare,
    };

    if args.json {
        render::to_json(&report).context("serializing report")
    } else {
        Ok(render::to_text(&report, dataset.columns()))
    }
}

/// Feeds the requested ids through a selection set, the same way the
/// compare checkboxes do, and resolves the survivors.
fn compare_panel<'a>(records: &'a [Record], ids: &[String]) -> (Vec<&'a Record>, Vec<String>) {
    let mut selection = SelectionSet::new();
    let mut ignored = Vec::new();

    for id in ids {
        if selection.contains(id) {
            continue;
        }
        if selection.toggle(id) == Toggle::Ignored {
            warn!(%id, capacity = selection.capacity(), "compare panel is full");
            ignored.push(id.clone());
        }
    }

    let resolved = selection.resolve(records);
    for id in selection.iter() {
        if !resolved.iter().any(|r| r.id == id) {
            warn!(%id, "compare id not found");
        }
    }

    (resolved, ignored)
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("ahara").chain(args.iter().copied()))?;
        run(&cli)
    }

    #[test]
    fn foods_search_renders_table() {
        let out = run_args(&["foods", "--term", "rice", "--sort", "calories"]).unwrap();
        let rows: Vec<&str> = out.lines().skip(2).take(3).collect();
        assert!(rows[0].starts_with("f06  Brown Rice"));
        assert!(rows[1].starts_with("f01  Basmati Rice"));
        assert!(rows[2].starts_with("f11  Poha (Rice Flakes)"));
        assert!(out.contains("Showing 1-3 of 3 (page 1 of 1)"));
    }

    #[test]
    fn patients_facets_follow_filters() {
        let out = run_args(&[
            "patients",
            "--range",
            "age=30..60",
            "--facet",
            "prakriti",
        ])
        .unwrap();
        assert!(out.contains("prakriti: Pitta (2), Kapha (3), Vata (2)"));
    }

    #[test]
    fn compare_caps_at_three() {
        let out = run_args(&[
            "foods", "--compare", "f01", "--compare", "f02", "--compare", "f03", "--compare",
            "f04",
        ])
        .unwrap();
        assert!(out.contains("\nCompare\n"));
        assert!(out.contains("(compare is full, skipped f04)"));
    }

    #[test]
    fn repeated_compare_id_is_not_toggled_off() {
        let records = dataset::Dataset::Foods.load(None).unwrap();
        let ids = vec!["f01".to_string(), "f01".to_string(), "f02".to_string()];
        let (picked, ignored) = compare_panel(&records, &ids);
        let picked: Vec<&str> = picked.into_iter().map(|r| r.id.as_str()).collect();
        assert_eq!(picked, ["f01", "f02"]);
        assert!(ignored.is_empty());
    }

    #[test]
    fn zero_page_size_is_an_error() {
        let err = run_args(&["foods", "--size", "0"]).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid query: page size must be at least 1"));
    }

    #[test]
    fn json_output_from_data_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "a", "name": "Amla", "category": "Fruits"}},
                {{"id": "b", "name": "Bael", "category": "Fruits"}}]"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let out = run_args(&["--data", path, "foods", "--json", "--size", "1", "--page", "2"])
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["total_matched"], 2);
        assert_eq!(json["items"][0]["id"], "b");
        assert_eq!(json["query"]["page"]["index"], 1);
    }
}
