use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use regex_phone_validator::{Category, RegionTable, ValidationOptions, ValidationResult};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Validate phone numbers against per-region pattern tables
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File with one candidate per line (stdin when omitted or "-")
    #[arg(index = 1)]
    file_path: Option<PathBuf>,

    /// Region code or country alias, e.g. 1-767 or DM
    #[arg(short, long)]
    region: String,

    /// Category name, "any", or a comma-separated list
    #[arg(short, long, default_value = "any")]
    category: String,

    /// Extra JSON pattern table, applied after the embedded one (repeatable)
    #[arg(short, long)]
    table: Vec<PathBuf>,

    /// Do not load the embedded pattern table
    #[arg(long)]
    no_embedded: bool,

    /// Drop spaces, dashes, parentheses and dots before matching
    #[arg(long)]
    strip_formatting: bool,

    /// Accept +<calling code> and 00<calling code> prefixes
    #[arg(long)]
    international: bool,

    /// Only run the possible-pattern screen
    #[arg(long)]
    possible_only: bool,

    /// One JSON object per candidate instead of text
    #[arg(long)]
    json: bool,

    /// Print a JSON summary instead of per-candidate results
    #[arg(short, long)]
    stats: bool,

    /// Write the summary to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Process only first N lines
    #[arg(short, long)]
    limit: Option<usize>,

    /// Number of threads to use
    #[arg(long, default_value = "4")]
    threads: usize,
}

#[derive(Serialize)]
struct Finding<'a> {
    line: usize,
    value: &'a str,
    #[serde(flatten)]
    result: ValidationResult,
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let table = match load_table(&args) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("Error loading pattern table: {}", err);
            process::exit(2);
        }
    };
    if table.region(&args.region).is_none() {
        eprintln!("Warning: region {} is not in the pattern table", args.region);
    }

    let candidates = read_candidates(&args)?;
    info!(count = candidates.len(), region = %args.region, category = %args.category, "validating candidates");

    let options = ValidationOptions {
        strip_formatting: args.strip_formatting,
        accept_international: args.international,
    };

    let progress_bar = if args.stats {
        let pb = ProgressBar::new(candidates.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} candidates ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads.max(1))
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let results: Vec<ValidationResult> = pool.install(|| {
        candidates
            .par_iter()
            .map(|(_, value)| {
                let result = if args.possible_only {
                    table.is_possible(&args.region, &args.category, value, &options)
                } else {
                    table.validate_with(&args.region, &args.category, value, &options)
                };
                if let Some(pb) = &progress_bar {
                    pb.inc(1);
                }
                result
            })
            .collect()
    });

    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }

    if args.stats {
        write_stats(&args, &candidates, &results)
    } else {
        write_findings(&args, &candidates, &results)
    }
}

fn load_table(args: &Args) -> Result<RegionTable, regex_phone_validator::TableError> {
    let mut builder = RegionTable::builder();
    if !args.no_embedded {
        builder = builder.add_embedded()?;
    }
    for path in &args.table {
        builder = builder.add_json_file(path)?;
    }
    builder.build()
}

fn read_candidates(args: &Args) -> io::Result<Vec<(usize, String)>> {
    let reader: Box<dyn BufRead> = match &args.file_path {
        Some(path) if path.as_os_str() != "-" => {
            debug!(path = %path.display(), "reading candidates");
            Box::new(BufReader::with_capacity(1_000_000, File::open(path)?))
        }
        _ => Box::new(BufReader::new(io::stdin())),
    };

    let limit = args.limit.unwrap_or(usize::MAX);
    let mut candidates = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        if index >= limit {
            break;
        }
        // lines are passed through untouched, `--strip-formatting` decides about spaces
        let line = line?;
        if !line.is_empty() {
            candidates.push((index + 1, line));
        }
    }
    Ok(candidates)
}

fn write_findings(args: &Args, candidates: &[(usize, String)], results: &[ValidationResult]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for ((line, value), result) in candidates.iter().zip(results) {
        if args.json {
            let finding = Finding {
                line: *line,
                value,
                result: *result,
            };
            writeln!(out, "{}", serde_json::to_string(&finding)?)?;
        } else {
            match result.category() {
                Some(category) => writeln!(out, "  \"{}\" => {} ({})", value, result.as_str(), category)?,
                None => writeln!(out, "  \"{}\" => {}", value, result.as_str())?,
            }
        }
    }
    out.flush()
}

fn write_stats(args: &Args, candidates: &[(usize, String)], results: &[ValidationResult]) -> io::Result<()> {
    let mut outcomes: BTreeMap<&str, usize> = BTreeMap::new();
    let mut categories: BTreeMap<Category, usize> = BTreeMap::new();

    for result in results {
        *outcomes.entry(result.as_str()).or_insert(0) += 1;
        if let Some(category) = result.category() {
            *categories.entry(category).or_insert(0) += 1;
        }
    }

    let total = candidates.len();
    let category_stats: Vec<serde_json::Value> = categories
        .iter()
        .map(|(category, count)| {
            let percentage = if total > 0 {
                ((*count as f64) / (total as f64) * 100.0).round()
            } else {
                0.0
            };
            json!({
                "category": category,
                "count": count,
                "percentage": percentage
            })
        })
        .collect();

    let stats_json = json!({
        "summary": {
            "total_candidates": total,
            "region": args.region,
            "category": args.category,
            "possible_only": args.possible_only
        },
        "outcomes": outcomes,
        "categories": category_stats
    });
    let rendered = serde_json::to_string_pretty(&stats_json)?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            eprintln!("Statistics written to {}", path.display());
            Ok(())
        }
        None => {
            println!("{}", rendered);
            Ok(())
        }
    }
}
