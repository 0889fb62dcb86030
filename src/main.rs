//! Entry point for the catalog inspection CLI.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use linguist_catalog::catalog::Catalog;
use linguist_catalog::{
    config,
    discover,
    stats,
};

/// Usage text printed for `--help` and unknown subcommands.
const HELP: &str = "\
linguist-catalog — inspect Qt Linguist .ts translation catalogs

USAGE:
  linguist-catalog stats <file-or-dir> [--json]
  linguist-catalog lookup <file> <context> <source> [--plural <n>]
  linguist-catalog check <file> [--json]

SUBCOMMANDS:
  stats    completeness summary per catalog and context
  lookup   translate one (context, source) pair
  check    list unfinished and vanished entries, exit 1 when any exist

OPTIONS:
  --json        machine-readable output
  --plural <n>  numerus lookup with count n
  -h, --help    print this help
";

fn main() -> ExitCode {
    tracing_subscriber::fmt().init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Dispatch the subcommand.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(ExitCode::SUCCESS);
    }

    match args.subcommand()?.as_deref() {
        Some("stats") => cmd_stats(&mut args),
        Some("lookup") => cmd_lookup(&mut args),
        Some("check") => cmd_check(&mut args),
        _ => {
            print!("{HELP}");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// `stats`: completeness summary for one file or a whole scan root.
fn cmd_stats(args: &mut pico_args::Arguments) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let json = args.contains("--json");
    let path: PathBuf = args.free_from_str()?;

    let catalogs: Vec<Catalog> = if path.is_dir() {
        let settings = config::load_settings(&path)?;
        let store = discover::discover_catalogs(&path, &settings)?;
        let mut catalogs: Vec<Catalog> = store.catalogs().cloned().collect();
        catalogs.sort_by_key(|c| c.language().unwrap_or_default().to_string());
        catalogs
    } else {
        vec![Catalog::load(&path)?]
    };

    let summaries: Vec<_> = catalogs.iter().map(stats::catalog_stats).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        for summary in &summaries {
            print_stats(summary);
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Human-readable rendering of one summary.
fn print_stats(summary: &stats::CatalogStats) {
    let language = summary.language.as_deref().unwrap_or("(unknown)");
    println!(
        "{language}: {}% finished ({} finished, {} unfinished, {} vanished)",
        summary.percent_finished, summary.finished, summary.unfinished, summary.vanished
    );
    for context in &summary.contexts {
        println!(
            "  {}: {} finished, {} unfinished, {} vanished",
            context.name, context.finished, context.unfinished, context.vanished
        );
    }
}

/// `lookup`: translate one (context, source) pair from a catalog file.
fn cmd_lookup(args: &mut pico_args::Arguments) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let plural: Option<u64> = args.opt_value_from_str("--plural")?;
    let file: PathBuf = args.free_from_str()?;
    let context: String = args.free_from_str()?;
    let source: String = args.free_from_str()?;

    let catalog = Catalog::load(&file)?;
    match plural {
        Some(n) => println!("{}", catalog.translate_plural(&context, &source, n)),
        None => println!("{}", catalog.translate(&context, &source)),
    }
    Ok(ExitCode::SUCCESS)
}

/// `check`: report incomplete entries, failing when any exist.
fn cmd_check(args: &mut pico_args::Arguments) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let json = args.contains("--json");
    let file: PathBuf = args.free_from_str()?;

    let catalog = Catalog::load(&file)?;
    let entries = stats::incomplete_entries(&catalog);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in &entries {
            println!("{}\t{}\t{}", entry.status.as_str(), entry.context, entry.source);
        }
    }

    if entries.is_empty() { Ok(ExitCode::SUCCESS) } else { Ok(ExitCode::FAILURE) }
}
