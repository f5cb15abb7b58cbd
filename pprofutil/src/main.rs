//! # pprofutil - Main Entry Point
//!
//! Subcommands:
//! - **parse**: decompose function names given on the command line
//! - **stacks**: print every sample's flattened stack
//! - **top**: hotspot table grouped by function, type or package
//! - **fold**: folded stacks for flamegraph tools

// Value formatting converts i64 to f64 for display
#![allow(clippy::cast_precision_loss)]

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use pprofutil::analysis::{analyze_hotspots, GroupBy};
use pprofutil::cli::{Args, Command};
use pprofutil::domain::ProfileError;
use pprofutil::export::FoldedStackExporter;
use pprofutil::profile::ValueType;
use pprofutil::symbol::parse_func_name;
use pprofutil::Profile;

// Exit codes (usage errors exit with 2 from clap itself)
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_NOINPUT: i32 = 66;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    let unreadable = err
        .chain()
        .any(|cause| matches!(cause.downcast_ref::<ProfileError>(), Some(ProfileError::ReadFailed { .. })));
    if unreadable {
        EXIT_NOINPUT
    } else {
        EXIT_ERROR
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Parse { names, json } => print_symbols(&names, json),
        Command::Stacks { profile } => print_stacks(&load(&profile, args.quiet)?),
        Command::Top { profile, by, limit } => print_top(&load(&profile, args.quiet)?, by, limit),
        Command::Fold { profile, output } => fold(&load(&profile, args.quiet)?, output.as_deref()),
    }
}

fn load(path: &Path, quiet: bool) -> Result<Profile> {
    let profile = Profile::from_file(path)
        .with_context(|| format!("Failed to load profile {}", path.display()))?;
    if !quiet {
        eprintln!("pprofutil v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("profile: {}", path.display());
        eprintln!("samples: {}", profile.sample.len());
    }
    Ok(profile)
}

fn print_symbols(names: &[String], json: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    for name in names {
        let sym = parse_func_name(name);
        if json {
            serde_json::to_writer(&mut out, &sym).context("Failed to serialize symbol")?;
            writeln!(out)?;
            continue;
        }
        writeln!(out, "{name}")?;
        if sym.is_empty() {
            writeln!(out, "  <malformed>")?;
            continue;
        }
        writeln!(out, "  pkg_path:  {}", sym.pkg_path)?;
        writeln!(out, "  pkg_name:  {}", sym.pkg_name)?;
        writeln!(out, "  type_name: {}", sym.type_name)?;
        writeln!(out, "  func_name: {}", sym.func_name)?;
    }
    Ok(())
}

fn print_stacks(profile: &Profile) -> Result<()> {
    let unit = profile.walked_value_type();
    let mut out = BufWriter::new(io::stdout().lock());

    for sample in profile.samples() {
        writeln!(out, "sample value={}", format_value(sample.value, unit))?;
        for (i, line) in sample.stack.iter().enumerate() {
            write!(out, "  #{i:<2} {}", line.function.name)?;
            if !line.function.filename.is_empty() {
                write!(out, "\n        at {}:{}", line.function.filename, line.line)?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
    }

    out.flush().context("Failed to write stacks")?;
    Ok(())
}

fn print_top(profile: &Profile, by: GroupBy, limit: usize) -> Result<()> {
    let unit = profile.walked_value_type();
    let hotspots = analyze_hotspots(profile, by);
    info!("{} hotspots grouped by {by:?}", hotspots.len());

    let take = if limit == 0 { hotspots.len() } else { limit };
    let mut out = io::stdout().lock();
    writeln!(out, "{:<14} {:>7} {:>9}  NAME", "VALUE", "%", "SAMPLES")?;
    for h in hotspots.iter().take(take) {
        writeln!(
            out,
            "{:<14} {:>6.1}% {:>9}  {}",
            format_value(h.value, unit),
            h.percentage,
            h.count,
            h.name
        )?;
    }
    Ok(())
}

fn fold(profile: &Profile, output: Option<&Path>) -> Result<()> {
    let exporter = FoldedStackExporter::from_profile(profile);
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            exporter.export(BufWriter::new(file))?;
        }
        None => exporter.export(io::stdout().lock())?,
    }
    Ok(())
}

/// Render a sample value using the profile's declared unit.
fn format_value(value: i64, unit: Option<&ValueType>) -> String {
    match unit.map(|vt| vt.unit.as_str()) {
        Some("nanoseconds") => {
            let ms = value as f64 / 1_000_000.0;
            if ms >= 1000.0 {
                format!("{:.2}s", ms / 1000.0)
            } else {
                format!("{ms:.2}ms")
            }
        }
        Some("bytes") => {
            let kb = value as f64 / 1024.0;
            if kb >= 1024.0 {
                format!("{:.2}MB", kb / 1024.0)
            } else {
                format!("{kb:.2}KB")
            }
        }
        _ => value.to_string(),
    }
}
