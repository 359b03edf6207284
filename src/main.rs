//! Command-line front end: reads a disassembly file, runs the analysis pipeline,
//! prints the report, and optionally re-emits the repacked disassembly.

#[macro_use]
extern crate clap;

use clap::{Arg, ArgMatches};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use vliw_repack::error::{Error, Result};
use vliw_repack::{analyze, export, report, AnalysisResult};

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("INPUT")
                .help("Disassembly file to analyze")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("FILE")
                .help("Write the report to FILE instead of stdout")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Include the per-category instruction breakdown in the report"),
        )
        .arg(
            Arg::with_name("export-asm")
                .short("e")
                .long("export-asm")
                .value_name("FILE")
                .help("Re-emit the repacked disassembly to FILE")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("compact")
                .long("compact")
                .help("Export without padding slots (requires --export-asm)")
                .requires("export-asm"),
        )
        .arg(
            Arg::with_name("base-address")
                .long("base-address")
                .value_name("HEX")
                .help("Base address for a compact export, in hex (default: 80000000)")
                .takes_value(true)
                .requires("compact"),
        )
        .get_matches();

    if let Err(err) = run(&matches) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let input_path = PathBuf::from(matches.value_of("INPUT").unwrap());
    let source = read_input(&input_path)?;

    let verbose = matches.is_present("verbose");
    let AnalysisResult {
        optimized_bundles,
        statistics,
        ..
    } = analyze(&source);

    let rendered = report::render(&statistics, verbose);
    write_output(matches.value_of("output"), &rendered)?;

    if let Some(export_path) = matches.value_of("export-asm") {
        let compact = matches.is_present("compact");
        let asm = if compact {
            let base_address = match matches.value_of("base-address") {
                Some(hex) => u32::from_str_radix(hex.trim_start_matches("0x"), 16).unwrap_or(0x80000000),
                None => 0x80000000,
            };
            export::export_compact(&optimized_bundles, base_address)
        } else {
            export::export_aligned(&optimized_bundles)
        };
        fs::write(export_path, asm).map_err(|e| Error::Io(e, PathBuf::from(export_path)))?;
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|e| Error::Io(e, path.to_path_buf()))
}

fn write_output(path: Option<&str>, rendered: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, rendered).map_err(|e| Error::Io(e, PathBuf::from(path))),
        None => {
            println!("{}", rendered);
            Ok(())
        }
    }
}
