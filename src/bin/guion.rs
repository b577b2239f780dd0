//! Command-line interface for guion
//! This binary runs the Guion front end over a source file and writes the
//! analysis artifacts, or prints a single stage for inspection.
//!
//! Usage:
//!   guion analyze `<path>` [--out-dir `<dir>`] [--strict]  - Analyze and write the four artifacts
//!   guion tokens `<path>` [--format `<format>`]          - Print the token stage (simple or json)
//!   guion tree `<path>`                                - Print the tree dump

use clap::{Arg, ArgAction, Command};
use std::path::{Path, PathBuf};

use guion::guion::processor::{
    self, analyze_strict, artifact_dir_for, write_artifacts, AnalyzeError,
};

fn main() {
    let matches = Command::new("guion")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for analyzing Guion source files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("analyze")
                .about("Analyze a source file and write the artifact files")
                .arg(
                    Arg::new("path")
                        .help("Path to the Guion source file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("out-dir")
                        .long("out-dir")
                        .short('o')
                        .help("Destination directory for the artifacts"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Abort on the first syntax error instead of recovering")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stage of a source file")
                .arg(
                    Arg::new("path")
                        .help("Path to the Guion source file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('simple' or 'json')")
                        .default_value("simple"),
                ),
        )
        .subcommand(
            Command::new("tree")
                .about("Print the tree dump of a source file")
                .arg(
                    Arg::new("path")
                        .help("Path to the Guion source file")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("analyze", analyze_matches)) => {
            let path = analyze_matches.get_one::<String>("path").unwrap();
            let out_dir = analyze_matches.get_one::<String>("out-dir");
            let strict = analyze_matches.get_flag("strict");
            handle_analyze_command(path, out_dir, strict);
        }
        Some(("tokens", tokens_matches)) => {
            let path = tokens_matches.get_one::<String>("path").unwrap();
            let format = tokens_matches.get_one::<String>("format").unwrap();
            handle_tokens_command(path, format);
        }
        Some(("tree", tree_matches)) => {
            let path = tree_matches.get_one::<String>("path").unwrap();
            handle_tree_command(path);
        }
        _ => unreachable!(),
    }
}

/// Handle the analyze command
fn handle_analyze_command(path: &str, out_dir: Option<&String>, strict: bool) {
    let input = PathBuf::from(path);
    let analysis = if strict {
        let source = read_source(&input);
        analyze_strict(&source).unwrap_or_else(|e| {
            report_failure(&e);
            std::process::exit(1);
        })
    } else {
        processor::analyze_file(&input).unwrap_or_else(|e| {
            report_failure(&e);
            std::process::exit(1);
        })
    };

    let dir = match out_dir {
        Some(dir) => PathBuf::from(dir),
        None => artifact_dir_for(&input),
    };
    if let Err(e) = write_artifacts(&dir, &analysis) {
        report_failure(&e);
        std::process::exit(1);
    }

    println!("Analisis completado: {}", dir.display());
    if !analysis.diagnostics.is_empty() {
        println!("Se registraron {} anomalias:", analysis.diagnostics.len());
        for diagnostic in &analysis.diagnostics {
            println!("  {}", diagnostic);
        }
    }
}

/// Handle the tokens command
fn handle_tokens_command(path: &str, format: &str) {
    let analysis = processor::analyze_file(Path::new(path)).unwrap_or_else(|e| {
        report_failure(&e);
        std::process::exit(1);
    });

    match format {
        "simple" => print!("{}", analysis.token_listing),
        "json" => {
            let json = serde_json::to_string_pretty(&analysis.tokens).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            println!("{}", json);
        }
        other => {
            eprintln!("Error: unknown format '{}' (expected 'simple' or 'json')", other);
            std::process::exit(1);
        }
    }
}

/// Handle the tree command
fn handle_tree_command(path: &str) {
    let analysis = processor::analyze_file(Path::new(path)).unwrap_or_else(|e| {
        report_failure(&e);
        std::process::exit(1);
    });
    print!("{}", analysis.tree_dump);
}

fn read_source(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}

fn report_failure(error: &AnalyzeError) {
    eprintln!("Error: {}", error);
    if let AnalyzeError::Syntax(failure) = error {
        if let Some(context) = &failure.source_line {
            eprintln!("  {}", context);
        }
    }
}
