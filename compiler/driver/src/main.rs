//! The command-line driver.
//!
//! Runs the front-end over a single source file and prints the raw tree, the
//! symbol table and the elaborated tree. Later phases would pick up from the
//! elaborated package; until then the output path is accepted but unused.

use diagnostics::{Diagnostic, Reporter};
use resolver::TableBuilder;
use std::{fs, process::ExitCode};

mod cli;

fn main() -> ExitCode {
    let reporter = Reporter::stderr();

    match run(&reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}

fn run(reporter: &Reporter) -> Result<(), ()> {
    let arguments = cli::arguments();
    let _ = &arguments.output;

    let source = fs::read_to_string(&arguments.input).map_err(|error| {
        Diagnostic::error()
            .message(format!(
                "could not read ‘{}’: {error}",
                arguments.input.display(),
            ))
            .report(reporter);
    })?;

    let package = arguments
        .input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("package");

    let mut package = parser::parse_package(package, source).map_err(|error| {
        error.into_diagnostic().report(reporter);
    })?;

    println!("// Parsed successfully.");
    println!("/* Initial syntax tree:");
    println!("{package}");
    println!("*/");

    let table = TableBuilder::new(&package)
        .build(&mut package)
        .map_err(|error| {
            error.into_diagnostic().report(reporter);
        })?;

    println!("/* Symbol table:");
    print!("{table}");
    println!("*/");

    let package = elaborator::elaborate(table, &package).map_err(|error| {
        error.into_diagnostic().report(reporter);
    })?;

    println!("{package}");

    Ok(())
}
