//! Simplify a propositional formula
//!
//! Usage:
//!   prop [ENVIRONMENT_JSON] FORMULA
//!
//! Examples:
//!   prop 'NOT (a AND b)'
//!   prop env.json 'x = "熊猫" OR y'
//!   echo 'a OR b' | prop env.json -

use anyhow::Context;
use clap::Parser;
use gombi_core::{parse_formula, parse_formula_from, Environment, Error};
use gombi_parser::StreamInput;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const LICENSE_NOTICE: &str = "\
Formulas use TRUE, FALSE, NOT, AND, OR, = and parentheses. Identifiers are
looked up in the environment, a JSON object whose values are booleans or
strings.

This program is free software: you can redistribute it and/or modify it under
the terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.";

#[derive(Parser)]
#[command(name = "prop")]
#[command(about = "Parse and simplify a propositional formula")]
#[command(long_about = None, after_help = LICENSE_NOTICE)]
#[command(version, allow_missing_positional = true)]
struct Cli {
    /// JSON file with variable bindings
    environment: Option<PathBuf>,
    /// Formula to simplify, or `-` to read it from stdin
    formula: String,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let env = match &cli.environment {
        Some(path) => Environment::load(path).context("loading environment")?.environment,
        None => Environment::new(),
    };

    let parsed = if cli.formula == "-" {
        parse_formula_from(StreamInput::from_reader(io::stdin().lock()))
    } else {
        parse_formula(&cli.formula)
    };
    let parsed = match parsed {
        Ok(parsed) => parsed,
        Err(Error::Unparseable) => {
            println!("Can't parse the input!");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err).context("reading formula"),
    };

    println!("parsed expression = {}", parsed.value);
    println!("simplified result = {}", parsed.value.simplify(&env));
    if parsed.has_remaining() {
        println!("There's some remaining input: {}", parsed.remaining);
    }
    Ok(ExitCode::SUCCESS)
}
