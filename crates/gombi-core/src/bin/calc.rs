//! Evaluate integer arithmetic
//!
//! Usage:
//!   calc EXPRESSION
//!
//! Supports `+ - * /` with the usual precedence, left associativity and
//! parentheses. Division truncates toward zero.

use anyhow::Context;
use clap::Parser;
use gombi_core::{evaluate_expression, Error};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calc")]
#[command(about = "Evaluate primary school arithmetic expressions")]
#[command(version)]
struct Cli {
    /// Expression such as `1 + 2 * (3 - 4)`
    expression: String,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let parsed = match evaluate_expression(&cli.expression) {
        Ok(parsed) => parsed,
        Err(Error::Unparseable) => {
            println!("Couldn't read the input!");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err).context("evaluating expression"),
    };

    println!("result = {}", parsed.value);
    if parsed.has_remaining() {
        println!("There's some remaining input: {}", parsed.remaining);
    }
    Ok(ExitCode::SUCCESS)
}
