//! One-shot and interactive front-ends.

use anyhow::{Context, Result};
use gridsheet_core::{Document, DocumentOptions, EvalReport};
use std::io::{BufRead, Write};
use std::path::Path;

const EXIT_COMMAND: &str = "exit";

/// Load `input`, evaluate it and write the table to `output`, or to `out`
/// when no output path is given.
pub fn run_once<W: Write>(
    input: &Path,
    output: Option<&Path>,
    options: DocumentOptions,
    out: &mut W,
) -> Result<EvalReport> {
    let mut doc = Document::open(input, options)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let report = doc.evaluate();
    log_report(input, &report);

    match output {
        Some(path) => {
            doc.write_to(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "output written");
        }
        None => doc.print(out).context("Failed to write table")?,
    }
    Ok(report)
}

/// Prompt for an input path and an output path until `exit` or end of input.
///
/// A blank output path prints the table to `out`. A round that fails is
/// reported and the loop carries on.
pub fn run_interactive<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    options: DocumentOptions,
) -> Result<()> {
    writeln!(out, "Service started. Type '{}' to quit at any time.", EXIT_COMMAND)?;

    loop {
        write!(out, "\nEnter CSV path (or '{}'): ", EXIT_COMMAND)?;
        out.flush()?;
        let Some(csv_path) = read_answer(&mut input)? else {
            break;
        };

        write!(out, "Enter output file path (blank for console): ")?;
        out.flush()?;
        let Some(output_path) = read_answer(&mut input)? else {
            break;
        };

        let output = (!output_path.is_empty()).then(|| Path::new(&output_path));
        if let Err(err) = run_once(Path::new(&csv_path), output, options, &mut *out) {
            tracing::error!("{:#}", err);
            writeln!(out, "Error: {:#}", err)?;
            continue;
        }
        if let Some(path) = output {
            writeln!(out, "Output written to {}", path.display())?;
        }
    }

    tracing::info!("service stopped");
    Ok(())
}

/// Next trimmed line, or `None` on end of input or the exit command.
fn read_answer<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line).context("Failed to read input")? == 0 {
        return Ok(None);
    }
    let answer = line.trim();
    if answer.eq_ignore_ascii_case(EXIT_COMMAND) {
        return Ok(None);
    }
    Ok(Some(answer.to_string()))
}

fn log_report(input: &Path, report: &EvalReport) {
    if report.is_clean() {
        tracing::info!(
            path = %input.display(),
            evaluated = report.evaluated.len(),
            "all formulas evaluated"
        );
    } else {
        tracing::warn!(
            path = %input.display(),
            evaluated = report.evaluated.len(),
            skipped = report.skipped.len(),
            failed = report.failures.len(),
            "some formulas were quarantined"
        );
    }
}
