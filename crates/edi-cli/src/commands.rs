//! Subcommand implementations

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use edi_orders::{load_document, parse_order, Order, OrderParser};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{CliConfig, OutputFormat};

/// Outcome of parsing one input file
type ParsedInput = (PathBuf, edi_orders::Result<Order>);

/// Parse every input and write the resulting records.
///
/// A single input produces one record (`null` when it was skipped); several
/// inputs produce a list in input order.
pub async fn parse(inputs: Vec<PathBuf>, output: Option<PathBuf>, config: &CliConfig) -> anyhow::Result<()> {
    let single = inputs.len() == 1;
    let results = parse_inputs(inputs).await?;

    let mut orders = Vec::with_capacity(results.len());
    let mut failed = 0usize;
    for (path, result) in results {
        match result {
            Ok(order) => {
                info!(
                    path = %path.display(),
                    line_items = order.line_items.len(),
                    "Parsed order"
                );
                orders.push(order);
            }
            Err(err) if config.keep_going => {
                failed += 1;
                eprintln!("WARNING: skipping {}: {err}", path.display());
            }
            Err(err) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("failed to parse {}", path.display())));
            }
        }
    }

    let rendered = if single {
        render(&orders.first(), config)?
    } else {
        render(&orders, config)?
    };
    write_output(output.as_deref(), &rendered)?;

    eprintln!("Parse summary: documents={}, failed={failed}", orders.len());
    Ok(())
}

/// Print the segments of a document, optionally only those with `tag`
pub fn segments(input: &Path, tag: Option<&str>) -> anyhow::Result<()> {
    let text = load_document(input)?;
    let parser = OrderParser::new(&text);
    let tag = tag.map(str::to_ascii_uppercase);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for segment in parser
        .segments()
        .iter()
        .filter(|segment| tag.as_deref().is_none_or(|tag| segment.is(tag)))
    {
        writeln!(out, "{}", segment.as_str())?;
    }
    Ok(())
}

/// Load and parse inputs concurrently, keeping input order
async fn parse_inputs(inputs: Vec<PathBuf>) -> anyhow::Result<Vec<ParsedInput>> {
    let handles: Vec<_> = inputs
        .into_iter()
        .map(|path| {
            tokio::task::spawn_blocking(move || {
                let result = load_document(&path).and_then(|text| parse_order(&text));
                (path, result)
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.context("parse task failed")?);
    }
    debug!(documents = results.len(), "Finished parsing inputs");
    Ok(results)
}

fn render<T: Serialize>(value: &T, config: &CliConfig) -> anyhow::Result<String> {
    let rendered = match config.format {
        OutputFormat::Json if config.pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(rendered)
}

fn write_output(output: Option<&Path>, rendered: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("cannot write output {}", path.display()))?;
            info!(path = %path.display(), "Wrote output");
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            out.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                out.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
