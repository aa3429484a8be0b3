//! perfgraph Command Line
//!
//! Benchmark result files in, figure descriptors, counts or a chunked text
//! summary out.
//!
//! # Core Concepts
//!
//! - [`cli`]: The `perfgraph` command definition
//! - [`load_inputs`]: Filter, decode and aggregate every input file
//! - [`run`]: Execute a parsed command, writing to any sink
//!
//! # Example
//!
//! ```text
//! perfgraph --settings plot-settings.json -i nightly.json figures -o figures.json
//! perfgraph -i a.json -i b.json --merge-inputs summary --header "*nightly*"
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod command;
mod logging;
mod pipeline;

pub use command::cli;
pub use logging::{default_directive, init_tracing};
pub use pipeline::{load_inputs, load_settings, CountsReport, Loaded, MERGED_SOURCE};

use anyhow::{Context, Result};
use clap::ArgMatches;
use perfgraph_aggregate::{
    chunk_messages, summary_lines, Figure, Projector, DEFAULT_MAX_MESSAGE_LEN, DEFAULT_VALUE_FIELD,
};
use std::io::Write;
use std::path::PathBuf;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Execute a parsed command line
///
/// # Errors
/// Returns error on unreadable inputs, structural violations while
/// aggregating, or failed writes
pub fn run(matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let settings = load_settings(matches.get_one::<PathBuf>("settings").map(PathBuf::as_path))?;
    let inputs: Vec<PathBuf> = matches
        .get_many::<PathBuf>("input")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default();
    let value_field = matches
        .get_one::<String>("value-field")
        .map_or(DEFAULT_VALUE_FIELD, String::as_str);
    let merge = matches.get_flag("merge-inputs");

    let loaded = load_inputs(&inputs, &settings, value_field)?;

    match matches.subcommand() {
        Some(("figures", args)) => {
            let projector = Projector::new(&settings)
                .with_file_prefix(string_arg(args, "file-prefix"))
                .with_file_suffix(string_arg(args, "file-suffix"));

            let mut figures: Vec<Figure> = Vec::new();
            for (source, collection) in loaded.into_collections(merge)? {
                let projected = projector.figures(&collection);
                tracing::debug!(source = %source, figures = projected.len(), "Projected source");
                figures.extend(projected);
            }

            let json = serde_json::to_string_pretty(&figures)?;
            match args.get_one::<PathBuf>("output") {
                Some(path) => {
                    std::fs::write(path, json)
                        .with_context(|| format!("failed to write figures to {}", path.display()))?;
                    tracing::info!(
                        path = %path.display(),
                        figures = figures.len(),
                        "Wrote figures"
                    );
                }
                None => writeln!(out, "{json}")?,
            }
        }
        Some(("counts", args)) => {
            let report = loaded.report();
            if args.get_flag("json") {
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                let rejections = report.rejections;
                writeln!(out, "Parsed: {}", report.counts)?;
                writeln!(out, "Rejected: {} row(s)", rejections.total())?;
                writeln!(out, "  missing name: {}", rejections.missing_name)?;
                writeln!(out, "  non-mean aggregate: {}", rejections.non_mean_aggregate)?;
                writeln!(out, "  shadowed by mean: {}", rejections.shadowed_by_mean)?;
                writeln!(out, "  missing value: {}", rejections.missing_value)?;
                writeln!(out, "  malformed name: {}", rejections.malformed_name)?;
                writeln!(out, "  ignored model: {}", rejections.ignored_model)?;
            }
        }
        Some(("summary", args)) => {
            let header = args.get_one::<String>("header").map(String::as_str);
            let max_len = args
                .get_one::<usize>("max-message-len")
                .copied()
                .unwrap_or(DEFAULT_MAX_MESSAGE_LEN);

            let mut lines = Vec::new();
            for (_, collection) in loaded.into_collections(merge)? {
                lines.extend(summary_lines(&collection, settings.propagation_modes()));
            }
            for message in chunk_messages(header, &lines, max_len) {
                writeln!(out, "{message}")?;
            }
        }
        _ => {}
    }

    Ok(())
}

fn string_arg(args: &ArgMatches, id: &str) -> String {
    args.get_one::<String>(id).cloned().unwrap_or_default()
}
