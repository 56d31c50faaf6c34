//! # gridtex
//!
//! Render a JSON table document as a booktabs LaTeX `tabular`.
//!
//! ## Overview
//!
//! gridtex is a thin command-line layer over gridtexlib. It reads a document
//! of columns (label + keyed data) and rows (key, label, format), applies
//! options from the document and the command line, and writes LaTeX.
//!
//! ## Usage
//!
//! ```bash
//! # Render to stdout
//! gridtex models.json
//!
//! # Read from stdin, write to a file
//! cat models.json | gridtex -o table.tex
//!
//! # Section rule after the third row, grouped columns, a footnote
//! gridtex models.json --midrule 3 --group "1-2:OLS" --group "3-4:IV" --footnote "Robust SE."
//!
//! # Models as rows instead of columns
//! gridtex models.json --transpose
//!
//! # Inspect the assembled grid
//! gridtex models.json --json
//! ```

mod input;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use console::Style;
use gridtexlib::{
    build_table, write_table, Align, ColumnGroup, Destination, HeightPolicy, TableOptions,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::input::TableDocument;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("gridtex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render JSON table documents as booktabs LaTeX tables")
        .arg(
            Arg::new("input")
                .help("Table document (JSON); reads stdin when absent or '-'"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write LaTeX to this file instead of stdout"),
        )
        .arg(
            Arg::new("row-header")
                .long("row-header")
                .help("Label of the row-label column"),
        )
        .arg(
            Arg::new("transpose")
                .long("transpose")
                .action(ArgAction::SetTrue)
                .help("Swap rows and columns"),
        )
        .arg(
            Arg::new("midrule")
                .long("midrule")
                .action(ArgAction::Append)
                .value_parser(value_parser!(usize))
                .help("Place a \\midrule after this many rows (can be specified multiple times)"),
        )
        .arg(
            Arg::new("title-align")
                .long("title-align")
                .value_parser(["l", "c", "r", "left", "center", "right"])
                .help("Alignment of the column titles"),
        )
        .arg(
            Arg::new("group")
                .short('g')
                .long("group")
                .action(ArgAction::Append)
                .help("Column group START-END:LABEL, column 0 being the row labels (can be specified multiple times)"),
        )
        .arg(
            Arg::new("column-align")
                .long("column-align")
                .help("Explicit tabular column spec, e.g. 'lcc'"),
        )
        .arg(
            Arg::new("footnote")
                .long("footnote")
                .action(ArgAction::Append)
                .help("Footnote row below the table (can be specified multiple times)"),
        )
        .arg(
            Arg::new("no-pad")
                .long("no-pad")
                .action(ArgAction::SetTrue)
                .help("Do not pad columns to a common width"),
        )
        .arg(
            Arg::new("height-policy")
                .long("height-policy")
                .value_parser(["pad", "strict"])
                .help("Handling of multi-line cells of one row that differ in line count"),
        )
        .arg(
            Arg::new("strict-heights")
                .long("strict-heights")
                .action(ArgAction::SetTrue)
                .conflicts_with("height-policy")
                .help("Shorthand for --height-policy strict"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the assembled grid as JSON instead of LaTeX"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log pipeline steps to stderr (-vv for more)"),
        )
}

/// Overlay command-line flags on the options embedded in the document
fn apply_overrides(matches: &ArgMatches, mut options: TableOptions) -> anyhow::Result<TableOptions> {
    if let Some(label) = matches.get_one::<String>("row-header") {
        options.row_header = Some(label.clone());
    }
    if matches.get_flag("transpose") {
        options.transpose = true;
    }
    if let Some(indices) = matches.get_many::<usize>("midrule") {
        options.midrules = indices.copied().collect();
    }
    if let Some(align) = matches.get_one::<String>("title-align") {
        options.title_align = align.parse::<Align>()?;
    }
    if let Some(groups) = matches.get_many::<String>("group") {
        options.groups = groups
            .map(|g| g.parse::<ColumnGroup>())
            .collect::<Result<Vec<_>, _>>()?;
    }
    if let Some(spec) = matches.get_one::<String>("column-align") {
        options.column_align = Some(spec.clone());
    }
    if let Some(notes) = matches.get_many::<String>("footnote") {
        options.footnotes = notes.cloned().collect();
    }
    if matches.get_flag("no-pad") {
        options.pad_columns = false;
    }
    if let Some(policy) = matches.get_one::<String>("height-policy") {
        options.height_policy = policy.parse::<HeightPolicy>()?;
    }
    if matches.get_flag("strict-heights") {
        options.height_policy = HeightPolicy::Strict;
    }
    Ok(options)
}

fn read_input(matches: &ArgMatches) -> anyhow::Result<String> {
    match matches.get_one::<String>("input").map(String::as_str) {
        None | Some("-") => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path))
        }
    }
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "gridtexlib=debug,gridtex=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let text = read_input(matches)?;
    let doc = TableDocument::parse(&text)?;
    let options = apply_overrides(matches, doc.options.clone())?;
    debug!(?options, "resolved options");

    let rows = doc.rows();
    let columns = doc.columns();

    if matches.get_flag("json") {
        let table = build_table(&rows, &columns, &options)?;
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    match matches.get_one::<String>("output") {
        Some(path) => {
            write_table(&rows, &columns, &options, Destination::File(PathBuf::from(path)))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            write_table(&rows, &columns, &options, Destination::Writer(&mut stdout))?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", Style::new().red().bold().apply_to("Error:"), e);
            ExitCode::FAILURE
        }
    }
}
