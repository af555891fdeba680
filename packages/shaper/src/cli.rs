//! Command-line interface for the shaper.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{
    validate_input_path, validate_output_path, DEFAULT_OUTPUT_FILE, DEFAULT_TOP_N,
};
use crate::error::Result;
use crate::json::save_json;
use crate::report::{audit_file, tag_frequency_file, AuditReport, TagFrequency};
use crate::shaper::shape_file;
use crate::types::ElementKind;

/// OSM document shaper - Turn OSM XML exports into typed JSON documents.
#[derive(Parser)]
#[command(name = "osmdocs-shaper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Shape every node, way and relation into a JSON document array.
    Shape {
        /// OSM XML input file
        input: PathBuf,

        /// Output file (default: data.json)
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Check the structure of an OSM XML file.
    Audit {
        /// OSM XML input file
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report how often each tag key and value occurs.
    Tags {
        /// OSM XML input file
        input: PathBuf,

        /// Number of rows per section
        #[arg(short, long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        /// Also write all key-value counts to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Shape {
            input,
            output,
            pretty,
        } => shape_command(&input, &output, pretty),
        Commands::Audit { input, json } => audit_command(&input, json),
        Commands::Tags { input, top, csv } => tags_command(&input, top, csv.as_deref()),
    }
}

/// Execute the shape command.
fn shape_command(input: &Path, output: &Path, pretty: bool) -> Result<()> {
    // Validate paths before reading anything
    validate_input_path(input)?;
    validate_output_path(output)?;

    println!(
        "{} {}",
        style("Shaping").bold(),
        style(input.display()).cyan()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );

    pb.set_message("Reading elements...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let outcome = match shape_file(input) {
        Ok(outcome) => outcome,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Saving JSON...");

    let output_path = match save_json(&outcome.documents, output, pretty) {
        Ok(path) => path,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!("  Documents: {}", outcome.documents.len());
    for kind in [ElementKind::Point, ElementKind::Line, ElementKind::Composite] {
        println!("    {}: {}", kind.as_str(), outcome.count(kind));
    }
    if !outcome.warnings.is_empty() {
        println!(
            "  Skipped: {}",
            style(outcome.warnings.len()).yellow().bold()
        );
        for warning in &outcome.warnings {
            println!("    {}", style(warning).yellow());
        }
    }

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}

/// Execute the audit command.
fn audit_command(input: &Path, json: bool) -> Result<()> {
    let report = audit_file(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_audit(&report);
    }
    Ok(())
}

fn print_audit(report: &AuditReport) {
    println!("{}", style("Audit report").bold());
    println!();

    for (name, audit) in &report.elements {
        let errors = if audit.errors.is_empty() {
            style(audit.errors.len()).green()
        } else {
            style(audit.errors.len()).red().bold()
        };
        println!("  {name}: {} (errors: {errors})", audit.count);
        for error in &audit.errors {
            println!("    {}", style(error).red());
        }
    }

    if !report.unsupported.is_empty() {
        println!();
        println!("  {}", style("Unsupported elements").bold());
        for (name, count) in &report.unsupported {
            println!("    {name}: {count}");
        }
    }

    println!();
    println!("Total count: {}", style(report.total).cyan());
}

/// Execute the tags command.
fn tags_command(input: &Path, top: usize, csv: Option<&Path>) -> Result<()> {
    if let Some(path) = csv {
        validate_output_path(path)?;
    }

    let frequency = tag_frequency_file(input)?;
    print_frequency(&frequency, top);

    if let Some(path) = csv {
        frequency.write_csv(path)?;
        println!();
        println!("{} {}", style("Saved to:").green().bold(), path.display());
    }
    Ok(())
}

fn print_frequency(frequency: &TagFrequency, top: usize) {
    println!(
        "Unique keys: {}",
        style(frequency.unique_keys()).cyan()
    );
    for (key, count) in frequency.top_keys(top) {
        println!("  {count:>8}  {key}");
    }

    println!();
    println!(
        "Unique key-value pairs: {}",
        style(frequency.unique_pairs()).cyan()
    );
    for pair in frequency.top_pairs(top) {
        println!(
            "  {:>8}  {} {}={}",
            pair.count, pair.parent, pair.key, pair.value
        );
    }

    println!();
    println!("Total count: {}", style(frequency.total()).cyan());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_shape() {
        let cli = Cli::parse_from(["osmdocs-shaper", "shape", "crawley.osm"]);

        let Commands::Shape {
            input,
            output,
            pretty,
        } = cli.command
        else {
            panic!("expected shape command");
        };
        assert_eq!(input, PathBuf::from("crawley.osm"));
        assert_eq!(output, PathBuf::from("data.json"));
        assert!(!pretty);
    }

    #[test]
    fn test_cli_parse_shape_with_output() {
        let cli = Cli::parse_from([
            "osmdocs-shaper",
            "shape",
            "crawley.osm",
            "-o",
            "out/crawley.json",
            "--pretty",
        ]);

        let Commands::Shape { output, pretty, .. } = cli.command else {
            panic!("expected shape command");
        };
        assert_eq!(output, PathBuf::from("out/crawley.json"));
        assert!(pretty);
    }

    #[test]
    fn test_cli_parse_audit() {
        let cli = Cli::parse_from(["osmdocs-shaper", "audit", "crawley.osm", "--json"]);

        let Commands::Audit { input, json } = cli.command else {
            panic!("expected audit command");
        };
        assert_eq!(input, PathBuf::from("crawley.osm"));
        assert!(json);
    }

    #[test]
    fn test_cli_parse_tags() {
        let cli = Cli::parse_from(["osmdocs-shaper", "tags", "crawley.osm"]);

        let Commands::Tags { top, csv, .. } = cli.command else {
            panic!("expected tags command");
        };
        assert_eq!(top, DEFAULT_TOP_N);
        assert!(csv.is_none());
    }

    #[test]
    fn test_cli_parse_tags_with_options() {
        let cli = Cli::parse_from([
            "osmdocs-shaper",
            "tags",
            "crawley.osm",
            "--top",
            "3",
            "--csv",
            "tag_audit_report.csv",
        ]);

        let Commands::Tags { top, csv, .. } = cli.command else {
            panic!("expected tags command");
        };
        assert_eq!(top, 3);
        assert_eq!(csv, Some(PathBuf::from("tag_audit_report.csv")));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["osmdocs-shaper"]).is_err());
    }
}
