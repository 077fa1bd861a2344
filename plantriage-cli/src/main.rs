mod config;
mod input;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::{ConfigMerger, ReportFormat};
use fs_err as fs;
use plantriage_analysis::{analyze, catalog};
use plantriage_render::render_report_md;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "plantriage",
    version,
    about = "Triage tool for terraform plan output: classify errors and suggest fixes."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze plan output and emit a structured report.
    Analyze(AnalyzeArgs),
    /// List the error categories and patterns the analyzer knows about.
    Categories(CategoriesArgs),
}

#[derive(Debug, Parser)]
struct AnalyzeArgs {
    /// File containing plan output (default: read stdin).
    #[arg(long, short = 'f')]
    file: Option<Utf8PathBuf>,

    /// Write the report here instead of stdout.
    #[arg(long, short = 'o')]
    output: Option<Utf8PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Report format (default: json, or the plantriage.toml setting).
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,
}

#[derive(Debug, Parser)]
struct CategoriesArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: ListFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ListFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Analyze(args) => cmd_analyze(args),
        Command::Categories(args) => cmd_categories(args),
    }
}

fn cmd_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    // Load config file and merge with CLI arguments
    let file_config =
        config::load_or_default(Utf8Path::new(".")).context("load plantriage.toml config")?;
    let merged = ConfigMerger::new(file_config).merge_analyze_args(args.pretty, args.format);

    debug!(
        "merged config: pretty={}, format={:?}",
        merged.pretty, merged.format
    );

    let plan_text = input::read_plan_text(args.file.as_deref()).context("read plan input")?;
    let report = analyze(&plan_text);

    let rendered = match merged.format {
        ReportFormat::Json => {
            if merged.pretty {
                serde_json::to_string_pretty(&report).context("serialize report")?
            } else {
                serde_json::to_string(&report).context("serialize report")?
            }
        }
        ReportFormat::Markdown => render_report_md(&report),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("write {}", path))?;
            info!("wrote report to {}", path);
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

fn cmd_categories(args: CategoriesArgs) -> anyhow::Result<()> {
    match args.format {
        ListFormat::Text => {
            println!("Error categories, in match order:\n");
            println!("  {:<20} {:<10} PATTERNS", "CATEGORY", "MATCHERS");
            println!("  {:<20} {:<10} --------", "--------", "--------");
            for rules in catalog::catalog() {
                let ids: Vec<&str> = rules.matchers.iter().map(|m| m.id).collect();
                println!(
                    "  {:<20} {:<10} {}",
                    rules.category.as_str(),
                    rules.matchers.len(),
                    ids.join(", ")
                );
            }
            println!();
            println!("Segments matching none of the above are reported as 'unknown'.");
        }
        ListFormat::Json => {
            let categories: Vec<_> = catalog::catalog()
                .iter()
                .map(|rules| {
                    serde_json::json!({
                        "category": rules.category.as_str(),
                        "matchers": rules.matchers.iter().map(|m| m.id).collect::<Vec<_>>(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&categories)?);
        }
    }
    Ok(())
}
