mod config;

use anyhow::Context;
use blueprint_core::adapters::{FsDocumentSource, FsWritePort, GitLogSource, NoHistory};
use blueprint_core::pipeline::{
    ToolError, load_catalog_entries, run_catalog, run_process, run_validate,
    write_catalog_artifacts, write_process_artifacts, write_validate_artifacts,
};
use blueprint_core::ports::RevisionSource;
use blueprint_core::settings::{CatalogSettings, ProcessSettings, ValidateSettings};
use blueprint_render::render_validation_md;
use blueprint_types::ValidationMode;
use camino::Utf8PathBuf;
use chrono::Utc;
use clap::{Parser, Subcommand};
use config::{CliOverrides, ConfigMerger, MergedConfig};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "blueprints",
    version,
    about = "Validate, version and catalog a collection of automation blueprints."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check syntax, schema and name uniqueness (exit 1 on any failure).
    Validate(ValidateArgs),
    /// Derive versions from git history and write stamped copies.
    Process(ProcessArgs),
    /// Build the catalog page from processed blueprints.
    Catalog(CatalogArgs),
}

#[derive(Debug, clap::Args)]
struct CommonArgs {
    /// Repository root (default: current directory).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Blueprint collection directory (default: <repo_root>/blueprints).
    #[arg(long)]
    collection_dir: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct ValidateArgs {
    /// Which check to run: syntax, schema or duplicates (default: all).
    #[arg(value_parser = parse_mode)]
    check: Option<ValidationMode>,

    #[command(flatten)]
    common: CommonArgs,

    /// Also write report.json and report.md to this directory.
    #[arg(long)]
    out: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct ProcessArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output directory (default: <repo_root>/dist).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Skip git history; every blueprint gets 1.0.0.
    #[arg(long, default_value_t = false)]
    no_history: bool,

    /// Write a unified diff of all renames to <out_dir>/versioning.diff.
    #[arg(long, default_value_t = false)]
    diff: bool,

    /// Print how each version was derived.
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

#[derive(Debug, Parser)]
struct CatalogArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Directory holding the processed entry list (default: <repo_root>/dist).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Repository owner for links (default: from GITHUB_REPOSITORY).
    #[arg(long)]
    repo_owner: Option<String>,

    /// Repository name for links (default: from GITHUB_REPOSITORY).
    #[arg(long)]
    repo_name: Option<String>,

    /// Truncate descriptions to this many characters.
    #[arg(long)]
    description_length: Option<usize>,
}

fn parse_mode(s: &str) -> Result<ValidationMode, String> {
    s.parse()
}

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::from(0),
        Err(ToolError::ChecksFailed) => ExitCode::from(1),
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn real_main() -> Result<(), ToolError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Process(args) => cmd_process(args),
        Command::Catalog(args) => cmd_catalog(args),
    }
}

fn merged_config(common: &CommonArgs, overrides: CliOverrides) -> anyhow::Result<MergedConfig> {
    let file_config =
        config::load_or_default(&common.repo_root).context("load blueprints.toml config")?;
    let merged = ConfigMerger::new(file_config, &common.repo_root)
        .with_github_repository(std::env::var("GITHUB_REPOSITORY").ok())
        .merge(CliOverrides {
            collection_dir: common.collection_dir.clone(),
            ..overrides
        });
    debug!(?merged, "merged config");
    Ok(merged)
}

fn document_source(merged: &MergedConfig) -> FsDocumentSource {
    FsDocumentSource::new(merged.collection_dir.clone())
        .with_extensions(merged.extensions.clone())
        .with_default_category(merged.default_category.clone())
}

fn cmd_validate(args: ValidateArgs) -> Result<(), ToolError> {
    let merged = merged_config(&args.common, CliOverrides::default())?;
    let settings = ValidateSettings {
        mode: args.check.unwrap_or_default(),
    };

    let outcome = run_validate(&settings, &document_source(&merged))?;

    if let Some(out) = &args.out {
        write_validate_artifacts(&outcome, out, &FsWritePort)
            .with_context(|| format!("write report to {}", out))?;
    }
    print!("{}", render_validation_md(&outcome.report));

    if outcome.passed {
        info!(mode = %settings.mode, "all checks passed");
        Ok(())
    } else {
        error!(
            mode = %settings.mode,
            failed = outcome.report.failed_documents().count(),
            "validation failed"
        );
        Err(ToolError::ChecksFailed)
    }
}

fn cmd_process(args: ProcessArgs) -> Result<(), ToolError> {
    let merged = merged_config(
        &args.common,
        CliOverrides {
            out_dir: args.out_dir.clone(),
            no_history: args.no_history,
            ..Default::default()
        },
    )?;

    let git = GitLogSource::new(args.common.repo_root.clone());
    let revisions: &dyn RevisionSource = if merged.history_enabled {
        &git
    } else {
        &NoHistory
    };

    let outcome = run_process(&document_source(&merged), revisions)?;

    let settings = ProcessSettings {
        out_dir: merged.out_dir.clone(),
        blueprints_subdir: merged.blueprints_subdir.clone(),
        catalog_file: merged.catalog_file.clone(),
        write_diff: args.diff,
    };
    write_process_artifacts(&outcome, &settings, &FsWritePort)
        .with_context(|| format!("write artifacts to {}", settings.out_dir))?;

    for entry in &outcome.entries {
        println!("{}  {}", entry.version, entry.file_path);
    }
    if args.verbose {
        for trace in &outcome.traces {
            println!("\n{} -> {}", trace.path, trace.version);
            for step in &trace.steps {
                println!("  {} {:?} -> {}", step.revision_id, step.kind, step.version);
            }
        }
    }
    for skipped in &outcome.skipped {
        println!("skipped {}: {}", skipped.path, skipped.reason);
    }

    info!(
        processed = outcome.entries.len(),
        skipped = outcome.skipped.len(),
        catalog = %settings.catalog_path(),
        "processing complete"
    );
    Ok(())
}

fn cmd_catalog(args: CatalogArgs) -> Result<(), ToolError> {
    let merged = merged_config(
        &args.common,
        CliOverrides {
            out_dir: args.out_dir.clone(),
            repo_owner: args.repo_owner.clone(),
            repo_name: args.repo_name.clone(),
            description_length: args.description_length,
            ..Default::default()
        },
    )?;

    let entries_path = merged.out_dir.join(&merged.catalog_file);
    let entries = load_catalog_entries(&entries_path)
        .context("no processed blueprints; run `blueprints process` first")?;

    let settings = CatalogSettings {
        out_dir: merged.out_dir.clone(),
        description_length: merged.description_length,
        source_dir: merged.source_dir.clone(),
        repo_owner: merged.repo_owner.clone(),
        repo_name: merged.repo_name.clone(),
    };
    let outcome = run_catalog(&settings, entries, Utc::now());
    write_catalog_artifacts(&outcome, &settings.out_dir, &FsWritePort)
        .with_context(|| format!("write catalog to {}", settings.out_dir))?;

    println!(
        "catalog: {} blueprints in {} categories ({} domains) -> {}",
        outcome.page.stats.total_blueprints,
        outcome.page.stats.total_categories,
        outcome.page.stats.total_domains,
        settings.out_dir.join("catalog.json")
    );
    Ok(())
}
