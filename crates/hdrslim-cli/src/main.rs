//! hdrslim CLI
//!
//! Command-line interface for collecting and copying header closures.

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use hdrslim_core::config::{Config, RootPolicy};
use hdrslim_core::{PipelineReport, Unresolved};
use hdrslim_resolver::{survey_roots, Pipeline, HEADER_EXTENSIONS};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hdrslim")]
#[command(author, version, about = "Slim a C/C++ header tree down to what the entry headers include", long_about = None)]
struct Cli {
    /// YAML configuration file (defaults are used when omitted)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the traversal settings
#[derive(Args, Debug, Default)]
struct ResolveArgs {
    /// Include root, may be repeated (replaces the configured list)
    #[arg(short, long = "root", value_name = "DIR")]
    roots: Vec<PathBuf>,

    /// Entry point header, may be repeated (replaces the configured list)
    #[arg(short, long = "entry", value_name = "FILE")]
    entries: Vec<PathBuf>,

    /// Stop searching include roots at the first match
    #[arg(long)]
    first_match: bool,

    /// Do not collapse `..` in include paths
    #[arg(long)]
    no_normalize: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the header closure of the entry points
    Resolve {
        #[command(flatten)]
        args: ResolveArgs,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve the closure and copy it under the renamed prefix
    Grab {
        #[command(flatten)]
        args: ResolveArgs,

        /// Path text to replace (first occurrence)
        #[arg(long)]
        token: Option<String>,

        /// Replacement for the token
        #[arg(long)]
        alias: Option<String>,

        /// Copy files in parallel
        #[arg(long)]
        parallel: bool,

        /// Show what would be copied without writing
        #[arg(long)]
        dry_run: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Compare the header closure with the full tree under the roots
    Stats {
        #[command(flatten)]
        args: ResolveArgs,
    },

    /// Print the effective configuration as YAML
    Config {
        #[command(flatten)]
        args: ResolveArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => {
            debug!("Loading configuration from {:?}", path);
            Config::load(path)?
        }
        None => Config::default(),
    };

    match cli.command {
        Commands::Resolve {
            args,
            format,
            output,
        } => {
            cmd_resolve(apply_overrides(config, args), &format, output.as_deref())?;
        }
        Commands::Grab {
            args,
            token,
            alias,
            parallel,
            dry_run,
            format,
        } => {
            let mut config = apply_overrides(config, args);
            if let Some(token) = token {
                config.rename.token = token;
            }
            if let Some(alias) = alias {
                config.rename.alias = alias;
            }
            config.materializer.parallel |= parallel;
            config.materializer.dry_run |= dry_run;
            cmd_grab(config, &format)?;
        }
        Commands::Stats { args } => {
            cmd_stats(apply_overrides(config, args))?;
        }
        Commands::Config { args } => {
            print!("{}", apply_overrides(config, args).to_yaml()?);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn apply_overrides(mut config: Config, args: ResolveArgs) -> Config {
    if !args.roots.is_empty() {
        config.include_roots = args.roots;
    }
    if !args.entries.is_empty() {
        config.entry_points = args.entries;
    }
    if args.first_match {
        config.resolver.policy = RootPolicy::FirstMatch;
    }
    if args.no_normalize {
        config.resolver.normalize_paths = false;
    }
    config
}

fn print_unresolved(unresolved: &[Unresolved]) {
    for record in unresolved {
        println!("{}", record);
    }
}

fn write_json(report: &PipelineReport, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    if let Some(out_path) = output {
        std::fs::write(out_path, &json)?;
        eprintln!("Output written to: {}", out_path.display());
    } else {
        println!("{}", json);
    }
    Ok(())
}

fn cmd_resolve(config: Config, format: &str, output: Option<&Path>) -> Result<()> {
    let report = Pipeline::new(config)?.resolve_only()?;

    match format {
        "json" => write_json(&report, output)?,
        "text" => {
            print_unresolved(&report.unresolved);
            let listing: String = report
                .headers
                .iter()
                .map(|h| format!("{}\n", h.display()))
                .collect();
            if let Some(out_path) = output {
                std::fs::write(out_path, listing)?;
            } else {
                print!("{}", listing);
            }
        }
        _ => bail!("Unknown format: {}", format),
    }

    Ok(())
}

fn cmd_grab(config: Config, format: &str) -> Result<()> {
    if format != "text" && format != "json" {
        bail!("Unknown format: {}", format);
    }

    let pipeline = Pipeline::new(config)?;

    if format == "json" {
        return write_json(&pipeline.run()?, None);
    }

    // Misses are printed before copying so a failed copy does not hide them
    let (headers, unresolved) = pipeline.resolve()?;
    print_unresolved(&unresolved);
    println!(
        "📂 Resolved {} headers from {} entry points",
        headers.len(),
        pipeline.config().entry_points.len()
    );

    let materialized = pipeline.materialize(&headers)?;
    if materialized.dry_run {
        for copy in &materialized.copied {
            println!("   {} -> {}", copy.source.display(), copy.destination.display());
        }
        println!("📦 Would copy {} headers", materialized.copied.len());
    } else {
        println!(
            "📦 Copied {} headers ({} bytes)",
            materialized.copied.len(),
            materialized.total_bytes()
        );
    }
    if !materialized.skipped.is_empty() {
        println!("   Skipped {} headers outside the renamed prefix", materialized.skipped.len());
    }

    Ok(())
}

fn cmd_stats(config: Config) -> Result<()> {
    let survey = survey_roots(&config.include_roots, HEADER_EXTENSIONS);
    let report = Pipeline::new(config)?.resolve_only()?;

    print_unresolved(&report.unresolved);
    println!("📊 Header tree:");
    println!("   Under include roots: {} ({} bytes)", survey.headers, survey.bytes);
    println!("   In closure:          {}", report.headers.len());
    if survey.headers > 0 {
        let share = report.headers.len() as f64 * 100.0 / survey.headers as f64;
        println!("   Kept:                {:.1}%", share);
    }

    Ok(())
}
