//! CLI entry point for iacguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `iacguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use iacguard_app::{
    CheckInput, ExplainOutput, list_checks, parse_report_json, run_check, run_explain,
    runtime_error_report, serialize_report, verdict_exit_code,
};
use iacguard_settings::Overrides;
use iacguard_types::IacguardReport;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "iacguard",
    version,
    about = "Static policy checks for infrastructure-as-code resource declarations"
)]
struct Cli {
    /// Path to iacguard settings TOML (a missing file means defaults).
    #[arg(long, default_value = "iacguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|none).
    #[arg(long)]
    profile: Option<String>,

    /// Log filter directive written to stderr (e.g. "debug", "iacguard_domain=trace").
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a parsed configuration and write artifacts.
    Check {
        /// Parsed configuration as JSON: {"<type>": {"<name>": {"<attr>": value}}}.
        #[arg(long)]
        input: Utf8PathBuf,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/iacguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/iacguard/comment.md")]
        markdown_out: Utf8PathBuf,

        /// Evaluate resources on a worker pool.
        #[arg(long)]
        parallel: bool,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/iacguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Explain a check id with remediation guidance.
    Explain {
        /// The check id (e.g., "CUSTOM_AWS_1").
        identifier: String,
    },

    /// List built-in checks and whether the settings enable them.
    ListChecks,

    /// Print a JSON schema.
    Schema {
        #[arg(value_enum, default_value = "report")]
        kind: SchemaKind,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SchemaKind {
    Report,
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Commands::Check {
            ref input,
            ref report_out,
            write_markdown,
            ref markdown_out,
            parallel,
        } => cmd_check(&cli, input, report_out, write_markdown, markdown_out, parallel),
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Explain { identifier } => cmd_explain(&identifier),
        Commands::ListChecks => cmd_list_checks(&cli),
        Commands::Schema { kind } => cmd_schema(kind),
    }
}

fn cmd_check(
    cli: &Cli,
    input: &Utf8Path,
    report_out: &Utf8Path,
    write_markdown: bool,
    markdown_out: &Utf8Path,
    parallel: bool,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let cfg_text = read_config(&cli.config)?;
        let input_text =
            std::fs::read_to_string(input).with_context(|| format!("read input: {}", input))?;

        let output = run_check(CheckInput {
            config_text: &cfg_text,
            input_text: &input_text,
            overrides: overrides(cli, parallel),
            cancel: None,
        })?;

        write_report_file(report_out, &output.report).context("write report json")?;

        if write_markdown {
            let md = iacguard_render::render_markdown(&output.report);
            write_text_file(markdown_out, &md).context("write markdown")?;
        }

        print!("{}", iacguard_render::render_text_summary(&output.report));
        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            error!("check failed: {err:#}");
            let report = runtime_error_report(&format!("{err:#}"));
            if let Err(write_err) = write_report_file(report_out, &report) {
                debug!("could not write runtime error report: {write_err:#}");
            }
            eprintln!("iacguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn overrides(cli: &Cli, parallel: bool) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        parallel: parallel.then_some(true),
    }
}

/// Missing settings file is allowed (defaults apply); any other read failure is not.
fn read_config(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path, "settings file not found; using defaults");
            Ok(String::new())
        }
        Err(err) => Err(err).with_context(|| format!("read config: {}", path)),
    }
}

fn write_report_file(path: &Utf8Path, report: &IacguardReport) -> anyhow::Result<()> {
    let data = serialize_report(report).context("serialize report")?;
    ensure_parent(path)?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn ensure_parent(path: &Utf8Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    Ok(())
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let md = iacguard_render::render_markdown(&report);

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", iacguard_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
        } => {
            eprint!(
                "{}",
                iacguard_app::format_not_found(&identifier, available_check_ids)
            );
            std::process::exit(1);
        }
    }
}

fn cmd_list_checks(cli: &Cli) -> anyhow::Result<()> {
    let cfg_text = read_config(&cli.config)?;
    for check in list_checks(&cfg_text, overrides(cli, false))? {
        let categories: Vec<&str> = check.categories.iter().map(|c| c.as_str()).collect();
        println!(
            "{}\t{}\t{}\t{}\t{}",
            check.id,
            if check.enabled { "enabled" } else { "disabled" },
            categories.join(","),
            check.resource_types.join(","),
            check.name
        );
    }
    Ok(())
}

fn cmd_schema(kind: SchemaKind) -> anyhow::Result<()> {
    let schema = match kind {
        SchemaKind::Report => iacguard_app::report_schema_json()?,
        SchemaKind::Config => iacguard_app::config_schema_json()?,
    };
    println!("{}", schema);
    Ok(())
}
