//! Developer tasks (schema generation, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("determine current directory")?,
    };

    if manifest_dir.ends_with("xtask")
        && let Some(parent) = manifest_dir.parent()
    {
        return Ok(parent.to_path_buf());
    }
    Ok(manifest_dir)
}

/// Explicit directory argument, or `schemas/` under the project root.
fn schemas_dir(arg: Option<&str>) -> anyhow::Result<PathBuf> {
    match arg {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => Ok(project_root()?.join("schemas")),
    }
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> anyhow::Result<String>,
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "iacguard.report.v1.json",
            generate: iacguard_app::report_schema_json,
        },
        SchemaSpec {
            filename: "iacguard.config.v1.json",
            generate: iacguard_app::config_schema_json,
        },
    ]
}

/// Generated schema text with trailing newline.
fn render_schema(spec: &SchemaSpec) -> anyhow::Result<String> {
    let mut json = (spec.generate)().with_context(|| format!("generate {}", spec.filename))?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = render_schema(&spec)?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that emitted schemas match what would be generated.
///
/// Schemas are build output: with no schema directory there is nothing to drift.
fn validate_schemas(dir: &Path) -> anyhow::Result<()> {
    if !dir.is_dir() {
        println!(
            "No schemas at {}; nothing to validate. Run `cargo xtask emit-schemas` to create them.",
            dir.display()
        );
        return Ok(());
    }

    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = render_schema(&spec)?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Every built-in check id must have a complete explanation.
fn explain_coverage() -> anyhow::Result<()> {
    let check_ids = iacguard_types::explain::all_check_ids();
    let mut errors = Vec::new();

    for check_id in check_ids {
        match iacguard_types::lookup_explanation(check_id) {
            Some(exp) => {
                for (field, text) in [
                    ("title", exp.title),
                    ("description", exp.description),
                    ("remediation", exp.remediation),
                    ("before example", exp.examples.before),
                    ("after example", exp.examples.after),
                ] {
                    if text.trim().is_empty() {
                        errors.push(format!("Check ID '{}' has empty {}", check_id, field));
                    }
                }
            }
            None => errors.push(format!("Check ID '{}' has no explanation", check_id)),
        }
    }

    if errors.is_empty() {
        println!("{} check IDs have explanations", check_ids.len());
        return Ok(());
    }
    for error in &errors {
        eprintln!("  - {}", error);
    }
    bail!(
        "Explain coverage validation failed with {} errors",
        errors.len()
    )
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help                    Show this message");
    eprintln!("  emit-schemas [dir]      Generate JSON schemas from Rust types (default: schemas/)");
    eprintln!("  validate-schemas [dir]  Check emitted schemas match generated output (for CI)");
    eprintln!("  print-schema-ids        Print known schema IDs");
    eprintln!("  explain-coverage        Validate all check IDs have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");
    let dir_arg = args.get(2).map(|s| s.as_str());

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => schemas_dir(dir_arg).and_then(|dir| emit_schemas(&dir)),
        "validate-schemas" => schemas_dir(dir_arg).and_then(|dir| validate_schemas(&dir)),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
