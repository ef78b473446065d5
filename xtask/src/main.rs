//! Developer tasks (schema generation, conformance checks).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};
use stigaudit_test_util::normalize_nondeterministic;

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("Cannot determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .context("xtask has no parent")
    } else {
        Ok(manifest_dir)
    }
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

fn fixtures_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("tests").join("fixtures"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(stigaudit_types::AuditReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(stigaudit_settings::StigauditConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "stigaudit.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "stigaudit.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that committed schemas match what the types generate.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
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
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn compile_report_schema() -> anyhow::Result<jsonschema::Validator> {
    let schema = serde_json::to_value(generate_report_schema())
        .context("Failed to convert report schema to JSON")?;
    jsonschema::draft202012::new(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile schema: {e}"))
}

fn stigaudit_bin() -> anyhow::Result<PathBuf> {
    let bin = project_root()?.join("target").join("debug").join("stigaudit");

    #[cfg(target_os = "windows")]
    let bin = bin.with_extension("exe");

    if !bin.exists() {
        bail!(
            "stigaudit binary not found at {}.\n\
            Run `cargo build -p stigaudit-cli` first.",
            bin.display()
        );
    }
    Ok(bin)
}

/// Conformance: golden reports and live binary output against the report schema.
///
/// Every `tests/fixtures/expected/<name>.report.json` is validated, then the binary is run on
/// `tests/fixtures/configs/<name>.cfg` and its normalized report compared with the golden file.
fn conform() -> anyhow::Result<()> {
    let compiled = compile_report_schema()?;
    println!("✓ stigaudit.report.v1 schema compiles");

    let bin = stigaudit_bin()?;
    let fixtures = fixtures_dir()?;
    let expected_dir = fixtures.join("expected");
    let mut errors = Vec::new();
    let mut count = 0;

    for entry in fs::read_dir(&expected_dir).context("Failed to read tests/fixtures/expected/")? {
        let golden_path = entry?.path();
        let Some(name) = golden_path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(".report.json"))
            .map(str::to_string)
        else {
            continue;
        };

        let golden: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(&golden_path)
                .with_context(|| format!("Failed to read {}", golden_path.display()))?,
        )
        .with_context(|| format!("Failed to parse {} as JSON", golden_path.display()))?;

        let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
        let report_out = temp_dir.path().join("report.json");
        let config = fixtures.join("configs").join(format!("{name}.cfg"));

        let output = std::process::Command::new(&bin)
            .current_dir(temp_dir.path())
            .arg(&config)
            .arg("--rules-dir")
            .arg(fixtures.join("rules"))
            .arg("--report-out")
            .arg(&report_out)
            .output()
            .with_context(|| format!("Failed to run stigaudit on fixture '{name}'"))?;

        if output.status.code() == Some(255) {
            errors.push(format!(
                "fixture '{name}': stigaudit failed: {}",
                String::from_utf8_lossy(&output.stderr)
            ));
            continue;
        }

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report_out).with_context(|| {
                format!("fixture '{name}': no report output generated")
            })?)
            .with_context(|| format!("Failed to parse report for fixture '{name}'"))?;

        for err in compiled.iter_errors(&report) {
            errors.push(format!("fixture '{name}': schema validation: {err}"));
        }

        if normalize_nondeterministic(report) != golden {
            errors.push(format!(
                "fixture '{name}': output differs from {}",
                golden_path.display()
            ));
        } else {
            println!("  ✓ fixture '{name}' matches golden report");
        }
        count += 1;
    }

    if count == 0 {
        bail!("No golden reports found in {}", expected_dir.display());
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {err}");
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {count} fixtures pass conformance checks!");
    Ok(())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Run stigaudit on fixtures and compare with golden reports");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
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
