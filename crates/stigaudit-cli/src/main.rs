//! CLI entry point for stigaudit.
//!
//! This module is intentionally thin: it handles argument parsing, logging setup, I/O, and exit
//! statuses. All business logic lives in the `stigaudit-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::sync::Mutex;
use stigaudit_app::{AuditInput, render_markdown, resolve_settings, run_audit, serialize_report};
use stigaudit_settings::{EffectiveSettings, Overrides};
use stigaudit_types::{AuditReport, ids};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "STIGAUDIT_LOG";
const DEFAULT_LOG_FILTER: &str = "stigaudit=info";

#[derive(Parser, Debug)]
#[command(
    name = "stigaudit",
    version,
    about = "Audit a network device configuration against STIG rule catalogs"
)]
struct Cli {
    /// Configuration text file to scan.
    config_file: Utf8PathBuf,

    /// STIG to audit against (repeatable). Defaults to the configuration's `!@#stig:` markers.
    #[arg(long)]
    stig: Vec<String>,

    /// Operating system type: ios, xr, nxos, asa. Defaults to the `!@#type:` marker.
    #[arg(long = "os_type", visible_alias = "os-type")]
    os_type: Option<String>,

    /// 0 for brief, 1 for details, 2 for delimited rows.
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=2))]
    verbosity: Option<u8>,

    /// Print failures only.
    #[arg(short = 'f', long = "failonly")]
    failonly: bool,

    /// Rule catalog root; rules are read from `<rules-dir>/<os_type>/`.
    #[arg(long)]
    rules_dir: Option<String>,

    /// Path to the stigaudit settings TOML. A missing file means defaults.
    #[arg(long, default_value = ids::DEFAULT_SETTINGS_FILE)]
    settings: Utf8PathBuf,

    /// Log file (appended to).
    #[arg(long)]
    log_file: Option<String>,

    /// How the fail count maps to the exit status. `saturate` caps it at 254; `wrap` takes it
    /// modulo 256, so 255 failures look like a fatal error (255) and 256 look like success.
    #[arg(long, value_parser = ["saturate", "wrap"])]
    exit_policy: Option<String>,

    /// Write the JSON audit report here.
    #[arg(long)]
    report_out: Option<Utf8PathBuf>,

    /// Write a Markdown summary here.
    #[arg(long)]
    markdown_out: Option<Utf8PathBuf>,

    /// Evaluate rules on a thread pool.
    #[arg(long)]
    parallel: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            rules_dir: self.rules_dir.clone(),
            os_type: self.os_type.clone(),
            stigs: self.stig.clone(),
            verbosity: self.verbosity,
            fail_only: self.failonly.then_some(true),
            exit_policy: self.exit_policy.clone(),
            log_file: self.log_file.clone(),
            parallel: self.parallel.then_some(true),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            eprintln!("stigaudit error: {err:#}");
            ids::EXIT_FATAL
        }
    };
    std::process::exit(i32::from(code));
}

fn run(cli: &Cli) -> anyhow::Result<u8> {
    let settings = match load_settings(cli) {
        Ok(settings) => {
            init_logging(Utf8Path::new(&settings.log_file))?;
            settings
        }
        Err(err) => {
            // Settings are unusable; log the failure where `--log-file` or the default points.
            let log_file = cli.log_file.as_deref().unwrap_or(ids::DEFAULT_LOG_FILE);
            init_logging(Utf8Path::new(log_file))?;
            return Err(err);
        }
    };

    let output = match run_audit(AuditInput {
        config_path: &cli.config_file,
        settings,
    }) {
        Ok(output) => output,
        Err(err) => {
            error!(error = %err, "audit aborted");
            eprintln!("stigaudit error: {err}");
            return Ok(err.exit_status());
        }
    };

    for line in &output.lines {
        println!("{line}");
    }

    if let Some(path) = &cli.report_out {
        write_report_file(path, &output.report).context("write report json")?;
    }
    if let Some(path) = &cli.markdown_out {
        write_text_file(path, &render_markdown(&output.report)).context("write markdown")?;
    }

    Ok(output.exit_status)
}

fn load_settings(cli: &Cli) -> anyhow::Result<EffectiveSettings> {
    let settings_text = read_optional(&cli.settings)?;
    resolve_settings(&settings_text, cli.overrides())
}

fn read_optional(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e).with_context(|| format!("read settings: {path}")),
    }
}

fn init_logging(path: &Utf8Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file: {path}"))?;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {e}"))
}

fn write_report_file(path: &Utf8Path, report: &AuditReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {path}"))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {path}"))?;
    Ok(())
}
