use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use gdpr_audit_core::error::AuditError;
use gdpr_audit_core::record::model::AuditRecord;
use gdpr_audit_core::report::model::{AuditSummary, ToolInfo};
use gdpr_audit_core::report::{export, render};
use gdpr_audit_core::session::{AuditSession, AuditState};
use gdpr_audit_core::source::{DemoSource, HttpSource, PayloadSource, StoredBlobSource};

mod args;
mod config;

use args::{Args, Command, OutputArgs, OutputFormat};
use config::CliConfig;

/// Domain the built-in demo audit is shown for.
const DEMO_DOMAIN: &str = "https://www.example-demo.com/";

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = CliConfig::from_env()?;
    debug!(
        api_base = %config.api_base,
        timeout_secs = config.timeout_secs,
        "configuration loaded"
    );
    let (source, input) = build_source(&args.command, &config)?;

    let mut session = AuditSession::new();
    match session.run(source.as_ref(), &input) {
        AuditState::Complete(record) => emit(record, args.command.output()),
        AuditState::Failed(err) => fail(err),
        state => bail!("audit did not complete: {state:?}"),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_source(command: &Command, config: &CliConfig) -> Result<(Box<dyn PayloadSource>, String)> {
    match command {
        Command::Scan {
            domain,
            api_base,
            timeout_secs,
            ..
        } => {
            let http = config.http_source_config(api_base.clone(), *timeout_secs);
            let source: Box<dyn PayloadSource> = Box::new(HttpSource::new(http)?);
            Ok((source, domain.clone()))
        }
        Command::Demo { fixture, .. } => {
            let source: Box<dyn PayloadSource> = match fixture {
                Some(path) => Box::new(DemoSource::new(
                    std::fs::read_to_string(path)
                        .with_context(|| format!("failed to read fixture: {}", path.display()))?,
                )),
                None => Box::new(DemoSource::default()),
            };
            Ok((source, DEMO_DOMAIN.to_string()))
        }
        Command::Stored {
            path,
            hostname,
            domain,
            ..
        } => {
            let source: Box<dyn PayloadSource> =
                Box::new(StoredBlobSource::from_path(path, hostname)?);
            Ok((source, domain.clone().unwrap_or_else(|| hostname.clone())))
        }
    }
}

fn emit(record: &AuditRecord, output: &OutputArgs) -> Result<()> {
    let tool = ToolInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let rendered = match output.format {
        OutputFormat::Json => export::export_json(record)?,
        OutputFormat::Summary => {
            serde_json::to_string_pretty(&AuditSummary::from_record(record, tool))?
        }
        OutputFormat::Text => {
            render::render_text(record, &AuditSummary::from_record(record, tool))
        }
    };

    match &output.out {
        Some(path) => std::fs::write(path, &rendered)
            .with_context(|| format!("failed to write output: {}", path.display()))?,
        None => println!("{rendered}"),
    }

    if let Some(dir) = &output.export_dir {
        let today = chrono::Utc::now().date_naive();
        let path = export::write_export(record, dir, today)?;
        eprintln!("Exported to {}", path.display());
    }

    Ok(())
}

/// Exit 2 when no scan exists, 3 when the scan API is unreachable.
fn fail(err: &AuditError) -> Result<()> {
    let code = match err {
        AuditError::NotFound { .. } => 2,
        AuditError::Transport(_) => 3,
        other => bail!("{other}"),
    };

    eprintln!("Error: {err}");
    if let Some(hint) = err.remediation() {
        eprintln!("\n{hint}");
    }
    std::process::exit(code);
}
