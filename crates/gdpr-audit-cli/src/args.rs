use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "gdpr-audit",
    version,
    about = "GDPR and cookie-compliance audit viewer"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level (RUST_LOG still takes precedence)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the latest scan for a domain from the scan API
    Scan {
        /// Domain or URL, e.g. https://www.elmundo.es
        domain: String,

        /// Scan API base URL [env: GDPR_AUDIT_API_BASE]
        #[arg(long)]
        api_base: Option<String>,

        /// Request timeout in seconds [env: GDPR_AUDIT_TIMEOUT_SECS]
        #[arg(long)]
        timeout_secs: Option<u64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the built-in demo audit
    Demo {
        /// Serve this payload file instead of the built-in demo
        #[arg(long)]
        fixture: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Audit a raw scanner results blob saved on disk
    Stored {
        /// Path to the results blob (may be wrapped in a ```json fence)
        path: PathBuf,

        /// Hostname the blob was scanned for
        #[arg(long)]
        hostname: String,

        /// Domain to look up; defaults to the hostname
        #[arg(long)]
        domain: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

impl Command {
    pub fn output(&self) -> &OutputArgs {
        match self {
            Command::Scan { output, .. }
            | Command::Demo { output, .. }
            | Command::Stored { output, .. } => output,
        }
    }
}

#[derive(Debug, Clone, ClapArgs)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, default_value = "json")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Also write a dated JSON export of the audit into this directory
    #[arg(long)]
    pub export_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// The normalized audit record
    Json,
    /// Every derived display metric, as JSON
    Summary,
    /// Human-readable report
    Text,
}
