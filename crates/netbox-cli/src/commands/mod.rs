use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use netbox_config::{ConfigLoader, EnvironmentOverrides};

mod check;

/// NetBox provider — configuration check and client bootstrap
#[derive(Parser)]
#[command(name = "netbox", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to netbox.toml (or .json) provider config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, env = "NETBOX_LOG_FORMAT", value_enum, default_value = "pretty")]
    log_format: LogFormat,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the configuration and build the API client without contacting NetBox
    Check {
        /// Output diagnostics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configure the client and query the NetBox status endpoint
    Status {
        /// Output the raw status document as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the provider configuration schema as JSON
    Schema,
    /// Show version and build info
    Version,
    /// Generate shell completions for bash, zsh, or fish
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    pub async fn run(self) -> netbox_core::Result<()> {
        self.run_with_env(EnvironmentOverrides::from_process()).await
    }

    /// Run against an explicit `NETBOX_*` environment snapshot.
    pub async fn run_with_env(self, env: EnvironmentOverrides) -> netbox_core::Result<()> {
        // Resolve log level: --verbose > --quiet > --log-level > default
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            self.log_level.as_deref().unwrap_or("warn")
        };
        init_tracing(self.log_format, log_level);

        match self.command {
            Commands::Check { json } => {
                let loader = ConfigLoader::load(self.config.as_deref())?;
                check::cmd_check(loader.raw(), env, json)
            }
            Commands::Status { json } => {
                let loader = ConfigLoader::load(self.config.as_deref())?;
                check::cmd_status(loader.raw(), env, json).await
            }
            Commands::Schema => Self::cmd_schema(),
            Commands::Version => Self::cmd_version(),
            Commands::Completions { shell } => Self::cmd_completions(shell),
        }
    }

    fn cmd_schema() -> netbox_core::Result<()> {
        let schema = netbox_provider::NetboxProvider::new().schema();
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn cmd_version() -> netbox_core::Result<()> {
        println!("netbox provider v{}", env!("CARGO_PKG_VERSION"));
        println!("   Target: {}", std::env::consts::ARCH);
        println!("   OS: {}", std::env::consts::OS);
        #[cfg(debug_assertions)]
        println!("   Profile: debug");
        #[cfg(not(debug_assertions))]
        println!("   Profile: release");
        Ok(())
    }

    fn cmd_completions(shell: Shell) -> netbox_core::Result<()> {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "netbox", &mut std::io::stdout());
        Ok(())
    }
}

fn init_tracing(format: LogFormat, log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    // try_init: a subscriber may already be installed when run from tests
    let _ = match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .with_target(true)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init(),
    };
}
