//! contact - send the site contact form from the terminal
//!
//! CLI binary around the contact-relay submission pipeline.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use contact_relay::config::{ConfigOverrides, EncodingMode, load_config};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "contact")]
#[command(about = "Send a message through the site's contact relay")]
#[command(version)]
struct Cli {
    /// Config file (defaults to <config dir>/contact-relay/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Relay endpoint URL
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Default)]
struct FieldFlags {
    /// Your name
    #[arg(long)]
    name: Option<String>,

    /// Your email address
    #[arg(long)]
    email: Option<String>,

    /// Message text
    #[arg(long)]
    message: Option<String>,

    /// File to attach (max 5MB)
    #[arg(long)]
    file: Option<PathBuf>,
}

impl From<FieldFlags> for cli::FieldArgs {
    fn from(flags: FieldFlags) -> Self {
        Self {
            name: flags.name,
            email: flags.email,
            message: flags.message,
            file: flags.file,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// multipart/form-data with the raw file
    Multipart,
    /// JSON with the file base64-encoded
    InlineBase64,
}

impl From<ModeArg> for EncodingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Multipart => Self::Multipart,
            ModeArg::InlineBase64 => Self::InlineBase64,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Submit the contact form
    Send {
        #[command(flatten)]
        fields: FieldFlags,

        /// How to encode an attachment
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Validate and show the payload without sending
        #[arg(long)]
        dry_run: bool,

        /// Never prompt for missing fields
        #[arg(long)]
        no_input: bool,
    },

    /// Validate fields without sending
    Check {
        #[command(flatten)]
        fields: FieldFlags,
    },

    /// Show the resolved configuration
    Config,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut overrides = ConfigOverrides {
        endpoint: cli.endpoint,
        encoding: None,
        config_file: cli.config,
    };

    let ok = match cli.command {
        Commands::Send {
            fields,
            mode,
            dry_run,
            no_input,
        } => {
            overrides.encoding = mode.map(EncodingMode::from);
            let loaded = load_config(&overrides)?;
            let args = cli::SendArgs {
                fields: fields.into(),
                dry_run,
                interactive: !no_input && std::io::stdin().is_terminal(),
            };
            cli::run_send(loaded.config, args).await?
        }
        Commands::Check { fields } => {
            let loaded = load_config(&overrides)?;
            cli::run_check(&loaded.config, fields.into()).await?
        }
        Commands::Config => {
            let loaded = load_config(&overrides)?;
            cli::run_config(&loaded);
            true
        }
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
