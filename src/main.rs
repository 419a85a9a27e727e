//! tucarga - command line entry point

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info, warn};
use tucarga::config::TucargaConfig;
use tucarga::directory::{DirectoryClient, HttpDirectoryClient};
use tucarga::error::QuoteError;
use tucarga::observability::init_default_logging;
use tucarga::quote::{
    compose, ContactStatus, HttpQuoteSubmitter, QuoteForm, QuoteSession, SubmissionOutcome,
};
use tucarga::rut;

/// Exit status for input that was understood but rejected
const EXIT_REJECTED: i32 = 2;

/// Freight quote client and Chilean RUT tools
#[derive(Parser)]
#[command(name = "tucarga")]
#[command(about = "Freight quote client and Chilean RUT tools")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean, format or validate a RUT
    Rut {
        #[command(subcommand)]
        command: RutCommand,
    },
    /// Load every quote form dropdown and print them as JSON
    Options,
    /// List the communes of a region
    Communes {
        /// Region id as returned by `options`
        region: String,
    },
    /// Check whether an e-mail belongs to a registered user
    CheckContact { email: String },
    /// Validate a quote form (JSON file) and submit it
    Submit {
        /// Path to the quote form JSON
        form: PathBuf,
        /// Print the composed request without sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
enum RutCommand {
    /// Strip separators, keeping digits and K
    Clean { value: String },
    /// Render as 12.345.678-9
    Format {
        value: String,
        /// Printed when nothing is left after cleaning
        #[arg(long, default_value = "")]
        fallback: String,
    },
    /// Check the modulo-11 check digit (exit status 2 when invalid)
    Validate { value: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_default_logging(cli.verbose);

    let status = match run(cli).await {
        Ok(status) => status,
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("error: {e}");
            1
        }
    };

    process::exit(status);
}

async fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let config_path = cli.config.as_deref();

    // RUT commands never touch the backend, so they skip configuration
    match cli.command {
        Commands::Rut { command } => Ok(run_rut_command(&command)),
        Commands::Options => handle_options(&load_configuration(config_path)?).await,
        Commands::Communes { region } => {
            handle_communes(&load_configuration(config_path)?, &region).await
        }
        Commands::CheckContact { email } => {
            handle_check_contact(&load_configuration(config_path)?, &email).await
        }
        Commands::Submit { form, dry_run } => {
            handle_submit(&load_configuration(config_path)?, &form, dry_run).await
        }
        Commands::Config { show } => handle_config_command(&load_configuration(config_path)?, show),
    }
}

fn run_rut_command(command: &RutCommand) -> i32 {
    match command {
        RutCommand::Clean { value } => {
            println!("{}", rut::clean(value));
            0
        }
        RutCommand::Format { value, fallback } => {
            println!("{}", rut::format(value, fallback));
            0
        }
        RutCommand::Validate { value } => {
            let valid = rut::clean_and_validate(value);
            println!("{}", if valid { "valid" } else { "invalid" });
            if valid {
                0
            } else {
                EXIT_REJECTED
            }
        }
    }
}

fn load_configuration(
    config_path: Option<&Path>,
) -> Result<TucargaConfig, Box<dyn std::error::Error>> {
    if let Some(path) = config_path {
        info!("Loading configuration from: {}", path.display());
        return Ok(TucargaConfig::load_from_file(path)?);
    }

    for path_str in ["tucarga.toml", "config/tucarga.toml"] {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading configuration from: {}", path.display());
            return Ok(TucargaConfig::load_from_file(&path)?);
        }
    }

    info!("No configuration file found, using defaults");
    Ok(TucargaConfig::from_env()?)
}

async fn handle_options(config: &TucargaConfig) -> Result<i32, Box<dyn std::error::Error>> {
    let directory = HttpDirectoryClient::new(&config.directory)?;
    let submitter = HttpQuoteSubmitter::new(&config.directory)?;
    let mut session = QuoteSession::new(directory, submitter, config.quote.clone());

    let summary = session.hydrate().await;
    for list in &summary.failed {
        warn!("Could not load {list} options");
    }

    println!("{}", serde_json::to_string_pretty(session.options())?);
    Ok(if summary.is_complete() { 0 } else { 1 })
}

async fn handle_communes(
    config: &TucargaConfig,
    region: &str,
) -> Result<i32, Box<dyn std::error::Error>> {
    let directory = HttpDirectoryClient::new(&config.directory)?;
    let communes = directory.communes(region).await?;
    println!("{}", serde_json::to_string_pretty(&communes)?);
    Ok(0)
}

async fn handle_check_contact(
    config: &TucargaConfig,
    email: &str,
) -> Result<i32, Box<dyn std::error::Error>> {
    let directory = HttpDirectoryClient::new(&config.directory)?;
    let registered = directory.user_exists(email.trim()).await?;
    let status = if registered {
        ContactStatus::Registered
    } else {
        ContactStatus::Unregistered
    };
    println!("{}", serde_json::to_string(&status)?);
    Ok(0)
}

async fn handle_submit(
    config: &TucargaConfig,
    form_path: &Path,
    dry_run: bool,
) -> Result<i32, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(form_path)?;
    let form: QuoteForm = serde_json::from_str(&content)
        .map_err(|e| QuoteError::invalid_form(format!("{}: {e}", form_path.display())))?;

    if dry_run {
        return match compose(&form, &config.quote.obj_type) {
            Ok(request) => {
                println!("{}", serde_json::to_string_pretty(&request)?);
                Ok(0)
            }
            Err(errors) => {
                report_form_errors(&errors);
                Ok(EXIT_REJECTED)
            }
        };
    }

    let directory = HttpDirectoryClient::new(&config.directory)?;
    let submitter = HttpQuoteSubmitter::new(&config.directory)?;
    let mut session = QuoteSession::new(directory, submitter, config.quote.clone());

    if let Some(email) = form.contact_email.as_deref() {
        session.check_contact_email(email).await;
        if session.needs_contact_registration() {
            eprintln!("note: {email} is not a registered user");
        }
    }

    match session.submit(&form).await? {
        SubmissionOutcome::Accepted { redirect } => {
            println!("{redirect}");
            Ok(0)
        }
        SubmissionOutcome::Invalid(errors) => {
            report_form_errors(&errors);
            Ok(EXIT_REJECTED)
        }
    }
}

fn report_form_errors(errors: &tucarga::quote::FormErrors) {
    for error in errors.iter() {
        eprintln!("{}: {}", error.field, error.problem);
    }
}

fn handle_config_command(
    config: &TucargaConfig,
    show: bool,
) -> Result<i32, Box<dyn std::error::Error>> {
    if show {
        println!("{}", toml::to_string_pretty(config)?);
    }

    info!("Configuration validation complete");
    Ok(0)
}
