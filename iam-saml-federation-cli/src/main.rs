//! IAM SAML Federation CLI
//!
//! This is the main entry point for the iam-saml-federation command-line tool.
//! It converges one IAM SAML identity provider to the requested state and
//! prints the outcome as JSON on stdout.
//!
//! # Exit Codes
//!
//! - `ExitCode::Success` (0): Provider is in the requested state (changed or not)
//! - `ExitCode::InvalidInput` (1): Arguments or desired state rejected before any AWS call,
//!   including argument syntax errors reported by clap
//! - `ExitCode::Failure` (2): An AWS call failed
//!
//! See `types::ExitCode` for the enum definition.

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use iam_saml_federation_core::{
    AwsIdentityProviderClient, ConnectionConfig, DesiredSpec, ProviderReconciler,
    ReconcileResult, ReconcilerOptions, StaticCredentials,
};
use log::{debug, error, info};

mod output;
mod types;

use types::{ExitCode, StateArg};

#[derive(Parser, Debug)]
#[command(
    name = "iam-saml-federation",
    author,
    version,
    about = "Create, update or delete an AWS IAM SAML identity provider",
    long_about = "Maintains an IAM SAML identity federation provider. With --state present \
(the default) the provider is created if missing, or its metadata document replaced when it \
differs from the given one (surrounding whitespace is ignored). With --state absent the provider \
is deleted if it exists. Use --check to report what would change without changing anything.\n\n\
iam-saml-federation --name example1 --saml-metadata-file /path/to/idp/metadata.xml\n  \
iam-saml-federation --name example1 --saml-metadata-document '<md:EntityDescriptor ...>' --check\n  \
iam-saml-federation --name example3 --state absent"
)]
struct Cli {
    /// Name of the SAML provider
    #[arg(short = 'n', long = "name")]
    name: String,

    /// SAML 2.0 metadata document generated by the identity provider
    #[arg(
        long = "saml-metadata-document",
        value_name = "XML",
        conflicts_with = "saml_metadata_file",
        long_help = "The XML document generated by an identity provider (IdP) that supports \
SAML 2.0. Required when --state is present."
    )]
    saml_metadata_document: Option<String>,

    /// Read the SAML metadata document from a file
    #[arg(long = "saml-metadata-file", value_name = "PATH")]
    saml_metadata_file: Option<PathBuf>,

    /// Whether the provider should exist
    #[arg(short = 's', long = "state", value_enum, default_value_t = StateArg::Present)]
    state: StateArg,

    /// Report what would change without calling any mutating AWS API
    #[arg(long = "check")]
    check: bool,

    /// AWS region used to sign requests (IAM is global; defaults to us-east-1)
    #[arg(short = 'r', long = "region")]
    region: Option<String>,

    /// Named profile from the shared AWS config files
    #[arg(long = "profile")]
    profile: Option<String>,

    /// Override the IAM endpoint URL
    #[arg(long = "endpoint-url", value_name = "URL")]
    endpoint_url: Option<String>,

    /// AWS access key ID, instead of the default credential chain
    #[arg(long = "access-key", requires = "secret_key")]
    access_key: Option<String>,

    /// AWS secret access key
    #[arg(long = "secret-key", requires = "access_key")]
    secret_key: Option<String>,

    /// AWS session token for temporary credentials
    #[arg(long = "session-token", requires = "access_key")]
    session_token: Option<String>,

    /// Format JSON output with indentation for readability
    #[arg(short = 'p', long = "pretty")]
    pretty: bool,

    /// Enable debug logging output to stderr
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

impl Cli {
    /// Build the desired state, reading the metadata file if one was given
    fn desired_spec(&self) -> Result<DesiredSpec> {
        let metadata_document = match &self.saml_metadata_file {
            Some(path) => Some(fs::read_to_string(path).with_context(|| {
                format!("Failed to read SAML metadata file: {}", path.display())
            })?),
            None => self.saml_metadata_document.clone(),
        };

        Ok(DesiredSpec {
            name: self.name.clone(),
            metadata_document,
            desired_state: self.state.into(),
        })
    }

    fn connection_config(&self) -> Result<ConnectionConfig> {
        let credentials = match (&self.access_key, &self.secret_key) {
            (Some(access_key), Some(secret_key)) => Some(
                StaticCredentials::new(
                    access_key.clone(),
                    secret_key.clone(),
                    self.session_token.clone(),
                )
                .context("Invalid static credentials")?,
            ),
            _ => None,
        };

        Ok(ConnectionConfig {
            region: self.region.clone(),
            profile: self.profile.clone(),
            endpoint_url: self.endpoint_url.clone(),
            credentials,
        })
    }
}

/// Initialize logging based on configuration
fn init_logging(debug: bool) -> Result<()> {
    let log_level = if debug {
        log::LevelFilter::Trace
    } else {
        // Default: only ERROR messages
        log::LevelFilter::Error
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_target(false)
        .format_timestamp_secs()
        .try_init()
        .context("Failed to initialize logger")?;

    Ok(())
}

fn prepare_inputs(cli: &Cli) -> Result<(DesiredSpec, ConnectionConfig)> {
    let spec = cli.desired_spec()?;
    let connection = cli.connection_config()?;
    Ok((spec, connection))
}

/// Run the reconciliation and print its result
async fn handle_reconcile(
    spec: &DesiredSpec,
    connection: &ConnectionConfig,
    check_mode: bool,
    pretty: bool,
) -> Result<ExitCode> {
    info!(
        "Reconciling SAML provider {} to state {}",
        spec.name, spec.desired_state
    );

    let client = AwsIdentityProviderClient::from_config(connection).await;
    let reconciler = ProviderReconciler::new(client, ReconcilerOptions { check_mode });

    let (result, code) = match reconciler.reconcile(spec).await {
        Ok(result) => {
            debug!("Reconciliation finished, changed: {}", result.changed);
            (result, ExitCode::Success)
        }
        Err(e) => {
            error!("Reconciliation of {} failed: {e}", spec.name);
            let code = if e.is_invalid_input() {
                ExitCode::InvalidInput
            } else {
                ExitCode::Failure
            };
            (ReconcileResult::failed(&e), code)
        }
    };

    output::output_result(&result, pretty).context("Failed to output result")?;
    Ok(code)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(ExitCode::InvalidInput.into());
        }
    };

    if let Err(e) = init_logging(cli.debug) {
        eprintln!("iam-saml-federation: Failed to initialize logging: {e}");
        process::exit(ExitCode::Failure.into());
    }

    let (spec, connection) = match prepare_inputs(&cli) {
        Ok(inputs) => inputs,
        Err(e) => {
            print_cli_command_error(e);
            process::exit(ExitCode::InvalidInput.into());
        }
    };

    // Reject bad input before any AWS client exists
    if let Err(e) = spec.validate() {
        let code = match output::output_result(&ReconcileResult::failed(&e), cli.pretty) {
            Ok(()) => ExitCode::InvalidInput,
            Err(output_error) => {
                print_cli_command_error(output_error);
                ExitCode::Failure
            }
        };
        process::exit(code.into());
    }

    let code = match handle_reconcile(&spec, &connection, cli.check, cli.pretty).await {
        Ok(code) => code,
        Err(e) => {
            print_cli_command_error(e);
            ExitCode::Failure
        }
    };

    process::exit(code.into());
}

fn print_cli_command_error(e: anyhow::Error) {
    eprintln!("Error: {e}");
    let mut source = e.source();
    while let Some(err) = source {
        eprintln!("  Caused by: {err}");
        source = err.source();
    }
}
