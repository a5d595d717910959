use anyhow::{bail, Result};
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

pub const DEFAULT_FILENAME: &str = "aws.config";

/// Region prefixes accepted for `--sso-region`.
const REGION_PREFIXES: &[&str] = &["us-", "eu-", "ap-", "sa-", "ca-", "me-", "af-"];

/// Setlist
///
/// Generates an AWS CLI config file with one SSO profile for every account
/// and permission set combination in an AWS Organization.
#[derive(Parser, Debug)]
#[command(name = "setlist")]
#[command(version)]
#[command(about, long_about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options for `generate`, which also runs when no subcommand is given
    #[command(flatten)]
    pub generate: GenerateArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Nickname to give the SSO Session (e.g. org name)
    #[arg(short = 's', long = "sso-session", env = "SETLIST_SSO_SESSION", global = true)]
    pub sso_session: Option<String>,

    /// AWS region where AWS SSO resides
    #[arg(short = 'r', long = "sso-region", env = "SETLIST_SSO_REGION", global = true)]
    pub sso_region: Option<String>,

    /// Named AWS profile used to call Organizations and SSO Admin
    #[arg(short = 'p', long = "profile", env = "SETLIST_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Enable verbose logging output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate the AWS CLI config file (default)
    Generate(GenerateArgs),

    /// List all available AWS accounts
    Accounts(AccountFilterArgs),

    /// List all available permission sets in the SSO instance
    PermissionSets,

    /// Print the AWS permissions this tool requires
    Permissions,
}

#[derive(Args, Debug, Clone, Default)]
pub struct AccountFilterArgs {
    /// Comma-delimited list of account IDs to include (mutually exclusive with --exclude-accounts)
    #[arg(long = "include-accounts", env = "SETLIST_INCLUDE_ACCOUNTS", default_value = "")]
    pub include_accounts: String,

    /// Comma-delimited list of account IDs to exclude (mutually exclusive with --include-accounts)
    #[arg(long = "exclude-accounts", env = "SETLIST_EXCLUDE_ACCOUNTS", default_value = "")]
    pub exclude_accounts: String,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Comma-delimited Account Nickname Mapping (id=nickname)
    #[arg(short = 'm', long = "mapping", env = "SETLIST_MAPPING", default_value = "")]
    pub mapping: String,

    /// Where the AWS config file will be written
    #[arg(short = 'o', long = "output", env = "SETLIST_OUTPUT", default_value = DEFAULT_FILENAME)]
    pub output: PathBuf,

    /// Write the config file to stdout instead of a file
    #[arg(long = "stdout")]
    pub stdout: bool,

    /// Use this instead of the identity store ID for the start URL
    #[arg(long = "sso-friendly-name", env = "SETLIST_SSO_FRIENDLY_NAME", default_value = "")]
    pub sso_friendly_name: String,

    #[command(flatten)]
    pub accounts: AccountFilterArgs,

    /// Comma-delimited list of permission set names to include (mutually exclusive with --exclude-permission-sets)
    #[arg(
        long = "include-permission-sets",
        env = "SETLIST_INCLUDE_PERMISSION_SETS",
        default_value = ""
    )]
    pub include_permission_sets: String,

    /// Comma-delimited list of permission set names to exclude (mutually exclusive with --include-permission-sets)
    #[arg(
        long = "exclude-permission-sets",
        env = "SETLIST_EXCLUDE_PERMISSION_SETS",
        default_value = ""
    )]
    pub exclude_permission_sets: String,
}

impl Cli {
    /// Parse `args`, rejecting generate options typed before a subcommand.
    ///
    /// Those options belong to the implicit `generate` and would otherwise be
    /// dropped without notice once a subcommand is named.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut command = Self::command();
        let matches = command.try_get_matches_from_mut(args)?;

        if let Some((subcommand, _)) = matches.subcommand() {
            let generate_options = GenerateArgs::augment_args(clap::Command::new("generate"));
            let misplaced = generate_options.get_arguments().find(|arg| {
                matches.value_source(arg.get_id().as_str()) == Some(ValueSource::CommandLine)
            });
            if let Some(arg) = misplaced {
                return Err(command.error(
                    ErrorKind::ArgumentConflict,
                    format!(
                        "--{} must be given after the `{}` subcommand",
                        arg.get_long().unwrap_or_default(),
                        subcommand
                    ),
                ));
            }
        }

        Self::from_arg_matches(&matches).map_err(|e| e.format(&mut command))
    }
}

impl GlobalArgs {
    pub fn require_sso_session(&self) -> Result<&str> {
        match self.sso_session.as_deref() {
            Some(session) if !session.trim().is_empty() => Ok(session),
            _ => bail!("--sso-session is required"),
        }
    }

    pub fn require_sso_region(&self) -> Result<&str> {
        let Some(region) = self.sso_region.as_deref().filter(|r| !r.trim().is_empty()) else {
            bail!("--sso-region is required");
        };
        validate_region(region)?;
        Ok(region)
    }
}

/// Coarse shape check so an obvious typo fails before any AWS call.
pub fn validate_region(region: &str) -> Result<()> {
    if !REGION_PREFIXES.iter().any(|prefix| region.starts_with(prefix)) {
        bail!("invalid AWS region format: {}", region);
    }
    Ok(())
}
