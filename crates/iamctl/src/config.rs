//! Global command-line options
//!
//! Connection settings, output selection and confirmation behaviour shared
//! by every command. Values may also come from the environment.

use crate::output::OutputFormat;
use clap::{ArgAction, Args};
use iamctl_core::{ConnectionSettings, StaticCredentials};
use tracing::Level;

/// How mutating operations are confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmMode {
    /// Ask on the terminal
    Prompt,
    /// Proceed without asking (`--force`)
    Force,
    /// Describe the action, do nothing (`--what-if`)
    WhatIf,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// AWS region used to reach the IAM endpoint
    #[arg(long, global = true, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Named profile from the shared AWS config files
    #[arg(long, global = true, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Custom IAM endpoint, e.g. a local emulator
    #[arg(long, global = true, env = "IAMCTL_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Access key ID (requires --secret-key)
    #[arg(long, global = true, requires = "secret_key")]
    pub access_key: Option<String>,

    /// Secret access key (requires --access-key)
    #[arg(long, global = true, requires = "access_key")]
    pub secret_key: Option<String>,

    /// Session token for temporary credentials
    #[arg(long, global = true, requires = "access_key")]
    pub session_token: Option<String>,

    /// Output format
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        env = "IAMCTL_OUTPUT"
    )]
    pub output: OutputFormat,

    /// Perform mutating operations without asking for confirmation
    #[arg(long, global = true, conflicts_with = "what_if")]
    pub force: bool,

    /// Show what mutating operations would do without performing them
    #[arg(long, global = true)]
    pub what_if: bool,

    /// Print the complete service response instead of the selected items
    #[arg(long, global = true)]
    pub full_response: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalArgs {
    pub fn connection_settings(&self) -> ConnectionSettings {
        let credentials = match (&self.access_key, &self.secret_key) {
            (Some(access_key_id), Some(secret_access_key)) => Some(StaticCredentials {
                access_key_id: access_key_id.clone(),
                secret_access_key: secret_access_key.clone(),
                session_token: self.session_token.clone(),
            }),
            _ => None,
        };

        ConnectionSettings {
            region: self.region.clone(),
            profile: self.profile.clone(),
            endpoint_url: self.endpoint_url.clone(),
            credentials,
        }
    }

    pub fn confirm_mode(&self) -> ConfirmMode {
        if self.what_if {
            ConfirmMode::WhatIf
        } else if self.force {
            ConfirmMode::Force
        } else {
            ConfirmMode::Prompt
        }
    }

    /// Default log level; `RUST_LOG` takes precedence
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        global: GlobalArgs,
    }

    fn parse(args: &[&str]) -> GlobalArgs {
        TestCli::try_parse_from(std::iter::once("iamctl").chain(args.iter().copied()))
            .unwrap()
            .global
    }

    #[test]
    fn explicit_credentials_become_static() {
        let global = parse(&[
            "--access-key",
            "AKIAEXAMPLE",
            "--secret-key",
            "secret",
            "--region",
            "eu-west-1",
        ]);
        let settings = global.connection_settings();
        assert_eq!(settings.region.as_deref(), Some("eu-west-1"));
        let credentials = settings.credentials.unwrap();
        assert_eq!(credentials.access_key_id, "AKIAEXAMPLE");
        assert_eq!(credentials.session_token, None);
    }

    #[test]
    fn access_key_requires_secret() {
        assert!(TestCli::try_parse_from(["iamctl", "--access-key", "AKIAEXAMPLE"]).is_err());
    }

    #[test]
    fn confirm_modes() {
        assert_eq!(parse(&[]).confirm_mode(), ConfirmMode::Prompt);
        assert_eq!(parse(&["--force"]).confirm_mode(), ConfirmMode::Force);
        assert_eq!(parse(&["--what-if"]).confirm_mode(), ConfirmMode::WhatIf);
        assert!(TestCli::try_parse_from(["iamctl", "--force", "--what-if"]).is_err());
    }

    #[test]
    fn verbosity_raises_log_level() {
        assert_eq!(parse(&[]).log_level(), Level::WARN);
        assert_eq!(parse(&["-vv"]).log_level(), Level::DEBUG);
        assert_eq!(parse(&["-vvvv"]).log_level(), Level::TRACE);
    }
}
