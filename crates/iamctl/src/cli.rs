//! Top-level argument parser

use crate::commands::Command;
use crate::config::GlobalArgs;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "iamctl")]
#[command(about = "Manage AWS IAM users, groups, roles and access keys")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}
