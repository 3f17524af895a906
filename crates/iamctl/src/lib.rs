//! iamctl: command-line access to AWS IAM
//!
//! Every subcommand wraps exactly one IAM API operation. Parameters are
//! bound into a request, mutating operations are confirmed, the request is
//! sent through a cached client and the selected part of the response is
//! rendered as a table, JSON or plain text.

pub mod aws;
pub mod cli;
pub mod commands;
pub mod config;
pub mod output;
pub mod session;
