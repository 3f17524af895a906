//! iamctl: AWS IAM from the command line

use anyhow::Result;
use clap::Parser;
use crossterm::style::Stylize;
use iamctl::aws::AwsClientFactory;
use iamctl::cli::Cli;
use iamctl::session::{Session, Streams};
use std::backtrace::BacktraceStatus;
use std::io::{BufReader, Write};
use tracing::debug;
use tracing_subscriber::EnvFilter;

async fn run() -> Result<bool> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.global.log_level().as_str())),
        )
        .init();

    debug!(operation = %cli.command.operation(), "Starting");
    let session = Session::from_args(&cli.global, AwsClientFactory);

    let mut pipeline = BufReader::new(std::io::stdin());
    let mut out = std::io::stdout().lock();
    let mut err = std::io::stderr();
    let mut streams = Streams {
        pipeline: &mut pipeline,
        out: &mut out,
        err: &mut err,
    };

    let summary = cli.command.run(&session, &mut streams).await?;
    Ok(summary.is_success())
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            let _ = report_failure(&mut std::io::stderr(), &e);
            std::process::exit(1);
        }
    }
}

/// Report a run that could not start or finish, with its chain of causes
fn report_failure(err: &mut dyn Write, e: &anyhow::Error) -> std::io::Result<()> {
    writeln!(err, "{} {e}", "iamctl:".red().bold())?;
    for cause in e.chain().skip(1) {
        writeln!(err, "    because: {cause}")?;
    }
    // Only present when RUST_BACKTRACE or RUST_LIB_BACKTRACE is set
    let backtrace = e.backtrace();
    if backtrace.status() == BacktraceStatus::Captured {
        writeln!(err, "\n{backtrace}")?;
    }
    Ok(())
}
