//! One command-line run: binding, confirmation, dispatch and rendering

use crate::config::{ConfirmMode, GlobalArgs};
use crate::output::{OutputFormat, Renderer};
use anyhow::{Context, Result};
use iamctl_core::{
    AlwaysConfirm, BindError, Binder, ClientFactory, Confirm, ConnectionSettings, Dispatcher,
    ErrorCategory, IamCommand, OutputEnvelope, ServiceError, ServiceInvoker, TerminalConfirm,
    WhatIf,
};
use std::io::{BufRead, BufReader, Write};
use tracing::debug;

/// Where a run reads piped values and writes its results
pub struct Streams<'a> {
    pub pipeline: &'a mut dyn BufRead,
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

/// Tally of invocation outcomes for one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub succeeded: usize,
    pub failed: usize,
    pub declined: usize,
}

impl Summary {
    /// Declined invocations do not count as failures
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

pub struct Session<F: ClientFactory> {
    binder: Binder,
    invoker: ServiceInvoker<F>,
    confirm: Box<dyn Confirm>,
    confirm_mode: ConfirmMode,
    renderer: Renderer,
    full_response: bool,
}

impl<F: ClientFactory> Session<F> {
    /// Session that confirms on the controlling terminal according to `confirm_mode`
    pub fn new(
        settings: ConnectionSettings,
        factory: F,
        confirm_mode: ConfirmMode,
        format: OutputFormat,
    ) -> Self {
        let confirm: Box<dyn Confirm> = match confirm_mode {
            ConfirmMode::Force => Box::new(AlwaysConfirm),
            ConfirmMode::WhatIf => Box::new(WhatIf::new(std::io::stderr())),
            ConfirmMode::Prompt => Box::new(TerminalConfirm::new(
                BufReader::new(std::io::stdin()),
                std::io::stderr(),
            )),
        };
        Self {
            binder: Binder::new(settings),
            invoker: ServiceInvoker::new(factory),
            confirm,
            confirm_mode,
            renderer: Renderer::new(format),
            full_response: false,
        }
    }

    pub fn from_args(args: &GlobalArgs, factory: F) -> Self {
        Self::new(
            args.connection_settings(),
            factory,
            args.confirm_mode(),
            args.output,
        )
        .with_full_response(args.full_response)
    }

    /// Replace the confirmation handler, keeping the confirmation mode
    pub fn with_confirm(mut self, confirm: impl Confirm + 'static) -> Self {
        self.confirm = Box::new(confirm);
        self
    }

    /// Render the complete response instead of the projected items
    pub fn with_full_response(mut self, full_response: bool) -> Self {
        self.full_response = full_response;
        self
    }

    pub fn confirm_mode(&self) -> ConfirmMode {
        self.confirm_mode
    }

    /// Reject commands that read values from stdin while confirmation
    /// would also prompt on it
    pub fn ensure_confirmable<C: IamCommand>(&self, command: &C) -> Result<(), BindError> {
        if Binder::reads_pipeline(command)
            && C::OPERATION.is_mutating()
            && self.confirm_mode == ConfirmMode::Prompt
        {
            return Err(BindError::ConfirmationUnavailable {
                operation: C::OPERATION,
            });
        }
        Ok(())
    }

    /// Run `command` once, or once per piped value.
    ///
    /// Invocation failures are reported on the error stream and counted;
    /// only binding and output errors end the run with `Err`.
    pub async fn execute<C: IamCommand>(
        &self,
        command: C,
        streams: &mut Streams<'_>,
    ) -> Result<Summary> {
        self.ensure_confirmable(&command)?;
        let contexts = self.binder.bind_all(command, &mut *streams.pipeline)?;
        let dispatcher = Dispatcher::new(&self.invoker, self.confirm.as_ref());

        let mut summary = Summary::default();
        for context in contexts {
            let Some(envelope) = dispatcher.dispatch(context).await.into_envelope() else {
                summary.declined += 1;
                continue;
            };
            match envelope {
                OutputEnvelope::Success { output, response } => {
                    if self.full_response {
                        self.renderer
                            .render(&mut *streams.out, std::slice::from_ref(&response))?;
                    } else {
                        self.renderer.render(&mut *streams.out, &output)?;
                    }
                    if let Some(marker) = C::next_marker(&response) {
                        writeln!(
                            streams.err,
                            "More results are available; pass --marker {marker} to continue."
                        )
                        .context("Failed to write to stderr")?;
                    }
                    summary.succeeded += 1;
                }
                OutputEnvelope::Failure { error } => {
                    report_error(&mut *streams.err, &error)
                        .context("Failed to write to stderr")?;
                    summary.failed += 1;
                }
            }
        }

        debug!(
            operation = %C::OPERATION,
            succeeded = summary.succeeded,
            failed = summary.failed,
            declined = summary.declined,
            "Command finished"
        );
        streams.out.flush().context("Failed to flush output")?;
        Ok(summary)
    }
}

/// Write one failed invocation to the error stream
fn report_error(err: &mut dyn Write, error: &ServiceError) -> std::io::Result<()> {
    writeln!(err, "Error: {error}")?;
    if let Some(code) = error.code() {
        writeln!(err, "  Code: {code}")?;
    }
    let category = error.category();
    if category != ErrorCategory::Other {
        writeln!(err, "  Category: {category}")?;
    }
    if let Some(suggestion) = error.suggestion() {
        writeln!(err, "  Suggestion: {suggestion}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use iamctl_core::Operation;

    #[test]
    fn declined_is_not_failure() {
        let summary = Summary {
            succeeded: 0,
            failed: 0,
            declined: 3,
        };
        assert!(summary.is_success());
        assert!(
            !Summary {
                failed: 1,
                ..summary
            }
            .is_success()
        );
    }

    #[test]
    fn error_report_includes_code_and_suggestion() {
        let mut buf = Vec::new();
        report_error(
            &mut buf,
            &ServiceError::Service {
                operation: Operation::GetUser,
                code: Some("NoSuchEntity".to_string()),
                message: "The user with name bob cannot be found.".to_string(),
            },
        )
        .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Error: GetUser failed: The user with name bob"));
        assert!(text.contains("  Code: NoSuchEntity\n"));
        assert!(text.contains("  Category: not found\n"));
    }

    #[test]
    fn error_report_names_connectivity_failures() {
        let mut buf = Vec::new();
        report_error(
            &mut buf,
            &ServiceError::NameResolution {
                operation: Operation::ListUsers,
                region: "eu-west-1".to_string(),
                message: "dns error".to_string(),
            },
        )
        .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("  Category: connectivity\n"));
        assert!(!text.contains("Code:"));
    }

    #[test]
    fn error_report_without_code_is_one_line() {
        let mut buf = Vec::new();
        report_error(
            &mut buf,
            &ServiceError::MalformedResponse {
                operation: Operation::ListRoles,
                detail: "missing Roles".to_string(),
            },
        )
        .unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
    }
}
