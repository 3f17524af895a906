//! Per-invocation state machine
//!
//! `Bound -> (confirmed?) -> RequestBuilt -> Invoked -> {Succeeded | Failed}`
//!
//! Each invocation is one-shot: one confirmation at most, one remote call
//! at most, no retries.

use crate::command::{ConfirmationPrompt, IamCommand};
use crate::confirm::Confirm;
use crate::context::ExecutionContext;
use crate::envelope::{OutputEnvelope, Outcome};
use crate::error::ServiceError;
use crate::invoker::{ClientFactory, ServiceInvoker};
use tracing::{Instrument, debug, info, info_span};

/// Runs bound commands against a service invoker
pub struct Dispatcher<'a, F: ClientFactory> {
    invoker: &'a ServiceInvoker<F>,
    confirm: &'a dyn Confirm,
}

impl<'a, F: ClientFactory> Dispatcher<'a, F> {
    pub fn new(invoker: &'a ServiceInvoker<F>, confirm: &'a dyn Confirm) -> Self {
        Self { invoker, confirm }
    }

    /// Run one invocation to completion. Errors are returned inside the
    /// outcome, never as `Err`.
    pub async fn dispatch<C: IamCommand>(
        &self,
        context: ExecutionContext<C>,
    ) -> Outcome<C::Output, C::Response> {
        let span = info_span!(
            "invocation",
            id = %context.invocation_id(),
            operation = %C::OPERATION
        );
        self.run(context).instrument(span).await
    }

    async fn run<C: IamCommand>(&self, context: ExecutionContext<C>) -> Outcome<C::Output, C::Response> {
        let command = context.command();

        if C::OPERATION.is_mutating() {
            let prompt = ConfirmationPrompt::for_command(command);
            if !self.confirm.confirm(&prompt) {
                info!(resource = %prompt.target, "Operation declined");
                return Outcome::Declined;
            }
        }

        let request = command.build_request();
        debug!(request = ?request, "Request built");

        let raw = match self.invoker.invoke(context.settings(), request.into()).await {
            Ok(raw) => raw,
            Err(error) => {
                debug!(error = %error, "Invocation failed");
                return Outcome::Completed(OutputEnvelope::Failure { error });
            }
        };

        let response = match C::Response::try_from(raw) {
            Ok(response) => response,
            Err(other) => {
                return Outcome::Completed(OutputEnvelope::Failure {
                    error: ServiceError::MalformedResponse {
                        operation: C::OPERATION,
                        detail: format!("received a {} response", other.operation()),
                    },
                });
            }
        };

        let output = command.project(&response);
        debug!(items = output.len(), "Invocation succeeded");
        Outcome::Completed(OutputEnvelope::Success { output, response })
    }
}
