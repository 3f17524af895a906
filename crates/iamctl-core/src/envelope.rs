//! Uniform invocation results

use crate::error::ServiceError;

/// Result of one completed invocation: output or error, never both
#[derive(Debug)]
pub enum OutputEnvelope<O, R> {
    Success {
        /// Projected items for the output stream (may be empty)
        output: Vec<O>,
        /// The full typed response
        response: R,
    },
    Failure { error: ServiceError },
}

#[cfg(test)]
impl<O, R> OutputEnvelope<O, R> {
    pub fn output(&self) -> Option<&[O]> {
        match self {
            OutputEnvelope::Success { output, .. } => Some(output),
            OutputEnvelope::Failure { .. } => None,
        }
    }

    pub fn response(&self) -> Option<&R> {
        match self {
            OutputEnvelope::Success { response, .. } => Some(response),
            OutputEnvelope::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ServiceError> {
        match self {
            OutputEnvelope::Success { .. } => None,
            OutputEnvelope::Failure { error } => Some(error),
        }
    }
}

/// How an invocation ended
#[derive(Debug)]
pub enum Outcome<O, R> {
    /// Confirmation was refused; no request was issued
    Declined,
    Completed(OutputEnvelope<O, R>),
}

impl<O, R> Outcome<O, R> {
    /// The completed envelope, or `None` when confirmation was refused
    pub fn into_envelope(self) -> Option<OutputEnvelope<O, R>> {
        match self {
            Outcome::Declined => None,
            Outcome::Completed(envelope) => Some(envelope),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::Operation;

    #[test]
    fn accessors_match_variant() {
        let ok: OutputEnvelope<String, ()> = OutputEnvelope::Success {
            output: vec!["alice".to_string()],
            response: (),
        };
        assert_eq!(ok.output(), Some(&["alice".to_string()][..]));
        assert!(ok.error().is_none());

        let failed: OutputEnvelope<String, ()> = OutputEnvelope::Failure {
            error: ServiceError::Client {
                message: "no credentials".to_string(),
            },
        };
        assert!(failed.output().is_none());
        assert!(failed.response().is_none());
        assert_eq!(failed.error().and_then(|e| e.operation()), None::<Operation>);
    }

    #[test]
    fn declined_has_no_envelope() {
        let outcome: Outcome<String, ()> = Outcome::Declined;
        assert!(outcome.into_envelope().is_none());
    }
}
