//! Parameter binding: turning parsed parameters into execution contexts

use crate::command::IamCommand;
use crate::context::{ConnectionSettings, ExecutionContext};
use crate::operation::Operation;
use std::io::BufRead;
use thiserror::Error;
use tracing::debug;

/// Pipeline parameter value meaning "read one value per line from stdin"
pub const PIPELINE_MARKER: &str = "-";

/// Binding errors
#[derive(Debug, Error)]
pub enum BindError {
    /// Piped input could not be read
    #[error("Failed to read piped input for {operation}: {source}")]
    PipelineRead {
        operation: Operation,
        #[source]
        source: std::io::Error,
    },

    /// `-` was given but nothing was piped in
    #[error("No values were piped to {operation}")]
    EmptyPipeline { operation: Operation },

    /// Stdin is taken by piped values, so there is nowhere to ask for confirmation
    #[error(
        "{operation} reads its input from stdin and cannot also prompt for confirmation; \
         pass --force or --what-if"
    )]
    ConfirmationUnavailable { operation: Operation },
}

/// Creates execution contexts for one connection
#[derive(Debug, Clone)]
pub struct Binder {
    settings: ConnectionSettings,
}

impl Binder {
    pub fn new(settings: ConnectionSettings) -> Self {
        Self { settings }
    }

    /// Whether the command asked for its pipeline parameter to be read from stdin
    pub fn reads_pipeline<C: IamCommand>(command: &C) -> bool {
        command.pipeline_value() == Some(PIPELINE_MARKER)
    }

    /// Bind a single invocation
    pub fn bind<C: IamCommand>(&self, command: C) -> ExecutionContext<C> {
        ExecutionContext::new(self.settings.clone(), command)
    }

    /// Bind one invocation per piped value, or a single invocation when the
    /// command does not read from the pipeline.
    ///
    /// Blank lines are skipped and values are trimmed.
    pub fn bind_all<C: IamCommand, R: BufRead>(
        &self,
        command: C,
        pipeline: R,
    ) -> Result<Vec<ExecutionContext<C>>, BindError> {
        if !Self::reads_pipeline(&command) {
            return Ok(vec![self.bind(command)]);
        }

        let mut contexts = Vec::new();
        for line in pipeline.lines() {
            let line = line.map_err(|source| BindError::PipelineRead {
                operation: C::OPERATION,
                source,
            })?;
            let value = line.trim();
            if value.is_empty() {
                continue;
            }
            let mut bound = command.clone();
            bound.bind_pipeline_value(value.to_string());
            contexts.push(self.bind(bound));
        }

        if contexts.is_empty() {
            return Err(BindError::EmptyPipeline {
                operation: C::OPERATION,
            });
        }

        debug!(
            operation = %C::OPERATION,
            invocations = contexts.len(),
            "Bound piped input"
        );
        Ok(contexts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::DeleteUserRequest;
    use crate::response::DeleteUserResponse;
    use std::io::Cursor;

    #[derive(Debug, Clone)]
    struct RemoveUser {
        user_name: String,
    }

    impl IamCommand for RemoveUser {
        type Request = DeleteUserRequest;
        type Response = DeleteUserResponse;
        type Output = String;
        const OPERATION: Operation = Operation::DeleteUser;

        fn build_request(&self) -> DeleteUserRequest {
            DeleteUserRequest {
                user_name: self.user_name.clone(),
            }
        }

        fn project(&self, _response: &DeleteUserResponse) -> Vec<String> {
            Vec::new()
        }

        fn pipeline_value(&self) -> Option<&str> {
            Some(&self.user_name)
        }

        fn bind_pipeline_value(&mut self, value: String) {
            self.user_name = value;
        }
    }

    fn binder() -> Binder {
        Binder::new(ConnectionSettings {
            region: Some("us-west-2".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn named_value_binds_once() {
        let command = RemoveUser {
            user_name: "alice".to_string(),
        };
        let contexts = binder()
            .bind_all(command, Cursor::new("bob\ncarol\n"))
            .unwrap();
        assert_eq!(contexts.len(), 1);
        assert_eq!(contexts[0].command().user_name, "alice");
        assert_eq!(contexts[0].settings().region.as_deref(), Some("us-west-2"));
    }

    #[test]
    fn piped_values_bind_one_context_each() {
        let command = RemoveUser {
            user_name: PIPELINE_MARKER.to_string(),
        };
        let contexts = binder()
            .bind_all(command, Cursor::new("alice\n\n  bob  \ncarol"))
            .unwrap();
        let names: Vec<_> = contexts
            .iter()
            .map(|c| c.command().user_name.as_str())
            .collect();
        assert_eq!(names, ["alice", "bob", "carol"]);

        let ids: std::collections::HashSet<_> =
            contexts.iter().map(|c| c.invocation_id()).collect();
        assert_eq!(ids.len(), 3, "each invocation needs a fresh context");
    }

    #[test]
    fn empty_pipeline_is_an_error() {
        let command = RemoveUser {
            user_name: PIPELINE_MARKER.to_string(),
        };
        let err = binder().bind_all(command, Cursor::new("\n  \n")).unwrap_err();
        assert!(matches!(
            err,
            BindError::EmptyPipeline {
                operation: Operation::DeleteUser
            }
        ));
    }
}
