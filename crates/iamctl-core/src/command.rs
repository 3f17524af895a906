//! The command abstraction
//!
//! A command is a statically declared parameter struct. It knows which
//! operation it drives, how to turn its bound parameters into a request,
//! and which part of the response the caller gets to see.

use crate::operation::{IamRequest, IamResponse, Operation};
use serde::Serialize;
use std::fmt;

/// One IAM operation exposed as a command
pub trait IamCommand: Clone + fmt::Debug {
    /// Request value built from the bound parameters
    type Request: Into<IamRequest> + fmt::Debug;

    /// Typed response of [`Self::OPERATION`]
    type Response: TryFrom<IamResponse, Error = IamResponse> + Serialize + fmt::Debug;

    /// Item type written to the output stream
    type Output: Serialize + fmt::Debug;

    const OPERATION: Operation;

    /// Copy the supplied parameters into a request. Parameters that were not
    /// supplied stay absent.
    fn build_request(&self) -> Self::Request;

    /// Select the output items from a successful response. An empty vector
    /// means the command produces no output.
    fn project(&self, response: &Self::Response) -> Vec<Self::Output>;

    /// Resource the command acts on, shown in confirmation prompts
    fn target(&self) -> String {
        Self::OPERATION.as_str().to_string()
    }

    /// Continuation marker, for list commands whose result was truncated
    fn next_marker(_response: &Self::Response) -> Option<String> {
        None
    }

    /// Value of the parameter that accepts piped input, if this command has one
    fn pipeline_value(&self) -> Option<&str> {
        None
    }

    /// Bind one piped value to the pipeline parameter
    fn bind_pipeline_value(&mut self, _value: String) {}
}

/// Output of side-effecting commands: the identifier when pass-through was
/// requested, nothing otherwise.
pub fn pass_thru(enabled: bool, identifier: &str) -> Vec<String> {
    if enabled {
        vec![identifier.to_string()]
    } else {
        Vec::new()
    }
}

/// What the caller is asked to approve before a mutating call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    pub operation: Operation,
    pub target: String,
}

impl ConfirmationPrompt {
    pub fn for_command<C: IamCommand>(command: &C) -> Self {
        Self {
            operation: C::OPERATION,
            target: command.target(),
        }
    }
}

impl fmt::Display for ConfirmationPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Performing the operation \"{}\" on target \"{}\".",
            self.operation, self.target
        )
    }
}
