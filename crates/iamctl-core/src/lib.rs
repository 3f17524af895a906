//! SDK-independent core of iamctl
//!
//! Commands are plain parameter structs implementing [`IamCommand`]. The
//! [`Binder`] turns them into [`ExecutionContext`]s (one per piped value),
//! and the [`Dispatcher`] runs each context through confirmation, request
//! construction, invocation and projection, returning an [`Outcome`].
//!
//! The remote service is reached only through the [`IamService`] trait, so
//! everything here can be exercised against fakes.

pub mod binding;
pub mod command;
pub mod confirm;
pub mod context;
pub mod dispatcher;
pub mod envelope;
pub mod error;
pub mod invoker;
pub mod model;
pub mod operation;
pub mod request;
pub mod response;

pub use binding::{BindError, Binder, PIPELINE_MARKER};
pub use command::{ConfirmationPrompt, IamCommand, pass_thru};
pub use confirm::{AlwaysConfirm, Confirm, TerminalConfirm, WhatIf};
pub use context::{ConnectionSettings, DEFAULT_REGION, ExecutionContext, StaticCredentials};
pub use dispatcher::Dispatcher;
pub use envelope::{Outcome, OutputEnvelope};
pub use error::{ErrorCategory, ServiceError, TransportKind};
pub use invoker::{ClientFactory, IamService, ServiceInvoker};
pub use operation::{IamRequest, IamResponse, Operation};
pub use response::Paginated;
