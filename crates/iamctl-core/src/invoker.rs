//! Service invocation: the only boundary to the remote IAM service

use crate::context::ConnectionSettings;
use crate::error::ServiceError;
use crate::operation::{IamRequest, IamResponse};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// A client able to execute IAM requests.
///
/// Implemented by the AWS SDK adapter in the binary crate and by fakes in
/// tests.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait IamService: Send + Sync {
    /// Submit one request and wait for its response
    async fn invoke(&self, request: IamRequest) -> Result<IamResponse, ServiceError>;
}

/// Creates service clients for a set of connection settings
#[allow(async_fn_in_trait)]
pub trait ClientFactory {
    type Client: IamService;

    async fn create_client(
        &self,
        settings: &ConnectionSettings,
    ) -> Result<Self::Client, ServiceError>;
}

/// Submits requests through lazily created, cached clients.
///
/// One client is created per distinct [`ConnectionSettings`] and reused by
/// every later invocation with the same settings.
pub struct ServiceInvoker<F: ClientFactory> {
    factory: F,
    clients: Mutex<HashMap<ConnectionSettings, Arc<F::Client>>>,
}

impl<F: ClientFactory> ServiceInvoker<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Get the cached client for `settings`, creating it on first use
    pub async fn client(&self, settings: &ConnectionSettings) -> Result<Arc<F::Client>, ServiceError> {
        let mut clients = self.clients.lock().await;
        if let Some(client) = clients.get(settings) {
            return Ok(Arc::clone(client));
        }

        info!(
            region = %settings.region_label(),
            profile = ?settings.profile,
            endpoint_url = ?settings.endpoint_url,
            "Creating IAM client"
        );
        let client = Arc::new(self.factory.create_client(settings).await?);
        clients.insert(settings.clone(), Arc::clone(&client));
        Ok(client)
    }

    /// Submit `request` and return the raw response.
    ///
    /// Name resolution failures are restated with the targeted region; every
    /// other error is returned as the client reported it.
    pub async fn invoke(
        &self,
        settings: &ConnectionSettings,
        request: IamRequest,
    ) -> Result<IamResponse, ServiceError> {
        let operation = request.operation();
        let client = self.client(settings).await?;

        debug!(operation = %operation, "Invoking IAM operation");
        let response = client.invoke(request).await.map_err(|e| {
            if e.is_name_resolution_failure() {
                warn!(operation = %operation, region = %settings.region_label(), "IAM endpoint name resolution failed");
            }
            e.rewrap_name_resolution(settings.region_label())
        })?;

        if response.operation() != operation {
            return Err(ServiceError::MalformedResponse {
                operation,
                detail: format!("received a {} response", response.operation()),
            });
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportKind;
    use crate::operation::Operation;
    use crate::request::{DeleteUserRequest, GetUserRequest};
    use crate::response::DeleteUserResponse;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Factory producing mocks that answer every call with `respond`
    struct MockFactory {
        created: AtomicUsize,
        respond: fn(IamRequest) -> Result<IamResponse, ServiceError>,
    }

    impl MockFactory {
        fn new(respond: fn(IamRequest) -> Result<IamResponse, ServiceError>) -> Self {
            Self {
                created: AtomicUsize::new(0),
                respond,
            }
        }
    }

    impl ClientFactory for MockFactory {
        type Client = MockIamService;

        async fn create_client(
            &self,
            _settings: &ConnectionSettings,
        ) -> Result<MockIamService, ServiceError> {
            self.created.fetch_add(1, Ordering::SeqCst);
            let mut mock = MockIamService::new();
            mock.expect_invoke().returning(self.respond);
            Ok(mock)
        }
    }

    fn delete_ok(_: IamRequest) -> Result<IamResponse, ServiceError> {
        Ok(DeleteUserResponse {}.into())
    }

    fn delete_request() -> IamRequest {
        DeleteUserRequest {
            user_name: "alice".to_string(),
        }
        .into()
    }

    fn settings(region: &str) -> ConnectionSettings {
        ConnectionSettings {
            region: Some(region.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn clients_are_cached_per_settings() {
        let invoker = ServiceInvoker::new(MockFactory::new(delete_ok));

        invoker.invoke(&settings("us-east-1"), delete_request()).await.unwrap();
        invoker.invoke(&settings("us-east-1"), delete_request()).await.unwrap();
        assert_eq!(invoker.factory.created.load(Ordering::SeqCst), 1);

        invoker.invoke(&settings("eu-west-1"), delete_request()).await.unwrap();
        assert_eq!(invoker.factory.created.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn name_resolution_failure_is_rewrapped() {
        let invoker = ServiceInvoker::new(MockFactory::new(|request| {
            Err(ServiceError::Transport {
                operation: request.operation(),
                kind: TransportKind::NameResolution,
                message: "dns error: failed to lookup address information".to_string(),
            })
        }));

        let err = invoker
            .invoke(&settings("mars-north-1"), delete_request())
            .await
            .unwrap_err();
        assert!(matches!(
            &err,
            ServiceError::NameResolution { region, operation: Operation::DeleteUser, .. }
                if region == "mars-north-1"
        ));
    }

    #[tokio::test]
    async fn other_errors_pass_through_unchanged() {
        let invoker = ServiceInvoker::new(MockFactory::new(|request| {
            Err(ServiceError::Transport {
                operation: request.operation(),
                kind: TransportKind::Other,
                message: "connection refused".to_string(),
            })
        }));

        let err = invoker
            .invoke(&settings("us-east-1"), delete_request())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Transport {
                operation: Operation::DeleteUser,
                kind: TransportKind::Other,
                message: "connection refused".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn mismatched_response_is_malformed() {
        let invoker = ServiceInvoker::new(MockFactory::new(delete_ok));

        let err = invoker
            .invoke(&settings("us-east-1"), GetUserRequest::default().into())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::MalformedResponse {
                operation: Operation::GetUser,
                ..
            }
        ));
    }
}
