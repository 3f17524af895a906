//! In-memory IAM service
//!
//! [`RecordingIamService`] answers every request through a responder closure
//! and keeps a log of what it was asked, so tests can assert on the exact
//! requests a command produced.

use iamctl_core::{ClientFactory, ConnectionSettings, IamRequest, IamResponse, IamService, ServiceError};
use std::sync::{Arc, Mutex};

type Responder = dyn Fn(&IamRequest) -> Result<IamResponse, ServiceError> + Send + Sync;

struct Inner {
    responder: Box<Responder>,
    requests: Mutex<Vec<IamRequest>>,
    clients: Mutex<Vec<ConnectionSettings>>,
}

/// Fake IAM client. Clones share the same request log.
#[derive(Clone)]
pub struct RecordingIamService {
    inner: Arc<Inner>,
}

impl RecordingIamService {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&IamRequest) -> Result<IamResponse, ServiceError> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                responder: Box::new(responder),
                requests: Mutex::new(Vec::new()),
                clients: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Answer every request with a copy of `response`
    pub fn answering(response: impl Into<IamResponse>) -> Self {
        let response = response.into();
        Self::new(move |_| Ok(response.clone()))
    }

    /// Fail every request with a copy of `error`
    pub fn failing(error: ServiceError) -> Self {
        Self::new(move |_| Err(error.clone()))
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<IamRequest> {
        lock(&self.inner.requests).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.inner.requests).len()
    }

    /// Settings of every client handed out by [`RecordingFactory`]
    pub fn created_clients(&self) -> Vec<ConnectionSettings> {
        lock(&self.inner.clients).clone()
    }

    /// A client factory that always hands out this service
    pub fn factory(&self) -> RecordingFactory {
        RecordingFactory {
            service: self.clone(),
        }
    }
}

impl IamService for RecordingIamService {
    async fn invoke(&self, request: IamRequest) -> Result<IamResponse, ServiceError> {
        let result = (self.inner.responder)(&request);
        lock(&self.inner.requests).push(request);
        result
    }
}

/// Hands out clones of one [`RecordingIamService`]
pub struct RecordingFactory {
    service: RecordingIamService,
}

impl ClientFactory for RecordingFactory {
    type Client = RecordingIamService;

    async fn create_client(
        &self,
        settings: &ConnectionSettings,
    ) -> Result<RecordingIamService, ServiceError> {
        lock(&self.service.inner.clients).push(settings.clone());
        Ok(self.service.clone())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use iamctl_core::request::DeleteUserRequest;
    use iamctl_core::response::DeleteUserResponse;

    #[tokio::test]
    async fn records_requests_in_order() {
        let service = RecordingIamService::answering(DeleteUserResponse {});
        for name in ["alice", "bob"] {
            service
                .invoke(
                    DeleteUserRequest {
                        user_name: name.to_string(),
                    }
                    .into(),
                )
                .await
                .unwrap();
        }

        let names: Vec<_> = service
            .requests()
            .into_iter()
            .map(|r| match r {
                IamRequest::DeleteUser(r) => r.user_name,
                other => panic!("unexpected request {other:?}"),
            })
            .collect();
        assert_eq!(names, ["alice", "bob"]);
    }

    #[tokio::test]
    async fn factory_shares_the_log() {
        let service = RecordingIamService::answering(DeleteUserResponse {});
        let client = service
            .factory()
            .create_client(&ConnectionSettings::default())
            .await
            .unwrap();
        client
            .invoke(
                DeleteUserRequest {
                    user_name: "carol".to_string(),
                }
                .into(),
            )
            .await
            .unwrap();

        assert_eq!(service.call_count(), 1);
        assert_eq!(service.created_clients(), vec![ConnectionSettings::default()]);
    }
}
