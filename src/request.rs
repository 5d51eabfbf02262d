//! Loading/error/data tracking for a single kind of backend call.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::logger;
use crate::models::{Level, ProcessingResponse};
use std::future::Future;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq)]
pub struct RequestState<T> {
    pub loading: bool,
    pub error: Option<String>,
    pub data: Option<T>,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            data: None,
        }
    }
}

/// Shared handle over a [`RequestState`]. Clones observe the same state, so a
/// view can read it while a background task runs [`execute`](Self::execute).
///
/// Overlapping executions are not serialised: whichever settles last wins.
/// Views keep their triggers disabled while `loading` is set.
pub struct RequestHook<T> {
    state: Arc<Mutex<RequestState<T>>>,
}

impl<T> Clone for RequestHook<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Default for RequestHook<T> {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(RequestState::default())),
        }
    }
}

impl<T: Clone> RequestHook<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RequestState<T>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Runs `operation`, tracking it in the shared state. The outcome is both
    /// recorded and returned, so callers can branch on it directly.
    pub async fn execute<F>(&self, operation: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        {
            let mut state = self.lock();
            state.loading = true;
            state.error = None;
        }

        let outcome = operation.await;

        let mut state = self.lock();
        state.loading = false;
        match outcome {
            Ok(value) => {
                state.error = None;
                state.data = Some(value.clone());
                Ok(value)
            }
            Err(e) => {
                logger::log(&format!("Request failed: {}", e));
                state.error = Some(e.to_string());
                state.data = None;
                Err(e)
            }
        }
    }

    /// Clears loading, error and data unconditionally.
    pub fn reset(&self) {
        *self.lock() = RequestState::default();
    }

    pub fn snapshot(&self) -> RequestState<T> {
        self.lock().clone()
    }

    pub fn loading(&self) -> bool {
        self.lock().loading
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }
}

impl RequestHook<ProcessingResponse> {
    pub async fn process_text(
        &self,
        client: &ApiClient,
        text: &str,
        level: Level,
    ) -> Result<ProcessingResponse, ApiError> {
        self.execute(client.process_text(text, level)).await
    }

    pub async fn process_file(
        &self,
        client: &ApiClient,
        path: &Path,
        level: Level,
    ) -> Result<ProcessingResponse, ApiError> {
        self.execute(client.process_file(path, level)).await
    }

    pub async fn demo_content(&self, client: &ApiClient) -> Result<ProcessingResponse, ApiError> {
        self.execute(client.demo_content()).await
    }
}
