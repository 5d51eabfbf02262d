use crate::api::ApiClient;
use crate::logger;
use crate::models::{Level, ProcessingResponse, ProcessingResult};
use crate::persistence::{HistoryOutcome, PersistenceBridge, SaveOutcome};
use crate::request::RequestHook;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Which page asked for processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Input,
    Demo,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Text { text: String, level: Level },
    File { path: PathBuf, level: Level },
}

/// Completion of a background call, delivered to the UI loop in arrival order.
#[derive(Debug)]
pub enum AppEvent {
    Processed {
        origin: Origin,
        outcome: Result<ProcessingResponse, String>,
    },
    Saved(SaveOutcome),
    HistoryLoaded(HistoryOutcome),
    LoggedIn(Result<String, String>),
    SignedUp(Result<(), String>),
}

/// Runs backend calls on the tokio runtime and reports back over a channel.
/// The UI thread never blocks on the network.
#[derive(Clone)]
pub struct Worker {
    runtime: Handle,
    client: ApiClient,
    accounts: PersistenceBridge,
    events: Sender<AppEvent>,
}

fn emit(events: &Sender<AppEvent>, event: AppEvent) {
    if events.send(event).is_err() {
        logger::log("Event channel disconnected, dropping worker result");
    }
}

impl Worker {
    pub fn new(
        runtime: Handle,
        client: ApiClient,
        accounts: PersistenceBridge,
        events: Sender<AppEvent>,
    ) -> Self {
        Self {
            runtime,
            client,
            accounts,
            events,
        }
    }

    pub fn accounts(&self) -> &PersistenceBridge {
        &self.accounts
    }

    /// Pings the processing API once and logs whether it answered.
    pub fn check_health(&self) -> JoinHandle<bool> {
        let client = self.client.clone();
        self.runtime.spawn(async move {
            match client.health_check().await {
                Ok(_) => {
                    logger::log("Processing API is reachable");
                    true
                }
                Err(e) => {
                    logger::log(&format!("Processing API health check failed: {}", e));
                    false
                }
            }
        })
    }

    pub fn process(
        &self,
        origin: Origin,
        hook: RequestHook<ProcessingResponse>,
        submission: Submission,
    ) {
        logger::log(&format!("Worker received {:?} submission", origin));
        let client = self.client.clone();
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let outcome = match &submission {
                Submission::Text { text, level } => hook.process_text(&client, text, *level).await,
                Submission::File { path, level } => hook.process_file(&client, path, *level).await,
            };
            emit(
                &events,
                AppEvent::Processed {
                    origin,
                    outcome: outcome.map_err(|e| e.to_string()),
                },
            );
        });
    }

    pub fn save(&self, result: Arc<ProcessingResult>) {
        let accounts = self.accounts.clone();
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let outcome = accounts.save_result(&result).await;
            emit(&events, AppEvent::Saved(outcome));
        });
    }

    pub fn load_history(&self) {
        let accounts = self.accounts.clone();
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let outcome = accounts.load_history().await;
            emit(&events, AppEvent::HistoryLoaded(outcome));
        });
    }

    pub fn login(&self, email: String, password: String) {
        let accounts = self.accounts.clone();
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let outcome = accounts.login(&email, &password).await;
            emit(&events, AppEvent::LoggedIn(outcome));
        });
    }

    pub fn signup(&self, email: String, password: String) {
        let accounts = self.accounts.clone();
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let outcome = accounts.signup(&email, &password).await;
            emit(&events, AppEvent::SignedUp(outcome));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::DEFAULT_TIMEOUT;
    use crate::db::MemoryTokenStore;
    use serde_json::json;
    use std::sync::mpsc;
    use std::time::Duration;

    fn worker(
        runtime: &tokio::runtime::Runtime,
        transport: MockTransport,
    ) -> (Worker, mpsc::Receiver<AppEvent>) {
        let transport = Arc::new(transport);
        let client = ApiClient::with_transport("http://api.test", DEFAULT_TIMEOUT, transport.clone());
        let accounts = PersistenceBridge::new(
            ApiClient::with_transport("http://accounts.test", DEFAULT_TIMEOUT, transport),
            Arc::new(MemoryTokenStore::new()),
        );
        let (tx, rx) = mpsc::channel();
        (Worker::new(runtime.handle().clone(), client, accounts, tx), rx)
    }

    #[test]
    fn test_health_check_reports_reachability() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let transport = Arc::new(MockTransport::json(200, json!({"status": "ok"})));
        let client = ApiClient::with_transport("http://api.test", DEFAULT_TIMEOUT, transport.clone());
        let accounts = PersistenceBridge::new(client.clone(), Arc::new(MemoryTokenStore::new()));
        let (tx, _rx) = mpsc::channel();
        let online = Worker::new(runtime.handle().clone(), client, accounts, tx);

        assert!(runtime.block_on(online.check_health()).unwrap());
        assert_eq!(transport.requests()[0].url, "http://api.test/health");

        let (offline, _rx) = worker(&runtime, MockTransport::failing("refused"));
        assert!(!runtime.block_on(offline.check_health()).unwrap());
    }

    #[test]
    fn test_processing_result_reaches_channel_and_hook() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (worker, rx) = worker(
            &runtime,
            MockTransport::json(200, json!({"success": true, "data": {"summary": "S"}})),
        );
        let hook = RequestHook::new();

        worker.process(
            Origin::Input,
            hook.clone(),
            Submission::Text {
                text: "hello".into(),
                level: Level::College,
            },
        );

        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            AppEvent::Processed { origin, outcome } => {
                assert_eq!(origin, Origin::Input);
                assert_eq!(outcome.unwrap().data.unwrap().summary, "S");
            }
            other => panic!("unexpected event {:?}", other),
        }
        let state = hook.snapshot();
        assert!(!state.loading);
        assert!(state.data.is_some());
    }

    #[test]
    fn test_failures_arrive_as_messages() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (worker, rx) = worker(&runtime, MockTransport::json(500, json!({"error": "Model overloaded"})));
        let hook = RequestHook::new();

        worker.process(
            Origin::Demo,
            hook.clone(),
            Submission::Text {
                text: "x".into(),
                level: Level::HighSchool,
            },
        );

        let AppEvent::Processed { outcome, .. } = rx.recv_timeout(Duration::from_secs(5)).unwrap() else {
            panic!("expected processed event");
        };
        assert_eq!(outcome.unwrap_err(), "Model overloaded");
        assert_eq!(hook.error().as_deref(), Some("Model overloaded"));
    }

    #[test]
    fn test_account_calls_report_back() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (worker, rx) = worker(&runtime, MockTransport::json(200, json!({"token": "tok"})));

        worker.login("a@b.c".into(), "pw".into());
        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            AppEvent::LoggedIn(Ok(token)) => assert_eq!(token, "tok"),
            other => panic!("unexpected event {:?}", other),
        }
        assert!(worker.accounts().tokens().is_authenticated());
    }
}
