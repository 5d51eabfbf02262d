//! Page state and transitions for the terminal client. Key handling lives in
//! [`keys`], drawing in [`crate::ui`].

pub mod forms;
mod keys;

pub use forms::{AuthField, AuthForm, InputFocus, InputPage, TextField, MAX_TEXT_CHARS};

use crate::db::TokenStore;
use crate::demo::{DemoOrchestrator, DemoPhase};
use crate::logger;
use crate::models::{HistoryItem, ProcessingResponse};
use crate::navigation::{Navigator, Page, Route};
use crate::persistence::{HistoryOutcome, SaveOutcome};
use crate::request::RequestHook;
use crate::study::{write_export, QuizMode, SpeechEngine, StudyView};
use crate::timer::{earliest, Scheduled};
use crate::worker::{AppEvent, Origin, Worker};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const NOTICE_DURATION: Duration = Duration::from_secs(4);
pub const SIGNUP_REDIRECT_DELAY: Duration = Duration::from_millis(3000);

/// Builds a fresh speech backend for each study view.
pub type SpeechFactory = Box<dyn Fn() -> Box<dyn SpeechEngine>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Transient status line; cleared after [`NOTICE_DURATION`].
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Default)]
pub struct HistoryPage {
    pub items: Vec<HistoryItem>,
    pub selected: usize,
    pub loading: bool,
    pub detail: Option<StudyView>,
}

pub struct App {
    nav: Navigator,
    worker: Worker,
    events: Receiver<AppEvent>,
    speech: SpeechFactory,
    export_dir: PathBuf,
    pub input: InputPage,
    pub processing: RequestHook<ProcessingResponse>,
    submitting: bool,
    pub results: Option<StudyView>,
    saving: bool,
    pub history: HistoryPage,
    pub demo: Option<DemoOrchestrator>,
    pub demo_hook: RequestHook<ProcessingResponse>,
    pub login: AuthForm,
    pub signup: AuthForm,
    notice: Option<Notice>,
    notice_expiry: Scheduled<()>,
    redirect: Scheduled<Route>,
    should_quit: bool,
}

impl App {
    pub fn new(
        worker: Worker,
        events: Receiver<AppEvent>,
        speech: SpeechFactory,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            nav: Navigator::new(),
            worker,
            events,
            speech,
            export_dir,
            input: InputPage::default(),
            processing: RequestHook::new(),
            submitting: false,
            results: None,
            saving: false,
            history: HistoryPage::default(),
            demo: None,
            demo_hook: RequestHook::new(),
            login: AuthForm::default(),
            signup: AuthForm::default(),
            notice: None,
            notice_expiry: Scheduled::new(),
            redirect: Scheduled::new(),
            should_quit: false,
        }
    }

    pub fn page(&self) -> Page {
        self.nav.current()
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        self.worker.accounts().tokens()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens().is_authenticated()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_processing(&self) -> bool {
        self.submitting || self.processing.loading()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn quit(&mut self) {
        let page = self.page();
        self.leave(page);
        self.should_quit = true;
    }

    pub fn notify(&mut self, kind: NoticeKind, message: impl Into<String>, now: Instant) {
        let message = message.into();
        logger::log(&format!("Notice ({:?}): {}", kind, message));
        self.notice = Some(Notice { kind, message });
        self.notice_expiry.schedule(now + NOTICE_DURATION, ());
    }

    /// Moves to `route`, tearing down the page being left and setting up the
    /// one entered. Re-selecting the current page keeps its state, except a
    /// results route that carries a new payload.
    pub fn go(&mut self, route: impl Into<Route>, now: Instant) {
        let route = route.into();
        let from = self.page();
        let to = route.page();
        let reenter = from != to || matches!(route, Route::Results(Some(_)));

        if reenter {
            self.leave(from);
        }
        self.nav.navigate(route);
        if reenter {
            self.enter(to, now);
        }
    }

    fn leave(&mut self, page: Page) {
        match page {
            Page::Results => {
                if let Some(mut view) = self.results.take() {
                    view.teardown();
                }
            }
            Page::History => {
                if let Some(mut view) = self.history.detail.take() {
                    view.teardown();
                }
            }
            Page::Demo => {
                if let Some(mut demo) = self.demo.take() {
                    demo.cancel();
                }
            }
            Page::Signup => self.redirect.cancel(),
            Page::Landing | Page::Input | Page::About | Page::Login => {}
        }
    }

    fn enter(&mut self, page: Page, now: Instant) {
        match page {
            Page::Results => match self.nav.results() {
                Some(result) => {
                    let result = Arc::clone(result);
                    self.results = Some(StudyView::new(result, (self.speech)()));
                }
                None => self.go(Route::Input, now),
            },
            Page::History => {
                if !self.is_authenticated() {
                    self.notify(NoticeKind::Info, "Please log in to view your history", now);
                    self.go(Route::Login, now);
                    return;
                }
                self.history.loading = true;
                self.worker.load_history();
            }
            Page::Demo => {
                self.demo_hook.reset();
                self.demo = Some(DemoOrchestrator::new(now));
            }
            Page::Login => self.login.reset(),
            Page::Signup => self.signup.reset(),
            Page::Landing | Page::Input | Page::About => {}
        }
    }

    /// The study view that has focus on the current page, if any.
    pub fn active_study(&mut self) -> Option<&mut StudyView> {
        match self.page() {
            Page::Results => self.results.as_mut(),
            Page::History => self.history.detail.as_mut(),
            _ => None,
        }
    }

    pub fn submit_input(&mut self, now: Instant) {
        if self.is_processing() {
            return;
        }
        match self.input.submission() {
            Ok(submission) => {
                self.submitting = true;
                self.worker
                    .process(Origin::Input, self.processing.clone(), submission);
            }
            Err(e) => self.notify(NoticeKind::Error, e.to_string(), now),
        }
    }

    pub fn trigger_demo(&mut self) {
        if self.demo_hook.loading() {
            return;
        }
        let Some(demo) = self.demo.as_mut() else {
            return;
        };
        if let Some((text, level)) = demo.trigger() {
            self.worker.process(
                Origin::Demo,
                self.demo_hook.clone(),
                crate::worker::Submission::Text {
                    text: text.to_string(),
                    level,
                },
            );
        }
    }

    pub fn save_results(&mut self, now: Instant) {
        if self.saving {
            return;
        }
        let Some(result) = self.results.as_ref().map(|view| Arc::clone(view.result())) else {
            return;
        };
        if !self.is_authenticated() {
            self.notify(NoticeKind::Info, "Please log in to save your results", now);
            self.go(Route::Login, now);
            return;
        }
        self.saving = true;
        self.worker.save(result);
    }

    pub fn export_results(&mut self, now: Instant) {
        let Some(document) = self.results.as_ref().map(StudyView::export) else {
            return;
        };
        match write_export(&self.export_dir, &document) {
            Ok(path) => {
                self.notify(NoticeKind::Success, format!("Exported to {}", path.display()), now)
            }
            Err(e) => self.notify(NoticeKind::Error, format!("Export failed: {}", e), now),
        }
    }

    pub fn toggle_narration(&mut self, now: Instant) {
        let outcome = self.active_study().map(StudyView::toggle_narration);
        if let Some(Err(e)) = outcome {
            self.notify(NoticeKind::Error, format!("Text-to-speech unavailable: {}", e), now);
        }
    }

    pub fn open_history_item(&mut self) {
        let Some(item) = self.history.items.get(self.history.selected) else {
            return;
        };
        let result = Arc::new(item.to_result());
        self.history.detail = Some(StudyView::with_mode(result, (self.speech)(), QuizMode::Review));
    }

    pub fn close_history_item(&mut self) {
        if let Some(mut view) = self.history.detail.take() {
            view.teardown();
        }
    }

    pub fn reload_history(&mut self) {
        if self.history.loading || !self.is_authenticated() {
            return;
        }
        self.history.loading = true;
        self.worker.load_history();
    }

    pub fn submit_login(&mut self) {
        if self.login.submitting {
            return;
        }
        match self.login.credentials() {
            Ok((email, password)) => {
                self.login.error = None;
                self.login.submitting = true;
                self.worker.login(email, password);
            }
            Err(message) => self.login.error = Some(message),
        }
    }

    pub fn submit_signup(&mut self) {
        if self.signup.submitting || self.signup.success.is_some() {
            return;
        }
        match self.signup.credentials() {
            Ok((email, password)) => {
                self.signup.error = None;
                self.signup.submitting = true;
                self.worker.signup(email, password);
            }
            Err(message) => self.signup.error = Some(message),
        }
    }

    pub fn logout(&mut self, now: Instant) {
        self.worker.accounts().logout();
        self.history.items.clear();
        self.go(Route::Landing, now);
        self.notify(NoticeKind::Info, "Logged out", now);
    }

    pub fn handle_event(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::Processed {
                origin: Origin::Input,
                outcome,
            } => {
                self.submitting = false;
                let Ok(response) = outcome else {
                    // the hook already holds the message
                    return;
                };
                match response.data {
                    Some(data) if response.success => {
                        if self.page() == Page::Input {
                            self.go(Route::results(data), now);
                        } else {
                            logger::log("Processing finished after leaving the input page");
                        }
                    }
                    _ => {
                        let reason = response
                            .error
                            .unwrap_or_else(|| "Processing failed".to_string());
                        self.notify(NoticeKind::Error, reason, now);
                    }
                }
            }
            AppEvent::Processed {
                origin: Origin::Demo,
                outcome,
            } => {
                if let Some(demo) = self.demo.as_mut()
                    && demo.phase() == DemoPhase::Processing
                {
                    demo.complete(outcome.as_ref().ok(), now);
                }
            }
            AppEvent::Saved(outcome) => {
                self.saving = false;
                match outcome {
                    SaveOutcome::Saved => {
                        self.notify(NoticeKind::Success, "Results saved to your history!", now)
                    }
                    SaveOutcome::LoginRequired => {
                        self.notify(NoticeKind::Info, "Please log in to save your results", now);
                        self.go(Route::Login, now);
                    }
                    SaveOutcome::Failed(message) => self.notify(NoticeKind::Error, message, now),
                }
            }
            AppEvent::HistoryLoaded(outcome) => {
                self.history.loading = false;
                match outcome {
                    HistoryOutcome::Loaded(items) => {
                        self.history.selected = self.history.selected.min(items.len().saturating_sub(1));
                        self.history.items = items;
                    }
                    HistoryOutcome::LoginRequired => {
                        if self.page() == Page::History {
                            self.go(Route::Login, now);
                        }
                    }
                }
            }
            AppEvent::LoggedIn(outcome) => {
                self.login.submitting = false;
                match outcome {
                    Ok(_) => {
                        self.login.reset();
                        self.go(Route::Input, now);
                        self.notify(NoticeKind::Success, "Logged in", now);
                    }
                    Err(message) => self.login.error = Some(message),
                }
            }
            AppEvent::SignedUp(outcome) => {
                self.signup.submitting = false;
                match outcome {
                    Ok(()) => {
                        self.signup.success =
                            Some("Account created! Redirecting to login...".to_string());
                        if self.page() == Page::Signup {
                            self.redirect.schedule(now + SIGNUP_REDIRECT_DELAY, Route::Login);
                        }
                    }
                    Err(message) => self.signup.error = Some(message),
                }
            }
        }
    }

    /// Applies every completed background call.
    pub fn drain_events(&mut self, now: Instant) {
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event, now);
        }
    }

    /// Fires due timers: quiz and deck steps, demo typing and hand-off, the
    /// signup redirect and notice expiry.
    pub fn tick(&mut self, now: Instant) {
        for view in [self.results.as_mut(), self.history.detail.as_mut()]
            .into_iter()
            .flatten()
        {
            view.tick(now);
            view.narration();
        }

        if let Some(route) = self.demo.as_mut().and_then(|demo| demo.tick(now)) {
            self.go(route, now);
        }
        if let Some(route) = self.redirect.take_due(now) {
            self.go(route, now);
        }
        if self.notice_expiry.take_due(now).is_some() {
            self.notice = None;
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([
            self.results.as_ref().and_then(StudyView::next_deadline),
            self.history.detail.as_ref().and_then(StudyView::next_deadline),
            self.demo.as_ref().and_then(DemoOrchestrator::next_deadline),
            self.redirect.deadline(),
            self.notice_expiry.deadline(),
        ])
    }
}

#[cfg(test)]
pub(crate) mod tests_support {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::{ApiClient, DEFAULT_TIMEOUT};
    use crate::db::MemoryTokenStore;
    use crate::persistence::PersistenceBridge;
    use crate::study::narration::mock::RecordingSpeech;
    use std::sync::mpsc;

    pub struct Harness {
        pub app: App,
        pub transport: Arc<MockTransport>,
        _runtime: tokio::runtime::Runtime,
    }

    impl Harness {
        /// An app whose backend answers every call with an empty JSON object.
        pub fn offline() -> Self {
            Self::new(MockTransport::json(200, serde_json::json!({})), MemoryTokenStore::new())
        }

        pub fn new(transport: MockTransport, tokens: MemoryTokenStore) -> Self {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let transport = Arc::new(transport);
            let client = ApiClient::with_transport("http://api.test", DEFAULT_TIMEOUT, transport.clone());
            let accounts = PersistenceBridge::new(
                ApiClient::with_transport("http://accounts.test", DEFAULT_TIMEOUT, transport.clone()),
                Arc::new(tokens),
            );
            let (tx, rx) = mpsc::channel();
            let worker = Worker::new(runtime.handle().clone(), client, accounts, tx);
            let speech: SpeechFactory = Box::new(|| {
                let (engine, _) = RecordingSpeech::new(&["Samantha"]);
                Box::new(engine)
            });
            let app = App::new(worker, rx, speech, std::env::temp_dir());
            Self {
                app,
                transport,
                _runtime: runtime,
            }
        }

        /// Waits for the next background completion and applies it.
        pub fn settle(&mut self, now: Instant) {
            let event = self
                .app
                .events
                .recv_timeout(Duration::from_secs(5))
                .expect("background call did not finish");
            self.app.handle_event(event, now);
        }
    }
}
