pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod demo;
pub mod error;
pub mod logger;
pub mod models;
pub mod navigation;
pub mod persistence;
pub mod request;
pub mod study;
pub mod timer;
pub mod ui;
pub mod utils;
pub mod worker;

// Re-exports for convenience
pub use api::{ApiClient, RequestOptions, Transport};
pub use app::App;
pub use config::Config;
pub use demo::DemoOrchestrator;
pub use error::{ApiError, InputError};
pub use models::{Flashcard, HistoryItem, Level, ProcessingResponse, ProcessingResult, QuizItem};
pub use navigation::{Navigator, Page, Route};
pub use persistence::PersistenceBridge;
pub use request::{RequestHook, RequestState};
pub use study::StudyView;
pub use ui::draw;
pub use utils::calculate_wrapped_cursor_position;
pub use worker::{AppEvent, Worker};
