use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use studybridge::app::SpeechFactory;
use studybridge::db::{MemoryTokenStore, SqliteTokenStore, TokenStore};
use studybridge::study::{CommandSpeech, SpeechEngine};
use studybridge::{draw, logger, ApiClient, App, Config, PersistenceBridge, Worker};

/// Upper bound on how long the loop sleeps, so finished speech and background
/// results are picked up promptly.
const MAX_POLL_INTERVAL: Duration = Duration::from_millis(100);

fn open_token_store(config: &Config) -> Arc<dyn TokenStore> {
    match SqliteTokenStore::open(&config.db_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            logger::log(&format!(
                "Could not open token database at {}: {}. Sessions will not persist.",
                config.db_path.display(),
                e
            ));
            Arc::new(MemoryTokenStore::new())
        }
    }
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        let now = Instant::now();
        app.drain_events(now);
        app.tick(now);
        if app.should_quit() {
            return Ok(());
        }

        terminal.draw(|f| draw(f, app))?;

        let now = Instant::now();
        let timeout = app
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(MAX_POLL_INTERVAL)
            .min(MAX_POLL_INTERVAL);

        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key, Instant::now());
        }
    }
}

fn main() -> io::Result<()> {
    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    logger::init(&config.log_path);
    logger::log("Starting studybridge");

    let runtime = tokio::runtime::Runtime::new()?;
    let tokens = open_token_store(&config);
    let client = ApiClient::new(&config.api_url, config.timeout);
    let accounts = PersistenceBridge::new(ApiClient::new(&config.user_url, config.timeout), tokens);
    let (tx, rx) = mpsc::channel();
    let worker = Worker::new(runtime.handle().clone(), client, accounts, tx);
    // result is only logged
    let _ = worker.check_health();

    let tts_command = config.tts_command.clone();
    let voices = config.voices.clone();
    let speech: SpeechFactory = Box::new(move || -> Box<dyn SpeechEngine> {
        Box::new(CommandSpeech::new(&tts_command, &voices))
    });
    let mut app = App::new(worker, rx, speech, config.export_dir.clone());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        logger::log(&format!("Exited with error: {}", e));
    }
    logger::log("Shutting down");
    result
}
