mod alerts;
mod app;
mod ui;

use std::io;
use std::path::PathBuf;

use alerts::Alerts;
use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use studytimer_core::duration::parse_duration;
use studytimer_core::models::{SessionEnd, SessionTimer, StudySession, TimerConfig};
use studytimer_core::storage::{init_config_dir, ConfigStorage};
use studytimer_engine::{IntervalTicker, TimerEngine, TimerEvent};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn setup_logging(level: &str) -> Result<()> {
    let mut log_path = std::env::temp_dir();
    log_path.push("studytimer.log");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "studytimer={level},studytimer_engine={level},studytimer_core={level}"
        ))
    });

    let log_file = std::fs::File::create(log_path)?;
    let subscriber = tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(filter)
        .json()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);

        tracing::error!(?panic_info, "Application panicked");

        original_hook(panic_info);
    }));
}

fn duration_arg(value: &str) -> std::result::Result<u64, String> {
    parse_duration(value).ok_or_else(|| {
        format!("'{}' is not a duration (try 25, 45m, 1h30m or 90s)", value)
    })
}

#[derive(Parser, Debug)]
#[command(name = "studytimer")]
#[command(about = "Focus/break countdown timer for study sessions", long_about = None)]
struct Args {
    /// Focus length for this session, overriding the config
    #[arg(short, long, value_parser = duration_arg)]
    focus: Option<u64>,

    /// Break length for this session, overriding the config
    #[arg(short = 'b', long = "break", value_parser = duration_arg)]
    break_duration: Option<u64>,

    #[arg(short, long, default_value = "Study Session")]
    subject: String,

    #[arg(short, long, default_value = "Focus Time")]
    topic: String,

    /// Directory holding config.json
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable the terminal bell
    #[arg(long)]
    no_audio: bool,

    /// Print the session record as JSON on exit
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_dir = match &args.config {
        Some(dir) => dir.clone(),
        None => init_config_dir()?,
    };
    let storage = ConfigStorage::new(config_dir);
    let config = storage
        .load()
        .with_context(|| format!("Failed to load {}", storage.path().display()))?;

    setup_logging(&config.log_level)?;
    setup_panic_hook();
    info!(config = %storage.path().display(), "StudyTimer starting up");

    let timer_config = match args.break_duration {
        Some(break_duration) => TimerConfig::new(config.timer.focus_duration, break_duration)?,
        None => config.timer,
    };

    let alerts = Alerts::from_config(&config.notifications);
    let timer = SessionTimer::with_focus_override(timer_config, args.focus)?.with_observer(alerts);
    let snapshot = timer.snapshot();
    let session = StudySession::new(&args.subject, &args.topic, snapshot.focus_duration);
    info!(session = %session.id, subject = %session.subject, topic = %session.topic, "Session created");

    let engine = TimerEngine::spawn(timer, IntervalTicker::every_second());
    let events = engine.subscribe();
    let mut app = App::new(engine.clone(), snapshot, session, config.presets)
        .with_audio_alerts(config.notifications.audio_alerts && !args.no_audio);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, events).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = engine.shutdown().await {
        tracing::warn!("Engine already stopped: {}", e);
    }
    result?;

    if app.session.is_active() {
        app.close(SessionEnd::Closed);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&app.session)?);
    } else {
        println!("{}", app.session.summary());
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    mut events: broadcast::Receiver<TimerEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if app.take_bell() {
            alerts::ring_bell(terminal.backend_mut())?;
        }

        if app.should_quit {
            return Ok(());
        }

        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => app.apply_event(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Timer events dropped");
                    app.snapshot = app.engine().snapshot().await?;
                }
                Err(RecvError::Closed) => {
                    tracing::error!("Timer engine stopped unexpectedly");
                    return Ok(());
                }
            },
            _ = tokio::time::sleep(Duration::from_millis(16)) => {
                if event::poll(Duration::from_millis(0))? {
                    match event::read()? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            app.handle_key(key.code, key.modifiers).await?;
                        }
                        Event::Resize(width, height) => {
                            info!(width, height, "Terminal resized");
                        }
                        _ => {}
                    }
                }
            }
        }
    }
}
