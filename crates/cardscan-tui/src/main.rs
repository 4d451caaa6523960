use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cardscan_core::config_file;
use cardscan_core::{DocumentKind, ExtractionBackend, HttpBackend};

mod action;
mod app;
mod backend;
mod input;
mod theme;
mod tui_event;
mod view;

use app::App;

const DEFAULT_FPS: u32 = 10;

/// cardscan: extract Aadhaar and PAN card details from PDFs via an extraction service.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// PDF to select at startup
    pdf: Option<PathBuf>,

    /// Tab the startup PDF goes into: aadhaar or pan
    #[arg(long, default_value = "aadhaar")]
    kind: DocumentKind,

    /// Base URL of the extraction service
    #[arg(long)]
    server: Option<String>,

    /// Directory downloads are written to
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Request timeout in seconds (0 disables it)
    #[arg(long)]
    timeout: Option<u64>,

    /// Color theme: default or mono
    #[arg(long)]
    theme: Option<String>,

    /// Log file (defaults to the platform cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Route tracing output to a file; stdout belongs to the terminal UI.
fn init_logging(log_file: Option<PathBuf>) -> anyhow::Result<Option<WorkerGuard>> {
    let Some(path) = log_file.or_else(|| {
        dirs::cache_dir().map(|d| d.join("cardscan").join("cardscan.log"))
    }) else {
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "cardscan.log".into());

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cardscan_core=info,cardscan_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(Some(guard))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let _log_guard = init_logging(args.log_file.clone())?;

    if let Some(path) = &args.pdf
        && !path.exists()
    {
        anyhow::bail!("PDF file not found: {}", path.display());
    }

    // Resolve config from CLI flags > env vars > config file > defaults
    let file_config = config_file::load_config();
    let mut client_config = file_config.client_config();
    if let Some(url) = args
        .server
        .clone()
        .or_else(|| std::env::var("CARDSCAN_SERVER").ok())
    {
        client_config.base_url = url;
    }
    if let Some(secs) = args.timeout {
        client_config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }
    let export_dir = args
        .export_dir
        .clone()
        .or_else(|| std::env::var("CARDSCAN_EXPORT_DIR").ok().map(PathBuf::from))
        .or_else(|| file_config.export_dir())
        .unwrap_or_else(|| PathBuf::from("."));
    let theme_name = args
        .theme
        .clone()
        .or_else(|| file_config.theme().map(str::to_string))
        .unwrap_or_else(|| "default".to_string());
    let fps = file_config.fps().unwrap_or(DEFAULT_FPS).clamp(1, 120);

    let server_url = client_config.base_url.clone();
    let http = HttpBackend::new(client_config).context("building HTTP client")?;
    tracing::info!(
        backend = http.name(),
        server = %server_url,
        export_dir = %export_dir.display(),
        "starting cardscan"
    );
    let extraction_backend: Arc<dyn ExtractionBackend> = Arc::new(http);

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        );
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let mut app = App::new(theme::Theme::by_name(&theme_name), export_dir, server_url);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<tui_event::BackendCommand>();
    let cancel = CancellationToken::new();
    app.backend_cmd_tx = Some(cmd_tx);

    let listener = backend::spawn_listener(extraction_backend, cmd_rx, event_tx, cancel.clone());

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    if let Some(path) = &args.pdf {
        app.session.tabs.select(args.kind);
        app.select_path(path);
    }

    // Main event loop
    let tick_rate = Duration::from_millis(1000 / u64::from(fps));

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            maybe_event = event_rx.recv() => {
                if let Some(backend_event) = maybe_event {
                    app.handle_backend_event(backend_event);
                    // Drain any additional queued backend events
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_backend_event(evt);
                    }
                }
            }
            _ = async {
                if event::poll(tick_rate).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    app.update(input::map_event(&evt, &app.input_mode));
                }
            } => {}
        }

        app.update(action::Action::Tick);

        if app.should_quit || cancel.is_cancelled() {
            cancel.cancel();
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;

    let _ = listener.await;
    tracing::info!("cardscan exited");
    Ok(())
}
